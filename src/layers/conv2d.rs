use crate::layers::layer::{Init, Layer, Param};
use crate::tensor::Tensor;

/// "same" padding bookkeeping: output extent and leading pad for one
/// spatial dimension. `out = ceil(in / stride)`; the total pad is split with
/// the smaller half first, matching the convention the reference models use.
pub(crate) fn same_padding(input: usize, kernel: usize, stride: usize) -> (usize, usize) {
    let out = (input + stride - 1) / stride;
    let needed = (out - 1) * stride + kernel;
    let pad_total = needed.saturating_sub(input);
    (out, pad_total / 2)
}

/// Strided 2D convolution over `[batch, h, w, channels]` with "same"
/// padding. Weights are laid out `[k, k, in_channels, out_channels]`.
pub struct Conv2d {
    pub in_channels: usize,
    pub out_channels: usize,
    pub kernel: usize,
    pub stride: usize,
    weights: Param,
    bias: Param,
    cached_input: Tensor,
}

impl Conv2d {
    pub fn new(
        in_channels: usize,
        out_channels: usize,
        kernel: usize,
        stride: usize,
        init: Init,
    ) -> Conv2d {
        let fan_in = kernel * kernel * in_channels;
        let weights = Param::new(init.sample(&[kernel, kernel, in_channels, out_channels], fan_in));
        let bias = Param::new(Tensor::zeros(&[out_channels]));
        Conv2d {
            in_channels,
            out_channels,
            kernel,
            stride,
            weights,
            bias,
            cached_input: Tensor::zeros(&[0]),
        }
    }

    fn w(&self, kh: usize, kw: usize, ic: usize, oc: usize) -> f64 {
        let k = self.kernel;
        self.weights.value.data[((kh * k + kw) * self.in_channels + ic) * self.out_channels + oc]
    }
}

impl Layer for Conv2d {
    fn forward(&mut self, input: &Tensor, _training: bool) -> Tensor {
        let (batch, h, w, c) = (input.shape[0], input.shape[1], input.shape[2], input.shape[3]);
        assert_eq!(c, self.in_channels, "conv2d channel mismatch");

        let (oh_n, pad_h) = same_padding(h, self.kernel, self.stride);
        let (ow_n, pad_w) = same_padding(w, self.kernel, self.stride);
        let mut out = Tensor::zeros(&[batch, oh_n, ow_n, self.out_channels]);

        for b in 0..batch {
            for oh in 0..oh_n {
                for ow in 0..ow_n {
                    for oc in 0..self.out_channels {
                        let mut sum = self.bias.value.data[oc];
                        for kh in 0..self.kernel {
                            let ih = (oh * self.stride + kh) as isize - pad_h as isize;
                            if ih < 0 || ih >= h as isize {
                                continue;
                            }
                            for kw in 0..self.kernel {
                                let iw = (ow * self.stride + kw) as isize - pad_w as isize;
                                if iw < 0 || iw >= w as isize {
                                    continue;
                                }
                                let base = ((b * h + ih as usize) * w + iw as usize) * c;
                                for ic in 0..c {
                                    sum += input.data[base + ic] * self.w(kh, kw, ic, oc);
                                }
                            }
                        }
                        out.data[((b * oh_n + oh) * ow_n + ow) * self.out_channels + oc] = sum;
                    }
                }
            }
        }
        self.cached_input = input.clone();
        out
    }

    fn backward(&mut self, grad_out: &Tensor) -> Tensor {
        let input = &self.cached_input;
        let (batch, h, w, c) = (input.shape[0], input.shape[1], input.shape[2], input.shape[3]);
        let (oh_n, pad_h) = same_padding(h, self.kernel, self.stride);
        let (ow_n, pad_w) = same_padding(w, self.kernel, self.stride);
        let k = self.kernel;
        let mut grad_in = Tensor::zeros(&input.shape);

        for b in 0..batch {
            for oh in 0..oh_n {
                for ow in 0..ow_n {
                    for oc in 0..self.out_channels {
                        let d = grad_out.data[((b * oh_n + oh) * ow_n + ow) * self.out_channels + oc];
                        self.bias.grad.data[oc] += d;
                        for kh in 0..k {
                            let ih = (oh * self.stride + kh) as isize - pad_h as isize;
                            if ih < 0 || ih >= h as isize {
                                continue;
                            }
                            for kw in 0..k {
                                let iw = (ow * self.stride + kw) as isize - pad_w as isize;
                                if iw < 0 || iw >= w as isize {
                                    continue;
                                }
                                let base = ((b * h + ih as usize) * w + iw as usize) * c;
                                for ic in 0..c {
                                    let widx =
                                        ((kh * k + kw) * self.in_channels + ic) * self.out_channels + oc;
                                    self.weights.grad.data[widx] += input.data[base + ic] * d;
                                    grad_in.data[base + ic] += self.weights.value.data[widx] * d;
                                }
                            }
                        }
                    }
                }
            }
        }
        grad_in
    }

    fn output_shape(&self, input_shape: &[usize]) -> Vec<usize> {
        let (oh, _) = same_padding(input_shape[0], self.kernel, self.stride);
        let (ow, _) = same_padding(input_shape[1], self.kernel, self.stride);
        vec![oh, ow, self.out_channels]
    }

    fn params_mut(&mut self) -> Vec<&mut Param> {
        vec![&mut self.weights, &mut self.bias]
    }
}
