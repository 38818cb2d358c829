use crate::layers::layer::{Init, Layer, Param};
use crate::tensor::Tensor;

/// Transposed (fractionally strided) 2D convolution with "same" padding:
/// the exact adjoint of a `Conv2d` that would map the output extent back to
/// the input extent. With stride `s` the spatial size grows by a factor of
/// `s`; the generator uses three of these to go 4×4 → 32×32.
///
/// Weights are `[k, k, in_channels, out_channels]`, bias-free (normalization
/// follows every hidden block and the output block feeds straight into tanh).
pub struct Conv2dTranspose {
    pub in_channels: usize,
    pub out_channels: usize,
    pub kernel: usize,
    pub stride: usize,
    weights: Param,
    cached_input: Tensor,
}

impl Conv2dTranspose {
    pub fn new(
        in_channels: usize,
        out_channels: usize,
        kernel: usize,
        stride: usize,
        init: Init,
    ) -> Conv2dTranspose {
        let fan_in = kernel * kernel * in_channels;
        let weights = Param::new(init.sample(&[kernel, kernel, in_channels, out_channels], fan_in));
        Conv2dTranspose {
            in_channels,
            out_channels,
            kernel,
            stride,
            weights,
            cached_input: Tensor::zeros(&[0]),
        }
    }

    /// Leading pad of the equivalent forward "same" convolution
    /// (out·s → out): total pad is `k - s`, split smaller half first.
    fn pad_begin(&self) -> usize {
        self.kernel.saturating_sub(self.stride) / 2
    }

    fn w(&self, kh: usize, kw: usize, ic: usize, oc: usize) -> f64 {
        let k = self.kernel;
        self.weights.value.data[((kh * k + kw) * self.in_channels + ic) * self.out_channels + oc]
    }
}

impl Layer for Conv2dTranspose {
    fn forward(&mut self, input: &Tensor, _training: bool) -> Tensor {
        let (batch, h, w, c) = (input.shape[0], input.shape[1], input.shape[2], input.shape[3]);
        assert_eq!(c, self.in_channels, "conv2d_transpose channel mismatch");

        let (oh_n, ow_n) = (h * self.stride, w * self.stride);
        let pad = self.pad_begin() as isize;
        let mut out = Tensor::zeros(&[batch, oh_n, ow_n, self.out_channels]);

        // Scatter-add: every input pixel spreads through the kernel window.
        for b in 0..batch {
            for ih in 0..h {
                for iw in 0..w {
                    let in_base = ((b * h + ih) * w + iw) * c;
                    for kh in 0..self.kernel {
                        let oh = (ih * self.stride + kh) as isize - pad;
                        if oh < 0 || oh >= oh_n as isize {
                            continue;
                        }
                        for kw in 0..self.kernel {
                            let ow = (iw * self.stride + kw) as isize - pad;
                            if ow < 0 || ow >= ow_n as isize {
                                continue;
                            }
                            let out_base = ((b * oh_n + oh as usize) * ow_n + ow as usize)
                                * self.out_channels;
                            for ic in 0..c {
                                let x = input.data[in_base + ic];
                                for oc in 0..self.out_channels {
                                    out.data[out_base + oc] += x * self.w(kh, kw, ic, oc);
                                }
                            }
                        }
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
        let (oh_n, ow_n) = (h * self.stride, w * self.stride);
        let pad = self.pad_begin() as isize;
        let k = self.kernel;
        let mut grad_in = Tensor::zeros(&input.shape);

        // Gather: the adjoint of the scatter above.
        for b in 0..batch {
            for ih in 0..h {
                for iw in 0..w {
                    let in_base = ((b * h + ih) * w + iw) * c;
                    for kh in 0..k {
                        let oh = (ih * self.stride + kh) as isize - pad;
                        if oh < 0 || oh >= oh_n as isize {
                            continue;
                        }
                        for kw in 0..k {
                            let ow = (iw * self.stride + kw) as isize - pad;
                            if ow < 0 || ow >= ow_n as isize {
                                continue;
                            }
                            let out_base = ((b * oh_n + oh as usize) * ow_n + ow as usize)
                                * self.out_channels;
                            for ic in 0..c {
                                let x = input.data[in_base + ic];
                                let mut acc = 0.0;
                                for oc in 0..self.out_channels {
                                    let d = grad_out.data[out_base + oc];
                                    let widx = ((kh * k + kw) * self.in_channels + ic)
                                        * self.out_channels
                                        + oc;
                                    self.weights.grad.data[widx] += x * d;
                                    acc += self.weights.value.data[widx] * d;
                                }
                                grad_in.data[in_base + ic] += acc;
                            }
                        }
                    }
                }
            }
        }
        grad_in
    }

    fn output_shape(&self, input_shape: &[usize]) -> Vec<usize> {
        vec![
            input_shape[0] * self.stride,
            input_shape[1] * self.stride,
            self.out_channels,
        ]
    }

    fn params_mut(&mut self) -> Vec<&mut Param> {
        vec![&mut self.weights]
    }
}
