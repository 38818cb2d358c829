use crate::layers::layer::{Layer, Param};
use crate::tensor::Tensor;

const EPS: f64 = 1e-3;
const MOMENTUM: f64 = 0.99;

/// Batch normalization over the channel (last) axis.
///
/// Training normalizes with the current batch's statistics and folds them
/// into running averages; inference uses the running averages, so a
/// single-image `generate` call is well-defined even for batch size 1.
pub struct BatchNorm {
    pub channels: usize,
    gamma: Param,
    beta: Param,
    running_mean: Tensor,
    running_var: Tensor,
    // Forward cache (training mode only).
    cached_x_hat: Tensor,
    cached_std: Vec<f64>,
}

impl BatchNorm {
    pub fn new(channels: usize) -> BatchNorm {
        BatchNorm {
            channels,
            gamma: Param::new(Tensor::from_shape_data(&[channels], vec![1.0; channels])),
            beta: Param::new(Tensor::zeros(&[channels])),
            running_mean: Tensor::zeros(&[channels]),
            running_var: Tensor::from_shape_data(&[channels], vec![1.0; channels]),
            cached_x_hat: Tensor::zeros(&[0]),
            cached_std: Vec::new(),
        }
    }
}

impl Layer for BatchNorm {
    fn forward(&mut self, input: &Tensor, training: bool) -> Tensor {
        let c = self.channels;
        assert_eq!(
            *input.shape.last().unwrap(),
            c,
            "batch norm channel mismatch"
        );
        let n = input.numel() / c; // samples per channel (batch × spatial)
        let mut out = Tensor::zeros(&input.shape);

        if !training {
            for (idx, &x) in input.data.iter().enumerate() {
                let ch = idx % c;
                let x_hat = (x - self.running_mean.data[ch])
                    / (self.running_var.data[ch] + EPS).sqrt();
                out.data[idx] = self.gamma.value.data[ch] * x_hat + self.beta.value.data[ch];
            }
            return out;
        }

        // Per-channel batch mean and (biased) variance.
        let mut mean = vec![0.0; c];
        let mut var = vec![0.0; c];
        for (idx, &x) in input.data.iter().enumerate() {
            mean[idx % c] += x;
        }
        for m in mean.iter_mut() {
            *m /= n as f64;
        }
        for (idx, &x) in input.data.iter().enumerate() {
            let d = x - mean[idx % c];
            var[idx % c] += d * d;
        }
        for v in var.iter_mut() {
            *v /= n as f64;
        }

        let std: Vec<f64> = var.iter().map(|&v| (v + EPS).sqrt()).collect();
        let mut x_hat = Tensor::zeros(&input.shape);
        for (idx, &x) in input.data.iter().enumerate() {
            let ch = idx % c;
            let xh = (x - mean[ch]) / std[ch];
            x_hat.data[idx] = xh;
            out.data[idx] = self.gamma.value.data[ch] * xh + self.beta.value.data[ch];
        }

        for ch in 0..c {
            self.running_mean.data[ch] =
                MOMENTUM * self.running_mean.data[ch] + (1.0 - MOMENTUM) * mean[ch];
            self.running_var.data[ch] =
                MOMENTUM * self.running_var.data[ch] + (1.0 - MOMENTUM) * var[ch];
        }

        self.cached_x_hat = x_hat;
        self.cached_std = std;
        out
    }

    fn backward(&mut self, grad_out: &Tensor) -> Tensor {
        let c = self.channels;
        let n = grad_out.numel() / c;
        let x_hat = &self.cached_x_hat;

        // Per-channel reductions of the incoming gradient.
        let mut sum_dy = vec![0.0; c];
        let mut sum_dy_xhat = vec![0.0; c];
        for (idx, &dy) in grad_out.data.iter().enumerate() {
            let ch = idx % c;
            sum_dy[ch] += dy;
            sum_dy_xhat[ch] += dy * x_hat.data[idx];
        }

        for ch in 0..c {
            self.beta.grad.data[ch] += sum_dy[ch];
            self.gamma.grad.data[ch] += sum_dy_xhat[ch];
        }

        // dx = γ/(N·σ) · (N·dy − Σdy − x̂·Σ(dy·x̂))
        let mut grad_in = Tensor::zeros(&grad_out.shape);
        let n_f = n as f64;
        for (idx, &dy) in grad_out.data.iter().enumerate() {
            let ch = idx % c;
            let scale = self.gamma.value.data[ch] / (n_f * self.cached_std[ch]);
            grad_in.data[idx] =
                scale * (n_f * dy - sum_dy[ch] - x_hat.data[idx] * sum_dy_xhat[ch]);
        }
        grad_in
    }

    fn output_shape(&self, input_shape: &[usize]) -> Vec<usize> {
        input_shape.to_vec()
    }

    fn params_mut(&mut self) -> Vec<&mut Param> {
        vec![&mut self.gamma, &mut self.beta]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn training_output_is_normalized() {
        let mut bn = BatchNorm::new(1);
        let input = Tensor::from_shape_data(&[4, 1], vec![1.0, 2.0, 3.0, 4.0]);
        let out = bn.forward(&input, true);

        let mean: f64 = out.data.iter().sum::<f64>() / 4.0;
        assert!(mean.abs() < 1e-9);
        // Variance just under 1 because of ε.
        let var: f64 = out.data.iter().map(|&x| x * x).sum::<f64>() / 4.0;
        assert!(var < 1.0 && var > 0.9);
    }

    #[test]
    fn gradient_sums_vanish_per_channel() {
        // The batch-stat backward projects out the mean and x̂ components,
        // so Σ dx and Σ dx·x̂ are both zero per channel.
        let mut bn = BatchNorm::new(2);
        let input = Tensor::random_uniform(&[6, 2], -2.0, 2.0);
        bn.forward(&input, true);

        let grad_out = Tensor::random_uniform(&[6, 2], -1.0, 1.0);
        let grad_in = bn.backward(&grad_out);

        for ch in 0..2 {
            let sum: f64 = grad_in.data.iter().skip(ch).step_by(2).sum();
            assert!(sum.abs() < 1e-9);
        }
    }

    #[test]
    fn inference_uses_running_statistics() {
        let mut bn = BatchNorm::new(1);
        // Fresh layer: running mean 0, running var 1 → near-identity.
        let input = Tensor::from_shape_data(&[2, 1], vec![0.5, -0.5]);
        let out = bn.forward(&input, false);
        assert!((out.data[0] - 0.5).abs() < 1e-3);
        assert!((out.data[1] - -0.5).abs() < 1e-3);
    }
}
