use crate::layers::layer::{Init, Layer, Param};
use crate::tensor::Tensor;

/// Fully connected layer: `y = xW (+ b)` over a `[batch, input]` tensor.
///
/// The generator's projection layer runs without bias (normalization follows
/// it immediately); the discriminator's logit head keeps its bias.
pub struct Dense {
    pub input: usize,
    pub output: usize,
    weights: Param,
    bias: Option<Param>,
    cached_input: Tensor,
}

impl Dense {
    pub fn new(input: usize, output: usize, use_bias: bool, init: Init) -> Dense {
        let weights = Param::new(init.sample(&[input, output], input));
        let bias = if use_bias {
            Some(Param::new(Tensor::zeros(&[output])))
        } else {
            None
        };
        Dense {
            input,
            output,
            weights,
            bias,
            cached_input: Tensor::zeros(&[0]),
        }
    }
}

impl Layer for Dense {
    fn forward(&mut self, input: &Tensor, _training: bool) -> Tensor {
        let batch = input.shape[0];
        assert_eq!(input.shape[1], self.input, "dense input width mismatch");

        let mut out = Tensor::zeros(&[batch, self.output]);
        for b in 0..batch {
            for o in 0..self.output {
                let mut sum = match &self.bias {
                    Some(bias) => bias.value.data[o],
                    None => 0.0,
                };
                for i in 0..self.input {
                    sum += input.data[b * self.input + i] * self.weights.value.data[i * self.output + o];
                }
                out.data[b * self.output + o] = sum;
            }
        }
        self.cached_input = input.clone();
        out
    }

    fn backward(&mut self, grad_out: &Tensor) -> Tensor {
        let batch = grad_out.shape[0];
        let input = &self.cached_input;
        let mut grad_in = Tensor::zeros(&input.shape);

        for b in 0..batch {
            for o in 0..self.output {
                let d = grad_out.data[b * self.output + o];
                if let Some(bias) = &mut self.bias {
                    bias.grad.data[o] += d;
                }
                for i in 0..self.input {
                    self.weights.grad.data[i * self.output + o] += input.data[b * self.input + i] * d;
                    grad_in.data[b * self.input + i] += self.weights.value.data[i * self.output + o] * d;
                }
            }
        }
        grad_in
    }

    fn output_shape(&self, input_shape: &[usize]) -> Vec<usize> {
        assert_eq!(input_shape, [self.input], "dense input shape mismatch");
        vec![self.output]
    }

    fn params_mut(&mut self) -> Vec<&mut Param> {
        let mut params = vec![&mut self.weights];
        if let Some(bias) = &mut self.bias {
            params.push(bias);
        }
        params
    }
}
