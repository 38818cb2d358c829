use crate::activation::ActivationFunction;
use crate::layers::layer::Layer;
use crate::tensor::Tensor;

/// Standalone element-wise activation step. Kept separate from the linear
/// layers because normalization sits between the linear transform and its
/// nonlinearity in every generator block.
pub struct Activation {
    pub function: ActivationFunction,
    cached_input: Tensor,
}

impl Activation {
    pub fn new(function: ActivationFunction) -> Activation {
        Activation {
            function,
            cached_input: Tensor::zeros(&[0]),
        }
    }
}

impl Layer for Activation {
    fn forward(&mut self, input: &Tensor, _training: bool) -> Tensor {
        let out = input.map(|x| self.function.function(x));
        self.cached_input = input.clone();
        out
    }

    fn backward(&mut self, grad_out: &Tensor) -> Tensor {
        // δ_in = δ_out ⊙ f'(z), with z the cached pre-activation.
        grad_out.zip_map(&self.cached_input, |d, z| d * self.function.derivative(z))
    }

    fn output_shape(&self, input_shape: &[usize]) -> Vec<usize> {
        input_shape.to_vec()
    }
}
