use crate::tensor::Tensor;

/// A trainable parameter: its current value plus the gradient accumulated by
/// the most recent backward pass(es). Gradients are summed across backward
/// calls so a loss with several terms (the discriminator's real + fake pass)
/// can accumulate before the optimizer step; call `zero_grad` between
/// gradient computations.
#[derive(Debug, Clone)]
pub struct Param {
    pub value: Tensor,
    pub grad: Tensor,
}

impl Param {
    pub fn new(value: Tensor) -> Param {
        let grad = Tensor::zeros(&value.shape);
        Param { value, grad }
    }

    pub fn zero_grad(&mut self) {
        for g in self.grad.data.iter_mut() {
            *g = 0.0;
        }
    }
}

/// Weight initialization scheme, chosen per layer by the model factory
/// according to the activation that follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Init {
    /// N(0, sqrt(2 / fan_in)) — before ReLU-family activations.
    He,
    /// N(0, sqrt(1 / fan_in)) — before Tanh/Identity outputs.
    Xavier,
}

impl Init {
    pub fn sample(&self, shape: &[usize], fan_in: usize) -> Tensor {
        match self {
            Init::He => Tensor::he(shape, fan_in),
            Init::Xavier => Tensor::xavier(shape, fan_in),
        }
    }
}

/// One step of a model's forward/backward pipeline.
///
/// `forward` must cache whatever its backward pass needs (inputs,
/// pre-activations, masks); `backward` consumes that cache, accumulates
/// parameter gradients into the layer's `Param`s, and returns the gradient
/// with respect to the layer's input. A `backward` call is only valid
/// immediately after the `forward` call it corresponds to.
///
/// All tensors carry a leading batch dimension; `output_shape` operates on
/// the per-sample shape (batch dimension excluded).
pub trait Layer {
    fn forward(&mut self, input: &Tensor, training: bool) -> Tensor;

    fn backward(&mut self, grad_out: &Tensor) -> Tensor;

    fn output_shape(&self, input_shape: &[usize]) -> Vec<usize>;

    /// Trainable parameters in a stable order. Stateless layers return none.
    fn params_mut(&mut self) -> Vec<&mut Param> {
        Vec::new()
    }
}
