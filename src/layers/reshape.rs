use crate::layers::layer::Layer;
use crate::tensor::Tensor;

/// Reinterprets each sample as `target` shape; the batch dimension is kept.
/// The generator uses this to turn its 1024-wide projection into a 4×4×64
/// spatial volume.
pub struct Reshape {
    pub target: Vec<usize>,
    cached_input_shape: Vec<usize>,
}

impl Reshape {
    pub fn new(target: Vec<usize>) -> Reshape {
        Reshape {
            target,
            cached_input_shape: Vec::new(),
        }
    }
}

impl Layer for Reshape {
    fn forward(&mut self, input: &Tensor, _training: bool) -> Tensor {
        let batch = input.shape[0];
        let mut shape = vec![batch];
        shape.extend_from_slice(&self.target);
        self.cached_input_shape = input.shape.clone();
        input.reshape(&shape)
    }

    fn backward(&mut self, grad_out: &Tensor) -> Tensor {
        grad_out.reshape(&self.cached_input_shape)
    }

    fn output_shape(&self, input_shape: &[usize]) -> Vec<usize> {
        assert_eq!(
            input_shape.iter().product::<usize>(),
            self.target.iter().product::<usize>(),
            "reshape cannot change per-sample element count"
        );
        self.target.clone()
    }
}

/// Collapses each sample to a flat vector ahead of the discriminator's
/// logit head.
pub struct Flatten {
    cached_input_shape: Vec<usize>,
}

impl Flatten {
    pub fn new() -> Flatten {
        Flatten {
            cached_input_shape: Vec::new(),
        }
    }
}

impl Default for Flatten {
    fn default() -> Self {
        Flatten::new()
    }
}

impl Layer for Flatten {
    fn forward(&mut self, input: &Tensor, _training: bool) -> Tensor {
        let batch = input.shape[0];
        let per_sample = input.numel() / batch;
        self.cached_input_shape = input.shape.clone();
        input.reshape(&[batch, per_sample])
    }

    fn backward(&mut self, grad_out: &Tensor) -> Tensor {
        grad_out.reshape(&self.cached_input_shape)
    }

    fn output_shape(&self, input_shape: &[usize]) -> Vec<usize> {
        vec![input_shape.iter().product()]
    }
}
