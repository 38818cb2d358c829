use crate::layers::layer::{Layer, Param};
use crate::tensor::Tensor;

/// An ordered sequence of layers with a declared per-sample input shape.
///
/// The model owns its trainable parameters (inside the layers) for the whole
/// process lifetime; only the trainer mutates them. `forward` threads a
/// batched tensor through every layer, `backward` walks the layers in
/// reverse and accumulates parameter gradients as a side effect.
pub struct Model {
    pub input_shape: Vec<usize>,
    pub layers: Vec<Box<dyn Layer + Send>>,
}

impl Model {
    pub fn new(input_shape: Vec<usize>, layers: Vec<Box<dyn Layer + Send>>) -> Model {
        Model {
            input_shape,
            layers,
        }
    }

    /// Forward pass over a `[batch, ...input_shape]` tensor. Each layer
    /// caches what its backward pass needs, so a `backward` call is only
    /// valid right after the corresponding `forward`.
    pub fn forward(&mut self, input: &Tensor, training: bool) -> Tensor {
        let mut current = input.clone();
        for layer in self.layers.iter_mut() {
            current = layer.forward(&current, training);
        }
        current
    }

    /// Backward pass from an output-space gradient; returns the gradient
    /// with respect to the model input (needed to chain the generator behind
    /// the discriminator).
    pub fn backward(&mut self, grad_out: &Tensor) -> Tensor {
        let mut delta = grad_out.clone();
        for layer in self.layers.iter_mut().rev() {
            delta = layer.backward(&delta);
        }
        delta
    }

    pub fn zero_grads(&mut self) {
        for layer in self.layers.iter_mut() {
            for param in layer.params_mut() {
                param.zero_grad();
            }
        }
    }

    /// All trainable parameters in a stable (layer, then within-layer) order.
    pub fn params_mut(&mut self) -> Vec<&mut Param> {
        self.layers
            .iter_mut()
            .flat_map(|layer| layer.params_mut())
            .collect()
    }

    /// Per-sample output shape, computed without running a forward pass.
    pub fn output_shape(&self) -> Vec<usize> {
        let mut shape = self.input_shape.clone();
        for layer in self.layers.iter() {
            shape = layer.output_shape(&shape);
        }
        shape
    }
}
