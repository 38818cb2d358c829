use crate::layers::layer::Layer;
use crate::tensor::Tensor;
use rand::prelude::*;

/// Inverted dropout: each unit is zeroed with probability `rate` during
/// training and the survivors are scaled by `1/(1-rate)` so inference is a
/// plain identity pass.
pub struct Dropout {
    pub rate: f64,
    cached_mask: Tensor,
}

impl Dropout {
    pub fn new(rate: f64) -> Dropout {
        assert!((0.0..1.0).contains(&rate), "dropout rate must be in [0, 1)");
        Dropout {
            rate,
            cached_mask: Tensor::zeros(&[0]),
        }
    }
}

impl Layer for Dropout {
    fn forward(&mut self, input: &Tensor, training: bool) -> Tensor {
        if !training {
            return input.clone();
        }
        let keep = 1.0 - self.rate;
        let mut rng = rand::thread_rng();
        let mut mask = Tensor::zeros(&input.shape);
        for m in mask.data.iter_mut() {
            *m = if rng.gen::<f64>() < keep { 1.0 / keep } else { 0.0 };
        }
        let out = input.zip_map(&mask, |x, m| x * m);
        self.cached_mask = mask;
        out
    }

    fn backward(&mut self, grad_out: &Tensor) -> Tensor {
        grad_out.zip_map(&self.cached_mask, |d, m| d * m)
    }

    fn output_shape(&self, input_shape: &[usize]) -> Vec<usize> {
        input_shape.to_vec()
    }
}
