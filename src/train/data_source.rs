use crate::tensor::Tensor;

/// Produces training batches of the shape the discriminator expects.
///
/// The trainer only ever sees this trait, so a real dataset loader could be
/// substituted without touching the training loop.
pub trait DataSource {
    /// Returns a fresh `[batch_size, H, W, 3]` batch. The caller consumes
    /// and drops it within one training step.
    fn next_batch(&mut self, batch_size: usize) -> Tensor;
}

/// The reference data source: uniform random pixels in [0, 1). No real
/// corpus is involved; the adversarial pair trains purely against noise.
pub struct UniformNoiseSource {
    pub image_size: usize,
}

impl UniformNoiseSource {
    pub fn new(image_size: usize) -> UniformNoiseSource {
        UniformNoiseSource { image_size }
    }
}

impl DataSource for UniformNoiseSource {
    fn next_batch(&mut self, batch_size: usize) -> Tensor {
        Tensor::random_uniform(
            &[batch_size, self.image_size, self.image_size, 3],
            0.0,
            1.0,
        )
    }
}
