use serde::{Deserialize, Serialize};

/// Architecture and optimizer hyperparameters for one adversarial pair.
///
/// The defaults reproduce the reference topology: 50-dim noise, 32×32×3
/// images, generator channel widths 64→32→16→3 over a 4→8→16→32 spatial
/// progression, discriminator widths 16→32. `image_size` must be divisible
/// by 8 (three stride-2 upsampling blocks from the projection volume).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GanConfig {
    pub noise_dim: usize,
    pub image_size: usize,
    pub gen_filters: [usize; 3],
    pub disc_filters: [usize; 2],
    pub kernel: usize,
    pub leaky_alpha: f64,
    pub dropout_rate: f64,
    pub learning_rate: f64,
}

impl Default for GanConfig {
    fn default() -> Self {
        GanConfig {
            noise_dim: 50,
            image_size: 32,
            gen_filters: [64, 32, 16],
            disc_filters: [16, 32],
            kernel: 5,
            leaky_alpha: 0.3,
            dropout_rate: 0.3,
            learning_rate: 1e-4,
        }
    }
}

impl GanConfig {
    /// Spatial extent of the generator's projection volume (4 for 32×32).
    pub fn projection_size(&self) -> usize {
        assert!(
            self.image_size % 8 == 0 && self.image_size >= 8,
            "image_size must be a multiple of 8"
        );
        self.image_size / 8
    }
}
