use crate::activation::ActivationFunction;
use crate::layers::{
    Activation, BatchNorm, Conv2d, Conv2dTranspose, Dense, Dropout, Flatten, Init, Layer, Reshape,
};
use crate::model::config::GanConfig;
use crate::model::model::Model;

/// Builds a fresh, untrained generator: noise vector in, `[H, W, 3]` image
/// in [-1, 1] out.
///
/// Topology: bias-free projection to a small spatial volume, then three
/// stride-2 transposed-convolution blocks doubling the spatial extent each
/// time, tanh on the way out. Every hidden block is normalization +
/// LeakyReLU, so the linear steps run bias-free.
pub fn build_generator(config: &GanConfig) -> Model {
    let proj = config.projection_size();
    let [f0, f1, f2] = config.gen_filters;
    let k = config.kernel;
    let leaky = ActivationFunction::LeakyReLU {
        alpha: config.leaky_alpha,
    };

    let layers: Vec<Box<dyn Layer + Send>> = vec![
        Box::new(Dense::new(config.noise_dim, proj * proj * f0, false, Init::He)),
        Box::new(BatchNorm::new(proj * proj * f0)),
        Box::new(Activation::new(leaky)),
        Box::new(Reshape::new(vec![proj, proj, f0])),
        Box::new(Conv2dTranspose::new(f0, f1, k, 2, Init::He)),
        Box::new(BatchNorm::new(f1)),
        Box::new(Activation::new(leaky)),
        Box::new(Conv2dTranspose::new(f1, f2, k, 2, Init::He)),
        Box::new(BatchNorm::new(f2)),
        Box::new(Activation::new(leaky)),
        Box::new(Conv2dTranspose::new(f2, 3, k, 2, Init::Xavier)),
        Box::new(Activation::new(ActivationFunction::Tanh)),
    ];

    Model::new(vec![config.noise_dim], layers)
}

/// Builds a fresh, untrained discriminator: `[H, W, 3]` image in, raw
/// real/fake logit out (no final activation — the loss works in logit
/// space).
pub fn build_discriminator(config: &GanConfig) -> Model {
    let [d0, d1] = config.disc_filters;
    let k = config.kernel;
    let quarter = config.image_size / 4;
    let leaky = ActivationFunction::LeakyReLU {
        alpha: config.leaky_alpha,
    };

    let layers: Vec<Box<dyn Layer + Send>> = vec![
        Box::new(Conv2d::new(3, d0, k, 2, Init::He)),
        Box::new(Activation::new(leaky)),
        Box::new(Dropout::new(config.dropout_rate)),
        Box::new(Conv2d::new(d0, d1, k, 2, Init::He)),
        Box::new(Activation::new(leaky)),
        Box::new(Flatten::new()),
        Box::new(Dense::new(quarter * quarter * d1, 1, true, Init::Xavier)),
    ];

    Model::new(vec![config.image_size, config.image_size, 3], layers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_output_matches_discriminator_input() {
        // Holds across noise widths and filter configurations.
        for noise_dim in [10, 50, 128] {
            let config = GanConfig {
                noise_dim,
                ..GanConfig::default()
            };
            let gen = build_generator(&config);
            let disc = build_discriminator(&config);
            assert_eq!(gen.output_shape(), disc.input_shape);
        }

        let wide = GanConfig {
            gen_filters: [32, 16, 8],
            disc_filters: [8, 16],
            ..GanConfig::default()
        };
        let gen = build_generator(&wide);
        let disc = build_discriminator(&wide);
        assert_eq!(gen.output_shape(), disc.input_shape);
    }

    #[test]
    fn generator_spatial_progression_is_doubling() {
        let config = GanConfig::default();
        let gen = build_generator(&config);
        assert_eq!(gen.output_shape(), vec![32, 32, 3]);

        // Walk the shapes layer by layer: 4×4 → 8×8 → 16×16 → 32×32.
        let mut shape = gen.input_shape.clone();
        let mut seen = Vec::new();
        for layer in gen.layers.iter() {
            shape = layer.output_shape(&shape);
            if shape.len() == 3 {
                seen.push(shape[0]);
            }
        }
        assert!(seen.windows(2).all(|w| w[1] == w[0] || w[1] == w[0] * 2));
        assert_eq!(*seen.first().unwrap(), 4);
        assert_eq!(*seen.last().unwrap(), 32);
    }

    #[test]
    fn discriminator_emits_a_single_logit() {
        let disc = build_discriminator(&GanConfig::default());
        assert_eq!(disc.output_shape(), vec![1]);
    }

    #[test]
    fn factories_allocate_fresh_parameters() {
        let config = GanConfig::default();
        let mut a = build_generator(&config);
        let mut b = build_generator(&config);
        let pa = a.params_mut();
        let pb = b.params_mut();
        assert_eq!(pa.len(), pb.len());
        // Random init: two builds must not share parameter values.
        let identical = pa
            .iter()
            .zip(pb.iter())
            .all(|(x, y)| x.value.data == y.value.data);
        assert!(!identical);
    }

    #[test]
    fn generator_forward_is_bounded_by_tanh() {
        let config = GanConfig {
            noise_dim: 8,
            gen_filters: [8, 4, 4],
            disc_filters: [4, 4],
            ..GanConfig::default()
        };
        let mut gen = build_generator(&config);
        let noise = crate::tensor::Tensor::random_normal(&[2, 8]);
        let out = gen.forward(&noise, true);
        assert_eq!(out.shape, vec![2, 32, 32, 3]);
        assert!(out.data.iter().all(|&x| (-1.0..=1.0).contains(&x)));
    }
}
