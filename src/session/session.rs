use crate::model::{build_discriminator, build_generator, GanConfig, Model};
use crate::tensor::Tensor;

/// Owns the adversarial pair and the most recently generated image for the
/// whole process lifetime.
///
/// Models are created exactly once here and only ever mutated by the
/// trainer; there is no teardown. The cached image is what the color
/// pipeline re-reads on every slider change, so rendering never re-runs the
/// generator.
pub struct GanSession {
    pub config: GanConfig,
    pub generator: Model,
    pub discriminator: Model,
    last_generated: Option<Tensor>,
}

impl GanSession {
    /// Builds both models and verifies the adversarial wiring: the
    /// generator's output shape must equal the discriminator's input shape,
    /// otherwise training cannot proceed.
    pub fn new(config: GanConfig) -> Result<GanSession, String> {
        let generator = build_generator(&config);
        let discriminator = build_discriminator(&config);

        let gen_out = generator.output_shape();
        if gen_out != discriminator.input_shape {
            return Err(format!(
                "generator output shape {:?} does not match discriminator input shape {:?}",
                gen_out, discriminator.input_shape
            ));
        }

        Ok(GanSession {
            config,
            generator,
            discriminator,
            last_generated: None,
        })
    }

    /// Runs the generator once at inference and caches the result.
    ///
    /// `noise` may be a `[noise_dim]` vector or a `[1, noise_dim]` batch;
    /// when omitted, standard-normal noise is sampled internally. Returns
    /// the `[H, W, 3]` image tensor with values in [-1, 1].
    pub fn generate(&mut self, noise: Option<Tensor>) -> &Tensor {
        let noise_dim = self.config.noise_dim;
        let noise = match noise {
            Some(n) if n.shape == [noise_dim] => n.reshape(&[1, noise_dim]),
            Some(n) => {
                assert_eq!(n.shape, [1, noise_dim], "noise vector has wrong shape");
                n
            }
            None => Tensor::random_normal(&[1, noise_dim]),
        };

        let out = self.generator.forward(&noise, false);
        let size = self.config.image_size;
        self.last_generated = Some(out.reshape(&[size, size, 3]));
        self.last_generated.as_ref().unwrap()
    }

    /// The image produced by the most recent `generate` call, if any.
    pub fn last_generated(&self) -> Option<&Tensor> {
        self.last_generated.as_ref()
    }
}
