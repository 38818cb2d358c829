use crate::loss::{
    discriminator_loss, generator_loss, generator_loss_grad, LogitBceLoss,
};
use crate::model::GanConfig;
use crate::session::GanSession;
use crate::tensor::Tensor;
use crate::train::step_stats::StepLosses;
use crate::optim::Adam;

/// Drives one adversarial update per call.
///
/// The trainer owns one Adam instance per model, created once at
/// construction and reused every step so the per-parameter moment
/// accumulators carry across the whole run.
pub struct Trainer {
    gen_optimizer: Adam,
    disc_optimizer: Adam,
}

impl Trainer {
    pub fn new(config: &GanConfig) -> Trainer {
        Trainer {
            gen_optimizer: Adam::new(config.learning_rate),
            disc_optimizer: Adam::new(config.learning_rate),
        }
    }

    /// One adversarial training step over a real `[B, H, W, 3]` batch.
    ///
    /// 1. Sample noise, generate a fake batch, score both batches, and
    ///    compute the two reported losses.
    /// 2. Update the generator from a fresh noise sample forwarded through
    ///    both models; the discriminator's accumulated gradients are simply
    ///    never applied, which holds it fixed.
    /// 3. Update the discriminator by re-forwarding the real batch and the
    ///    step's fake batch, accumulating gradients across both terms.
    ///
    /// Every intermediate tensor is dropped when this function returns.
    pub fn train_step(&mut self, session: &mut GanSession, batch: &Tensor) -> StepLosses {
        let batch_size = batch.shape[0];
        let noise_dim = session.config.noise_dim;

        // Reported losses from an initial forward pass of both models.
        let noise = Tensor::random_normal(&[batch_size, noise_dim]);
        let fake = session.generator.forward(&noise, true);
        let real_logits = session.discriminator.forward(batch, true);
        let fake_logits = session.discriminator.forward(&fake, true);
        let losses = StepLosses {
            generator: generator_loss(&fake_logits),
            discriminator: discriminator_loss(&real_logits, &fake_logits),
        };

        // Generator update: fresh noise, fresh forward through both models,
        // backprop through the discriminator into the generator.
        session.generator.zero_grads();
        session.discriminator.zero_grads();
        let gen_noise = Tensor::random_normal(&[batch_size, noise_dim]);
        let gen_fake = session.generator.forward(&gen_noise, true);
        let gen_fake_logits = session.discriminator.forward(&gen_fake, true);
        let logit_grad = generator_loss_grad(&gen_fake_logits);
        let fake_grad = session.discriminator.backward(&logit_grad);
        session.generator.backward(&fake_grad);
        self.gen_optimizer.step(&mut session.generator.params_mut());

        // Discriminator update: real and fake terms re-forwarded one after
        // the other (layer caches are single-slot), gradients accumulated
        // across both before the optimizer step. The fake batch from the
        // initial pass is reused as a constant input.
        session.discriminator.zero_grads();
        let real_logits = session.discriminator.forward(batch, true);
        session
            .discriminator
            .backward(&LogitBceLoss::derivative(1.0, &real_logits));
        let fake_logits = session.discriminator.forward(&fake, true);
        session
            .discriminator
            .backward(&LogitBceLoss::derivative(0.0, &fake_logits));
        self.disc_optimizer.step(&mut session.discriminator.params_mut());

        losses
    }
}
