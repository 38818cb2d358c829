pub mod adversarial;

pub use adversarial::{discriminator_loss, generator_loss, generator_loss_grad, LogitBceLoss};
