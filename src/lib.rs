pub mod activation;
pub mod color;
pub mod layers;
pub mod loss;
pub mod model;
pub mod optim;
pub mod session;
pub mod tensor;
pub mod train;

// Convenience re-exports
pub use activation::activation::ActivationFunction;
pub use color::effects::{apply_color_effects, ColorAdjustmentParams};
pub use model::config::GanConfig;
pub use model::factory::{build_discriminator, build_generator};
pub use model::model::Model;
pub use optim::adam::Adam;
pub use session::session::GanSession;
pub use tensor::tensor::Tensor;
pub use train::loop_fn::train_loop;
pub use train::step_stats::{StepStats, TrainSummary};
pub use train::train_config::TrainConfig;
pub use train::trainer::Trainer;
pub use train::data_source::{DataSource, UniformNoiseSource};
