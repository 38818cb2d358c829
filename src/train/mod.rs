pub mod data_source;
pub mod loop_fn;
pub mod step_stats;
pub mod train_config;
pub mod trainer;

pub use data_source::{DataSource, UniformNoiseSource};
pub use loop_fn::train_loop;
pub use step_stats::{StepLosses, StepStats, TrainSummary};
pub use train_config::TrainConfig;
pub use trainer::Trainer;
