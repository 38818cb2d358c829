pub mod config;
pub mod factory;
pub mod model;

pub use config::GanConfig;
pub use factory::{build_discriminator, build_generator};
pub use model::Model;
