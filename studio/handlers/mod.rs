pub mod frame;
pub mod train;
pub mod train_sse;
