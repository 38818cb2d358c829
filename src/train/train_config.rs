use crate::train::step_stats::StepStats;
use std::sync::mpsc;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`      — full passes over the synthetic buffer
/// - `batch_size`  — examples per training step
/// - `buffer_size` — virtual buffer length; each epoch runs
///                   `ceil(buffer_size / batch_size)` steps
/// - `yield_ms`    — cooperative pause between batches so the hosting
///                   thread's siblings stay responsive; `0` disables it
/// - `progress_tx` — optional channel sender; one `StepStats` is sent per
///                   completed step. A dropped receiver does NOT stop the
///                   run: the loop always completes its fixed iteration
///                   count (there is no cancellation mechanism).
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub buffer_size: usize,
    pub yield_ms: u64,
    pub progress_tx: Option<mpsc::Sender<StepStats>>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with the default inter-batch yield and no
    /// progress channel.
    pub fn new(epochs: usize, batch_size: usize, buffer_size: usize) -> Self {
        TrainConfig {
            epochs,
            batch_size,
            buffer_size,
            yield_ms: 10,
            progress_tx: None,
        }
    }

    /// Batches per epoch.
    pub fn batches_per_epoch(&self) -> usize {
        assert!(self.batch_size > 0, "batch_size must be at least 1");
        (self.buffer_size + self.batch_size - 1) / self.batch_size
    }
}

impl Default for TrainConfig {
    /// The reference run: 3 epochs over a 100-example buffer in batches of 8.
    fn default() -> Self {
        TrainConfig::new(3, 8, 100)
    }
}
