use serde::{Deserialize, Serialize};

/// The two scalar losses produced by one training step, used only for
/// reporting.
#[derive(Debug, Clone, Copy)]
pub struct StepLosses {
    pub generator: f64,
    pub discriminator: f64,
}

/// Per-step training statistics emitted by `train_loop`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the loop
/// sends one `StepStats` value after every completed batch. Receivers (e.g.
/// the studio SSE handler) use this to drive the live loss readout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// 1-based batch index within the epoch.
    pub batch: usize,
    /// Batches per epoch, `ceil(buffer_size / batch_size)`.
    pub total_batches: usize,
    pub gen_loss: f64,
    pub disc_loss: f64,
    /// Wall-clock duration of this single step in milliseconds.
    pub elapsed_ms: u64,
}

/// Completion signal returned when `train_loop` has run its full fixed
/// iteration count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainSummary {
    pub steps_completed: usize,
    pub final_gen_loss: f64,
    pub final_disc_loss: f64,
    pub elapsed_total_ms: u64,
}
