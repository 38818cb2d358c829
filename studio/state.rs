use artgan::{GanConfig, GanSession, StepStats, Trainer, TrainSummary};
use std::sync::{mpsc, Arc, Mutex};

// ---------------------------------------------------------------------------
// Training status
// ---------------------------------------------------------------------------

pub enum TrainingStatus {
    /// No training has been started yet.
    Idle,
    /// Training is running in a background thread, which has taken the
    /// session; generation and rendering are unavailable until it returns.
    Running {
        step_rx: Arc<Mutex<mpsc::Receiver<StepStats>>>,
        total_steps: usize,
    },
    /// Training ran its full fixed iteration count.
    Done { summary: TrainSummary },
}

// ---------------------------------------------------------------------------
// Main state struct
// ---------------------------------------------------------------------------

pub struct StudioState {
    pub config: GanConfig,
    /// The adversarial pair plus last generated image. `None` only while a
    /// training thread owns it.
    pub session: Option<GanSession>,
    /// Optimizer state, persisted across training runs so momentum carries.
    pub trainer: Option<Trainer>,
    /// Current training lifecycle state.
    pub training: TrainingStatus,
    /// History of all step stats from the most recent training run.
    pub step_history: Vec<StepStats>,
    /// Last successfully encoded PNG frame; served again when adjustment
    /// parameters fail validation so the display never corrupts.
    pub last_frame: Option<Vec<u8>>,
}

impl StudioState {
    /// Builds the session up front; a generator/discriminator shape mismatch
    /// is fatal here, before the server ever accepts a request.
    pub fn new() -> Result<Self, String> {
        let config = GanConfig::default();
        let session = GanSession::new(config.clone())?;
        let trainer = Trainer::new(&config);
        Ok(StudioState {
            config,
            session: Some(session),
            trainer: Some(trainer),
            training: TrainingStatus::Idle,
            step_history: Vec::new(),
            last_frame: None,
        })
    }

    pub fn is_training(&self) -> bool {
        matches!(self.training, TrainingStatus::Running { .. })
    }
}

/// Shared state type — an `Arc<Mutex<StudioState>>` passed to every handler.
pub type SharedState = Arc<Mutex<StudioState>>;
