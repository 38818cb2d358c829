use std::io::Cursor;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use tiny_http::Response;

use artgan::{train_loop, StepStats, TrainConfig, UniformNoiseSource};

use crate::state::{SharedState, TrainingStatus};

// ---------------------------------------------------------------------------
// POST /train/start
// ---------------------------------------------------------------------------

/// Spawns the background training thread. The thread takes the session and
/// trainer out of the shared state, runs the full fixed schedule (there is
/// no stop control), generates a first image, and puts everything back.
pub fn handle_start(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = state.lock().unwrap();

    if st.is_training() {
        drop(st);
        return crate::routes::json_response(r#"{"ok":false,"reason":"already training"}"#, 409);
    }

    // Session and trainer must both be present when not training.
    let mut session = match st.session.take() {
        Some(s) => s,
        None => {
            drop(st);
            return crate::routes::json_response(r#"{"ok":false,"reason":"session unavailable"}"#, 409);
        }
    };
    let mut trainer = st.trainer.take().expect("trainer present whenever session is");

    let (tx, rx) = mpsc::channel::<StepStats>();
    let mut config = TrainConfig::default();
    config.progress_tx = Some(tx);

    let step_rx = Arc::new(Mutex::new(rx));
    st.training = TrainingStatus::Running {
        step_rx: step_rx.clone(),
        total_steps: config.epochs * config.batches_per_epoch(),
    };
    st.step_history.clear();
    st.last_frame = None;
    drop(st);

    let state_clone = state.clone();
    thread::spawn(move || {
        let mut source = UniformNoiseSource::new(session.config.image_size);
        let summary = train_loop(&mut session, &mut trainer, &mut source, &config);

        // Produce an image as soon as training ends so the page has
        // something to show without an extra click.
        session.generate(None);

        let mut st = state_clone.lock().unwrap();

        // Drain any stats the SSE handler has not consumed yet so the
        // history is complete for late-connecting listeners.
        let remaining: Vec<StepStats> = {
            if let TrainingStatus::Running { step_rx, .. } = &st.training {
                let rx_guard = step_rx.lock().unwrap();
                let mut buf = Vec::new();
                while let Ok(s) = rx_guard.try_recv() {
                    buf.push(s);
                }
                buf
            } else {
                Vec::new()
            }
        };
        for s in remaining {
            st.step_history.push(s);
        }

        st.session = Some(session);
        st.trainer = Some(trainer);
        st.training = TrainingStatus::Done { summary };
        drop(st);
        // The progress sender inside `config` is dropped only now, after the
        // Done status is visible, so the SSE stream's terminal frame always
        // carries the summary.
        drop(config);
    });

    crate::routes::json_response(r#"{"ok":true}"#, 200)
}
