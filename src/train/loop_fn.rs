use std::time::Instant;

use crate::session::GanSession;
use crate::train::data_source::DataSource;
use crate::train::step_stats::{StepLosses, StepStats, TrainSummary};
use crate::train::train_config::TrainConfig;
use crate::train::trainer::Trainer;

/// Runs the full adversarial training schedule:
/// `config.epochs × ceil(buffer_size / batch_size)` steps, no early
/// stopping, no checkpointing.
///
/// Each step draws a fresh batch from `source`, trains on it, drops it, and
/// reports `(epoch, batch, gen_loss, disc_loss)` through the optional
/// progress channel. Between batches the loop sleeps `yield_ms` so sibling
/// threads (the studio's request handlers) are never starved. Send failures
/// on the progress channel are ignored: a vanished listener must not cancel
/// the run.
///
/// Returns the completion summary once the fixed iteration count has run.
pub fn train_loop(
    session: &mut GanSession,
    trainer: &mut Trainer,
    source: &mut dyn DataSource,
    config: &TrainConfig,
) -> TrainSummary {
    let total_batches = config.batches_per_epoch();
    let started = Instant::now();
    let mut last = StepLosses {
        generator: 0.0,
        discriminator: 0.0,
    };

    for epoch in 1..=config.epochs {
        for batch_idx in 1..=total_batches {
            let t_step = Instant::now();

            let batch = source.next_batch(config.batch_size);
            last = trainer.train_step(session, &batch);
            drop(batch);

            let stats = StepStats {
                epoch,
                total_epochs: config.epochs,
                batch: batch_idx,
                total_batches,
                gen_loss: last.generator,
                disc_loss: last.discriminator,
                elapsed_ms: t_step.elapsed().as_millis() as u64,
            };
            if let Some(ref tx) = config.progress_tx {
                let _ = tx.send(stats);
            }

            // Cooperative scheduling point; carries no ordering semantics.
            if config.yield_ms > 0 {
                std::thread::sleep(std::time::Duration::from_millis(config.yield_ms));
            }
        }
    }

    TrainSummary {
        steps_completed: config.epochs * total_batches,
        final_gen_loss: last.generator,
        final_disc_loss: last.discriminator,
        elapsed_total_ms: started.elapsed().as_millis() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GanConfig;
    use crate::tensor::Tensor;
    use std::sync::mpsc;

    fn small_session() -> GanSession {
        GanSession::new(GanConfig {
            noise_dim: 4,
            gen_filters: [4, 4, 4],
            disc_filters: [4, 4],
            ..GanConfig::default()
        })
        .unwrap()
    }

    /// Counts `next_batch` calls; the step-count property in one place.
    struct CountingSource {
        inner: UniformNoiseSource,
        calls: usize,
    }

    use crate::train::data_source::UniformNoiseSource;

    impl DataSource for CountingSource {
        fn next_batch(&mut self, batch_size: usize) -> Tensor {
            self.calls += 1;
            self.inner.next_batch(batch_size)
        }
    }

    #[test]
    fn runs_exactly_epochs_times_ceil_buffer_over_batch_steps() {
        let mut session = small_session();
        let mut trainer = Trainer::new(&session.config);
        let mut source = CountingSource {
            inner: UniformNoiseSource::new(32),
            calls: 0,
        };

        // 2 epochs × ceil(5/2) = 6 steps.
        let mut config = TrainConfig::new(2, 2, 5);
        config.yield_ms = 0;
        let summary = train_loop(&mut session, &mut trainer, &mut source, &config);

        assert_eq!(source.calls, 6);
        assert_eq!(summary.steps_completed, 6);
    }

    #[test]
    fn progress_is_reported_per_step_and_survives_a_dropped_receiver() {
        let mut session = small_session();
        let mut trainer = Trainer::new(&session.config);
        let mut source = UniformNoiseSource::new(32);

        let (tx, rx) = mpsc::channel();
        let mut config = TrainConfig::new(1, 2, 4);
        config.yield_ms = 0;
        config.progress_tx = Some(tx);

        // Drop the receiver up front: the run must still complete.
        drop(rx);
        let summary = train_loop(&mut session, &mut trainer, &mut source, &config);
        assert_eq!(summary.steps_completed, 2);
    }

    #[test]
    fn stats_carry_epoch_and_batch_indices() {
        let mut session = small_session();
        let mut trainer = Trainer::new(&session.config);
        let mut source = UniformNoiseSource::new(32);

        let (tx, rx) = mpsc::channel();
        let mut config = TrainConfig::new(2, 3, 3);
        config.yield_ms = 0;
        config.progress_tx = Some(tx);

        train_loop(&mut session, &mut trainer, &mut source, &config);
        drop(config);

        let received: Vec<StepStats> = rx.into_iter().collect();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].epoch, 1);
        assert_eq!(received[1].epoch, 2);
        assert!(received.iter().all(|s| s.batch == 1 && s.total_batches == 1));
    }
}
