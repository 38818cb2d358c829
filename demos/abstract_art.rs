use artgan::{
    apply_color_effects, ColorAdjustmentParams, GanConfig, GanSession, TrainConfig, Trainer,
    UniformNoiseSource,
};
use std::sync::mpsc;

fn main() {
    let config = GanConfig::default();
    let mut session = GanSession::new(config.clone()).expect("adversarial pair shape mismatch");
    let mut trainer = Trainer::new(&config);
    let mut source = UniformNoiseSource::new(config.image_size);

    let (tx, rx) = mpsc::channel();
    let mut train_config = TrainConfig::default();
    train_config.progress_tx = Some(tx);

    let reporter = std::thread::spawn(move || {
        for stats in rx {
            println!(
                "Epoch {}/{}, Batch {}/{}, Gen Loss: {:.4}, Disc Loss: {:.4}",
                stats.epoch, stats.total_epochs, stats.batch, stats.total_batches,
                stats.gen_loss, stats.disc_loss
            );
        }
    });

    let summary = artgan::train_loop(&mut session, &mut trainer, &mut source, &train_config);
    drop(train_config);
    reporter.join().unwrap();
    println!(
        "Training completed: {} steps in {} ms",
        summary.steps_completed, summary.elapsed_total_ms
    );

    let image = session.generate(None).clone();
    let params = ColorAdjustmentParams::new(1.5, 30.0, 0.8).expect("valid adjustment parameters");
    let buffer = apply_color_effects(&image, &params);

    let size = session.config.image_size as u32;
    image::save_buffer(
        "generated_art.png",
        &buffer,
        size,
        size,
        image::ColorType::Rgba8,
    )
    .expect("failed to write generated_art.png");
    println!("Wrote generated_art.png ({size}x{size})");
}
