//! Full pipeline: build the adversarial pair, run a short training
//! schedule, generate an image, and push it through the color pipeline.

use artgan::{
    apply_color_effects, train_loop, ColorAdjustmentParams, GanConfig, GanSession, TrainConfig,
    Trainer, UniformNoiseSource,
};

fn small_config() -> GanConfig {
    GanConfig {
        noise_dim: 8,
        gen_filters: [8, 4, 4],
        disc_filters: [4, 4],
        ..GanConfig::default()
    }
}

#[test]
fn train_generate_and_render_a_frame() {
    let config = small_config();
    let mut session = GanSession::new(config.clone()).unwrap();
    let mut trainer = Trainer::new(&config);
    let mut source = UniformNoiseSource::new(config.image_size);

    let mut train_config = TrainConfig::new(1, 2, 4);
    train_config.yield_ms = 0;
    let summary = train_loop(&mut session, &mut trainer, &mut source, &train_config);
    assert_eq!(summary.steps_completed, 2);
    assert!(summary.final_gen_loss >= 0.0);
    assert!(summary.final_disc_loss >= 0.0);

    let image = session.generate(None).clone();
    assert_eq!(image.shape, vec![32, 32, 3]);
    assert!(image.data.iter().all(|&x| (-1.0..=1.0).contains(&x)));

    let params = ColorAdjustmentParams::new(2.0, 90.0, 0.5).unwrap();
    let buffer = apply_color_effects(&image, &params);
    assert_eq!(buffer.len(), 32 * 32 * 4);
    // Alpha is always opaque.
    assert!(buffer.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn color_errors_leave_the_generated_image_untouched() {
    let mut session = GanSession::new(small_config()).unwrap();
    let before = session.generate(None).clone();

    // An invalid parameter set never reaches the pipeline; the cached
    // image is unaffected either way.
    assert!(ColorAdjustmentParams::new(f64::NAN, 0.0, 1.0).is_err());
    assert_eq!(session.last_generated().unwrap(), &before);

    let ok = ColorAdjustmentParams::new(1.0, 0.0, 1.0).unwrap();
    let _ = apply_color_effects(&before, &ok);
    assert_eq!(session.last_generated().unwrap(), &before);
}
