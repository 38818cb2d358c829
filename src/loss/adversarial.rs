use crate::tensor::Tensor;

/// Binary cross-entropy evaluated directly on logits.
///
/// Uses the stable rearrangement `max(z, 0) − z·y + ln(1 + e^(−|z|))`, which
/// never exponentiates a large positive value, and averages over the batch.
/// The logit-space derivative is simply `σ(z) − y`.
pub struct LogitBceLoss;

impl LogitBceLoss {
    /// Mean stable BCE of a whole logit batch against one constant label.
    pub fn loss(label: f64, logits: &Tensor) -> f64 {
        let n = logits.numel() as f64;
        logits
            .data
            .iter()
            .map(|&z| z.max(0.0) - z * label + (1.0 + (-z.abs()).exp()).ln())
            .sum::<f64>()
            / n
    }

    /// Gradient with respect to each logit: `(σ(z) − y) / n`, carrying the
    /// mean reduction so downstream layer gradients are batch-averaged.
    pub fn derivative(label: f64, logits: &Tensor) -> Tensor {
        let n = logits.numel() as f64;
        logits.map(|z| (sigmoid(z) - label) / n)
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Discriminator objective: real examples should score as real (label 1),
/// generated examples as fake (label 0).
pub fn discriminator_loss(real_logits: &Tensor, fake_logits: &Tensor) -> f64 {
    LogitBceLoss::loss(1.0, real_logits) + LogitBceLoss::loss(0.0, fake_logits)
}

/// Generator objective: generated examples should fool the discriminator
/// into scoring them as real.
pub fn generator_loss(fake_logits: &Tensor) -> f64 {
    LogitBceLoss::loss(1.0, fake_logits)
}

/// Logit-space gradient of `generator_loss`.
pub fn generator_loss_grad(fake_logits: &Tensor) -> Tensor {
    LogitBceLoss::derivative(1.0, fake_logits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logits(values: &[f64]) -> Tensor {
        Tensor::from_shape_data(&[values.len(), 1], values.to_vec())
    }

    #[test]
    fn losses_are_non_negative() {
        for z in [-50.0, -3.0, -0.5, 0.0, 0.5, 3.0, 50.0] {
            let t = logits(&[z]);
            assert!(generator_loss(&t) >= 0.0, "gen loss for z={z}");
            assert!(discriminator_loss(&t, &t) >= 0.0, "disc loss for z={z}");
        }
    }

    #[test]
    fn loss_is_stable_for_extreme_logits() {
        let huge = logits(&[1e6, -1e6]);
        assert!(LogitBceLoss::loss(1.0, &huge).is_finite());
        assert!(LogitBceLoss::loss(0.0, &huge).is_finite());
        for g in LogitBceLoss::derivative(1.0, &huge).data {
            assert!(g.is_finite());
        }
    }

    #[test]
    fn discriminator_loss_vanishes_at_perfect_classification() {
        // Strongly positive real logits, strongly negative fake logits.
        let real = logits(&[40.0, 40.0]);
        let fake = logits(&[-40.0, -40.0]);
        assert!(discriminator_loss(&real, &fake) < 1e-12);
    }

    #[test]
    fn generator_loss_vanishes_when_the_discriminator_is_fooled() {
        assert!(generator_loss(&logits(&[40.0])) < 1e-12);
        // And grows when the fake is confidently rejected.
        assert!(generator_loss(&logits(&[-5.0])) > 1.0);
    }

    #[test]
    fn derivative_matches_sigmoid_identity() {
        let t = logits(&[0.0]);
        let g = LogitBceLoss::derivative(1.0, &t);
        // σ(0) − 1 = −0.5, single-element mean.
        assert!((g.data[0] - -0.5).abs() < 1e-12);
    }
}
