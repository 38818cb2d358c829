//! Finite-difference validation of the hand-derived backward passes.
//!
//! Each check builds a small deterministic model (no dropout, so repeated
//! forwards are reproducible), computes analytic parameter gradients via
//! `Model::backward`, then compares them against central differences of the
//! loss. f64 everywhere keeps the tolerance tight.

use artgan::activation::ActivationFunction;
use artgan::layers::{Activation, BatchNorm, Conv2d, Conv2dTranspose, Dense, Flatten, Init, Layer};
use artgan::loss::LogitBceLoss;
use artgan::model::Model;
use artgan::Tensor;

const EPS: f64 = 1e-5;
const TOL: f64 = 1e-6;

/// Loss under test: stable BCE of the model's output against label 1,
/// matching the generator objective.
fn loss_of(model: &mut Model, input: &Tensor) -> f64 {
    let out = model.forward(input, true);
    LogitBceLoss::loss(1.0, &out)
}

/// Compares analytic gradients with central differences for every
/// parameter of `model`, sub-sampling large tensors.
fn check_gradients(model: &mut Model, input: &Tensor) {
    // Analytic pass.
    model.zero_grads();
    let out = model.forward(input, true);
    let grad = LogitBceLoss::derivative(1.0, &out);
    model.backward(&grad);

    let analytic: Vec<Vec<f64>> = model
        .params_mut()
        .iter()
        .map(|p| p.grad.data.clone())
        .collect();

    for param_idx in 0..analytic.len() {
        let count = analytic[param_idx].len();
        // Probe at most a handful of coordinates per tensor.
        let stride = (count / 5).max(1);
        for i in (0..count).step_by(stride) {
            let original = model.params_mut()[param_idx].value.data[i];

            model.params_mut()[param_idx].value.data[i] = original + EPS;
            let plus = loss_of(model, input);
            model.params_mut()[param_idx].value.data[i] = original - EPS;
            let minus = loss_of(model, input);
            model.params_mut()[param_idx].value.data[i] = original;

            let numeric = (plus - minus) / (2.0 * EPS);
            let diff = (numeric - analytic[param_idx][i]).abs();
            assert!(
                diff < TOL,
                "param {param_idx} coord {i}: analytic {} vs numeric {numeric}",
                analytic[param_idx][i]
            );
        }
    }
}

#[test]
fn dense_gradients_match_finite_differences() {
    let layers: Vec<Box<dyn Layer + Send>> = vec![
        Box::new(Dense::new(6, 4, true, Init::He)),
        Box::new(Activation::new(ActivationFunction::LeakyReLU { alpha: 0.3 })),
        Box::new(Dense::new(4, 1, true, Init::Xavier)),
    ];
    let mut model = Model::new(vec![6], layers);
    let input = Tensor::random_uniform(&[3, 6], -1.0, 1.0);
    check_gradients(&mut model, &input);
}

#[test]
fn conv2d_gradients_match_finite_differences() {
    let layers: Vec<Box<dyn Layer + Send>> = vec![
        Box::new(Conv2d::new(3, 2, 3, 2, Init::He)),
        Box::new(Activation::new(ActivationFunction::LeakyReLU { alpha: 0.3 })),
        Box::new(Flatten::new()),
        Box::new(Dense::new(8, 1, true, Init::Xavier)),
    ];
    let mut model = Model::new(vec![4, 4, 3], layers);
    let input = Tensor::random_uniform(&[2, 4, 4, 3], -1.0, 1.0);
    check_gradients(&mut model, &input);
}

#[test]
fn conv2d_transpose_gradients_match_finite_differences() {
    let layers: Vec<Box<dyn Layer + Send>> = vec![
        Box::new(Conv2dTranspose::new(2, 2, 3, 2, Init::He)),
        Box::new(Activation::new(ActivationFunction::Tanh)),
        Box::new(Flatten::new()),
        Box::new(Dense::new(32, 1, true, Init::Xavier)),
    ];
    let mut model = Model::new(vec![2, 2, 2], layers);
    let input = Tensor::random_uniform(&[2, 2, 2, 2], -1.0, 1.0);
    check_gradients(&mut model, &input);
}

#[test]
fn batch_norm_gradients_match_finite_differences() {
    // Running-average updates during the probing forwards do not affect
    // training-mode outputs, so central differences stay valid.
    let layers: Vec<Box<dyn Layer + Send>> = vec![
        Box::new(Dense::new(5, 3, false, Init::He)),
        Box::new(BatchNorm::new(3)),
        Box::new(Activation::new(ActivationFunction::LeakyReLU { alpha: 0.3 })),
        Box::new(Dense::new(3, 1, true, Init::Xavier)),
    ];
    let mut model = Model::new(vec![5], layers);
    let input = Tensor::random_uniform(&[4, 5], -1.0, 1.0);
    check_gradients(&mut model, &input);
}
