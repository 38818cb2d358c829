use crate::layers::layer::Param;
use crate::tensor::Tensor;

/// Adam optimizer with per-parameter first/second moment accumulators.
///
/// One `Adam` value is created per model at session start and reused for the
/// whole run, so momentum carries across steps. State is keyed by parameter
/// position, which is stable because models never add or remove layers after
/// construction.
pub struct Adam {
    pub learning_rate: f64,
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    /// Step counter for bias correction.
    t: u64,
    /// (first moment, second moment) per parameter, allocated lazily on the
    /// first step so the optimizer needs no shape knowledge up front.
    moments: Vec<(Tensor, Tensor)>,
}

impl Adam {
    pub fn new(learning_rate: f64) -> Adam {
        Adam {
            learning_rate,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
            t: 0,
            moments: Vec::new(),
        }
    }

    /// Applies one Adam update to every parameter from its accumulated
    /// gradient. Gradients are left untouched; the caller zeroes them before
    /// the next gradient computation.
    pub fn step(&mut self, params: &mut [&mut Param]) {
        if self.moments.is_empty() {
            self.moments = params
                .iter()
                .map(|p| (Tensor::zeros(&p.value.shape), Tensor::zeros(&p.value.shape)))
                .collect();
        }
        assert_eq!(
            self.moments.len(),
            params.len(),
            "optimizer state does not match parameter count"
        );

        self.t += 1;
        let bias1 = 1.0 - self.beta1.powi(self.t as i32);
        let bias2 = 1.0 - self.beta2.powi(self.t as i32);

        for (param, (m, v)) in params.iter_mut().zip(self.moments.iter_mut()) {
            for i in 0..param.value.data.len() {
                let g = param.grad.data[i];
                m.data[i] = self.beta1 * m.data[i] + (1.0 - self.beta1) * g;
                v.data[i] = self.beta2 * v.data[i] + (1.0 - self.beta2) * g * g;
                let m_hat = m.data[i] / bias1;
                let v_hat = v.data[i] / bias2;
                param.value.data[i] -= self.learning_rate * m_hat / (v_hat.sqrt() + self.epsilon);
            }
        }
    }
}
