use rand::prelude::*;
use std::f64::consts::PI;

/// A dense multi-dimensional f64 array in row-major (NHWC) order.
///
/// This is the entire numeric engine of the crate: layers read and write
/// `data` directly with stride arithmetic, so there is no hidden allocation
/// and every intermediate is dropped when it goes out of scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    pub shape: Vec<usize>,
    pub data: Vec<f64>,
}

impl Tensor {
    pub fn zeros(shape: &[usize]) -> Tensor {
        let numel = shape.iter().product();
        Tensor {
            shape: shape.to_vec(),
            data: vec![0.0; numel],
        }
    }

    /// Wraps an existing buffer. Panics if `data` does not fill `shape`.
    pub fn from_shape_data(shape: &[usize], data: Vec<f64>) -> Tensor {
        assert_eq!(
            shape.iter().product::<usize>(),
            data.len(),
            "data length does not match shape"
        );
        Tensor {
            shape: shape.to_vec(),
            data,
        }
    }

    /// Uniform samples in [lo, hi).
    pub fn random_uniform(shape: &[usize], lo: f64, hi: f64) -> Tensor {
        let mut rng = rand::thread_rng();
        let mut res = Tensor::zeros(shape);
        for x in res.data.iter_mut() {
            *x = rng.gen::<f64>() * (hi - lo) + lo;
        }
        res
    }

    /// Standard normal samples, N(0, 1).
    pub fn random_normal(shape: &[usize]) -> Tensor {
        let mut rng = rand::thread_rng();
        let mut res = Tensor::zeros(shape);
        for x in res.data.iter_mut() {
            *x = sample_standard_normal(&mut rng);
        }
        res
    }

    /// He initialization: samples from N(0, sqrt(2 / fan_in)).
    ///
    /// Recommended before ReLU-family layers. The variance 2/fan_in accounts
    /// for the fact that ReLU zeroes half of its inputs on average.
    pub fn he(shape: &[usize], fan_in: usize) -> Tensor {
        let mut rng = rand::thread_rng();
        let std_dev = (2.0 / fan_in as f64).sqrt();
        let mut res = Tensor::zeros(shape);
        for x in res.data.iter_mut() {
            *x = sample_standard_normal(&mut rng) * std_dev;
        }
        res
    }

    /// Xavier (Glorot) initialization: samples from N(0, sqrt(1 / fan_in)).
    ///
    /// Recommended before Tanh/Identity outputs. Keeps the variance of
    /// activations and gradients roughly equal across layers.
    pub fn xavier(shape: &[usize], fan_in: usize) -> Tensor {
        let mut rng = rand::thread_rng();
        let std_dev = (1.0 / fan_in as f64).sqrt();
        let mut res = Tensor::zeros(shape);
        for x in res.data.iter_mut() {
            *x = sample_standard_normal(&mut rng) * std_dev;
        }
        res
    }

    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Returns a tensor with the same data and a new shape.
    /// Panics if element counts differ.
    pub fn reshape(&self, shape: &[usize]) -> Tensor {
        assert_eq!(
            self.numel(),
            shape.iter().product::<usize>(),
            "reshape cannot change element count"
        );
        Tensor {
            shape: shape.to_vec(),
            data: self.data.clone(),
        }
    }

    pub fn map<F>(&self, functor: F) -> Tensor
    where
        F: Fn(f64) -> f64,
    {
        Tensor {
            shape: self.shape.clone(),
            data: self.data.iter().map(|&x| functor(x)).collect(),
        }
    }

    /// Element-wise combination of two same-shape tensors.
    pub fn zip_map<F>(&self, rhs: &Tensor, functor: F) -> Tensor
    where
        F: Fn(f64, f64) -> f64,
    {
        assert_eq!(self.shape, rhs.shape, "tensors are of incorrect shapes");
        Tensor {
            shape: self.shape.clone(),
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(&a, &b)| functor(a, b))
                .collect(),
        }
    }

    /// Mean of all elements. Zero-element tensors yield 0.
    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }
}

/// Samples a single value from N(0, 1) using the Box-Muller transform.
/// Both u1 and u2 must be uniform on (0, 1].
fn sample_standard_normal(rng: &mut ThreadRng) -> f64 {
    // Draw two independent uniform samples in (0, 1] to avoid log(0).
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = 1.0 - rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}
