pub mod activation_layer;
pub mod batch_norm;
pub mod conv2d;
pub mod conv2d_transpose;
pub mod dense;
pub mod dropout;
pub mod layer;
pub mod reshape;

pub use activation_layer::Activation;
pub use batch_norm::BatchNorm;
pub use conv2d::Conv2d;
pub use conv2d_transpose::Conv2dTranspose;
pub use dense::Dense;
pub use dropout::Dropout;
pub use layer::{Init, Layer, Param};
pub use reshape::{Flatten, Reshape};
