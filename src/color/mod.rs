pub mod effects;
pub mod hsv;

pub use effects::{apply_color_effects, ColorAdjustmentParams};
pub use hsv::{hsv_to_rgb, rgb_to_hsv};
