use crate::color::hsv::{hsv_to_rgb, rgb_to_hsv};
use crate::tensor::Tensor;

/// The three user-tunable adjustment scalars.
///
/// Validated at construction so the pipeline itself never sees a NaN or
/// infinity: callers that receive an `Err` keep showing their previous
/// frame instead of corrupting the buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorAdjustmentParams {
    pub contrast: f64,
    pub hue_shift: f64,
    pub saturation: f64,
}

impl ColorAdjustmentParams {
    /// `contrast ≥ 0` scales deviation from mid-gray, `hue_shift` (degrees,
    /// any real) rotates hue, `saturation ≥ 0` scales color intensity
    /// (clamped downstream). Non-finite or negative-where-forbidden values
    /// are rejected.
    pub fn new(contrast: f64, hue_shift: f64, saturation: f64) -> Result<Self, String> {
        if !contrast.is_finite() || !hue_shift.is_finite() || !saturation.is_finite() {
            return Err("adjustment parameters must be finite".to_owned());
        }
        if contrast < 0.0 {
            return Err(format!("contrast must be >= 0, got {contrast}"));
        }
        if saturation < 0.0 {
            return Err(format!("saturation must be >= 0, got {saturation}"));
        }
        Ok(ColorAdjustmentParams {
            contrast,
            hue_shift,
            saturation,
        })
    }

    /// The no-op adjustment: the plain denormalized image.
    pub fn identity() -> Self {
        ColorAdjustmentParams {
            contrast: 1.0,
            hue_shift: 0.0,
            saturation: 1.0,
        }
    }
}

/// Converts a generated `[H, W, 3]` tensor (values in [-1, 1]) into an RGBA
/// byte buffer (`H·W·4`, alpha 255) with the three adjustments applied.
///
/// Per pixel: denormalize to [0, 255], stretch contrast about the 128
/// midpoint with clamping, rotate hue (normalized into [0, 360)), scale and
/// clamp saturation, convert back. Stateless and deterministic: identical
/// inputs always produce identical buffers.
pub fn apply_color_effects(image: &Tensor, params: &ColorAdjustmentParams) -> Vec<u8> {
    assert_eq!(image.shape.len(), 3, "expected an [H, W, 3] image tensor");
    assert_eq!(image.shape[2], 3, "expected 3 channels");
    let pixels = image.shape[0] * image.shape[1];
    let mut out = vec![0u8; pixels * 4];

    for p in 0..pixels {
        let r = denormalize(image.data[p * 3]);
        let g = denormalize(image.data[p * 3 + 1]);
        let b = denormalize(image.data[p * 3 + 2]);

        let r = contrast_stretch(r, params.contrast);
        let g = contrast_stretch(g, params.contrast);
        let b = contrast_stretch(b, params.contrast);

        let (h, s, v) = rgb_to_hsv(r, g, b);
        // Normalize so a negative shift can never leave a negative hue.
        let h = ((h + params.hue_shift) % 360.0 + 360.0) % 360.0;
        let s = (s * params.saturation).clamp(0.0, 1.0);

        let (r, g, b) = hsv_to_rgb(h, s, v);
        out[p * 4] = r;
        out[p * 4 + 1] = g;
        out[p * 4 + 2] = b;
        out[p * 4 + 3] = 255;
    }
    out
}

/// `[-1, 1] → [0, 255]`.
fn denormalize(x: f64) -> f64 {
    x * 127.5 + 127.5
}

/// Scales deviation from the 128 midpoint, clamped to the byte range.
fn contrast_stretch(v: f64, contrast: f64) -> f64 {
    ((v - 128.0) * contrast + 128.0).clamp(0.0, 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic test image with a spread of values across [-1, 1].
    fn test_image() -> Tensor {
        let mut data = Vec::with_capacity(4 * 4 * 3);
        for i in 0..48 {
            data.push(((i * 7 % 48) as f64 / 23.5) - 1.0);
        }
        Tensor::from_shape_data(&[4, 4, 3], data)
    }

    #[test]
    fn rejects_non_finite_parameters() {
        assert!(ColorAdjustmentParams::new(f64::NAN, 0.0, 1.0).is_err());
        assert!(ColorAdjustmentParams::new(1.0, f64::INFINITY, 1.0).is_err());
        assert!(ColorAdjustmentParams::new(1.0, 0.0, f64::NEG_INFINITY).is_err());
        assert!(ColorAdjustmentParams::new(-0.5, 0.0, 1.0).is_err());
        assert!(ColorAdjustmentParams::new(1.0, -90.0, 1.0).is_ok());
    }

    #[test]
    fn identity_reproduces_the_denormalized_image() {
        let image = test_image();
        let buffer = apply_color_effects(&image, &ColorAdjustmentParams::identity());

        for p in 0..16 {
            for ch in 0..3 {
                let expected = image.data[p * 3 + ch] * 127.5 + 127.5;
                let actual = buffer[p * 4 + ch] as f64;
                assert!(
                    (actual - expected).abs() <= 1.0,
                    "pixel {p} channel {ch}: {actual} vs {expected}"
                );
            }
            assert_eq!(buffer[p * 4 + 3], 255);
        }
    }

    #[test]
    fn hue_shift_is_periodic_in_360_degrees() {
        let image = test_image();
        let zero = ColorAdjustmentParams::new(1.3, 0.0, 0.8).unwrap();
        let full = ColorAdjustmentParams::new(1.3, 360.0, 0.8).unwrap();
        assert_eq!(
            apply_color_effects(&image, &zero),
            apply_color_effects(&image, &full)
        );
    }

    #[test]
    fn negative_hue_shift_yields_valid_output() {
        let image = test_image();
        let params = ColorAdjustmentParams::new(1.0, -520.0, 1.0).unwrap();
        let shifted = apply_color_effects(&image, &params);
        let wrapped = ColorAdjustmentParams::new(1.0, -520.0 + 720.0, 1.0).unwrap();
        assert_eq!(shifted, apply_color_effects(&image, &wrapped));
    }

    #[test]
    fn zero_saturation_forces_grayscale() {
        let image = test_image();
        let params = ColorAdjustmentParams::new(1.0, 45.0, 0.0).unwrap();
        let buffer = apply_color_effects(&image, &params);
        for p in 0..16 {
            assert_eq!(buffer[p * 4], buffer[p * 4 + 1]);
            assert_eq!(buffer[p * 4 + 1], buffer[p * 4 + 2]);
        }
    }

    #[test]
    fn mid_gray_is_a_fixed_point_of_the_identity_adjustment() {
        // (128-127.5)/127.5 normalizes back to exactly 128.
        let x = (128.0 - 127.5) / 127.5;
        let image = Tensor::from_shape_data(&[1, 1, 3], vec![x, x, x]);
        let buffer = apply_color_effects(&image, &ColorAdjustmentParams::identity());
        for ch in 0..3 {
            assert!((buffer[ch] as i32 - 128).abs() <= 1);
        }
    }

    #[test]
    fn extreme_contrast_clamps_to_byte_extremes() {
        let image = Tensor::from_shape_data(&[1, 2, 3], vec![0.4, -0.7, 0.9, -0.2, 0.3, -0.9]);
        let params = ColorAdjustmentParams::new(10.0, 0.0, 1.0).unwrap();
        let buffer = apply_color_effects(&image, &params);
        for p in 0..2 {
            for ch in 0..3 {
                let v = buffer[p * 4 + ch];
                assert!(v == 0 || v == 255, "channel value {v} escaped the clamp");
            }
        }
    }

    #[test]
    fn pipeline_is_deterministic() {
        let image = test_image();
        let params = ColorAdjustmentParams::new(2.5, 123.0, 0.4).unwrap();
        assert_eq!(
            apply_color_effects(&image, &params),
            apply_color_effects(&image, &params)
        );
    }
}
