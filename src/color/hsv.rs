/// Cylindrical color-space conversions for the effect pipeline.
///
/// `rgb_to_hsv` takes channels in [0, 255] (fractional values allowed — the
/// contrast stage feeds unrounded floats straight in) and returns
/// `(h, s, v)` with `h ∈ [0, 360)`, `s, v ∈ [0, 1]`. `hsv_to_rgb` is the
/// inverse, rounding to byte channels.
pub fn rgb_to_hsv(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let r = r / 255.0;
    let g = g / 255.0;
    let b = b / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let v = max;

    // Gray pixels (delta = 0) have no defined hue; 0 is the chosen branch.
    let mut h = if delta == 0.0 {
        0.0
    } else if max == r {
        ((g - b) / delta) % 6.0
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    h *= 60.0;
    if h < 0.0 {
        h += 360.0;
    }

    let s = if max == 0.0 { 0.0 } else { delta / max };

    (h, s, v)
}

pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (u8, u8, u8) {
    let h = (h % 360.0 + 360.0) % 360.0;
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (
        channel_to_byte(r + m),
        channel_to_byte(g + m),
        channel_to_byte(b + m),
    )
}

/// Nearest integer in [0, 255].
fn channel_to_byte(x: f64) -> u8 {
    (x * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_red_maps_to_zero_hue_full_saturation() {
        let (h, s, v) = rgb_to_hsv(255.0, 0.0, 0.0);
        assert_eq!((h, s, v), (0.0, 1.0, 1.0));
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), (255, 0, 0));
    }

    #[test]
    fn black_is_the_degenerate_branch() {
        assert_eq!(rgb_to_hsv(0.0, 0.0, 0.0), (0.0, 0.0, 0.0));
    }

    #[test]
    fn grays_have_zero_saturation() {
        let (h, s, _) = rgb_to_hsv(128.0, 128.0, 128.0);
        assert_eq!(h, 0.0);
        assert_eq!(s, 0.0);
    }

    #[test]
    fn hue_is_always_normalized() {
        // A blue-dominant pixel exercises the negative-hue branch.
        let (h, _, _) = rgb_to_hsv(200.0, 10.0, 250.0);
        assert!((0.0..360.0).contains(&h));
        // Negative and oversized hues normalize in the inverse too.
        assert_eq!(hsv_to_rgb(-360.0, 1.0, 1.0), hsv_to_rgb(0.0, 1.0, 1.0));
        assert_eq!(hsv_to_rgb(720.0, 1.0, 1.0), hsv_to_rgb(0.0, 1.0, 1.0));
    }

    #[test]
    fn round_trip_is_within_one_per_channel() {
        // Sweep a lattice of the RGB cube including all faces and corners.
        for r in (0..=255).step_by(5) {
            for g in (0..=255).step_by(5) {
                for b in (0..=255).step_by(5) {
                    let (h, s, v) = rgb_to_hsv(r as f64, g as f64, b as f64);
                    let (r2, g2, b2) = hsv_to_rgb(h, s, v);
                    assert!(
                        (r2 as i32 - r as i32).abs() <= 1
                            && (g2 as i32 - g as i32).abs() <= 1
                            && (b2 as i32 - b as i32).abs() <= 1,
                        "({r},{g},{b}) -> ({r2},{g2},{b2})"
                    );
                }
            }
        }
    }
}
