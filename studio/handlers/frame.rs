use std::io::Cursor;
use tiny_http::Response;

use artgan::{apply_color_effects, ColorAdjustmentParams};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};

use crate::state::SharedState;
use crate::util::query::float_param;

// ---------------------------------------------------------------------------
// POST /generate
// ---------------------------------------------------------------------------

/// Runs the trained generator once and caches the raw image tensor. The
/// color pipeline never re-runs the generator; it only re-reads this tensor.
pub fn handle_generate(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = state.lock().unwrap();
    match st.session.as_mut() {
        Some(session) => {
            session.generate(None);
            crate::routes::json_response(r#"{"ok":true}"#, 200)
        }
        None => {
            crate::routes::json_response(r#"{"ok":false,"reason":"training in progress"}"#, 409)
        }
    }
}

// ---------------------------------------------------------------------------
// GET /frame and GET /save
// ---------------------------------------------------------------------------

/// Applies the query's adjustment parameters to the last generated image and
/// returns a PNG. `download` adds the attachment disposition for /save.
///
/// Error behavior follows the core's taxonomy: invalid parameters fall back
/// to the previous frame (never a corrupted buffer); a missing generated
/// image is logged and answered with 404 without touching any state.
pub fn handle_frame(query: &str, state: SharedState, download: bool) -> Response<Cursor<Vec<u8>>> {
    let contrast = float_param(query, "contrast", 1.0);
    let hue_shift = float_param(query, "hue", 0.0);
    let saturation = float_param(query, "saturation", 1.0);

    let mut st = state.lock().unwrap();

    let params = match ColorAdjustmentParams::new(contrast, hue_shift, saturation) {
        Ok(p) => p,
        Err(reason) => {
            eprintln!("rejected adjustment parameters: {reason}");
            return match &st.last_frame {
                Some(png) => crate::routes::png_response(png.clone(), download),
                None => crate::routes::json_response(
                    r#"{"ok":false,"reason":"invalid adjustment parameters"}"#,
                    400,
                ),
            };
        }
    };

    let image = match st.session.as_ref().and_then(|s| s.last_generated()) {
        Some(image) => image.clone(),
        None => {
            eprintln!("no generated image to render");
            return crate::routes::not_found();
        }
    };

    let buffer = apply_color_effects(&image, &params);
    let (h, w) = (image.shape[0] as u32, image.shape[1] as u32);

    let mut png: Vec<u8> = Vec::new();
    let encoder = PngEncoder::new(&mut png);
    if let Err(e) = encoder.write_image(&buffer, w, h, ColorType::Rgba8) {
        eprintln!("png encode failed: {e}");
        return crate::routes::json_response(r#"{"ok":false,"reason":"encode failed"}"#, 500);
    }

    st.last_frame = Some(png.clone());
    crate::routes::png_response(png, download)
}
