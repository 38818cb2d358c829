/// Renders the studio's single page.
///
/// The template lives in `studio/assets/art.html` and is embedded at compile
/// time; the only placeholders are the configuration values the page's
/// JavaScript needs to label the sliders and size the canvas.
use artgan::GanConfig;

const TEMPLATE: &str = include_str!("assets/art.html");

pub fn index_page(config: &GanConfig) -> String {
    TEMPLATE
        .replace("{{IMAGE_SIZE}}", &config.image_size.to_string())
        .replace("{{NOISE_DIM}}", &config.noise_dim.to_string())
}
