//! Placeholder images for components without a computable depiction
//!
//! The rest of the pipeline may decline to produce a picture; this module
//! never does. Given a writable path it always leaves a well-formed image
//! behind, vector or raster according to the extension.

use std::path::Path;

use super::svg::escape_xml;
use super::{raster, RenderError};

/// Appearance of the placeholder image.
#[derive(Debug, Clone)]
pub struct PlaceholderConfig {
    /// Width (and height) of the square canvas in pixels.
    pub width: u32,
    /// Message shown in the middle of the canvas.
    pub message: String,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            width: 200,
            message: "No image available".to_string(),
        }
    }
}

impl PlaceholderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// Write a placeholder image to `path`.
///
/// An `.svg` extension produces a minimal vector document whose text node
/// carries the message verbatim; any other extension produces a PNG of the
/// same picture. Missing fonts never fail the raster path.
pub fn save_no_image(path: impl AsRef<Path>, config: &PlaceholderConfig) -> Result<(), RenderError> {
    let path = path.as_ref();
    let svg = placeholder_svg(config);
    let is_svg = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if is_svg {
        std::fs::write(path, svg)?;
    } else {
        let bytes = raster::png_bytes(&svg)?;
        std::fs::write(path, bytes)?;
    }
    Ok(())
}

fn placeholder_svg(config: &PlaceholderConfig) -> String {
    let width = config.width.max(16);
    let font_size = width / 8;
    format!(
        r##"<?xml version='1.0' encoding='UTF-8'?>
<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{width}" viewBox="0 0 {width} {width}">
  <rect x="0" y="0" width="{width}" height="{width}" fill="#FFFFFF" stroke="#CCCCCC"/>
  <text x="50%" y="50%" text-anchor="middle" dominant-baseline="middle" font-family="sans-serif" font-size="{font_size}" fill="#000000">{}</text>
</svg>
"##,
        escape_xml(&config.message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_svg_contains_message() {
        let svg = placeholder_svg(&PlaceholderConfig::new().with_message("foo"));
        assert!(svg.contains(">foo</text>"));
        assert!(svg.contains(r#"width="200""#));
    }

    #[test]
    fn test_placeholder_message_is_escaped() {
        let svg = placeholder_svg(&PlaceholderConfig::new().with_message("a<b"));
        assert!(svg.contains("a&lt;b"));
    }

    #[test]
    fn test_tiny_width_is_clamped() {
        let svg = placeholder_svg(&PlaceholderConfig::new().with_width(1));
        assert!(svg.contains(r#"width="16""#));
    }
}
