//! SVG rasterization for PNG output

use std::path::Path;

use resvg::{tiny_skia, usvg};

use super::RenderError;

/// Font files tried in order before falling back to whatever the system
/// font database offers. Rasterization succeeds even when every candidate is
/// missing; text nodes are simply skipped by the rasterizer in that case.
const FONT_CANDIDATES: [&str; 5] = [
    "/usr/share/fonts/gnu-free/FreeSans.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Rasterize an SVG document to PNG bytes at its declared size.
pub fn png_bytes(svg: &str) -> Result<Vec<u8>, RenderError> {
    let mut options = usvg::Options::default();
    load_fonts(options.fontdb_mut());

    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|e| RenderError::InvalidSvg(e.to_string()))?;
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width().max(1), size.height().max(1))
        .ok_or_else(|| RenderError::Raster("could not allocate pixmap".to_string()))?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    pixmap
        .encode_png()
        .map_err(|e| RenderError::Raster(e.to_string()))
}

fn load_fonts(db: &mut usvg::fontdb::Database) {
    for candidate in FONT_CANDIDATES {
        if Path::new(candidate).is_file() {
            let _ = db.load_font_file(candidate);
        }
    }
    db.load_system_fonts();
}
