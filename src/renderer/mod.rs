//! Diagram and annotation output
//!
//! This module takes a molecule plus its finalized coordinate overlay and
//! produces the user-facing artifacts: an SVG (or rasterized PNG) diagram
//! and a structured JSON annotation record describing the same picture.

mod annotation;
mod config;
mod fallback;
mod raster;
mod scene;
mod svg;

pub use annotation::{
    annotate, AtomAnnotation, BondAnnotation, DepictionAnnotation, LabelAnnotation, Resolution,
};
pub use config::RenderOptions;
pub use fallback::{save_no_image, PlaceholderConfig};
pub use raster::png_bytes;
pub use svg::{render_svg, ATOM_NAMESPACE};

use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::Path;

use thiserror::Error;

use crate::depict::DepictionResult;
use crate::graph::Molecule;

/// Errors during diagram or annotation output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The depiction overlay does not cover the molecule.
    #[error("molecule has no usable 2D depiction")]
    NoDepiction,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize annotation: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid SVG document: {0}")]
    InvalidSvg(String),

    #[error("rasterization failed: {0}")]
    Raster(String),
}

/// Render a depicted molecule to PNG bytes.
pub fn render_png(
    molecule: &Molecule,
    depiction: &DepictionResult,
    options: &RenderOptions,
) -> Result<Vec<u8>, RenderError> {
    let svg = render_svg(molecule, depiction, options)?;
    raster::png_bytes(&svg)
}

/// Write a diagram to `path`, choosing SVG or PNG by the file extension
/// (anything other than `.svg` is rasterized).
pub fn export_depiction(
    molecule: &Molecule,
    depiction: &DepictionResult,
    options: &RenderOptions,
    path: impl AsRef<Path>,
) -> Result<(), RenderError> {
    let path = path.as_ref();
    let is_svg = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if is_svg {
        let svg = render_svg(molecule, depiction, options)?;
        std::fs::write(path, svg)?;
    } else {
        let bytes = render_png(molecule, depiction, options)?;
        std::fs::write(path, bytes)?;
    }
    Ok(())
}

/// Write the annotation record for a depicted molecule as JSON.
pub fn export_annotation(
    molecule: &Molecule,
    depiction: &DepictionResult,
    options: &RenderOptions,
    path: impl AsRef<Path>,
) -> Result<(), RenderError> {
    let record = annotate(molecule, depiction, options)?;
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &record)?;
    writer.flush()?;
    Ok(())
}
