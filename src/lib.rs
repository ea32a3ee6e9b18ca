//! ccd-depict - 2D depictions of chemical components
//!
//! This library turns a chemical-component graph into a 2D diagram. Layout
//! prefers curated templates for well-known scaffolds (so structurally
//! similar ligands do not end up with colliding, ambiguous pictures) and
//! falls back to generic coordinate generation otherwise. Output is an SVG
//! or PNG diagram plus a JSON annotation record describing the rendered
//! atoms and bonds.
//!
//! # Example
//!
//! ```rust
//! use ccd_depict::{
//!     compute_2d, render_svg, Atom, Bond, DepictionConfig, DepictionSource, Element, Molecule,
//!     RenderOptions, TemplateLibrary,
//! };
//!
//! let mut mol = Molecule::new("EOH");
//! let c1 = mol.add_atom(Atom::new(Element::from_symbol("C")?, "C1"))?;
//! let c2 = mol.add_atom(Atom::new(Element::from_symbol("C")?, "C2"))?;
//! let o = mol.add_atom(Atom::new(Element::from_symbol("O")?, "O1"))?;
//! mol.add_bond(c1, c2, Bond::default())?;
//! mol.add_bond(c2, o, Bond::default())?;
//!
//! let library = TemplateLibrary::bundled()?;
//! let depiction = compute_2d(&mol, &library, &DepictionConfig::default());
//! assert_eq!(depiction.source, DepictionSource::Algorithmic);
//!
//! let svg = render_svg(&mol, &depiction, &RenderOptions::default())?;
//! assert!(svg.contains("<svg"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod depict;
pub mod graph;
pub mod renderer;
pub mod sdf;
pub mod stylesheet;
pub mod template;

pub use depict::{
    compute_2d, DepictionConfig, DepictionResult, DepictionSource, LayoutError, Point,
};
pub use graph::{Atom, Bond, BondOrder, BondStereo, Element, GraphError, Molecule};
pub use renderer::{
    annotate, export_annotation, export_depiction, render_png, render_svg, save_no_image,
    DepictionAnnotation, PlaceholderConfig, RenderError, RenderOptions,
};
pub use sdf::{export_sdf, write_sdf};
pub use stylesheet::Stylesheet;
pub use template::{Template, TemplateError, TemplateLibrary};

use std::path::Path;

use thiserror::Error;

/// Errors that can surface from the complete depiction pipeline.
#[derive(Debug, Error)]
pub enum DepictError {
    /// Malformed input graph.
    #[error("graph construction error: {0}")]
    Graph(#[from] GraphError),

    /// Malformed template resource.
    #[error("template library error: {0}")]
    Template(#[from] TemplateError),

    /// Diagram or annotation output failure.
    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

/// Compute a depiction and write the diagram to `path` (SVG or PNG by
/// extension).
///
/// When no depiction can be computed at all, a placeholder image is written
/// instead, so the target path always ends up with a well-formed file. The
/// returned result reports which way the coordinates were obtained.
pub fn depict_to_file(
    molecule: &Molecule,
    library: &TemplateLibrary,
    config: &DepictionConfig,
    options: &RenderOptions,
    path: impl AsRef<Path>,
) -> Result<DepictionResult, DepictError> {
    let result = compute_2d(molecule, library, config);
    if depict::has_depiction(molecule, &result) {
        renderer::export_depiction(molecule, &result, options, &path)?;
    } else {
        renderer::save_no_image(&path, &PlaceholderConfig::default())?;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversions() {
        let graph_err: DepictError = GraphError::UnknownElement {
            symbol: "Xx".to_string(),
        }
        .into();
        assert!(matches!(graph_err, DepictError::Graph(_)));

        let render_err: DepictError = RenderError::NoDepiction.into();
        assert!(matches!(render_err, DepictError::Render(_)));
    }
}
