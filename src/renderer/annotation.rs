//! Structured annotation record emitted alongside the diagram
//!
//! Downstream tools consume depictions programmatically; re-parsing SVG for
//! that is wasteful, so every render can also produce this JSON-serializable
//! record with the same atoms, labels and bond styling the diagram shows.

use serde::Serialize;

use crate::depict::DepictionResult;
use crate::graph::Molecule;

use super::scene::Scene;
use super::{RenderError, RenderOptions};

/// Canvas resolution of the described diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub x: f64,
    pub y: f64,
}

/// One label of an atom, split into display segments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelAnnotation {
    pub tspans: Vec<String>,
}

/// A rendered atom: name, labels and canvas position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtomAnnotation {
    pub name: String,
    pub labels: Vec<LabelAnnotation>,
    pub coords: [f64; 2],
}

/// A rendered bond between two named atoms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BondAnnotation {
    pub bgn: String,
    pub end: String,
    pub coords: Vec<[f64; 2]>,
    pub style: String,
}

/// Machine-readable description of one rendered depiction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepictionAnnotation {
    pub ccd_id: String,
    pub resolution: Resolution,
    pub atoms: Vec<AtomAnnotation>,
    pub bonds: Vec<BondAnnotation>,
}

/// Build the annotation record for a depicted molecule.
pub fn annotate(
    molecule: &Molecule,
    depiction: &DepictionResult,
    options: &RenderOptions,
) -> Result<DepictionAnnotation, RenderError> {
    let scene = Scene::build(molecule, depiction, options)?;

    let atoms = scene
        .atoms
        .iter()
        .map(|atom| AtomAnnotation {
            name: atom.name.clone(),
            labels: atom
                .labels
                .iter()
                .map(|tspans| LabelAnnotation {
                    tspans: tspans.clone(),
                })
                .collect(),
            coords: [atom.pos.x, atom.pos.y],
        })
        .collect();

    let bonds = scene
        .bonds
        .iter()
        .map(|bond| BondAnnotation {
            bgn: scene.atoms[bond.bgn].name.clone(),
            end: scene.atoms[bond.end].name.clone(),
            coords: vec![[bond.from.x, bond.from.y], [bond.to.x, bond.to.y]],
            style: bond.style.clone(),
        })
        .collect();

    Ok(DepictionAnnotation {
        ccd_id: molecule.id().to_string(),
        resolution: Resolution {
            x: scene.width as f64,
            y: scene.height as f64,
        },
        atoms,
        bonds,
    })
}
