//! Shared scene construction for the SVG writer and the annotation record
//!
//! Both outputs must describe the exact same picture, so they are derived
//! from one intermediate scene: canvas-space atom positions, label segments
//! and styled bond descriptors. Hydrogens bonded to a heavy atom are folded
//! into that atom's label here; they never appear as scene atoms of their
//! own, which is what guarantees the "no bare hydrogen label" invariant.

use petgraph::graph::NodeIndex;

use crate::depict::{DepictionResult, Point};
use crate::graph::{BondOrder, BondStereo, Element, Molecule};

use super::{RenderError, RenderOptions};

pub(crate) struct Scene {
    pub width: u32,
    pub height: u32,
    pub atoms: Vec<SceneAtom>,
    pub bonds: Vec<SceneBond>,
}

pub(crate) struct SceneAtom {
    pub name: String,
    pub element: Element,
    pub pos: Point,
    /// Label segment lists; empty for atoms drawn without a label.
    pub labels: Vec<Vec<String>>,
}

pub(crate) struct SceneBond {
    /// Indices into `Scene::atoms`.
    pub bgn: usize,
    pub end: usize,
    pub from: Point,
    pub to: Point,
    pub order: BondOrder,
    pub stereo: BondStereo,
    pub style: String,
}

impl Scene {
    pub fn build(
        molecule: &Molecule,
        depiction: &DepictionResult,
        options: &RenderOptions,
    ) -> Result<Scene, RenderError> {
        if depiction.coords.len() != molecule.atom_count() || molecule.atom_count() == 0 {
            return Err(RenderError::NoDepiction);
        }

        let transform = CanvasTransform::fit(depiction, options);

        // A hydrogen riding on a heavy atom becomes part of that atom's
        // label; everything else is drawn in its own right.
        let folded: Vec<bool> = molecule
            .atoms()
            .map(|idx| {
                molecule.atom(idx).element.is_hydrogen()
                    && molecule
                        .neighbors(idx)
                        .any(|n| !molecule.atom(n).element.is_hydrogen())
            })
            .collect();

        let mut atoms = Vec::new();
        let mut scene_index = vec![usize::MAX; molecule.atom_count()];
        for idx in molecule.atoms() {
            if folded[idx.index()] {
                continue;
            }
            let atom = molecule.atom(idx);
            scene_index[idx.index()] = atoms.len();
            atoms.push(SceneAtom {
                name: atom.name.clone(),
                element: atom.element,
                pos: transform.apply(depiction.coords[idx.index()]),
                labels: build_labels(molecule, idx, options.names),
            });
        }

        let mut bonds = Vec::new();
        for edge in molecule.bonds() {
            let (a, b) = molecule.bond_endpoints(edge);
            if folded[a.index()] || folded[b.index()] {
                continue;
            }
            let bond = molecule.bond(edge);
            let style = match bond.stereo {
                BondStereo::WedgeUp => "wedge-up".to_string(),
                BondStereo::WedgeDown => "wedge-down".to_string(),
                BondStereo::None => bond.order.style_tag().to_string(),
            };
            bonds.push(SceneBond {
                bgn: scene_index[a.index()],
                end: scene_index[b.index()],
                from: atoms[scene_index[a.index()]].pos,
                to: atoms[scene_index[b.index()]].pos,
                order: bond.order,
                stereo: bond.stereo,
                style,
            });
        }

        Ok(Scene {
            width: options.width,
            height: options.height,
            atoms,
            bonds,
        })
    }
}

/// Label segments for one atom.
///
/// With `names` on, the dictionary name is the whole label. Otherwise
/// heteroatoms get their element symbol followed by the implicit-hydrogen
/// marker and count; carbons stay bare. The hydrogen marker is always pushed
/// onto the symbol's segment list, never emitted as a label of its own.
fn build_labels(molecule: &Molecule, idx: NodeIndex, names: bool) -> Vec<Vec<String>> {
    let atom = molecule.atom(idx);
    if names {
        return vec![vec![atom.name.clone()]];
    }
    if atom.element.is_carbon() {
        return Vec::new();
    }

    let mut tspans = vec![atom.element.symbol().to_string()];
    let hydrogens = molecule.attached_hydrogens(idx);
    if hydrogens > 0 {
        tspans.push("H".to_string());
        if hydrogens > 1 {
            tspans.push(hydrogens.to_string());
        }
    }
    match atom.formal_charge {
        0 => {}
        1 => tspans.push("+".to_string()),
        -1 => tspans.push("-".to_string()),
        c if c > 1 => tspans.push(format!("{c}+")),
        c => tspans.push(format!("{}-", -c)),
    }
    vec![tspans]
}

/// Maps depiction space (bond-length units, y up) onto the pixel canvas
/// (y down), scaled to fit inside the padded viewport and centered.
struct CanvasTransform {
    scale: f64,
    min_x: f64,
    min_y: f64,
    offset_x: f64,
    offset_y: f64,
    height: f64,
}

impl CanvasTransform {
    fn fit(depiction: &DepictionResult, options: &RenderOptions) -> Self {
        let (min_x, min_y, max_x, max_y) =
            depiction.bounds().unwrap_or((0.0, 0.0, 0.0, 0.0));
        let span_x = (max_x - min_x).max(1e-6);
        let span_y = (max_y - min_y).max(1e-6);
        let avail_x = (options.width as f64 - 2.0 * options.padding).max(1.0);
        let avail_y = (options.height as f64 - 2.0 * options.padding).max(1.0);
        let scale = (avail_x / span_x).min(avail_y / span_y);
        Self {
            scale,
            min_x,
            min_y,
            offset_x: (options.width as f64 - span_x * scale) / 2.0,
            offset_y: (options.height as f64 - span_y * scale) / 2.0,
            height: options.height as f64,
        }
    }

    fn apply(&self, p: Point) -> Point {
        let x = (p.x - self.min_x) * self.scale + self.offset_x;
        let y = (p.y - self.min_y) * self.scale + self.offset_y;
        Point::new(round2(x), round2(self.height - y))
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
