//! Depiction orchestration: template overlay first, algorithmic fallback

use log::{debug, info};

use crate::graph::Molecule;
use crate::template::TemplateLibrary;

use super::{coords, DepictionConfig, DepictionResult, DepictionSource, Point};

/// Compute 2D coordinates for a molecule.
///
/// Tries the template library first: when a scaffold matches, the matched
/// atoms inherit the template's coordinates and the remainder is placed
/// around them. Without a match, or when the constrained completion cannot
/// find room, the whole graph goes through generic layout instead. The
/// returned result carries the provenance of whichever path won.
///
/// Each call recomputes from scratch and stands alone; callers replace any
/// previously held result.
pub fn compute_2d(
    molecule: &Molecule,
    library: &TemplateLibrary,
    config: &DepictionConfig,
) -> DepictionResult {
    if molecule.atom_count() == 0 {
        info!("{}: empty graph, no depiction", molecule.id());
        return DepictionResult::empty();
    }

    if let Some(candidate) = library.find_best(molecule) {
        let mut anchors: Vec<Option<Point>> = vec![None; molecule.atom_count()];
        for (scaffold_idx, &target) in candidate.mapping.iter().enumerate() {
            anchors[target.index()] = Some(candidate.template.coords[scaffold_idx]);
        }
        match coords::complete(molecule, &anchors, config) {
            Ok(finalized) => {
                info!(
                    "{}: depicted from template {:?} (score {})",
                    molecule.id(),
                    candidate.template.name,
                    candidate.score
                );
                return DepictionResult::from_template(
                    &candidate.template.name,
                    candidate.score,
                    finalized,
                );
            }
            Err(err) => {
                // Never leave a partial placement behind; redo everything.
                debug!(
                    "{}: template {:?} overlay abandoned ({err}), using algorithmic layout",
                    molecule.id(),
                    candidate.template.name
                );
            }
        }
    }

    let finalized = coords::generate(molecule, config);
    info!("{}: depicted algorithmically", molecule.id());
    DepictionResult::algorithmic(finalized)
}

/// True when the result carries usable coordinates for every atom.
pub fn has_depiction(molecule: &Molecule, result: &DepictionResult) -> bool {
    result.source != DepictionSource::None && result.coords.len() == molecule.atom_count()
}
