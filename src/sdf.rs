//! V2000 molfile (SDF) export
//!
//! Mechanical writer for downstream tools that want the component as a
//! molfile: atom block with coordinates, bond block with order and wedge
//! flags, alias lines carrying the dictionary atom names, and `M  CHG`
//! properties for charged atoms.

use std::io::Write as _;
use std::path::Path;

use crate::depict::DepictionResult;
use crate::graph::{BondOrder, BondStereo, Molecule};

/// Serialize a molecule as a V2000 molblock.
///
/// With a depiction overlay the 2D coordinates are written (z = 0);
/// otherwise the dictionary's ideal 3D coordinates are used where present.
pub fn write_sdf(molecule: &Molecule, depiction: Option<&DepictionResult>) -> String {
    let mut out = String::new();
    out.push_str(molecule.id());
    out.push('\n');
    out.push_str("  ccd-depict\n");
    out.push('\n');
    out.push_str(&format!(
        "{:>3}{:>3}  0  0  0  0  0  0  0  0999 V2000\n",
        molecule.atom_count(),
        molecule.bond_count()
    ));

    for idx in molecule.atoms() {
        let atom = molecule.atom(idx);
        let (x, y, z) = match depiction.and_then(|d| d.coords.get(idx.index())) {
            Some(p) => (p.x, p.y, 0.0),
            None => match atom.ideal_xyz {
                Some([x, y, z]) => (x, y, z),
                None => (0.0, 0.0, 0.0),
            },
        };
        out.push_str(&format!(
            "{x:>10.4}{y:>10.4}{z:>10.4} {:<3} 0  0  0  0  0  0  0  0  0  0  0  0\n",
            atom.element.symbol()
        ));
    }

    for edge in molecule.bonds() {
        let (a, b) = molecule.bond_endpoints(edge);
        let bond = molecule.bond(edge);
        let order = match bond.order {
            BondOrder::Single => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
            BondOrder::Aromatic => 4,
        };
        let stereo = match bond.stereo {
            BondStereo::None => 0,
            BondStereo::WedgeUp => 1,
            BondStereo::WedgeDown => 6,
        };
        out.push_str(&format!(
            "{:>3}{:>3}{order:>3}{stereo:>3}\n",
            a.index() + 1,
            b.index() + 1
        ));
    }

    for idx in molecule.atoms() {
        let atom = molecule.atom(idx);
        if !atom.name.is_empty() {
            out.push_str(&format!("A  {:>3}\n{}\n", idx.index() + 1, atom.name));
        }
    }
    for idx in molecule.atoms() {
        let charge = molecule.atom(idx).formal_charge;
        if charge != 0 {
            out.push_str(&format!("M  CHG  1 {:>3} {:>3}\n", idx.index() + 1, charge));
        }
    }
    out.push_str("M  END\n");
    out
}

/// Write the molblock to a file.
pub fn export_sdf(
    molecule: &Molecule,
    depiction: Option<&DepictionResult>,
    path: impl AsRef<Path>,
) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(write_sdf(molecule, depiction).as_bytes())?;
    Ok(())
}
