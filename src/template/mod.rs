//! Reference 2D layouts and scaffold matching
//!
//! A depiction is only as readable as its layout, and for well-known
//! scaffolds (heme macrocycles, cages, fused ring systems) the generic
//! layout algorithm produces noticeably worse pictures than a curated
//! reference. This module owns the curated side: a read-only
//! [`TemplateLibrary`] of named scaffolds with hand-assigned coordinates,
//! and the matcher that decides which (if any) template a molecule should
//! inherit its layout from.

mod matcher;
mod registry;

pub use matcher::{find_best, MatchCandidate};
pub use registry::{Template, TemplateError, TemplateLibrary};

#[cfg(test)]
pub(crate) mod testutil {
    use crate::graph::{Atom, Molecule};
    use crate::template::Template;

    /// Build a target molecule with the exact structure of a template
    /// scaffold, with generated atom names.
    pub fn molecule_from_template(template: &Template, id: &str) -> Molecule {
        let mut mol = Molecule::new(id);
        for idx in template.scaffold.atoms() {
            let atom = template.scaffold.atom(idx);
            let name = format!("{}{}", atom.element.symbol().to_uppercase(), idx.index());
            mol.add_atom(Atom::new(atom.element, name).with_charge(atom.formal_charge))
                .expect("generated names are unique");
        }
        for edge in template.scaffold.bonds() {
            let (a, b) = template.scaffold.bond_endpoints(edge);
            mol.add_bond(a, b, template.scaffold.bond(edge).clone())
                .expect("scaffold bonds are valid");
        }
        mol
    }
}
