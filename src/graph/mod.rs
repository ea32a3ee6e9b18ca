//! Molecular graph model
//!
//! This module holds the structural representation every other part of the
//! crate consumes: atoms and bonds as typed records in an undirected
//! petgraph, constructed once from parsed dictionary data. Coordinate
//! overlays are kept out of the graph on purpose; see
//! [`crate::depict::DepictionResult`].

mod atom;
mod element;
mod molecule;

pub use atom::{Atom, Bond, BondOrder, BondStereo};
pub use element::Element;
pub use molecule::Molecule;

use thiserror::Error;

/// Errors raised while building a molecular graph from dictionary records.
///
/// These indicate malformed input and are surfaced to the caller; nothing in
/// the depiction pipeline itself produces them.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Element symbol not present in the periodic table.
    #[error("unknown element symbol: {symbol:?}")]
    UnknownElement { symbol: String },

    /// Two atoms with the same dictionary name.
    #[error("duplicate atom name: {name:?}")]
    DuplicateAtomName { name: String },

    /// Bond endpoint referencing a nonexistent atom.
    #[error("bond references nonexistent atom index {index}")]
    DanglingBond { index: usize },

    /// Bond with both endpoints on the same atom.
    #[error("bond connects atom {index} to itself")]
    SelfBond { index: usize },

    /// Second bond between the same pair of atoms.
    #[error("duplicate bond between atoms {a} and {b}")]
    DuplicateBond { a: usize, b: usize },
}
