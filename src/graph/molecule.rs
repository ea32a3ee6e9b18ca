//! The molecular graph backing every depiction

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use super::{Atom, Bond, GraphError};

/// An undirected molecular graph plus the component identity it came from.
///
/// Built once from externally parsed dictionary records and structurally
/// immutable afterwards: the depiction pipeline only ever reads it. All
/// indices handed out by [`add_atom`](Molecule::add_atom) stay stable for the
/// life of the molecule, so coordinate overlays and annotations can key on
/// them safely.
#[derive(Debug, Clone)]
pub struct Molecule {
    id: String,
    graph: UnGraph<Atom, Bond>,
}

impl Molecule {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            graph: UnGraph::default(),
        }
    }

    /// Component identifier (e.g. the CCD three-letter code).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Add an atom. Fails if another atom already carries the same name.
    pub fn add_atom(&mut self, atom: Atom) -> Result<NodeIndex, GraphError> {
        if !atom.name.is_empty() && self.atom_by_name(&atom.name).is_some() {
            return Err(GraphError::DuplicateAtomName { name: atom.name });
        }
        Ok(self.graph.add_node(atom))
    }

    /// Add a bond between two existing atoms.
    ///
    /// Rejects dangling endpoints, self-bonds, and duplicate bonds so that a
    /// successfully built molecule always satisfies the matcher's input
    /// constraints.
    pub fn add_bond(
        &mut self,
        a: NodeIndex,
        b: NodeIndex,
        bond: Bond,
    ) -> Result<EdgeIndex, GraphError> {
        let node_count = self.graph.node_count();
        for endpoint in [a, b] {
            if endpoint.index() >= node_count {
                return Err(GraphError::DanglingBond {
                    index: endpoint.index(),
                });
            }
        }
        if a == b {
            return Err(GraphError::SelfBond { index: a.index() });
        }
        if self.graph.find_edge(a, b).is_some() {
            return Err(GraphError::DuplicateBond {
                a: a.index(),
                b: b.index(),
            });
        }
        Ok(self.graph.add_edge(a, b, bond))
    }

    pub fn atom(&self, idx: NodeIndex) -> &Atom {
        &self.graph[idx]
    }

    pub fn bond(&self, idx: EdgeIndex) -> &Bond {
        &self.graph[idx]
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn atoms(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn bonds(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    pub fn degree(&self, idx: NodeIndex) -> usize {
        self.graph.neighbors(idx).count()
    }

    pub fn bond_between(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(a, b)
    }

    pub fn bond_endpoints(&self, idx: EdgeIndex) -> (NodeIndex, NodeIndex) {
        self.graph
            .edge_endpoints(idx)
            .expect("edge indices are never removed")
    }

    pub fn bonds_of(&self, idx: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edges(idx).map(|e| e.id())
    }

    pub fn atom_by_name(&self, name: &str) -> Option<NodeIndex> {
        self.graph
            .node_indices()
            .find(|&idx| self.graph[idx].name == name)
    }

    /// Number of implicit-hydrogen markers shown for an atom label: the
    /// count of explicit hydrogen neighbors that will not get their own
    /// rendered label.
    pub fn attached_hydrogens(&self, idx: NodeIndex) -> usize {
        self.graph
            .neighbors(idx)
            .filter(|&n| self.graph[n].element.is_hydrogen())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{BondOrder, Element};

    fn atom(symbol: &str, name: &str) -> Atom {
        Atom::new(Element::from_symbol(symbol).unwrap(), name)
    }

    fn water() -> (Molecule, Vec<NodeIndex>) {
        let mut mol = Molecule::new("HOH");
        let o = mol.add_atom(atom("O", "O")).unwrap();
        let h1 = mol.add_atom(atom("H", "H1")).unwrap();
        let h2 = mol.add_atom(atom("H", "H2")).unwrap();
        mol.add_bond(o, h1, Bond::default()).unwrap();
        mol.add_bond(o, h2, Bond::default()).unwrap();
        (mol, vec![o, h1, h2])
    }

    #[test]
    fn test_build_water() {
        let (mol, idx) = water();
        assert_eq!(mol.id(), "HOH");
        assert_eq!(mol.atom_count(), 3);
        assert_eq!(mol.bond_count(), 2);
        assert_eq!(mol.degree(idx[0]), 2);
        assert_eq!(mol.attached_hydrogens(idx[0]), 2);
    }

    #[test]
    fn test_duplicate_atom_name_rejected() {
        let mut mol = Molecule::new("X");
        mol.add_atom(atom("C", "C1")).unwrap();
        let err = mol.add_atom(atom("C", "C1")).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateAtomName { .. }));
    }

    #[test]
    fn test_dangling_bond_rejected() {
        let mut mol = Molecule::new("X");
        let c = mol.add_atom(atom("C", "C1")).unwrap();
        let err = mol
            .add_bond(c, NodeIndex::new(7), Bond::default())
            .unwrap_err();
        assert!(matches!(err, GraphError::DanglingBond { index: 7 }));
    }

    #[test]
    fn test_self_and_duplicate_bonds_rejected() {
        let mut mol = Molecule::new("X");
        let a = mol.add_atom(atom("C", "C1")).unwrap();
        let b = mol.add_atom(atom("C", "C2")).unwrap();
        assert!(matches!(
            mol.add_bond(a, a, Bond::default()),
            Err(GraphError::SelfBond { .. })
        ));
        mol.add_bond(a, b, Bond::new(BondOrder::Double)).unwrap();
        assert!(matches!(
            mol.add_bond(b, a, Bond::default()),
            Err(GraphError::DuplicateBond { .. })
        ));
    }

    #[test]
    fn test_atom_by_name() {
        let (mol, idx) = water();
        assert_eq!(mol.atom_by_name("H2"), Some(idx[2]));
        assert_eq!(mol.atom_by_name("H3"), None);
    }
}
