//! Substructure matching of template scaffolds against target molecules
//!
//! A template qualifies for a molecule only when its scaffold embeds
//! completely into the target graph: every scaffold atom maps to a distinct
//! target atom and every scaffold bond to a target bond. The search is a
//! VF2-style backtracking over scaffold atoms in connectivity order.

use log::debug;
use petgraph::graph::NodeIndex;

use crate::graph::{BondOrder, Molecule};

use super::Template;

/// A scored template match.
///
/// `mapping[i]` is the target atom carrying scaffold atom `i`. The score is
/// the template's penalty as reported by [`Template::score`]: zero for
/// collision-free templates, the scaffold symmetry count otherwise.
#[derive(Debug, Clone)]
pub struct MatchCandidate<'a> {
    pub template: &'a Template,
    pub mapping: Vec<NodeIndex>,
    pub score: u32,
}

/// Find the best-matching template for a target molecule, or `None` when no
/// scaffold embeds.
///
/// Ranking: any collision-free match beats any collision-prone match; within
/// a partition the largest scaffold wins, then the lower score, then the
/// earlier registration. Pure function over its inputs.
pub fn find_best<'a>(target: &Molecule, templates: &'a [Template]) -> Option<MatchCandidate<'a>> {
    let mut best: Option<(MatchKey, MatchCandidate<'a>)> = None;

    for (position, template) in templates.iter().enumerate() {
        let Some(mapping) = embed(target, template) else {
            continue;
        };
        debug!(
            "template {:?} embeds into {:?} ({} atoms)",
            template.name,
            target.id(),
            template.scaffold.atom_count()
        );

        let candidate = MatchCandidate {
            template,
            mapping,
            score: template.score(),
        };
        let key = MatchKey {
            collision_prone: template.collision_prone,
            size: template.scaffold.atom_count(),
            score: candidate.score,
            position,
        };
        match &best {
            Some((best_key, _)) if !key.beats(best_key) => {}
            _ => best = Some((key, candidate)),
        }
    }

    best.map(|(_, candidate)| candidate)
}

/// Count the distinct embeddings of a template scaffold into a target.
///
/// Used at registration time, with the scaffold as its own target, to derive
/// the symmetry count that scores collision-prone templates.
pub fn count_embeddings(target: &Molecule, scaffold: &Molecule) -> u32 {
    let mut search = Vf2::new(target, scaffold);
    search.run(false);
    search.found
}

/// First embedding of `scaffold` into `target`, as scaffold-index → target
/// node, or `None`.
pub fn embed(target: &Molecule, template: &Template) -> Option<Vec<NodeIndex>> {
    let mut search = Vf2::new(target, &template.scaffold);
    search.run(true);
    search.first
}

#[derive(Debug, Clone, Copy)]
struct MatchKey {
    collision_prone: bool,
    size: usize,
    score: u32,
    position: usize,
}

impl MatchKey {
    fn beats(&self, other: &MatchKey) -> bool {
        let lhs = (self.collision_prone, std::cmp::Reverse(self.size), self.score, self.position);
        let rhs = (
            other.collision_prone,
            std::cmp::Reverse(other.size),
            other.score,
            other.position,
        );
        lhs < rhs
    }
}

fn atoms_compatible(target: &Molecule, t: NodeIndex, query: &Molecule, q: NodeIndex) -> bool {
    target.atom(t).element == query.atom(q).element
}

/// Bond orders match exactly, except that an aromatic bond on either side is
/// compatible with single or double on the other. Component dictionaries
/// carry Kekulé assignments whose alternation rarely lines up with the
/// template's, so strict order equality would reject most ring scaffolds.
fn orders_compatible(a: BondOrder, b: BondOrder) -> bool {
    if a == b {
        return true;
    }
    matches!(
        (a, b),
        (BondOrder::Aromatic, BondOrder::Single | BondOrder::Double)
            | (BondOrder::Single | BondOrder::Double, BondOrder::Aromatic)
    )
}

struct Vf2<'a> {
    target: &'a Molecule,
    query: &'a Molecule,
    query_order: Vec<NodeIndex>,
    query_map: Vec<Option<NodeIndex>>,
    target_used: Vec<bool>,
    first: Option<Vec<NodeIndex>>,
    found: u32,
}

/// Visit order for scaffold atoms: greedily extend along connectivity so
/// every atom after the first is checked against at least one already-mapped
/// neighbor. A plain degree sort would map large sets of mutually
/// non-adjacent atoms unconstrained and blow up on ring macrocycles.
fn connectivity_order(query: &Molecule) -> Vec<NodeIndex> {
    let n = query.atom_count();
    let mut order = Vec::with_capacity(n);
    let mut chosen = vec![false; n];
    for _ in 0..n {
        let next = query
            .atoms()
            .filter(|a| !chosen[a.index()])
            .max_by_key(|&a| {
                let anchored = query.neighbors(a).filter(|nb| chosen[nb.index()]).count();
                (anchored, query.degree(a), std::cmp::Reverse(a.index()))
            })
            .expect("unchosen atom remains");
        chosen[next.index()] = true;
        order.push(next);
    }
    order
}

impl<'a> Vf2<'a> {
    fn new(target: &'a Molecule, query: &'a Molecule) -> Self {
        let query_order = connectivity_order(query);
        Self {
            target,
            query,
            query_order,
            query_map: vec![None; query.atom_count()],
            target_used: vec![false; target.atom_count()],
            first: None,
            found: 0,
        }
    }

    fn run(&mut self, first_only: bool) {
        if self.query.atom_count() > self.target.atom_count()
            || self.query.bond_count() > self.target.bond_count()
        {
            return;
        }
        self.recurse(0, first_only);
    }

    fn recurse(&mut self, depth: usize, first_only: bool) {
        if depth == self.query_order.len() {
            self.found += 1;
            if self.first.is_none() {
                let mapping = (0..self.query.atom_count())
                    .map(|i| self.query_map[i].expect("complete mapping"))
                    .collect();
                self.first = Some(mapping);
            }
            return;
        }
        if first_only && self.found > 0 {
            return;
        }

        let query_node = self.query_order[depth];
        for t_idx in 0..self.target_used.len() {
            if self.target_used[t_idx] {
                continue;
            }
            let target_node = NodeIndex::new(t_idx);
            if !self.is_feasible(query_node, target_node) {
                continue;
            }

            self.query_map[query_node.index()] = Some(target_node);
            self.target_used[t_idx] = true;
            self.recurse(depth + 1, first_only);
            self.query_map[query_node.index()] = None;
            self.target_used[t_idx] = false;

            if first_only && self.found > 0 {
                return;
            }
        }
    }

    fn is_feasible(&self, query_node: NodeIndex, target_node: NodeIndex) -> bool {
        if !atoms_compatible(self.target, target_node, self.query, query_node) {
            return false;
        }
        if self.target.degree(target_node) < self.query.degree(query_node) {
            return false;
        }
        for q_neighbor in self.query.neighbors(query_node) {
            if let Some(t_mapped) = self.query_map[q_neighbor.index()] {
                let q_bond = self
                    .query
                    .bond_between(query_node, q_neighbor)
                    .expect("bond exists between neighbors");
                match self.target.bond_between(target_node, t_mapped) {
                    Some(t_bond) => {
                        if !orders_compatible(
                            self.target.bond(t_bond).order,
                            self.query.bond(q_bond).order,
                        ) {
                            return false;
                        }
                    }
                    None => return false,
                }
            }
        }
        true
    }
}
