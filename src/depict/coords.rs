//! Generic 2D coordinate generation
//!
//! Two entry points: [`generate`] lays out a whole molecule from scratch and
//! is total; [`complete`] keeps a set of anchored coordinates fixed (the
//! template overlay) and places only the remainder, failing with
//! [`LayoutError`] when the anchored geometry leaves no room. Rings are drawn
//! as regular polygons, acyclic atoms by widest-gap angular placement.

use std::collections::VecDeque;
use std::f64::consts::PI;

use itertools::Itertools;
use log::debug;
use petgraph::graph::NodeIndex;

use crate::graph::Molecule;

use super::{DepictionConfig, LayoutError, Point};

/// Fallback rotations tried around a blocked candidate angle, in degrees.
const ANGLE_FALLBACKS: [f64; 9] = [0.0, 20.0, -20.0, 40.0, -40.0, 60.0, -60.0, 90.0, -90.0];

/// Generate coordinates for every atom of the molecule.
pub fn generate(mol: &Molecule, config: &DepictionConfig) -> Vec<Point> {
    let mut placed = vec![None; mol.atom_count()];
    fill(mol, &mut placed, config, false).expect("unconstrained layout is total");
    placed
        .into_iter()
        .map(|p| p.expect("every atom placed"))
        .collect()
}

/// Complete a partially anchored layout without moving the anchors.
pub fn complete(
    mol: &Molecule,
    anchors: &[Option<Point>],
    config: &DepictionConfig,
) -> Result<Vec<Point>, LayoutError> {
    for (i, anchor) in anchors.iter().enumerate() {
        if let Some(p) = anchor {
            if !p.x.is_finite() || !p.y.is_finite() {
                return Err(LayoutError::NonFinite {
                    name: mol.atom(NodeIndex::new(i)).name.clone(),
                });
            }
        }
    }
    let mut placed = anchors.to_vec();
    fill(mol, &mut placed, config, true)?;
    Ok(placed
        .into_iter()
        .map(|p| p.expect("every atom placed"))
        .collect())
}

fn fill(
    mol: &Molecule,
    placed: &mut [Option<Point>],
    config: &DepictionConfig,
    strict: bool,
) -> Result<(), LayoutError> {
    let rings = perceive_rings(mol);
    let mut right_edge: Option<f64> = placed
        .iter()
        .flatten()
        .map(|p| p.x)
        .fold(None, |acc, x| Some(acc.map_or(x, |a: f64| a.max(x))));

    for comp in components(mol) {
        let comp_rings: Vec<&Vec<NodeIndex>> = rings
            .iter()
            .filter(|ring| ring.iter().all(|a| comp.contains(a)))
            .collect();
        let anchored = comp.iter().any(|&a| placed[a.index()].is_some());

        if anchored {
            layout_component(mol, &comp, &comp_rings, placed, config, strict)?;
        } else {
            // Fresh fragments are laid out around the origin in scratch
            // space, then shifted next to what is already on the canvas.
            let mut local: Vec<Option<Point>> = vec![None; mol.atom_count()];
            layout_component(mol, &comp, &comp_rings, &mut local, config, false)?;
            let min_x = comp
                .iter()
                .map(|&a| local[a.index()].expect("component laid out").x)
                .fold(f64::INFINITY, f64::min);
            let dx = match right_edge {
                Some(right) => right + config.fragment_gap * config.bond_length - min_x,
                None => 0.0,
            };
            for &a in &comp {
                let p = local[a.index()].expect("component laid out");
                placed[a.index()] = Some(Point::new(p.x + dx, p.y));
            }
        }

        for &a in &comp {
            let x = placed[a.index()].expect("component laid out").x;
            right_edge = Some(right_edge.map_or(x, |r| r.max(x)));
        }
    }
    Ok(())
}

fn layout_component(
    mol: &Molecule,
    comp: &[NodeIndex],
    rings: &[&Vec<NodeIndex>],
    placed: &mut [Option<Point>],
    config: &DepictionConfig,
    strict: bool,
) -> Result<(), LayoutError> {
    if !comp.iter().any(|&a| placed[a.index()].is_some()) {
        seed_component(comp, rings, placed, config);
    }

    loop {
        let mut progress = false;
        for &ring in rings {
            progress |= complete_ring(ring, placed, config);
        }
        if progress {
            continue;
        }

        match next_unplaced_neighbor(mol, comp, placed) {
            Some((parent, atom)) => {
                place_neighbor(mol, parent, atom, placed, config, strict)?;
            }
            None => break,
        }
    }

    debug_assert!(comp.iter().all(|&a| placed[a.index()].is_some()));
    Ok(())
}

fn seed_component(
    comp: &[NodeIndex],
    rings: &[&Vec<NodeIndex>],
    placed: &mut [Option<Point>],
    config: &DepictionConfig,
) {
    if let Some(ring) = rings.first() {
        let n = ring.len() as f64;
        let radius = config.bond_length / (2.0 * (PI / n).sin());
        for (k, &atom) in ring.iter().enumerate() {
            let angle = PI / 2.0 + 2.0 * PI * k as f64 / n;
            placed[atom.index()] = Some(Point::new(radius * angle.cos(), radius * angle.sin()));
        }
    } else {
        let start = comp[0];
        placed[start.index()] = Some(Point::new(0.0, 0.0));
    }
}

/// Place the unplaced atoms of a partially placed ring on its polygon
/// circle. Returns whether anything was placed.
fn complete_ring(ring: &[NodeIndex], placed: &mut [Option<Point>], config: &DepictionConfig) -> bool {
    let n = ring.len();
    let placed_count = ring.iter().filter(|&&a| placed[a.index()].is_some()).count();
    if placed_count == 0 || placed_count == n {
        return false;
    }

    // Prefer growing from a placed edge; fall back to a lone placed vertex.
    let edge = (0..n).find(|&i| {
        placed[ring[i].index()].is_some() && placed[ring[(i + 1) % n].index()].is_some()
    });

    let (start, center, start_angle, step) = match edge {
        Some(i) => {
            let pa = placed[ring[i].index()].expect("edge start placed");
            let pb = placed[ring[(i + 1) % n].index()].expect("edge end placed");
            let side = pa.distance(pb);
            if side < 1e-9 {
                return false;
            }
            let radius = side / (2.0 * (PI / n as f64).sin());
            let apothem = radius * (PI / n as f64).cos();
            let mid = Point::new((pa.x + pb.x) / 2.0, (pa.y + pb.y) / 2.0);
            let (ux, uy) = ((pb.x - pa.x) / side, (pb.y - pa.y) / side);
            // Two candidate centers, one on each side of the edge; take the
            // one farther from the rest of the placed atoms.
            let c1 = Point::new(mid.x - uy * apothem, mid.y + ux * apothem);
            let c2 = Point::new(mid.x + uy * apothem, mid.y - ux * apothem);
            let center = farther_candidate(c1, c2, ring, placed);
            let a0 = (pa.y - center.y).atan2(pa.x - center.x);
            let a1 = (pb.y - center.y).atan2(pb.x - center.x);
            let step = wrap_angle(a1 - a0);
            (i, center, a0, step)
        }
        None => {
            let i = (0..n)
                .find(|&i| placed[ring[i].index()].is_some())
                .expect("at least one placed");
            let pv = placed[ring[i].index()].expect("vertex placed");
            let radius = config.bond_length / (2.0 * (PI / n as f64).sin());
            let dir = away_direction(pv, placed);
            let center = Point::new(pv.x + dir.0 * radius, pv.y + dir.1 * radius);
            let a0 = (pv.y - center.y).atan2(pv.x - center.x);
            (i, center, a0, 2.0 * PI / n as f64)
        }
    };

    let radius = placed[ring[start].index()]
        .expect("start placed")
        .distance(center);
    let mut progress = false;
    for k in 1..n {
        let atom = ring[(start + k) % n];
        if placed[atom.index()].is_some() {
            continue;
        }
        let angle = start_angle + step * k as f64;
        placed[atom.index()] = Some(Point::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        ));
        progress = true;
    }
    progress
}

fn farther_candidate(c1: Point, c2: Point, ring: &[NodeIndex], placed: &[Option<Point>]) -> Point {
    let others: Vec<Point> = placed
        .iter()
        .enumerate()
        .filter(|(i, p)| p.is_some() && !ring.iter().any(|a| a.index() == *i))
        .map(|(_, p)| p.expect("filtered on some"))
        .collect();
    if others.is_empty() {
        return c1;
    }
    let score = |c: Point| others.iter().map(|p| c.distance(*p)).sum::<f64>();
    if score(c2) > score(c1) {
        c2
    } else {
        c1
    }
}

/// Unit vector pointing away from the centroid of everything placed so far.
fn away_direction(from: Point, placed: &[Option<Point>]) -> (f64, f64) {
    let pts: Vec<&Point> = placed.iter().flatten().collect();
    let (mut cx, mut cy) = (0.0, 0.0);
    for p in &pts {
        cx += p.x;
        cy += p.y;
    }
    let n = pts.len() as f64;
    let (dx, dy) = (from.x - cx / n, from.y - cy / n);
    let len = dx.hypot(dy);
    if len < 1e-9 {
        (1.0, 0.0)
    } else {
        (dx / len, dy / len)
    }
}

fn next_unplaced_neighbor(
    mol: &Molecule,
    comp: &[NodeIndex],
    placed: &[Option<Point>],
) -> Option<(NodeIndex, NodeIndex)> {
    for &atom in comp {
        if placed[atom.index()].is_none() {
            continue;
        }
        if let Some(next) = mol
            .neighbors(atom)
            .sorted()
            .find(|n| placed[n.index()].is_none())
        {
            return Some((atom, next));
        }
    }
    None
}

fn place_neighbor(
    mol: &Molecule,
    parent: NodeIndex,
    atom: NodeIndex,
    placed: &mut [Option<Point>],
    config: &DepictionConfig,
    strict: bool,
) -> Result<(), LayoutError> {
    let origin = placed[parent.index()].expect("parent placed");
    let neighbor_angles: Vec<f64> = mol
        .neighbors(parent)
        .filter_map(|n| placed[n.index()])
        .map(|p| (p.y - origin.y).atan2(p.x - origin.x))
        .sorted_by(|a, b| a.partial_cmp(b).expect("finite angles"))
        .collect();

    let base = match neighbor_angles.len() {
        0 => 0.0,
        // A single placed neighbor gives the classic 120-degree zigzag; the
        // collision scan below decides which side.
        1 => neighbor_angles[0] + 2.0 * PI / 3.0,
        _ => widest_gap_midpoint(&neighbor_angles),
    };

    let threshold = config.min_separation * config.bond_length;
    let mut best: Option<(f64, Point)> = None;
    for fallback in ANGLE_FALLBACKS {
        let angle = base + fallback.to_radians();
        let candidate = Point::new(
            origin.x + config.bond_length * angle.cos(),
            origin.y + config.bond_length * angle.sin(),
        );
        let clearance = placed
            .iter()
            .enumerate()
            .filter(|(i, p)| p.is_some() && *i != parent.index())
            .map(|(_, p)| candidate.distance(p.expect("filtered on some")))
            .fold(f64::INFINITY, f64::min);
        if clearance >= threshold {
            placed[atom.index()] = Some(candidate);
            return Ok(());
        }
        if best.map_or(true, |(c, _)| clearance > c) {
            best = Some((clearance, candidate));
        }
    }

    if strict {
        debug!(
            "constrained placement failed for atom {:?}",
            mol.atom(atom).name
        );
        return Err(LayoutError::Congested {
            name: mol.atom(atom).name.clone(),
        });
    }
    let (_, candidate) = best.expect("fallback list is non-empty");
    placed[atom.index()] = Some(candidate);
    Ok(())
}

fn widest_gap_midpoint(sorted_angles: &[f64]) -> f64 {
    let n = sorted_angles.len();
    let mut best_gap = -1.0;
    let mut best_mid = 0.0;
    for i in 0..n {
        let a = sorted_angles[i];
        let b = if i + 1 < n {
            sorted_angles[i + 1]
        } else {
            sorted_angles[0] + 2.0 * PI
        };
        let gap = b - a;
        if gap > best_gap {
            best_gap = gap;
            best_mid = a + gap / 2.0;
        }
    }
    best_mid
}

fn wrap_angle(a: f64) -> f64 {
    let mut a = a;
    while a > PI {
        a -= 2.0 * PI;
    }
    while a < -PI {
        a += 2.0 * PI;
    }
    a
}

/// Connected components, each sorted by atom index, ordered by their
/// smallest member.
fn components(mol: &Molecule) -> Vec<Vec<NodeIndex>> {
    let mut seen = vec![false; mol.atom_count()];
    let mut result = Vec::new();
    for start in mol.atoms() {
        if seen[start.index()] {
            continue;
        }
        let mut comp = Vec::new();
        let mut queue = VecDeque::from([start]);
        seen[start.index()] = true;
        while let Some(atom) = queue.pop_front() {
            comp.push(atom);
            for n in mol.neighbors(atom).sorted() {
                if !seen[n.index()] {
                    seen[n.index()] = true;
                    queue.push_back(n);
                }
            }
        }
        comp.sort();
        result.push(comp);
    }
    result
}

/// Smallest rings of the molecule: one shortest cycle per non-tree edge of a
/// BFS spanning forest, deduplicated. Ordered by size, then by atom indices,
/// so downstream placement is deterministic.
pub(crate) fn perceive_rings(mol: &Molecule) -> Vec<Vec<NodeIndex>> {
    let mut in_tree = vec![false; mol.bond_count()];
    let mut seen = vec![false; mol.atom_count()];
    for start in mol.atoms() {
        if seen[start.index()] {
            continue;
        }
        seen[start.index()] = true;
        let mut queue = VecDeque::from([start]);
        while let Some(atom) = queue.pop_front() {
            for n in mol.neighbors(atom).sorted() {
                if !seen[n.index()] {
                    seen[n.index()] = true;
                    let edge = mol.bond_between(atom, n).expect("neighbor edge");
                    in_tree[edge.index()] = true;
                    queue.push_back(n);
                }
            }
        }
    }

    let mut rings: Vec<Vec<NodeIndex>> = Vec::new();
    for edge in mol.bonds() {
        if in_tree[edge.index()] {
            continue;
        }
        let (u, v) = mol.bond_endpoints(edge);
        if let Some(path) = shortest_path_avoiding(mol, u, v, edge) {
            rings.push(normalize_ring(path));
        }
    }
    rings.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    rings.dedup();
    rings
}

fn shortest_path_avoiding(
    mol: &Molecule,
    from: NodeIndex,
    to: NodeIndex,
    avoid: petgraph::graph::EdgeIndex,
) -> Option<Vec<NodeIndex>> {
    let mut prev: Vec<Option<NodeIndex>> = vec![None; mol.atom_count()];
    let mut seen = vec![false; mol.atom_count()];
    seen[from.index()] = true;
    let mut queue = VecDeque::from([from]);
    while let Some(atom) = queue.pop_front() {
        if atom == to {
            let mut path = vec![to];
            let mut cur = to;
            while let Some(p) = prev[cur.index()] {
                path.push(p);
                cur = p;
            }
            path.reverse();
            return Some(path);
        }
        for n in mol.neighbors(atom).sorted() {
            let edge = mol.bond_between(atom, n).expect("neighbor edge");
            if edge == avoid || seen[n.index()] {
                continue;
            }
            seen[n.index()] = true;
            prev[n.index()] = Some(atom);
            queue.push_back(n);
        }
    }
    None
}

/// Rotate/reflect a cycle so it starts at its smallest atom and proceeds
/// toward its smaller neighbor, giving a canonical form for deduplication.
fn normalize_ring(ring: Vec<NodeIndex>) -> Vec<NodeIndex> {
    let n = ring.len();
    let start = (0..n)
        .min_by_key(|&i| ring[i])
        .expect("cycle is non-empty");
    let forward: Vec<NodeIndex> = (0..n).map(|k| ring[(start + k) % n]).collect();
    let backward: Vec<NodeIndex> = (0..n).map(|k| ring[(start + n - k) % n]).collect();
    if forward[1..] <= backward[1..] {
        forward
    } else {
        backward
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Atom, Bond, Element};

    fn carbon(name: &str) -> Atom {
        Atom::new(Element::from_symbol("C").unwrap(), name)
    }

    fn ring_molecule(size: usize) -> Molecule {
        let mut mol = Molecule::new("RING");
        let atoms: Vec<NodeIndex> = (0..size)
            .map(|i| mol.add_atom(carbon(&format!("C{i}"))).unwrap())
            .collect();
        for i in 0..size {
            mol.add_bond(atoms[i], atoms[(i + 1) % size], Bond::default())
                .unwrap();
        }
        mol
    }

    fn chain_molecule(size: usize) -> Molecule {
        let mut mol = Molecule::new("CHAIN");
        let atoms: Vec<NodeIndex> = (0..size)
            .map(|i| mol.add_atom(carbon(&format!("C{i}"))).unwrap())
            .collect();
        for i in 1..size {
            mol.add_bond(atoms[i - 1], atoms[i], Bond::default()).unwrap();
        }
        mol
    }

    fn pairwise_separated(coords: &[Point], min: f64) {
        for (i, a) in coords.iter().enumerate() {
            for b in &coords[i + 1..] {
                assert!(
                    a.distance(*b) >= min,
                    "atoms too close: {a:?} vs {b:?}"
                );
            }
        }
    }

    #[test]
    fn test_ring_perception_benzene() {
        let mol = ring_molecule(6);
        let rings = perceive_rings(&mol);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 6);
    }

    #[test]
    fn test_ring_perception_chain_has_none() {
        let mol = chain_molecule(5);
        assert!(perceive_rings(&mol).is_empty());
    }

    #[test]
    fn test_ring_layout_is_regular_polygon() {
        let config = DepictionConfig::default();
        let mol = ring_molecule(6);
        let coords = generate(&mol, &config);
        assert_eq!(coords.len(), 6);
        for i in 0..6 {
            let d = coords[i].distance(coords[(i + 1) % 6]);
            assert!((d - config.bond_length).abs() < 1e-6, "side {i} was {d}");
        }
    }

    #[test]
    fn test_chain_layout_keeps_bond_lengths() {
        let config = DepictionConfig::default();
        let mol = chain_molecule(8);
        let coords = generate(&mol, &config);
        for i in 1..8 {
            let d = coords[i - 1].distance(coords[i]);
            assert!((d - config.bond_length).abs() < 1e-6);
        }
        pairwise_separated(&coords, 0.5 * config.bond_length);
    }

    #[test]
    fn test_disconnected_fragments_are_offset() {
        let config = DepictionConfig::default();
        let mut mol = Molecule::new("NACL");
        let na = mol
            .add_atom(Atom::new(Element::from_symbol("Na").unwrap(), "NA"))
            .unwrap();
        let cl = mol
            .add_atom(Atom::new(Element::from_symbol("Cl").unwrap(), "CL"))
            .unwrap();
        let coords = generate(&mol, &config);
        let gap = coords[cl.index()].x - coords[na.index()].x;
        assert!(gap >= config.fragment_gap * config.bond_length - 1e-9);
    }

    #[test]
    fn test_generate_is_deterministic() {
        let config = DepictionConfig::default();
        let mol = ring_molecule(5);
        let a = generate(&mol, &config);
        let b = generate(&mol, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_complete_keeps_anchors() {
        let config = DepictionConfig::default();
        let mol = chain_molecule(4);
        let mut anchors = vec![None; 4];
        anchors[0] = Some(Point::new(10.0, 10.0));
        anchors[1] = Some(Point::new(11.5, 10.0));
        let coords = complete(&mol, &anchors, &config).unwrap();
        assert_eq!(coords[0], Point::new(10.0, 10.0));
        assert_eq!(coords[1], Point::new(11.5, 10.0));
        let d = coords[1].distance(coords[2]);
        assert!((d - config.bond_length).abs() < 1e-6);
    }

    #[test]
    fn test_complete_rejects_non_finite_anchor() {
        let config = DepictionConfig::default();
        let mol = chain_molecule(2);
        let anchors = vec![Some(Point::new(f64::NAN, 0.0)), None];
        assert!(matches!(
            complete(&mol, &anchors, &config),
            Err(LayoutError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_fused_rings_share_edge() {
        // Naphthalene-like fused pair: two hexagons sharing one edge.
        let mut mol = Molecule::new("NAPH");
        let atoms: Vec<NodeIndex> = (0..10)
            .map(|i| mol.add_atom(carbon(&format!("C{i}"))).unwrap())
            .collect();
        for i in 0..6 {
            mol.add_bond(atoms[i], atoms[(i + 1) % 6], Bond::default())
                .unwrap();
        }
        // second ring reuses edge 0-1
        mol.add_bond(atoms[0], atoms[6], Bond::default()).unwrap();
        mol.add_bond(atoms[6], atoms[7], Bond::default()).unwrap();
        mol.add_bond(atoms[7], atoms[8], Bond::default()).unwrap();
        mol.add_bond(atoms[8], atoms[9], Bond::default()).unwrap();
        mol.add_bond(atoms[9], atoms[1], Bond::default()).unwrap();

        let config = DepictionConfig::default();
        let coords = generate(&mol, &config);
        assert_eq!(coords.len(), 10);
        pairwise_separated(&coords, 0.4 * config.bond_length);
    }
}
