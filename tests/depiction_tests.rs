//! Integration tests for template selection and coordinate computation

use ccd_depict::{
    compute_2d, Atom, Bond, DepictionConfig, DepictionSource, Element, Molecule, Template,
    TemplateLibrary,
};

/// Build a molecule with the exact connectivity of a template scaffold,
/// using generated atom names.
fn molecule_like(template: &Template, id: &str) -> Molecule {
    let mut mol = Molecule::new(id);
    let mut nodes = Vec::new();
    for idx in template.scaffold.atoms() {
        let atom = template.scaffold.atom(idx);
        let node = mol
            .add_atom(Atom::new(atom.element, format!("A{}", idx.index())))
            .expect("generated names are unique");
        nodes.push(node);
    }
    for edge in template.scaffold.bonds() {
        let (a, b) = template.scaffold.bond_endpoints(edge);
        mol.add_bond(
            nodes[a.index()],
            nodes[b.index()],
            template.scaffold.bond(edge).clone(),
        )
        .expect("scaffold bonds are valid");
    }
    mol
}

/// Copy another scaffold into an existing molecule as a disconnected
/// fragment.
fn append_fragment(mol: &mut Molecule, template: &Template, prefix: &str) {
    let mut nodes = Vec::new();
    for idx in template.scaffold.atoms() {
        let atom = template.scaffold.atom(idx);
        let node = mol
            .add_atom(Atom::new(atom.element, format!("{prefix}{}", idx.index())))
            .expect("prefixed names are unique");
        nodes.push(node);
    }
    for edge in template.scaffold.bonds() {
        let (a, b) = template.scaffold.bond_endpoints(edge);
        mol.add_bond(
            nodes[a.index()],
            nodes[b.index()],
            template.scaffold.bond(edge).clone(),
        )
        .expect("scaffold bonds are valid");
    }
}

fn chain(id: &str, symbols: &[&str]) -> Molecule {
    let mut mol = Molecule::new(id);
    let mut prev = None;
    for (i, symbol) in symbols.iter().enumerate() {
        let node = mol
            .add_atom(Atom::new(
                Element::from_symbol(symbol).unwrap(),
                format!("{symbol}{i}"),
            ))
            .unwrap();
        if let Some(p) = prev {
            mol.add_bond(p, node, Bond::default()).unwrap();
        }
        prev = Some(node);
    }
    mol
}

#[test]
fn collision_free_template_picked() {
    let library = TemplateLibrary::bundled().unwrap();
    let config = DepictionConfig::default();

    for expected in ["hem", "purine"] {
        let template = library.get(expected).unwrap();
        let mol = molecule_like(template, "TST");
        let response = compute_2d(&mol, &library, &config);

        assert_eq!(response.source, DepictionSource::Template);
        assert_eq!(response.score, 0, "{expected} should be collision-free");
        assert_eq!(response.template_name, expected);
    }
}

#[test]
fn collision_template_picked() {
    let library = TemplateLibrary::bundled().unwrap();
    let config = DepictionConfig::default();

    for expected in ["cube", "adamantane"] {
        let template = library.get(expected).unwrap();
        let mol = molecule_like(template, "TST");
        let response = compute_2d(&mol, &library, &config);

        assert_eq!(response.source, DepictionSource::Template);
        assert!(response.score > 0, "{expected} should carry a penalty");
        assert_eq!(response.template_name, expected);
    }
}

#[test]
fn unmatched_molecule_falls_back_to_algorithmic() {
    let library = TemplateLibrary::bundled().unwrap();
    let config = DepictionConfig::default();
    let mol = chain("EOH", &["C", "C", "O"]);

    let response = compute_2d(&mol, &library, &config);
    assert_eq!(response.source, DepictionSource::Algorithmic);
    assert_eq!(response.score, 0);
    assert!(response.template_name.is_empty());
    assert_eq!(response.coords.len(), mol.atom_count());
}

#[test]
fn collision_free_match_beats_larger_collision_prone_match() {
    let library = TemplateLibrary::bundled().unwrap();
    let config = DepictionConfig::default();

    // Purine (9 atoms, clean) and the cube (8 atoms, collision-prone) both
    // embed; the clean match must win even though both are present.
    let mut mol = molecule_like(library.get("purine").unwrap(), "MIX");
    append_fragment(&mut mol, library.get("cube").unwrap(), "X");

    let response = compute_2d(&mol, &library, &config);
    assert_eq!(response.source, DepictionSource::Template);
    assert_eq!(response.template_name, "purine");
    assert_eq!(response.score, 0);
}

#[test]
fn largest_scaffold_wins_within_partition() {
    let library = TemplateLibrary::bundled().unwrap();
    let config = DepictionConfig::default();

    // Both hem (24 atoms) and purine (9 atoms) embed; both are clean, so
    // the larger scaffold is preferred.
    let mut mol = molecule_like(library.get("hem").unwrap(), "BIG");
    append_fragment(&mut mol, library.get("purine").unwrap(), "P");

    let response = compute_2d(&mol, &library, &config);
    assert_eq!(response.template_name, "hem");
    assert_eq!(response.score, 0);
}

#[test]
fn template_match_survives_substituents() {
    let library = TemplateLibrary::bundled().unwrap();
    let config = DepictionConfig::default();

    let mut mol = molecule_like(library.get("purine").unwrap(), "ADE");
    // Exocyclic amine plus a short tail.
    let ring_atom = mol.atoms().next().unwrap();
    let n = mol
        .add_atom(Atom::new(Element::from_symbol("N").unwrap(), "N6"))
        .unwrap();
    let c = mol
        .add_atom(Atom::new(Element::from_symbol("C").unwrap(), "CM"))
        .unwrap();
    mol.add_bond(ring_atom, n, Bond::default()).unwrap();
    mol.add_bond(n, c, Bond::default()).unwrap();

    let response = compute_2d(&mol, &library, &config);
    assert_eq!(response.source, DepictionSource::Template);
    assert_eq!(response.template_name, "purine");
    assert_eq!(response.coords.len(), mol.atom_count());
}

#[test]
fn recomputation_is_deterministic_and_replaces() {
    let library = TemplateLibrary::bundled().unwrap();
    let config = DepictionConfig::default();
    let mol = molecule_like(library.get("adamantane").unwrap(), "ADM");

    let first = compute_2d(&mol, &library, &config);
    let second = compute_2d(&mol, &library, &config);
    assert_eq!(first.template_name, second.template_name);
    assert_eq!(first.coords, second.coords);

    // The result is bound to the library used for the call: an empty
    // library yields a fresh algorithmic result, not a cached template one.
    let empty = TemplateLibrary::new();
    let replaced = compute_2d(&mol, &empty, &config);
    assert_eq!(replaced.source, DepictionSource::Algorithmic);
    assert!(replaced.template_name.is_empty());
}

#[test]
fn empty_molecule_yields_no_depiction() {
    let library = TemplateLibrary::bundled().unwrap();
    let config = DepictionConfig::default();
    let mol = Molecule::new("NUL");
    let response = compute_2d(&mol, &library, &config);
    assert_eq!(response.source, DepictionSource::None);
    assert!(response.coords.is_empty());
}

#[test]
fn all_atoms_receive_finite_coordinates() {
    let library = TemplateLibrary::bundled().unwrap();
    let config = DepictionConfig::default();

    let mut mol = molecule_like(library.get("hem").unwrap(), "HEM");
    let fe = mol
        .add_atom(Atom::new(Element::from_symbol("Fe").unwrap(), "FE"))
        .unwrap();
    let first = mol.atoms().next().unwrap();
    mol.add_bond(first, fe, Bond::default()).unwrap();

    let response = compute_2d(&mol, &library, &config);
    assert_eq!(response.coords.len(), mol.atom_count());
    for point in &response.coords {
        assert!(point.x.is_finite() && point.y.is_finite());
    }
}
