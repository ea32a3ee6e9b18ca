//! Template library: bundled reference layouts and their registration

use std::collections::HashMap;

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::depict::Point;
use crate::graph::{Atom, Bond, BondOrder, Element, GraphError, Molecule};

use super::matcher::{self, MatchCandidate};

/// Bundled template resources, in registration order. Order matters: it is
/// the final tie-break when two matches are otherwise equivalent.
const BUNDLED: [&str; 4] = [
    include_str!("../../assets/templates/hem.toml"),
    include_str!("../../assets/templates/purine.toml"),
    include_str!("../../assets/templates/cube.toml"),
    include_str!("../../assets/templates/adamantane.toml"),
];

/// Errors raised while loading template resources.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to parse template TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("duplicate template definition: {name}")]
    Duplicate { name: String },

    #[error("template {name}: scaffold has no atoms")]
    Empty { name: String },

    #[error("template {name}: invalid scaffold: {source}")]
    Scaffold {
        name: String,
        #[source]
        source: GraphError,
    },
}

/// A named reference layout: scaffold graph plus pre-assigned 2D coordinates.
///
/// Immutable once registered. `symmetry` is the number of distinct
/// self-embeddings of the scaffold, computed at registration for
/// collision-prone templates and used as their deterministic match penalty.
#[derive(Debug, Clone)]
pub struct Template {
    pub name: String,
    pub collision_prone: bool,
    pub scaffold: Molecule,
    pub coords: Vec<Point>,
    symmetry: u32,
}

impl Template {
    /// Match penalty: zero for a clean template, the scaffold symmetry count
    /// for a collision-prone one.
    pub fn score(&self) -> u32 {
        if self.collision_prone {
            self.symmetry
        } else {
            0
        }
    }
}

#[derive(Deserialize)]
struct TemplateDoc {
    name: String,
    #[serde(default)]
    collision_prone: bool,
    atoms: Vec<AtomDoc>,
    #[serde(default)]
    bonds: Vec<BondDoc>,
}

#[derive(Deserialize)]
struct AtomDoc {
    element: String,
    x: f64,
    y: f64,
}

#[derive(Deserialize)]
struct BondDoc {
    begin: usize,
    end: usize,
    #[serde(default)]
    order: OrderDoc,
}

#[derive(Deserialize, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
enum OrderDoc {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
}

impl From<OrderDoc> for BondOrder {
    fn from(doc: OrderDoc) -> Self {
        match doc {
            OrderDoc::Single => BondOrder::Single,
            OrderDoc::Double => BondOrder::Double,
            OrderDoc::Triple => BondOrder::Triple,
            OrderDoc::Aromatic => BondOrder::Aromatic,
        }
    }
}

/// Read-only catalog of reference layouts.
///
/// Built once (usually via [`TemplateLibrary::bundled`]) and shared freely;
/// it is never mutated afterwards, so concurrent readers need no locking.
#[derive(Debug, Default)]
pub struct TemplateLibrary {
    templates: Vec<Template>,
    index: HashMap<String, usize>,
}

impl TemplateLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the compiled-in template set.
    pub fn bundled() -> Result<Self, TemplateError> {
        let mut library = Self::new();
        for resource in BUNDLED {
            library.register_toml(resource)?;
        }
        Ok(library)
    }

    /// Parse one TOML template document and register it.
    pub fn register_toml(&mut self, content: &str) -> Result<&Template, TemplateError> {
        let doc: TemplateDoc = toml::from_str(content)?;
        self.register_doc(doc)
    }

    fn register_doc(&mut self, doc: TemplateDoc) -> Result<&Template, TemplateError> {
        if self.index.contains_key(&doc.name) {
            return Err(TemplateError::Duplicate { name: doc.name });
        }
        if doc.atoms.is_empty() {
            return Err(TemplateError::Empty { name: doc.name });
        }

        let mut scaffold = Molecule::new(doc.name.clone());
        let mut coords = Vec::with_capacity(doc.atoms.len());
        for atom in &doc.atoms {
            let element =
                Element::from_symbol(&atom.element).map_err(|source| TemplateError::Scaffold {
                    name: doc.name.clone(),
                    source,
                })?;
            // Scaffold atoms are anonymous; names only matter on targets.
            scaffold
                .add_atom(Atom::new(element, ""))
                .map_err(|source| TemplateError::Scaffold {
                    name: doc.name.clone(),
                    source,
                })?;
            coords.push(Point::new(atom.x, atom.y));
        }
        for bond in &doc.bonds {
            scaffold
                .add_bond(
                    petgraph::graph::NodeIndex::new(bond.begin),
                    petgraph::graph::NodeIndex::new(bond.end),
                    Bond::new(bond.order.into()),
                )
                .map_err(|source| TemplateError::Scaffold {
                    name: doc.name.clone(),
                    source,
                })?;
        }

        let symmetry = if doc.collision_prone {
            matcher::count_embeddings(&scaffold, &scaffold)
        } else {
            0
        };
        debug!(
            "registered template {:?}: {} atoms, collision_prone={}, symmetry={}",
            doc.name,
            scaffold.atom_count(),
            doc.collision_prone,
            symmetry
        );

        let template = Template {
            name: doc.name.clone(),
            collision_prone: doc.collision_prone,
            scaffold,
            coords,
            symmetry,
        };
        self.index.insert(doc.name, self.templates.len());
        self.templates.push(template);
        Ok(self.templates.last().expect("just pushed"))
    }

    /// Get a template by name.
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.index.get(name).map(|&i| &self.templates[i])
    }

    /// Check if a template exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Registered templates, in registration order.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// All template names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Best-matching template for a target, or `None` when nothing embeds.
    pub fn find_best(&self, target: &Molecule) -> Option<MatchCandidate<'_>> {
        matcher::find_best(target, &self.templates)
    }
}
