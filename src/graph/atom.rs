//! Atom and bond records for the molecular graph

use super::Element;

/// An atom as defined by a chemical-component dictionary entry.
///
/// All display-relevant properties are explicit typed fields set at
/// construction time; nothing is attached to atoms after the graph is built.
/// 2D depiction coordinates deliberately live outside the graph, in
/// [`DepictionResult`](crate::depict::DepictionResult).
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Chemical element.
    pub element: Element,
    /// Formal charge in elementary charge units.
    pub formal_charge: i8,
    /// Dictionary atom name, e.g. `"C5'"` or `"N1"`. Unique within a
    /// component; referenced by annotation records and SDF alias lines.
    pub name: String,
    /// Ideal 3D coordinates from the dictionary, when present.
    pub ideal_xyz: Option<[f64; 3]>,
}

impl Atom {
    pub fn new(element: Element, name: impl Into<String>) -> Self {
        Self {
            element,
            formal_charge: 0,
            name: name.into(),
            ideal_xyz: None,
        }
    }

    pub fn with_charge(mut self, charge: i8) -> Self {
        self.formal_charge = charge;
        self
    }

    pub fn with_ideal_xyz(mut self, xyz: [f64; 3]) -> Self {
        self.ideal_xyz = Some(xyz);
        self
    }
}

/// Bond order as recorded in the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Style tag used by the renderer and the annotation record.
    pub fn style_tag(&self) -> &'static str {
        match self {
            BondOrder::Single => "single",
            BondOrder::Double => "double",
            BondOrder::Triple => "triple",
            BondOrder::Aromatic => "aromatic",
        }
    }
}

/// Wedge direction for stereo bonds, relative to the bond's begin atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondStereo {
    #[default]
    None,
    WedgeUp,
    WedgeDown,
}

/// A bond between two atoms of the molecular graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    pub order: BondOrder,
    pub stereo: BondStereo,
}

impl Bond {
    pub fn new(order: BondOrder) -> Self {
        Self {
            order,
            stereo: BondStereo::None,
        }
    }

    pub fn with_stereo(mut self, stereo: BondStereo) -> Self {
        self.stereo = stereo;
        self
    }
}

impl Default for Bond {
    fn default() -> Self {
        Self::new(BondOrder::Single)
    }
}
