//! Periodic table lookups for component atoms

use std::fmt;

use super::GraphError;

/// Chemical element, stored by atomic number.
///
/// Component dictionaries identify atoms by element symbol; matching and
/// styling only ever need the atomic number and the symbol back, so this is
/// a thin newtype over the former.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Element(u8);

/// Symbols indexed by atomic number. Index 0 is a dummy entry.
static SYMBOLS: [&str; 119] = [
    "", "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S",
    "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge",
    "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd",
    "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg",
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm",
    "Bk", "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg",
    "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

impl Element {
    /// Look up an element by its symbol as written in a component dictionary.
    ///
    /// Symbols are matched case-insensitively on the first letter only in the
    /// sense that dictionaries sometimes upcase everything ("FE", "CL"); both
    /// "Fe" and "FE" resolve to iron.
    pub fn from_symbol(symbol: &str) -> Result<Self, GraphError> {
        let normalized = normalize(symbol);
        SYMBOLS
            .iter()
            .position(|s| *s == normalized)
            .filter(|&n| n > 0)
            .map(|n| Element(n as u8))
            .ok_or_else(|| GraphError::UnknownElement {
                symbol: symbol.to_string(),
            })
    }

    pub fn from_atomic_num(num: u8) -> Option<Self> {
        if (1..SYMBOLS.len() as u8).contains(&num) {
            Some(Element(num))
        } else {
            None
        }
    }

    pub fn atomic_num(&self) -> u8 {
        self.0
    }

    pub fn symbol(&self) -> &'static str {
        SYMBOLS[self.0 as usize]
    }

    pub fn is_hydrogen(&self) -> bool {
        self.0 == 1
    }

    pub fn is_carbon(&self) -> bool {
        self.0 == 6
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Normalize a dictionary symbol to the canonical capitalization.
fn normalize(symbol: &str) -> String {
    let trimmed = symbol.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => {
            first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_symbol_canonical() {
        assert_eq!(Element::from_symbol("C").unwrap().atomic_num(), 6);
        assert_eq!(Element::from_symbol("Fe").unwrap().atomic_num(), 26);
        assert_eq!(Element::from_symbol("Og").unwrap().atomic_num(), 118);
    }

    #[test]
    fn test_from_symbol_dictionary_case() {
        assert_eq!(Element::from_symbol("FE").unwrap().symbol(), "Fe");
        assert_eq!(Element::from_symbol("cl").unwrap().symbol(), "Cl");
        assert_eq!(Element::from_symbol(" N ").unwrap().symbol(), "N");
    }

    #[test]
    fn test_from_symbol_unknown() {
        assert!(matches!(
            Element::from_symbol("Xx"),
            Err(GraphError::UnknownElement { .. })
        ));
        assert!(Element::from_symbol("").is_err());
    }

    #[test]
    fn test_roundtrip() {
        for num in 1..=118u8 {
            let element = Element::from_atomic_num(num).unwrap();
            assert_eq!(Element::from_symbol(element.symbol()).unwrap(), element);
        }
    }

    #[test]
    fn test_classification() {
        assert!(Element::from_symbol("H").unwrap().is_hydrogen());
        assert!(Element::from_symbol("C").unwrap().is_carbon());
        assert!(!Element::from_symbol("N").unwrap().is_carbon());
    }
}
