//! Stylesheet system for depiction colors
//!
//! Element colors, bond strokes and the canvas background are symbolic
//! tokens resolved through a stylesheet, so alternative color schemes can be
//! swapped in without touching the renderer. The default palette follows the
//! conventional CPK element coloring.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::graph::Element;

/// Errors that can occur when loading or parsing stylesheets.
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("failed to read stylesheet file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse stylesheet TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A stylesheet mapping symbolic tokens to concrete colors.
///
/// Tokens are element symbols (`"N"`, `"Fe"`) plus the reserved tokens
/// `background`, `bond` and `label`.
#[derive(Debug, Clone)]
pub struct Stylesheet {
    /// Optional name for the stylesheet.
    pub name: Option<String>,
    /// Color mappings: token -> hex color.
    pub colors: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    colors: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
}

/// Default palette: CPK element colors on a white canvas.
const DEFAULT_PALETTE: &str = r##"
[colors]
background = "#FFFFFF"
bond = "#000000"
label = "#000000"

# Common organic set
C = "#222222"
N = "#3050F8"
O = "#FF0D0D"
H = "#777777"
S = "#FFC832"
P = "#FF8000"

# Halogens
F = "#90E050"
Cl = "#1FF01F"
Br = "#A62929"
I = "#940094"

# Frequent metals and semimetals
B = "#FFB5B5"
Fe = "#E06633"
Zn = "#7D80B0"
Mg = "#8AFF00"
Ca = "#3DFF00"
Na = "#AB5CF2"
K = "#8F40D4"
Mn = "#9C7AC7"
Cu = "#C88033"
Ni = "#50D050"
Co = "#F090A0"
Se = "#FFA100"
Ru = "#248F8F"
"##;

impl Stylesheet {
    /// Load a stylesheet from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load a stylesheet from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;
        Ok(Stylesheet {
            name: parsed.metadata.and_then(|m| m.name),
            colors: parsed.colors,
        })
    }

    /// Resolve a token to a concrete color, if this stylesheet defines it.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Resolve a token with fallback to the default palette, and for unknown
    /// elements to a neutral gray.
    pub fn resolve_or_default(&self, token: &str) -> String {
        if let Some(color) = self.resolve(token) {
            return color.to_string();
        }
        let default = Self::default();
        if let Some(color) = default.resolve(token) {
            return color.to_string();
        }
        match token {
            "background" => "#FFFFFF".to_string(),
            "bond" | "label" => "#000000".to_string(),
            _ => "#444444".to_string(),
        }
    }

    /// Color for an element's label.
    pub fn element_color(&self, element: Element) -> String {
        self.resolve_or_default(element.symbol())
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::from_toml(DEFAULT_PALETTE).expect("default palette is valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stylesheet() {
        let stylesheet = Stylesheet::default();
        assert!(stylesheet.colors.contains_key("background"));
        assert!(stylesheet.colors.contains_key("N"));
        assert_eq!(stylesheet.resolve("O"), Some("#FF0D0D"));
    }

    #[test]
    fn test_resolve_missing_token() {
        let stylesheet = Stylesheet::default();
        assert_eq!(stylesheet.resolve("Uut"), None);
    }

    #[test]
    fn test_resolve_or_default_fallbacks() {
        let empty = Stylesheet {
            name: None,
            colors: HashMap::new(),
        };
        assert_eq!(empty.resolve_or_default("N"), "#3050F8");
        assert_eq!(empty.resolve_or_default("background"), "#FFFFFF");
        // An element outside the palette gets the neutral gray.
        assert_eq!(empty.resolve_or_default("Og"), "#444444");
    }

    #[test]
    fn test_element_color() {
        let stylesheet = Stylesheet::default();
        let iron = Element::from_symbol("Fe").unwrap();
        assert_eq!(stylesheet.element_color(iron), "#E06633");
    }

    #[test]
    fn test_custom_palette_overrides() {
        let custom = Stylesheet::from_toml(
            "[metadata]\nname = \"mono\"\n\n[colors]\nN = \"#111111\"\n",
        )
        .unwrap();
        assert_eq!(custom.name.as_deref(), Some("mono"));
        assert_eq!(custom.resolve_or_default("N"), "#111111");
        // Unlisted tokens still fall through to the default palette.
        assert_eq!(custom.resolve_or_default("O"), "#FF0D0D");
    }

    #[test]
    fn test_invalid_toml_error() {
        assert!(Stylesheet::from_toml("not toml {{{{").is_err());
    }
}
