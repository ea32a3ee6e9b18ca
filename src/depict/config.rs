//! Configuration for the depiction engine

/// Tunables for 2D coordinate generation.
#[derive(Debug, Clone)]
pub struct DepictionConfig {
    /// Target bond length in depiction units.
    pub bond_length: f64,

    /// Fraction of the bond length below which two atoms count as colliding.
    pub min_separation: f64,

    /// Horizontal gap between disconnected fragments, in bond lengths.
    pub fragment_gap: f64,
}

impl Default for DepictionConfig {
    fn default() -> Self {
        Self {
            bond_length: 1.5,
            min_separation: 0.5,
            fragment_gap: 1.5,
        }
    }
}

impl DepictionConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target bond length.
    pub fn with_bond_length(mut self, length: f64) -> Self {
        self.bond_length = length;
        self
    }

    /// Set the collision threshold as a fraction of the bond length.
    pub fn with_min_separation(mut self, fraction: f64) -> Self {
        self.min_separation = fraction;
        self
    }

    /// Set the gap between disconnected fragments, in bond lengths.
    pub fn with_fragment_gap(mut self, gap: f64) -> Self {
        self.fragment_gap = gap;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DepictionConfig::default();
        assert_eq!(config.bond_length, 1.5);
        assert_eq!(config.min_separation, 0.5);
        assert_eq!(config.fragment_gap, 1.5);
    }

    #[test]
    fn test_builder_pattern() {
        let config = DepictionConfig::new()
            .with_bond_length(1.0)
            .with_min_separation(0.4)
            .with_fragment_gap(2.0);
        assert_eq!(config.bond_length, 1.0);
        assert_eq!(config.min_separation, 0.4);
        assert_eq!(config.fragment_gap, 2.0);
    }
}
