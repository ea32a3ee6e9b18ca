//! Error type for coordinate generation

use thiserror::Error;

/// Coordinate generation failures.
///
/// These never escape [`compute_2d`](crate::depict::compute_2d): a failed
/// constrained completion falls back to full algorithmic layout, and the
/// algorithmic path is total. The type is public because the lower-level
/// entry points in [`coords`](crate::depict::coords) surface it directly.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// No collision-free position could be found for an atom while
    /// completing a partial (anchored) layout.
    #[error("no usable position for atom {name:?} near the anchored scaffold")]
    Congested { name: String },

    /// An anchored coordinate was not a finite number.
    #[error("anchored coordinates for atom {name:?} are not finite")]
    NonFinite { name: String },
}
