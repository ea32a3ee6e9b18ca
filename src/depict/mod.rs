//! 2D depiction engine
//!
//! This module decides where every atom goes. The entry point is
//! [`compute_2d`], which prefers a curated template layout and otherwise
//! falls back to generic coordinate generation; both paths end in a
//! [`DepictionResult`] overlay that the renderer consumes. The molecular
//! graph itself is never touched.

pub mod coords;
mod config;
mod engine;
mod error;
mod types;

pub use config::DepictionConfig;
pub use engine::{compute_2d, has_depiction};
pub use error::LayoutError;
pub use types::{DepictionResult, DepictionSource, Point};
