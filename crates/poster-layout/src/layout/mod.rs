//! Tiling algorithms for poster layout
//!
//! This module handles the geometry of covering a poster with sheets:
//! - Grid cover with one sheet orientation (simple strategy)
//! - Corner-block cover mixing orientations (complex strategy)
//! - Coverage checks on the resulting placements

mod corners;
mod grid;
mod types;

pub use corners::*;
pub use grid::*;
pub use types::*;
