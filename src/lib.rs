//! Dual-grid auto-tiling for 2D tilemaps
//!
//! Users paint a sparse data grid of logical cells. A second render grid, offset by
//! half a cell, is derived from it: each render cell looks at the four data cells
//! whose shared corner it sits on and picks a tile from an ordered rule table. With
//! only sixteen possible neighborhoods, a small tile set covers every edge and corner.
//!
//! Edits recompute just the four affected render cells, so the render grid always
//! equals the rule table applied to the current data grid.

#![forbid(unsafe_code)]

/// Rule matching, variation and change propagation
pub mod algorithm;
/// Input/output operations, configuration and error handling
pub mod io;
/// Coordinate spaces and sparse grid storage
pub mod spatial;
/// Dual grid instances and placement policies
pub mod tilemap;

pub use algorithm::ruleset::{Evaluation, RenderTile, RuleSet, RuleSetOptions};
pub use io::error::{DualGridError, Result};
pub use spatial::{DataCoord, RenderCoord};
pub use tilemap::{DataEdit, DualGrid, SharedDualGrid};
