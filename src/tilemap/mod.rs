//! Dual grid instances and their placement policies

/// Object origin and collider placement decisions
pub mod components;
/// The dual grid instance and its authoring surface
pub mod dual_grid;
/// Thread-safe shared handle
pub mod shared;

pub use dual_grid::{DataEdit, DualGrid};
pub use shared::SharedDualGrid;
