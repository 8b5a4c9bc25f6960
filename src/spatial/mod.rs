//! Spatial data structures for the two grids
//!
//! This module contains spatial-related functionality including:
//! - Data and render coordinate spaces and the mapping between them
//! - Sparse grid storage and bounding boxes

/// Coordinate spaces and the data/render mapping
pub mod coordinates;
/// Sparse data and render grid storage
pub mod grid;

pub use coordinates::{DataCoord, RenderCoord};
pub use grid::{DataGrid, RenderGrid};
