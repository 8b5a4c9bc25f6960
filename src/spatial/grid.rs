//! Sparse cell storage for the data and render grids
//!
//! Both grids are hash maps keyed by coordinate; an absent key is an empty cell, so
//! unpainted regions cost nothing. The render grid is a derived cache: only the
//! change propagator writes to it.

use std::collections::HashMap;
use std::collections::hash_map;
use std::hash::Hash;

use ndarray::Array2;

use crate::algorithm::ruleset::RenderTile;
use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::coordinates::{DataCoord, RenderCoord};

/// Axis-aligned bounding box of cell coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    /// Minimum coordinates (inclusive)
    pub min: [i32; 2],
    /// Maximum coordinates (inclusive)
    pub max: [i32; 2],
}

impl BoundingBox {
    /// Create a box from inclusive corners
    pub const fn new(min: [i32; 2], max: [i32; 2]) -> Self {
        Self { min, max }
    }

    /// Check if a position is within the bounds
    pub const fn contains(&self, pos: [i32; 2]) -> bool {
        pos[0] >= self.min[0]
            && pos[0] <= self.max[0]
            && pos[1] >= self.min[1]
            && pos[1] <= self.max[1]
    }

    /// Smallest box containing every point, `None` for no points
    pub fn from_points(points: impl IntoIterator<Item = [i32; 2]>) -> Option<Self> {
        points.into_iter().fold(None, |bounds: Option<Self>, point| {
            Some(bounds.map_or(Self::new(point, point), |b| b.including(point)))
        })
    }

    /// Copy of this box grown to contain `point`
    #[must_use]
    pub fn including(self, point: [i32; 2]) -> Self {
        Self {
            min: [self.min[0].min(point[0]), self.min[1].min(point[1])],
            max: [self.max[0].max(point[0]), self.max[1].max(point[1])],
        }
    }

    /// Smallest box containing both boxes
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        self.including(other.min).including(other.max)
    }

    /// Number of columns covered
    pub fn width(&self) -> u64 {
        (i64::from(self.max[0]) - i64::from(self.min[0]) + 1).max(0) as u64
    }

    /// Number of rows covered
    pub fn height(&self) -> u64 {
        (i64::from(self.max[1]) - i64::from(self.min[1]) + 1).max(0) as u64
    }

    /// Every position inside the box, row by row from the bottom
    pub fn positions(&self) -> impl Iterator<Item = [i32; 2]> + Clone {
        let [min_x, min_y] = self.min;
        let [max_x, max_y] = self.max;
        (min_y..=max_y).flat_map(move |y| (min_x..=max_x).map(move |x| [x, y]))
    }
}

/// Coordinate type usable as a sparse grid key
pub trait GridCoord: Copy + Eq + Hash {
    /// Coordinate as an `[x, y]` pair
    fn xy(self) -> [i32; 2];
}

impl GridCoord for DataCoord {
    fn xy(self) -> [i32; 2] {
        self.to_array()
    }
}

impl GridCoord for RenderCoord {
    fn xy(self) -> [i32; 2] {
        self.to_array()
    }
}

/// Sparse mapping from coordinate to cell state; absent means empty
#[derive(Debug, Clone)]
pub struct SparseGrid<C, T> {
    cells: HashMap<C, T>,
}

impl<C: Eq + Hash, T: PartialEq> PartialEq for SparseGrid<C, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl<C: Eq + Hash, T: Eq> Eq for SparseGrid<C, T> {}

impl<C, T> Default for SparseGrid<C, T> {
    fn default() -> Self {
        Self {
            cells: HashMap::new(),
        }
    }
}

impl<C: GridCoord, T> SparseGrid<C, T> {
    /// Create an empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// State at a coordinate
    pub fn get(&self, coord: C) -> Option<&T> {
        self.cells.get(&coord)
    }

    /// Whether the cell is occupied
    pub fn contains(&self, coord: C) -> bool {
        self.cells.contains_key(&coord)
    }

    /// Store a state, returning the previous one
    pub fn set(&mut self, coord: C, state: T) -> Option<T> {
        self.cells.insert(coord, state)
    }

    /// Empty a cell, returning its previous state
    pub fn remove(&mut self, coord: C) -> Option<T> {
        self.cells.remove(&coord)
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Number of occupied cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell is occupied
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Occupied cells and their states, in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (C, &T)> + Clone {
        self.cells.iter().map(|(coord, state)| (*coord, state))
    }

    /// Occupied coordinates, in unspecified order
    pub fn coords(&self) -> impl Iterator<Item = C> + Clone + '_ {
        self.cells.keys().copied()
    }

    /// Tight bounding box of the occupied cells
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.cells.keys().map(|coord| coord.xy()))
    }

    /// Occupied coordinates inside `bounds`
    ///
    /// The iterator is lazy and restartable by cloning; its order is stable for as
    /// long as the grid is not mutated.
    pub fn cells_within(&self, bounds: BoundingBox) -> CellsWithin<'_, C, T> {
        CellsWithin {
            keys: self.cells.keys(),
            bounds,
        }
    }
}

/// Lazy sequence of occupied coordinates inside a bounding box
#[derive(Debug, Clone)]
pub struct CellsWithin<'a, C, T> {
    keys: hash_map::Keys<'a, C, T>,
    bounds: BoundingBox,
}

impl<C: GridCoord, T> Iterator for CellsWithin<'_, C, T> {
    type Item = C;

    fn next(&mut self) -> Option<C> {
        let bounds = self.bounds;
        self.keys
            .by_ref()
            .copied()
            .find(|coord| bounds.contains(coord.xy()))
    }
}

/// Logical tile type of a data cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TileKind(pub u16);

/// State of a filled data cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DataCell {
    /// Logical tile type; rule matching only looks at occupancy
    pub kind: TileKind,
}

impl DataCell {
    /// Filled cell of the given kind
    pub const fn of_kind(kind: TileKind) -> Self {
        Self { kind }
    }
}

/// The authored grid: one entry per filled logical tile
pub type DataGrid = SparseGrid<DataCoord, DataCell>;

impl SparseGrid<DataCoord, DataCell> {
    /// Fill a cell with the default tile kind
    pub fn fill(&mut self, coord: DataCoord) -> Option<DataCell> {
        self.set(coord, DataCell::default())
    }

    /// Build a data grid from a boolean raster
    ///
    /// Row 0 is the top of the raster, so it lands on the highest y.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if a raster dimension exceeds `MAX_GRID_DIMENSION`
    pub fn from_mask(mask: &Array2<bool>) -> Result<Self> {
        let (rows, cols) = mask.dim();
        if rows > MAX_GRID_DIMENSION || cols > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                "mask",
                &format!("{cols}x{rows}"),
                &format!("dimensions must not exceed {MAX_GRID_DIMENSION}"),
            ));
        }

        let mut grid = Self::new();
        for ((row, col), &filled) in mask.indexed_iter() {
            if filled {
                grid.fill(DataCoord::new(col as i32, (rows - 1 - row) as i32));
            }
        }
        Ok(grid)
    }
}

/// The derived grid of displayed tiles
///
/// Read-only outside the crate; the change propagator keeps it equal to the rule
/// table applied to the current data grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderGrid {
    tiles: SparseGrid<RenderCoord, RenderTile>,
}

impl RenderGrid {
    /// Create an empty render grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Tile displayed at a render coordinate
    pub fn get(&self, coord: RenderCoord) -> Option<&RenderTile> {
        self.tiles.get(coord)
    }

    /// Whether a tile is displayed at the coordinate
    pub fn contains(&self, coord: RenderCoord) -> bool {
        self.tiles.contains(coord)
    }

    /// Number of displayed tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether nothing is displayed
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Displayed tiles in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (RenderCoord, &RenderTile)> + Clone {
        self.tiles.iter()
    }

    /// Tight bounding box of the displayed tiles
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.tiles.bounds()
    }

    /// Displayed coordinates inside `bounds`
    pub fn cells_within(&self, bounds: BoundingBox) -> CellsWithin<'_, RenderCoord, RenderTile> {
        self.tiles.cells_within(bounds)
    }

    /// Displayed tiles sorted by coordinate
    pub fn snapshot(&self) -> Vec<(RenderCoord, RenderTile)> {
        let mut tiles: Vec<_> = self.tiles.iter().map(|(coord, tile)| (coord, *tile)).collect();
        tiles.sort_by_key(|(coord, _)| *coord);
        tiles
    }

    /// Store or clear the tile for a render cell, returning the previous tile
    pub(crate) fn set_variant(
        &mut self,
        coord: RenderCoord,
        tile: Option<RenderTile>,
    ) -> Option<RenderTile> {
        match tile {
            Some(tile) => self.tiles.set(coord, tile),
            None => self.tiles.remove(coord),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.tiles.clear();
    }
}
