//! Coordinate spaces of the dual grid and the constant-time mapping between them
//!
//! A render cell `(rx, ry)` sits on the shared corner of the four data cells
//! `(rx, ry)`, `(rx + 1, ry)`, `(rx, ry + 1)` and `(rx + 1, ry + 1)`. Every data cell
//! is therefore a corner of exactly four render cells. The y axis points up.

use std::fmt;

use crate::io::error::{Result, invalid_coordinate};

/// Cell coordinate in the authored data grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct DataCoord {
    /// Column, increasing to the right
    pub x: i32,
    /// Row, increasing upwards
    pub y: i32,
}

/// Cell coordinate in the derived render grid, offset half a cell from the data grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RenderCoord {
    /// Column, increasing to the right
    pub x: i32,
    /// Row, increasing upwards
    pub y: i32,
}

impl DataCoord {
    /// Create a data coordinate
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate as an `[x, y]` pair
    pub const fn to_array(self) -> [i32; 2] {
        [self.x, self.y]
    }

    /// Check that the four dependent render cells are representable and in range
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinate` if either component is `i32::MIN` or `i32::MAX`
    pub fn validate(self) -> Result<Self> {
        let edge = |v: i32| v == i32::MIN || v == i32::MAX;
        if edge(self.x) || edge(self.y) {
            return Err(invalid_coordinate(
                [i64::from(self.x), i64::from(self.y)],
                &"data coordinates must lie strictly between i32::MIN and i32::MAX",
            ));
        }
        Ok(self)
    }

    /// Convert a wide coordinate supplied by a host into a validated data coordinate
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinate` if the value does not fit the data space
    pub fn try_from_wide(x: i64, y: i64) -> Result<Self> {
        let narrow = |v: i64| {
            i32::try_from(v).map_err(|_overflow| {
                invalid_coordinate([x, y], &"component does not fit in a 32-bit cell index")
            })
        };
        Self::new(narrow(x)?, narrow(y)?).validate()
    }
}

impl RenderCoord {
    /// Create a render coordinate
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate as an `[x, y]` pair
    pub const fn to_array(self) -> [i32; 2] {
        [self.x, self.y]
    }

    /// Check that the four data dependencies are representable
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinate` if either component is `i32::MAX`
    pub fn validate(self) -> Result<Self> {
        if self.x == i32::MAX || self.y == i32::MAX {
            return Err(invalid_coordinate(
                [i64::from(self.x), i64::from(self.y)],
                &"render coordinates must be less than i32::MAX",
            ));
        }
        Ok(self)
    }

    /// World-space center of this render cell in data-cell units
    ///
    /// Data cell `(x, y)` spans `[x, x + 1]`, so a render cell is centered on the
    /// corner its four data cells share.
    pub fn world_center(self) -> [f64; 2] {
        [f64::from(self.x) + 1.0, f64::from(self.y) + 1.0]
    }
}

impl fmt::Display for DataCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data({}, {})", self.x, self.y)
    }
}

impl fmt::Display for RenderCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "render({}, {})", self.x, self.y)
    }
}

/// One of the four data cells surrounding a render cell, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Corner {
    /// Data cell `(rx, ry)`
    BottomLeft = 0,
    /// Data cell `(rx + 1, ry)`
    BottomRight = 1,
    /// Data cell `(rx, ry + 1)`
    TopLeft = 2,
    /// Data cell `(rx + 1, ry + 1)`
    TopRight = 3,
}

impl Corner {
    /// All corners in canonical order
    pub const ALL: [Self; 4] = [
        Self::BottomLeft,
        Self::BottomRight,
        Self::TopLeft,
        Self::TopRight,
    ];

    /// Position in the canonical order
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Offset of this corner's data cell from the render coordinate
    pub const fn data_offset(self) -> [i32; 2] {
        match self {
            Self::BottomLeft => [0, 0],
            Self::BottomRight => [1, 0],
            Self::TopLeft => [0, 1],
            Self::TopRight => [1, 1],
        }
    }

    /// Direction from the render cell center towards this corner's data cell
    pub const fn direction(self) -> NeighborDirection {
        let [ox, oy] = self.data_offset();
        NeighborDirection {
            x: ox * 2 - 1,
            y: oy * 2 - 1,
        }
    }

    /// Corner lying in the given direction
    pub const fn from_direction(direction: NeighborDirection) -> Self {
        match (direction.x > 0, direction.y > 0) {
            (false, false) => Self::BottomLeft,
            (true, false) => Self::BottomRight,
            (false, true) => Self::TopLeft,
            (true, true) => Self::TopRight,
        }
    }
}

/// Diagonal direction from a render cell towards one of its data cells
///
/// Both components are always `-1` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NeighborDirection {
    /// Horizontal component
    pub x: i32,
    /// Vertical component
    pub y: i32,
}

/// Render cells whose neighborhood contains the given data cell
///
/// Order: `(dx, dy)`, `(dx - 1, dy)`, `(dx, dy - 1)`, `(dx - 1, dy - 1)`. The data cell
/// is respectively the bottom-left, bottom-right, top-left and top-right corner of each.
/// Callers outside the crate should pass coordinates through [`DataCoord::validate`].
pub const fn data_to_render(data: DataCoord) -> [RenderCoord; 4] {
    let left = data.x.wrapping_sub(1);
    let below = data.y.wrapping_sub(1);
    [
        RenderCoord::new(data.x, data.y),
        RenderCoord::new(left, data.y),
        RenderCoord::new(data.x, below),
        RenderCoord::new(left, below),
    ]
}

/// Data cells a render cell depends on, in canonical corner order
pub const fn render_to_data(render: RenderCoord) -> [DataCoord; 4] {
    let right = render.x.wrapping_add(1);
    let above = render.y.wrapping_add(1);
    [
        DataCoord::new(render.x, render.y),
        DataCoord::new(right, render.y),
        DataCoord::new(render.x, above),
        DataCoord::new(right, above),
    ]
}

/// Which corner of `render` the data cell occupies, if any
pub fn corner_of(render: RenderCoord, data: DataCoord) -> Option<Corner> {
    let offset = [
        i64::from(data.x) - i64::from(render.x),
        i64::from(data.y) - i64::from(render.y),
    ];
    Corner::ALL
        .into_iter()
        .find(|corner| corner.data_offset().map(i64::from) == offset)
}

/// Convert a data-minus-render offset into a neighbor direction
///
/// Offsets `0` map to `-1` and offsets `1` map to `1`.
///
/// # Errors
///
/// Returns `InvalidCoordinate` if a component lies outside `{0, 1}`
pub fn neighbor_direction(offset: [i32; 2]) -> Result<NeighborDirection> {
    match offset {
        [0 | 1, 0 | 1] => Ok(NeighborDirection {
            x: offset[0] * 2 - 1,
            y: offset[1] * 2 - 1,
        }),
        _ => Err(invalid_coordinate(
            [i64::from(offset[0]), i64::from(offset[1])],
            &"offset is not part of a render cell neighborhood",
        )),
    }
}
