//! Orientation of a render tile as an element of the square's symmetry group
//!
//! Every combination of quarter turns and mirrors reduces to an optional horizontal
//! mirror followed by a number of clockwise quarter turns.

use crate::spatial::coordinates::NeighborDirection;

/// Rotation and mirroring applied to a tile variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileTransform {
    quarter_turns: u8,
    mirrored: bool,
}

impl TileTransform {
    /// No rotation, no mirror
    pub const IDENTITY: Self = Self::new(0, false);
    /// Quarter turn clockwise
    pub const ROTATE_90: Self = Self::new(1, false);
    /// Half turn
    pub const ROTATE_180: Self = Self::new(2, false);
    /// Three quarter turns clockwise
    pub const ROTATE_270: Self = Self::new(3, false);
    /// Horizontal mirror (x is negated)
    pub const MIRROR_X: Self = Self::new(0, true);
    /// Vertical mirror (y is negated)
    pub const MIRROR_Y: Self = Self::new(2, true);
    /// Both mirrors, equivalent to a half turn
    pub const MIRROR_XY: Self = Self::ROTATE_180;

    /// Mirror first (if requested), then rotate clockwise by `quarter_turns`
    pub const fn new(quarter_turns: u8, mirrored: bool) -> Self {
        Self {
            quarter_turns: quarter_turns % 4,
            mirrored,
        }
    }

    /// Clockwise quarter turns applied after the mirror
    pub const fn quarter_turns(self) -> u8 {
        self.quarter_turns
    }

    /// Whether x is negated before rotating
    pub const fn is_mirrored(self) -> bool {
        self.mirrored
    }

    /// Clockwise rotation in degrees
    pub const fn rotation_degrees(self) -> u32 {
        self.quarter_turns as u32 * 90
    }

    /// Whether the transform leaves a tile unchanged
    pub const fn is_identity(self) -> bool {
        self.quarter_turns == 0 && !self.mirrored
    }

    /// Apply the transform to a direction
    pub const fn apply(self, direction: NeighborDirection) -> NeighborDirection {
        let mut x = if self.mirrored {
            -direction.x
        } else {
            direction.x
        };
        let mut y = direction.y;
        let mut turns = self.quarter_turns;
        while turns > 0 {
            let previous_x = x;
            x = y;
            y = -previous_x;
            turns -= 1;
        }
        NeighborDirection { x, y }
    }

    /// Transform equivalent to applying `self` and then `next`
    #[must_use]
    pub const fn then(self, next: Self) -> Self {
        // A mirror reverses the sense of any rotation it is moved past
        let carried = if next.mirrored {
            4 - self.quarter_turns
        } else {
            self.quarter_turns
        };
        Self::new(
            (next.quarter_turns + carried) % 4,
            self.mirrored != next.mirrored,
        )
    }

    /// Column-major 2x2 integer matrix for hosts that work with matrices
    pub const fn matrix(self) -> [[i32; 2]; 2] {
        let x_axis = self.apply(NeighborDirection { x: 1, y: 0 });
        let y_axis = self.apply(NeighborDirection { x: 0, y: 1 });
        [[x_axis.x, x_axis.y], [y_axis.x, y_axis.y]]
    }
}
