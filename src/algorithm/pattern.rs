//! Fill state of the four data cells around one render cell

use std::fmt;

use crate::algorithm::rules::Constraint;
use crate::algorithm::transform::TileTransform;
use crate::spatial::coordinates::Corner;

/// Number of distinct 2x2 fill patterns
pub const PATTERN_COUNT: usize = 16;

/// 2x2 neighborhood fill mask, bit `i` set when corner `i` is filled
///
/// Corner order is bottom-left, bottom-right, top-left, top-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NeighborPattern(u8);

impl NeighborPattern {
    /// No corner filled
    pub const EMPTY: Self = Self(0);
    /// Every corner filled
    pub const FULL: Self = Self(0b1111);

    /// Build a pattern from its mask; bits above the fourth are ignored
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b1111)
    }

    /// Build a pattern from per-corner fill flags in canonical order
    pub fn from_corners(filled: [bool; 4]) -> Self {
        Corner::ALL
            .into_iter()
            .zip(filled)
            .filter(|&(_, is_filled)| is_filled)
            .fold(Self::EMPTY, |pattern, (corner, _)| pattern.with(corner))
    }

    /// Pattern required by a set of per-corner constraints
    pub fn from_constraints(constraints: &[Constraint; 4]) -> Self {
        Self::from_corners(constraints.map(|constraint| constraint == Constraint::Filled))
    }

    /// Raw mask
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Position of this pattern in a 16-entry table
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether the given corner is filled
    pub const fn is_filled(self, corner: Corner) -> bool {
        self.0 & (1 << corner.index()) != 0
    }

    /// Copy of this pattern with the corner filled
    #[must_use]
    pub const fn with(self, corner: Corner) -> Self {
        Self(self.0 | (1 << corner.index()))
    }

    /// Number of filled corners
    pub const fn filled_count(self) -> u32 {
        self.0.count_ones()
    }

    /// Whether no corner is filled
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// All 16 patterns in mask order
    pub fn all() -> impl Iterator<Item = Self> + Clone {
        (0..PATTERN_COUNT as u8).map(Self)
    }

    /// Pattern seen after moving every filled corner through `transform`
    #[must_use]
    pub fn transformed(self, transform: TileTransform) -> Self {
        Corner::ALL
            .into_iter()
            .filter(|&corner| self.is_filled(corner))
            .map(|corner| Corner::from_direction(transform.apply(corner.direction())))
            .fold(Self::EMPTY, Self::with)
    }
}

impl fmt::Display for NeighborPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = |corner| if self.is_filled(corner) { '#' } else { '.' };
        write!(
            f,
            "{}{}/{}{}",
            cell(Corner::TopLeft),
            cell(Corner::TopRight),
            cell(Corner::BottomLeft),
            cell(Corner::BottomRight)
        )
    }
}
