//! Position-seeded pseudo-randomness for variant and orientation selection
//!
//! Every draw is a pure hash of the render coordinate, the rule id, a salt naming the
//! decision and the table seed. Re-evaluating a cell always repeats the same choice,
//! independent of evaluation order or how often the cell was recomputed.

use xxhash_rust::xxh32::Xxh32;

use crate::algorithm::rules::{RuleId, Symmetry};
use crate::algorithm::transform::TileTransform;
use crate::spatial::coordinates::RenderCoord;

/// Salt for choosing among candidate variants
pub const VARIANT_SALT: u32 = 0x5641_5249;
/// Salt for choosing a random rotation
pub const ROTATION_SALT: u32 = 0x524f_5441;
/// Salt for choosing a random horizontal mirror
pub const MIRROR_X_SALT: u32 = 0x4d49_5258;
/// Salt for choosing a random vertical mirror
pub const MIRROR_Y_SALT: u32 = 0x4d49_5259;

/// Stable 32-bit hash of a decision at a render position
pub fn position_hash(coord: RenderCoord, rule: RuleId, salt: u32, seed: u32) -> u32 {
    let mut hasher = Xxh32::new(seed);
    hasher.update(&coord.x.to_le_bytes());
    hasher.update(&coord.y.to_le_bytes());
    hasher.update(&rule.0.to_le_bytes());
    hasher.update(&salt.to_le_bytes());
    hasher.digest()
}

/// Map a hash onto `[0, 1)`
pub fn unit_interval(hash: u32) -> f64 {
    f64::from(hash) / (f64::from(u32::MAX) + 1.0)
}

/// Index picked by `sample` in `[0, 1)` from cumulative weights
///
/// Returns `None` when no weight is positive.
pub fn weighted_index(weights: &[f64], sample: f64) -> Option<usize> {
    let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    if total <= 0.0 || !total.is_finite() {
        return None;
    }

    let target = sample.clamp(0.0, 1.0) * total;
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (index, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        last_positive = Some(index);
        if target < cumulative {
            return Some(index);
        }
    }
    // Rounding can leave the target at the very top of the range
    last_positive
}

/// Orientation drawn for a tile under a random transform policy
pub fn random_transform(
    policy: Symmetry,
    coord: RenderCoord,
    rule: RuleId,
    seed: u32,
) -> TileTransform {
    let coin = |salt| position_hash(coord, rule, salt, seed) & 1 == 1;
    match policy {
        Symmetry::Fixed => TileTransform::IDENTITY,
        Symmetry::Rotated => {
            let turns = position_hash(coord, rule, ROTATION_SALT, seed) % 4;
            TileTransform::new(turns as u8, false)
        }
        Symmetry::MirrorX => {
            if coin(MIRROR_X_SALT) {
                TileTransform::MIRROR_X
            } else {
                TileTransform::IDENTITY
            }
        }
        Symmetry::MirrorY => {
            if coin(MIRROR_Y_SALT) {
                TileTransform::MIRROR_Y
            } else {
                TileTransform::IDENTITY
            }
        }
        Symmetry::MirrorXY => {
            let horizontal = if coin(MIRROR_X_SALT) {
                TileTransform::MIRROR_X
            } else {
                TileTransform::IDENTITY
            };
            let vertical = if coin(MIRROR_Y_SALT) {
                TileTransform::MIRROR_Y
            } else {
                TileTransform::IDENTITY
            };
            horizontal.then(vertical)
        }
    }
}
