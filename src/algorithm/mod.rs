/// Pattern coverage sets backed by bit vectors
pub mod coverage;
/// Recoverable problems recorded while updating the render grid
pub mod diagnostics;
/// Two-by-two neighborhood fill patterns
pub mod pattern;
/// Recomputation of render cells after data edits
pub mod propagation;
/// Rule definitions and selection policies
pub mod rules;
/// Ordered rule tables with precomputed dispatch
pub mod ruleset;
/// Rotations and mirrors of tiles and neighborhoods
pub mod transform;
/// Position-seeded deterministic variation
pub mod variation;
