pub mod pattern;
pub mod ruleset;
pub mod variation;
