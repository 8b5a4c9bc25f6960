use bitvec::prelude::*;
use std::fmt;

use crate::algorithm::pattern::{NeighborPattern, PATTERN_COUNT};

/// Set of neighbor patterns a rule table can resolve
///
/// One bit per pattern, indexed by the pattern mask. A complete table covers all 16.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternCoverage {
    bits: BitVec,
}

impl Default for PatternCoverage {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternCoverage {
    /// Coverage with no pattern present
    pub fn new() -> Self {
        Self {
            bits: bitvec![0; PATTERN_COUNT],
        }
    }

    /// Coverage containing every pattern
    pub fn all() -> Self {
        Self {
            bits: bitvec![1; PATTERN_COUNT],
        }
    }

    /// Mark a pattern as resolved
    pub fn insert(&mut self, pattern: NeighborPattern) {
        self.bits.set(pattern.index(), true);
    }

    /// Test pattern membership
    pub fn contains(&self, pattern: NeighborPattern) -> bool {
        self.bits.get(pattern.index()).as_deref() == Some(&true)
    }

    /// Whether all 16 patterns are resolved
    pub fn is_complete(&self) -> bool {
        self.bits.all()
    }

    /// Number of resolved patterns
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Resolved patterns in mask order
    pub fn to_vec(&self) -> Vec<NeighborPattern> {
        self.bits
            .iter_ones()
            .map(|index| NeighborPattern::from_bits(index as u8))
            .collect()
    }

    /// Unresolved patterns in mask order
    pub fn missing(&self) -> Vec<NeighborPattern> {
        self.bits
            .iter_zeros()
            .map(|index| NeighborPattern::from_bits(index as u8))
            .collect()
    }
}

impl fmt::Display for PatternCoverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let missing: Vec<String> = self.missing().iter().map(ToString::to_string).collect();
        write!(
            f,
            "PatternCoverage({}/{PATTERN_COUNT}, missing: [{}])",
            self.count(),
            missing.join(", ")
        )
    }
}
