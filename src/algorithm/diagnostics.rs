//! Recoverable problems raised while keeping the render grid up to date
//!
//! Diagnostics never abort an operation. Each one is logged through `tracing` when it
//! is recorded and kept in a bounded per-instance buffer for the host to drain.

use std::collections::VecDeque;

use crate::algorithm::pattern::NeighborPattern;
use crate::io::configuration::MAX_RETAINED_DIAGNOSTICS;
use crate::io::error::DualGridError;
use crate::spatial::coordinates::RenderCoord;

/// A recoverable configuration problem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// The rule table has no entry for a neighborhood; the cell was left empty
    ConfigurationIncomplete {
        /// Unmatched neighborhood
        pattern: NeighborPattern,
        /// Render cell that was being evaluated
        coordinate: RenderCoord,
    },
    /// No rule table is assigned; a recomputation was skipped
    MissingRuleSet {
        /// Render cells that were not recomputed
        skipped: usize,
    },
}

impl Diagnostic {
    /// Equivalent error value, for hosts that report through their error type
    pub const fn to_error(&self) -> DualGridError {
        match self {
            Self::ConfigurationIncomplete {
                pattern,
                coordinate,
            } => DualGridError::ConfigurationIncomplete {
                pattern: pattern.bits(),
                coordinate: coordinate.to_array(),
            },
            Self::MissingRuleSet { .. } => DualGridError::MissingRuleSet,
        }
    }
}

/// Bounded buffer of diagnostics, oldest dropped first
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: VecDeque<Diagnostic>,
    dropped: usize,
}

impl Diagnostics {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a diagnostic and keep it for the host
    pub fn record(&mut self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::ConfigurationIncomplete {
                pattern,
                coordinate,
            } => {
                tracing::warn!(
                    target: "dualgrid::rules",
                    %pattern,
                    %coordinate,
                    "rule table has no entry for this neighborhood; cell left empty"
                );
            }
            Diagnostic::MissingRuleSet { skipped } => {
                tracing::error!(
                    target: "dualgrid::rules",
                    skipped,
                    "no rule table is assigned; render grid not updated"
                );
            }
        }

        if self.entries.len() >= MAX_RETAINED_DIAGNOSTICS {
            self.entries.pop_front();
            self.dropped += 1;
        }
        self.entries.push_back(diagnostic);
    }

    /// Retained diagnostics, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Number of retained diagnostics
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is retained
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Diagnostics discarded because the buffer was full
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// Remove and return every retained diagnostic
    pub fn take(&mut self) -> Vec<Diagnostic> {
        self.dropped = 0;
        self.entries.drain(..).collect()
    }
}
