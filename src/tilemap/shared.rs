//! Thread-safe handle around one dual grid instance

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::algorithm::diagnostics::Diagnostic;
use crate::algorithm::propagation::PropagationReport;
use crate::algorithm::ruleset::{RenderTile, RuleSet};
use crate::io::error::Result;
use crate::spatial::coordinates::{DataCoord, RenderCoord};
use crate::spatial::grid::DataCell;
use crate::tilemap::dual_grid::{DataEdit, DualGrid};

/// Cloneable handle sharing one dual grid across threads
///
/// Each call takes the instance lock for its whole duration, so a batch is never
/// interleaved with another caller's edits and snapshots never observe half a batch.
#[derive(Debug, Clone, Default)]
pub struct SharedDualGrid {
    inner: Arc<Mutex<DualGrid>>,
}

impl SharedDualGrid {
    /// Share an existing instance
    pub fn new(grid: DualGrid) -> Self {
        Self {
            inner: Arc::new(Mutex::new(grid)),
        }
    }

    /// Run a closure with exclusive access to the instance
    pub fn with<R>(&self, f: impl FnOnce(&mut DualGrid) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Hold the lock across several calls
    pub fn lock(&self) -> MutexGuard<'_, DualGrid> {
        self.inner.lock()
    }

    /// Fill a data cell
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinate` if the dependent render cells are not representable
    pub fn set(&self, coord: DataCoord, cell: DataCell) -> Result<PropagationReport> {
        self.inner.lock().set(coord, cell)
    }

    /// Empty a data cell
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinate` if the dependent render cells are not representable
    pub fn remove(&self, coord: DataCoord) -> Result<PropagationReport> {
        self.inner.lock().remove(coord)
    }

    /// Apply several edits as one atomic update
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinate` if any edit's coordinate is out of range
    pub fn apply_batch(&self, edits: &[DataEdit]) -> Result<PropagationReport> {
        self.inner.lock().apply_batch(edits)
    }

    /// Rebuild the render grid from scratch
    pub fn full_rebuild(&self) -> PropagationReport {
        self.inner.lock().full_rebuild()
    }

    /// Replace the rule table, returning the previous one
    pub fn set_rule_set(&self, rules: Option<RuleSet>) -> Option<RuleSet> {
        self.inner.lock().set_rule_set(rules)
    }

    /// Render tiles sorted by coordinate, copied under the lock
    pub fn render_snapshot(&self) -> Vec<(RenderCoord, RenderTile)> {
        self.inner.lock().render_grid().snapshot()
    }

    /// Drain the instance's diagnostics
    pub fn take_diagnostics(&self) -> Vec<Diagnostic> {
        self.inner.lock().take_diagnostics()
    }
}
