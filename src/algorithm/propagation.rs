use std::collections::BTreeSet;

use crate::algorithm::diagnostics::{Diagnostic, Diagnostics};
use crate::algorithm::pattern::NeighborPattern;
use crate::algorithm::ruleset::{Evaluation, RenderTile, RuleSet};
use crate::spatial::coordinates::{DataCoord, RenderCoord, data_to_render, render_to_data};
use crate::spatial::grid::{DataGrid, RenderGrid};
use crate::tilemap::components::ObjectOrigin;

/// Counts describing one propagation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PropagationReport {
    /// Render cells evaluated against the rule table
    pub evaluated: usize,
    /// Render cells that now hold a tile
    pub written: usize,
    /// Render cells whose previous tile was removed
    pub cleared: usize,
    /// Diagnostics recorded during the pass
    pub diagnostics: usize,
}

impl PropagationReport {
    /// Sum of two reports
    #[must_use]
    pub const fn merged(self, other: Self) -> Self {
        Self {
            evaluated: self.evaluated + other.evaluated,
            written: self.written + other.written,
            cleared: self.cleared + other.cleared,
            diagnostics: self.diagnostics + other.diagnostics,
        }
    }
}

/// Deduplicated render cells depending on any of the changed data cells
///
/// Sorted so that a pass visits cells in the same order regardless of edit order.
pub fn affected_render_cells(
    changed: impl IntoIterator<Item = DataCoord>,
) -> BTreeSet<RenderCoord> {
    changed.into_iter().flat_map(data_to_render).collect()
}

/// Fill pattern of the four data cells around a render cell; absent cells are empty
pub fn neighbor_pattern(data: &DataGrid, render: RenderCoord) -> NeighborPattern {
    NeighborPattern::from_corners(render_to_data(render).map(|coord| data.contains(coord)))
}

/// Recomputes render cells from the data grid and a rule table
///
/// Every pass evaluates all of its targets into a staging list first and only then
/// writes the render grid, so one pass is one atomic update.
pub struct ChangePropagator<'a> {
    data: &'a DataGrid,
    rules: Option<&'a RuleSet>,
    object_origin: ObjectOrigin,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> ChangePropagator<'a> {
    /// Create a propagator reading `data` and evaluating with `rules`
    pub const fn new(
        data: &'a DataGrid,
        rules: Option<&'a RuleSet>,
        object_origin: ObjectOrigin,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Self {
            data,
            rules,
            object_origin,
            diagnostics,
        }
    }

    /// Recompute the four render cells depending on one data cell
    pub fn on_data_cell_changed(
        &mut self,
        render: &mut RenderGrid,
        coord: DataCoord,
    ) -> PropagationReport {
        self.propagate(render, &affected_render_cells([coord]))
    }

    /// Recompute exactly the given render cells, each once
    ///
    /// Without a rule table nothing is written and one `MissingRuleSet` diagnostic is
    /// recorded for the whole pass.
    pub fn propagate(
        &mut self,
        render: &mut RenderGrid,
        targets: &BTreeSet<RenderCoord>,
    ) -> PropagationReport {
        let Some(rules) = self.rules else {
            return self.missing_rule_set(targets.len());
        };

        let mut report = PropagationReport::default();
        let mut staged: Vec<(RenderCoord, Option<RenderTile>)> = Vec::with_capacity(targets.len());

        for &coord in targets {
            let pattern = neighbor_pattern(self.data, coord);
            let evaluation = rules.evaluate(pattern, coord);
            report.evaluated += 1;

            if let Evaluation::NoMatch { pattern } = evaluation {
                self.diagnostics.record(Diagnostic::ConfigurationIncomplete {
                    pattern,
                    coordinate: coord,
                });
                report.diagnostics += 1;
            }

            // A cell with no filled data cell around it represents nothing
            let tile = if pattern.is_empty() {
                None
            } else {
                evaluation.tile().map(|tile| self.placed(*tile))
            };
            staged.push((coord, tile));
        }

        for (coord, tile) in staged {
            let stored = tile.is_some();
            let previous = render.set_variant(coord, tile);
            if stored {
                report.written += 1;
            } else if previous.is_some() {
                report.cleared += 1;
            }
        }

        tracing::debug!(
            target: "dualgrid::propagation",
            evaluated = report.evaluated,
            written = report.written,
            cleared = report.cleared,
            diagnostics = report.diagnostics,
            "propagation pass committed"
        );

        report
    }

    /// Clear the render grid and recompute it from every occupied data cell
    ///
    /// Without a rule table the render grid is left untouched.
    pub fn full_rebuild(&mut self, render: &mut RenderGrid) -> PropagationReport {
        let targets = affected_render_cells(self.data.coords());
        if self.rules.is_none() {
            return self.missing_rule_set(targets.len());
        }

        let previous = render.len();
        render.clear();
        let report = self.propagate(render, &targets);

        tracing::debug!(
            target: "dualgrid::propagation",
            data_cells = self.data.len(),
            previous_tiles = previous,
            tiles = render.len(),
            "render grid rebuilt"
        );

        report
    }

    fn missing_rule_set(&mut self, skipped: usize) -> PropagationReport {
        self.diagnostics
            .record(Diagnostic::MissingRuleSet { skipped });
        PropagationReport {
            diagnostics: 1,
            ..PropagationReport::default()
        }
    }

    const fn placed(&self, tile: RenderTile) -> RenderTile {
        match self.object_origin {
            ObjectOrigin::RenderGrid => tile,
            ObjectOrigin::DataGrid => RenderTile {
                object: None,
                ..tile
            },
        }
    }
}
