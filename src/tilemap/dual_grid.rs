//! The authoring surface: a data grid, its derived render grid and the rule table
//! that links them
//!
//! Every edit recomputes the affected render cells before returning, so a reader
//! never sees the render grid disagree with the data grid.

use crate::algorithm::diagnostics::{Diagnostic, Diagnostics};
use crate::algorithm::pattern::NeighborPattern;
use crate::algorithm::propagation::{self, ChangePropagator, PropagationReport};
use crate::algorithm::rules::ObjectId;
use crate::algorithm::ruleset::RuleSet;
use crate::io::error::Result;
use crate::spatial::coordinates::{
    Corner, DataCoord, NeighborDirection, RenderCoord, data_to_render, render_to_data,
};
use crate::spatial::grid::{DataCell, DataGrid, RenderGrid};
use crate::tilemap::components::{
    ColliderDecision, ColliderType, ObjectOrigin, collider_placement,
};

/// A single change to the data grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataEdit {
    /// Fill a cell with the given state
    Set(DataCoord, DataCell),
    /// Empty a cell
    Remove(DataCoord),
}

impl DataEdit {
    /// Cell touched by the edit
    pub const fn coord(&self) -> DataCoord {
        match self {
            Self::Set(coord, _) | Self::Remove(coord) => *coord,
        }
    }
}

/// One dual-grid tilemap instance
#[derive(Debug, Clone, Default)]
pub struct DualGrid {
    data: DataGrid,
    render: RenderGrid,
    rules: Option<RuleSet>,
    object_origin: ObjectOrigin,
    colliders_enabled: bool,
    diagnostics: Diagnostics,
}

impl DualGrid {
    /// Empty dual grid without a rule table
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty dual grid evaluated with `rules`
    pub fn with_rule_set(rules: RuleSet) -> Self {
        Self {
            rules: Some(rules),
            ..Self::default()
        }
    }

    /// Dual grid over existing data, with the render grid built immediately
    pub fn from_data(data: DataGrid, rules: RuleSet) -> Self {
        let mut grid = Self {
            data,
            rules: Some(rules),
            ..Self::default()
        };
        grid.full_rebuild();
        grid
    }

    /// Assigned rule table
    pub const fn rule_set(&self) -> Option<&RuleSet> {
        self.rules.as_ref()
    }

    /// Replace the rule table and rebuild the render grid from scratch
    ///
    /// Removing the table clears the render grid. Returns the previous table.
    pub fn set_rule_set(&mut self, rules: Option<RuleSet>) -> Option<RuleSet> {
        let previous = std::mem::replace(&mut self.rules, rules);
        if self.rules.is_some() {
            self.full_rebuild();
        } else {
            // Tiles from the old table no longer derive from anything
            self.render.clear();
        }
        previous
    }

    /// Grid whose cells carry rule objects
    pub const fn object_origin(&self) -> ObjectOrigin {
        self.object_origin
    }

    /// Change where objects are placed and rebuild the render grid
    pub fn set_object_origin(&mut self, origin: ObjectOrigin) -> PropagationReport {
        self.object_origin = origin;
        self.full_rebuild()
    }

    /// Whether the host should build colliders for this instance
    pub const fn colliders_enabled(&self) -> bool {
        self.colliders_enabled
    }

    /// Enable or disable collider generation
    pub const fn set_colliders_enabled(&mut self, enabled: bool) {
        self.colliders_enabled = enabled;
    }

    /// Where the host should place colliders, given the table's collider type
    pub fn collider_placement(&self) -> ColliderDecision {
        let collider = self
            .rules
            .as_ref()
            .map_or(ColliderType::Sprite, |rules| rules.options().default_collider);
        collider_placement(self.colliders_enabled, collider)
    }

    /// The authored grid
    pub const fn data_grid(&self) -> &DataGrid {
        &self.data
    }

    /// The derived grid, always consistent with the data grid
    pub const fn render_grid(&self) -> &RenderGrid {
        &self.render
    }

    /// Fill a data cell and update its four dependent render cells
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinate` if the dependent render cells are not representable
    pub fn set(&mut self, coord: DataCoord, cell: DataCell) -> Result<PropagationReport> {
        self.apply_batch(&[DataEdit::Set(coord, cell)])
    }

    /// Fill a data cell with the default tile kind
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinate` if the dependent render cells are not representable
    pub fn fill(&mut self, coord: DataCoord) -> Result<PropagationReport> {
        self.set(coord, DataCell::default())
    }

    /// Empty a data cell and update its four dependent render cells
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinate` if the dependent render cells are not representable
    pub fn remove(&mut self, coord: DataCoord) -> Result<PropagationReport> {
        self.apply_batch(&[DataEdit::Remove(coord)])
    }

    /// Apply several edits as one atomic update
    ///
    /// Every affected render cell is evaluated exactly once after all edits are stored.
    /// Edits to the same cell apply in order, so the last one wins.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinate` if any edit's coordinate is out of range; no edit
    /// is applied in that case
    pub fn apply_batch(&mut self, edits: &[DataEdit]) -> Result<PropagationReport> {
        for edit in edits {
            edit.coord().validate()?;
        }

        for edit in edits {
            match *edit {
                DataEdit::Set(coord, cell) => {
                    self.data.set(coord, cell);
                }
                DataEdit::Remove(coord) => {
                    self.data.remove(coord);
                }
            }
        }

        let targets = propagation::affected_render_cells(edits.iter().map(DataEdit::coord));
        let mut propagator = ChangePropagator::new(
            &self.data,
            self.rules.as_ref(),
            self.object_origin,
            &mut self.diagnostics,
        );
        Ok(propagator.propagate(&mut self.render, &targets))
    }

    /// Recompute the four render cells depending on a data cell without editing it
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinate` if the dependent render cells are not representable
    pub fn on_data_cell_changed(&mut self, coord: DataCoord) -> Result<PropagationReport> {
        let coord = coord.validate()?;
        let mut propagator = ChangePropagator::new(
            &self.data,
            self.rules.as_ref(),
            self.object_origin,
            &mut self.diagnostics,
        );
        Ok(propagator.on_data_cell_changed(&mut self.render, coord))
    }

    /// Discard the render grid and derive it again from the whole data grid
    pub fn full_rebuild(&mut self) -> PropagationReport {
        let mut propagator = ChangePropagator::new(
            &self.data,
            self.rules.as_ref(),
            self.object_origin,
            &mut self.diagnostics,
        );
        propagator.full_rebuild(&mut self.render)
    }

    /// Current fill pattern around a render cell
    pub fn neighbor_pattern(&self, render: RenderCoord) -> NeighborPattern {
        propagation::neighbor_pattern(&self.data, render)
    }

    /// Data cells a render cell depends on, in canonical corner order
    pub const fn dependencies(render: RenderCoord) -> [DataCoord; 4] {
        render_to_data(render)
    }

    /// Render cells that depend on a data cell
    pub const fn dependents(data: DataCoord) -> [RenderCoord; 4] {
        data_to_render(data)
    }

    /// Directions from a render cell towards each of its filled data cells
    pub fn connections(&self, render: RenderCoord) -> Vec<NeighborDirection> {
        let pattern = self.neighbor_pattern(render);
        Corner::ALL
            .into_iter()
            .filter(|&corner| pattern.is_filled(corner))
            .map(Corner::direction)
            .collect()
    }

    /// Object carried by a data cell when objects originate from the data grid
    pub fn data_object(&self, coord: DataCoord) -> Option<ObjectId> {
        if self.object_origin != ObjectOrigin::DataGrid || !self.data.contains(coord) {
            return None;
        }
        self.rules
            .as_ref()
            .and_then(|rules| rules.options().default_object)
    }

    /// Diagnostics recorded so far
    pub const fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Remove and return the recorded diagnostics
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }
}
