//! Ordered rule tables and neighbor pattern evaluation
//!
//! Rules are tried in authored order and the first match wins, even when a later rule
//! would match the same pattern more specifically. Because there are only sixteen
//! patterns, matching is resolved once at construction into a dispatch table; an
//! evaluation is a lookup followed by variant selection.

use std::collections::HashSet;

use crate::algorithm::coverage::PatternCoverage;
use crate::algorithm::pattern::{NeighborPattern, PATTERN_COUNT};
use crate::algorithm::rules::{ObjectId, Rule, RuleId, SelectionMode, Symmetry, VariantId};
use crate::algorithm::transform::TileTransform;
use crate::algorithm::variation::{
    VARIANT_SALT, position_hash, random_transform, unit_interval, weighted_index,
};
use crate::io::configuration::DEFAULT_VARIATION_SEED;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::coordinates::RenderCoord;
use crate::tilemap::components::ColliderType;

/// Table-wide settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSetOptions {
    /// Let rules with a declared symmetry match their rotated or mirrored patterns
    pub symmetry_expansion: bool,
    /// Seed mixed into every position hash
    pub seed: u32,
    /// Object placed on data cells when objects originate from the data grid
    pub default_object: Option<ObjectId>,
    /// Collider shape the host should build for this table
    pub default_collider: ColliderType,
}

impl Default for RuleSetOptions {
    fn default() -> Self {
        Self {
            symmetry_expansion: true,
            seed: DEFAULT_VARIATION_SEED,
            default_object: None,
            default_collider: ColliderType::default(),
        }
    }
}

/// Tile chosen for a render cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTile {
    /// Rule that produced the tile
    pub rule: RuleId,
    /// Position of that rule in its table
    pub rule_index: usize,
    /// Selected variant, or the resting frame of an animation
    pub variant: VariantId,
    /// Orientation to draw the variant with
    pub transform: TileTransform,
    /// Object attached to the tile
    pub object: Option<ObjectId>,
    /// Whether the variant is the first frame of an animated rule
    pub animated: bool,
}

/// Result of evaluating one neighbor pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// A rule matched and produced a tile
    Tile(RenderTile),
    /// A rule matched but declares no outputs
    Blank {
        /// Rule that matched
        rule: RuleId,
    },
    /// No rule matches the pattern
    NoMatch {
        /// The unmatched pattern
        pattern: NeighborPattern,
    },
}

impl Evaluation {
    /// The produced tile, if any
    pub const fn tile(&self) -> Option<&RenderTile> {
        match self {
            Self::Tile(tile) => Some(tile),
            Self::Blank { .. } | Self::NoMatch { .. } => None,
        }
    }

    /// Whether the table failed to resolve the pattern
    pub const fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Dispatch {
    rule_index: usize,
    orientation: TileTransform,
}

/// Immutable ordered rule table with its precomputed dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
    options: RuleSetOptions,
    dispatch: [Option<Dispatch>; PATTERN_COUNT],
}

impl RuleSet {
    /// Validate the rules and build the dispatch table
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if:
    /// - Two rules share an id
    /// - A weight is negative or not finite
    /// - A random rule with outputs has no positive weight
    pub fn new(rules: Vec<Rule>, options: RuleSetOptions) -> Result<Self> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.id) {
                return Err(invalid_parameter(
                    "rules.id",
                    &rule.id.0,
                    &"rule ids must be unique within a table",
                ));
            }
            Self::validate_outputs(rule)?;
        }

        let dispatch = Self::build_dispatch(&rules, options.symmetry_expansion);

        Ok(Self {
            rules,
            options,
            dispatch,
        })
    }

    fn validate_outputs(rule: &Rule) -> Result<()> {
        if let Some(bad) = rule
            .outputs
            .iter()
            .find(|output| !output.weight.is_finite() || output.weight < 0.0)
        {
            return Err(invalid_parameter(
                "rules.outputs.weight",
                &bad.weight,
                &format!("rule {} has a weight that is negative or not finite", rule.id.0),
            ));
        }

        let total: f64 = rule.outputs.iter().map(|output| output.weight).sum();
        if rule.selection == SelectionMode::Random && !rule.outputs.is_empty() && total <= 0.0 {
            return Err(invalid_parameter(
                "rules.outputs.weight",
                &total,
                &format!("random rule {} needs at least one positive weight", rule.id.0),
            ));
        }

        Ok(())
    }

    fn build_dispatch(
        rules: &[Rule],
        symmetry_expansion: bool,
    ) -> [Option<Dispatch>; PATTERN_COUNT] {
        let mut dispatch = [None; PATTERN_COUNT];
        for (pattern, slot) in NeighborPattern::all().zip(dispatch.iter_mut()) {
            *slot = rules.iter().enumerate().find_map(|(rule_index, rule)| {
                let candidates = if symmetry_expansion {
                    rule.symmetry.transforms()
                } else {
                    Symmetry::Fixed.transforms()
                };
                rule.matches(pattern, candidates).map(|orientation| Dispatch {
                    rule_index,
                    orientation,
                })
            });
        }
        dispatch
    }

    /// The sixteen-case table: one explicit rule per pattern
    ///
    /// Rule ids and variant ids equal the pattern mask. The all-empty rule is blank
    /// so that regions without data draw nothing.
    pub fn standard() -> Self {
        let rules: Vec<Rule> = NeighborPattern::all()
            .map(|pattern| {
                let id = u32::from(pattern.bits());
                let rule = Rule::from_pattern(RuleId(id), pattern);
                if pattern.is_empty() {
                    rule
                } else {
                    rule.with_variant(VariantId(id))
                }
            })
            .collect();
        let options = RuleSetOptions::default();
        let dispatch = Self::build_dispatch(&rules, options.symmetry_expansion);
        Self {
            rules,
            options,
            dispatch,
        }
    }

    /// Rules in authored order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Table-wide settings
    pub const fn options(&self) -> &RuleSetOptions {
        &self.options
    }

    /// Number of rules
    pub const fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules
    pub const fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule matching `pattern` and the orientation it matched under
    pub fn matching_rule(&self, pattern: NeighborPattern) -> Option<(&Rule, TileTransform)> {
        let dispatch = self.dispatch.get(pattern.index()).copied().flatten()?;
        self.rules
            .get(dispatch.rule_index)
            .map(|rule| (rule, dispatch.orientation))
    }

    /// Patterns this table resolves
    pub fn coverage(&self) -> PatternCoverage {
        let mut coverage = PatternCoverage::new();
        for (pattern, slot) in NeighborPattern::all().zip(self.dispatch.iter()) {
            if slot.is_some() {
                coverage.insert(pattern);
            }
        }
        coverage
    }

    /// Whether every one of the sixteen patterns resolves to a rule
    pub fn is_complete(&self) -> bool {
        self.dispatch.iter().all(Option::is_some)
    }

    /// Choose the tile for a render cell whose neighborhood is `pattern`
    ///
    /// The result depends only on the pattern, the coordinate and the table, so
    /// repeated evaluation of an unchanged cell is idempotent.
    pub fn evaluate(&self, pattern: NeighborPattern, coord: RenderCoord) -> Evaluation {
        let Some(dispatch) = self.dispatch.get(pattern.index()).copied().flatten() else {
            return Evaluation::NoMatch { pattern };
        };
        let Some(rule) = self.rules.get(dispatch.rule_index) else {
            return Evaluation::NoMatch { pattern };
        };

        let seed = self.options.seed;
        let (chosen, transform) = match rule.selection {
            SelectionMode::Fixed | SelectionMode::Animation => {
                (rule.outputs.first(), dispatch.orientation)
            }
            SelectionMode::Random => {
                let weights: Vec<f64> = rule.outputs.iter().map(|output| output.weight).collect();
                let sample = unit_interval(position_hash(coord, rule.id, VARIANT_SALT, seed));
                let index = weighted_index(&weights, sample).unwrap_or(0);
                let random = random_transform(rule.random_transform, coord, rule.id, seed);
                (rule.outputs.get(index), random.then(dispatch.orientation))
            }
        };

        match chosen {
            Some(output) => Evaluation::Tile(RenderTile {
                rule: rule.id,
                rule_index: dispatch.rule_index,
                variant: output.variant,
                transform,
                object: rule.object,
                animated: rule.selection == SelectionMode::Animation && rule.outputs.len() > 1,
            }),
            None => Evaluation::Blank { rule: rule.id },
        }
    }

    /// Frame of an animated rule at a host-driven tick
    ///
    /// Returns `None` if the rule index is out of range or the rule has no outputs.
    pub fn animation_frame(&self, rule_index: usize, tick: u64) -> Option<VariantId> {
        let rule = self.rules.get(rule_index)?;
        let frames = rule.outputs.len() as u64;
        if frames == 0 {
            return None;
        }
        rule.outputs
            .get((tick % frames) as usize)
            .map(|output| output.variant)
    }
}
