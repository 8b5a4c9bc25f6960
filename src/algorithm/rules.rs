//! Rule definitions: the required neighborhood and the outputs it produces

use serde::{Deserialize, Serialize};

use crate::algorithm::pattern::NeighborPattern;
use crate::algorithm::transform::TileTransform;
use crate::spatial::coordinates::Corner;

/// Stable identifier of a rule, used to seed per-position variation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(pub u32);

/// Identifier of a visual tile variant owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(pub u32);

/// Identifier of an object the host attaches to a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

/// Required state of one corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    /// The data cell must be filled
    Filled,
    /// The data cell must be empty
    Empty,
}

/// Family of orientations a rule accepts, or a random transform policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symmetry {
    /// Only the authored orientation
    #[default]
    Fixed,
    /// The four quarter-turn rotations
    Rotated,
    /// The authored orientation and its horizontal mirror
    MirrorX,
    /// The authored orientation and its vertical mirror
    MirrorY,
    /// The authored orientation, both single mirrors and the double mirror
    #[serde(rename = "mirror_xy")]
    MirrorXY,
}

static FIXED: [TileTransform; 1] = [TileTransform::IDENTITY];
static ROTATED: [TileTransform; 4] = [
    TileTransform::IDENTITY,
    TileTransform::ROTATE_90,
    TileTransform::ROTATE_180,
    TileTransform::ROTATE_270,
];
static MIRROR_X: [TileTransform; 2] = [TileTransform::IDENTITY, TileTransform::MIRROR_X];
static MIRROR_Y: [TileTransform; 2] = [TileTransform::IDENTITY, TileTransform::MIRROR_Y];
static MIRROR_XY: [TileTransform; 4] = [
    TileTransform::IDENTITY,
    TileTransform::MIRROR_X,
    TileTransform::MIRROR_Y,
    TileTransform::MIRROR_XY,
];

impl Symmetry {
    /// Orientations in the order they are tried
    pub fn transforms(self) -> &'static [TileTransform] {
        match self {
            Self::Fixed => &FIXED,
            Self::Rotated => &ROTATED,
            Self::MirrorX => &MIRROR_X,
            Self::MirrorY => &MIRROR_Y,
            Self::MirrorXY => &MIRROR_XY,
        }
    }
}

/// How one of several candidate variants is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Always the first candidate
    #[default]
    Fixed,
    /// Candidates are animation frames; the first is the resting frame
    Animation,
    /// Weighted pick seeded by the render position
    Random,
}

/// A candidate variant and its relative weight for random selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedVariant {
    /// Variant drawn when this candidate is picked
    pub variant: VariantId,
    /// Relative weight, ignored outside random selection
    #[serde(default = "default_weight")]
    pub weight: f64,
}

const fn default_weight() -> f64 {
    1.0
}

impl WeightedVariant {
    /// Candidate with unit weight
    pub const fn new(variant: VariantId) -> Self {
        Self {
            variant,
            weight: 1.0,
        }
    }

    /// Candidate with an explicit weight
    pub const fn weighted(variant: VariantId, weight: f64) -> Self {
        Self { variant, weight }
    }
}

/// A single entry of a rule table
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Identifier used for variation seeding and reporting
    pub id: RuleId,
    /// Required corner states in canonical order
    pub pattern: [Constraint; 4],
    /// Orientations under which the pattern also matches
    pub symmetry: Symmetry,
    /// Candidate variants; an empty list means the rule draws nothing
    pub outputs: Vec<WeightedVariant>,
    /// How a candidate is chosen
    pub selection: SelectionMode,
    /// Extra random orientation applied in random selection mode
    pub random_transform: Symmetry,
    /// Object attached to tiles produced by this rule
    pub object: Option<ObjectId>,
}

impl Rule {
    /// Rule with the given constraints and no outputs
    pub const fn new(id: RuleId, pattern: [Constraint; 4]) -> Self {
        Self {
            id,
            pattern,
            symmetry: Symmetry::Fixed,
            outputs: Vec::new(),
            selection: SelectionMode::Fixed,
            random_transform: Symmetry::Fixed,
            object: None,
        }
    }

    /// Rule requiring exactly the given pattern
    pub fn from_pattern(id: RuleId, pattern: NeighborPattern) -> Self {
        let constraints = Corner::ALL.map(|corner| {
            if pattern.is_filled(corner) {
                Constraint::Filled
            } else {
                Constraint::Empty
            }
        });
        Self::new(id, constraints)
    }

    /// Add a unit-weight candidate
    #[must_use]
    pub fn with_variant(mut self, variant: VariantId) -> Self {
        self.outputs.push(WeightedVariant::new(variant));
        self
    }

    /// Replace the candidate list
    #[must_use]
    pub fn with_outputs(mut self, outputs: Vec<WeightedVariant>) -> Self {
        self.outputs = outputs;
        self
    }

    /// Set the accepted orientations
    #[must_use]
    pub fn with_symmetry(mut self, symmetry: Symmetry) -> Self {
        self.symmetry = symmetry;
        self
    }

    /// Set the selection mode
    #[must_use]
    pub fn with_selection(mut self, selection: SelectionMode) -> Self {
        self.selection = selection;
        self
    }

    /// Set the random orientation policy
    #[must_use]
    pub fn with_random_transform(mut self, policy: Symmetry) -> Self {
        self.random_transform = policy;
        self
    }

    /// Attach an object to produced tiles
    #[must_use]
    pub fn with_object(mut self, object: ObjectId) -> Self {
        self.object = Some(object);
        self
    }

    /// Pattern required in the authored orientation
    pub fn required(&self) -> NeighborPattern {
        NeighborPattern::from_constraints(&self.pattern)
    }

    /// Orientation under which this rule accepts `pattern`, trying `candidates` in order
    pub fn matches(
        &self,
        pattern: NeighborPattern,
        candidates: &[TileTransform],
    ) -> Option<TileTransform> {
        let required = self.required();
        candidates
            .iter()
            .copied()
            .find(|&transform| required.transformed(transform) == pattern)
    }

    /// Variants in authored order
    pub fn variants(&self) -> impl Iterator<Item = VariantId> + '_ {
        self.outputs.iter().map(|output| output.variant)
    }
}
