//! Persisted rule tables in JSON form

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::algorithm::rules::{
    Constraint, ObjectId, Rule, RuleId, SelectionMode, Symmetry, WeightedVariant,
};
use crate::algorithm::ruleset::{RuleSet, RuleSetOptions};
use crate::io::configuration::DEFAULT_VARIATION_SEED;
use crate::io::error::{DualGridError, Result};
use crate::tilemap::components::ColliderType;

/// Serialized form of a rule table
///
/// Omitted fields take their defaults, so a minimal document only lists the rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleTable {
    /// Let rules with a declared symmetry match rotated or mirrored patterns
    pub symmetry_expansion: bool,
    /// Seed mixed into position hashes
    pub seed: u32,
    /// Object placed on data cells when objects originate from the data grid
    pub default_object: Option<ObjectId>,
    /// Collider shape the host should build
    pub default_collider: ColliderType,
    /// Rules in the order they are tried
    pub rules: Vec<RuleEntry>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self {
            symmetry_expansion: true,
            seed: DEFAULT_VARIATION_SEED,
            default_object: None,
            default_collider: ColliderType::default(),
            rules: Vec::new(),
        }
    }
}

/// Serialized form of one rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEntry {
    /// Rule id; defaults to the entry's position in the table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RuleId>,
    /// Corner constraints, ordered bottom-left, bottom-right, top-left, top-right
    pub pattern: [Constraint; 4],
    /// Orientations under which the pattern also matches
    #[serde(default)]
    pub symmetry: Symmetry,
    /// How a candidate is chosen
    #[serde(default)]
    pub selection: SelectionMode,
    /// Random orientation policy for random selection
    #[serde(default)]
    pub random_transform: Symmetry,
    /// Candidate variants
    #[serde(default)]
    pub outputs: Vec<WeightedVariant>,
    /// Object attached to produced tiles
    #[serde(default)]
    pub object: Option<ObjectId>,
}

impl RuleEntry {
    fn into_rule(self, index: usize) -> Rule {
        let id = self.id.unwrap_or(RuleId(index as u32));
        let mut rule = Rule::new(id, self.pattern)
            .with_symmetry(self.symmetry)
            .with_selection(self.selection)
            .with_random_transform(self.random_transform)
            .with_outputs(self.outputs);
        rule.object = self.object;
        rule
    }

    fn from_rule(rule: &Rule) -> Self {
        Self {
            id: Some(rule.id),
            pattern: rule.pattern,
            symmetry: rule.symmetry,
            selection: rule.selection,
            random_transform: rule.random_transform,
            outputs: rule.outputs.clone(),
            object: rule.object,
        }
    }
}

impl RuleTable {
    /// The built-in sixteen-case table
    pub fn standard() -> Self {
        Self::from_rule_set(&RuleSet::standard())
    }

    /// Serialized form of a validated rule set
    pub fn from_rule_set(rules: &RuleSet) -> Self {
        let options = rules.options();
        Self {
            symmetry_expansion: options.symmetry_expansion,
            seed: options.seed,
            default_object: options.default_object,
            default_collider: options.default_collider,
            rules: rules.rules().iter().map(RuleEntry::from_rule).collect(),
        }
    }

    /// Parse a table from JSON text
    ///
    /// # Errors
    ///
    /// Returns `RuleTable` if the text is not a valid table document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a table from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The contents are not a valid table document
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| DualGridError::FileSystem {
            path: path.to_path_buf(),
            operation: "read rule table",
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| DualGridError::RuleTable {
            path: Some(path.to_path_buf()),
            source: e,
        })
    }

    /// Pretty-printed JSON text
    ///
    /// # Errors
    ///
    /// Returns `RuleTable` if serialization fails
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the table as pretty-printed JSON, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Serialization fails
    /// - The parent directory cannot be created
    /// - The file cannot be written
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| DualGridError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        std::fs::write(path, json).map_err(|e| DualGridError::FileSystem {
            path: path.to_path_buf(),
            operation: "write rule table",
            source: e,
        })
    }

    /// Validate the table and build its dispatch
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if rule ids repeat or weights are invalid
    pub fn into_rule_set(self) -> Result<RuleSet> {
        let options = RuleSetOptions {
            symmetry_expansion: self.symmetry_expansion,
            seed: self.seed,
            default_object: self.default_object,
            default_collider: self.default_collider,
        };
        let rules = self
            .rules
            .into_iter()
            .enumerate()
            .map(|(index, entry)| entry.into_rule(index))
            .collect();
        RuleSet::new(rules, options)
    }
}

/// Load and validate a rule table file in one step
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated
pub fn load_rule_set(path: &Path) -> Result<RuleSet> {
    RuleTable::load(path)?.into_rule_set()
}
