//! Placement policies for objects and colliders attached to a dual grid

use serde::{Deserialize, Serialize};

/// Grid whose cells carry the objects declared by the rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectOrigin {
    /// Objects come from the matched rule of each render tile
    #[default]
    RenderGrid,
    /// Every filled data cell carries the table's default object
    DataGrid,
}

/// Collider shape requested by a rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColliderType {
    /// No collider
    None,
    /// One square collider per data cell
    Grid,
    /// Colliders follow the drawn render tiles
    #[default]
    Sprite,
}

/// Grid on which the host should build colliders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColliderPlacement {
    /// No collider on either grid
    Disabled,
    /// Collider on the data grid only
    DataGrid,
    /// Collider on the render grid only
    RenderGrid,
}

/// Collider placement plus a note for the host when a collider must be removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColliderDecision {
    /// Where colliders belong
    pub placement: ColliderPlacement,
    /// Reason colliders on the other grid (or both) must not exist
    pub note: Option<&'static str>,
}

/// Decide collider placement from the instance flag and the table's collider type
pub const fn collider_placement(enabled: bool, collider: ColliderType) -> ColliderDecision {
    if !enabled {
        return ColliderDecision {
            placement: ColliderPlacement::Disabled,
            note: Some("colliders are disabled for this dual grid"),
        };
    }

    match collider {
        ColliderType::None => ColliderDecision {
            placement: ColliderPlacement::Disabled,
            note: Some("the rule table requests no collider"),
        },
        ColliderType::Grid => ColliderDecision {
            placement: ColliderPlacement::DataGrid,
            note: Some("grid colliders belong on the data grid, not the render grid"),
        },
        ColliderType::Sprite => ColliderDecision {
            placement: ColliderPlacement::RenderGrid,
            note: Some("sprite colliders belong on the render grid, not the data grid"),
        },
    }
}
