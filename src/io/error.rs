//! Error types and context management for dual-grid operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all dual-grid operations
#[derive(Debug)]
pub enum DualGridError {
    /// No rule table is assigned to the dual grid
    ///
    /// Recomputation is skipped entirely; the render grid keeps its previous state.
    MissingRuleSet,

    /// The rule table has no entry matching a neighbor pattern
    ConfigurationIncomplete {
        /// Fill mask of the unmatched pattern (bit order BL, BR, TL, TR)
        pattern: u8,
        /// Render coordinate that was being evaluated
        coordinate: [i32; 2],
    },

    /// A coordinate supplied by an external caller cannot be mapped
    InvalidCoordinate {
        /// The rejected coordinate
        coordinate: [i64; 2],
        /// Explanation of why the coordinate is invalid
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A rule table document could not be parsed
    RuleTable {
        /// File the table was read from, if any
        path: Option<PathBuf>,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Source data doesn't meet requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Failed to load a mask image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for DualGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRuleSet => {
                write!(f, "No rule table is assigned to the dual grid")
            }
            Self::ConfigurationIncomplete {
                pattern,
                coordinate,
            } => {
                write!(
                    f,
                    "No rule matches pattern {pattern:#06b} at render cell ({}, {})",
                    coordinate[0], coordinate[1]
                )
            }
            Self::InvalidCoordinate { coordinate, reason } => {
                write!(
                    f,
                    "Invalid coordinate ({}, {}): {reason}",
                    coordinate[0], coordinate[1]
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::RuleTable { path, source } => match path {
                Some(path) => write!(
                    f,
                    "Failed to parse rule table '{}': {source}",
                    path.display()
                ),
                None => write!(f, "Failed to parse rule table: {source}"),
            },
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for DualGridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::RuleTable { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for dual-grid results
pub type Result<T> = std::result::Result<T, DualGridError>;

impl From<image::ImageError> for DualGridError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for DualGridError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for DualGridError {
    fn from(err: serde_json::Error) -> Self {
        Self::RuleTable {
            path: None,
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> DualGridError {
    DualGridError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid coordinate error
pub fn invalid_coordinate(coordinate: [i64; 2], reason: &impl ToString) -> DualGridError {
    DualGridError::InvalidCoordinate {
        coordinate,
        reason: reason.to_string(),
    }
}
