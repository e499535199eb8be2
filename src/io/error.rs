//! Error types for solving, tile loading and export

use crate::spatial::direction::Position;
use std::fmt;
use std::path::PathBuf;

/// Main error type for all algorithm operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Source data doesn't meet algorithm requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Algorithm parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Tile index exceeds available tile set
    InvalidTileIndex {
        /// The invalid tile index
        index: usize,
        /// Number of tiles in the catalog
        max_tiles: usize,
    },

    /// The retry budget ran out while the grid was still contradictory
    ///
    /// Terminal: the grid has been rolled back as often as allowed and the
    /// last round still left at least one slot without candidates.
    Contradiction {
        /// Round in which the final contradiction occurred
        round: usize,
        /// Rollbacks performed before giving up
        retries: usize,
        /// First slot found without candidates, if any
        position: Option<Position>,
    },

    /// Internal consistency check failed
    ///
    /// Indicates a bug rather than a property of the input.
    InvariantViolation {
        /// Operation that detected the violation
        operation: &'static str,
        /// Description of the violated invariant
        reason: String,
    },

    /// Failed to save generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// LDtk project file could not be parsed
    ProjectParse {
        /// Path to the project file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Requested level does not exist in the project
    UnknownLevel {
        /// Level identifier that was requested
        identifier: String,
        /// Level identifiers present in the project
        available: Vec<String>,
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

impl AlgorithmError {
    /// Whether this error is the terminal contradiction of a solve
    pub const fn is_contradiction(&self) -> bool {
        matches!(self, Self::Contradiction { .. })
    }
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidTileIndex { index, max_tiles } => {
                write!(f, "Tile index {index} is out of bounds (tiles: {max_tiles})")
            }
            Self::Contradiction {
                round,
                retries,
                position,
            } => {
                write!(
                    f,
                    "Unresolvable contradiction in round {round} after {retries} retries"
                )?;
                if let Some(position) = position {
                    write!(f, " (first empty slot at {position})")?;
                }
                Ok(())
            }
            Self::InvariantViolation { operation, reason } => {
                write!(f, "Invariant violated in {operation}: {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::ProjectParse { path, source } => {
                write!(
                    f,
                    "Failed to parse LDtk project '{}': {source}",
                    path.display()
                )
            }
            Self::UnknownLevel {
                identifier,
                available,
            } => {
                write!(
                    f,
                    "Level '{identifier}' not found (available: {})",
                    available.join(", ")
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

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::ProjectParse { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for algorithm results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

impl From<image::ImageError> for AlgorithmError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid source data error
pub fn invalid_source(reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::InvalidSourceData {
        reason: reason.to_string(),
    }
}

/// Create an invariant violation error
pub fn invariant_violation(operation: &'static str, reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::InvariantViolation {
        operation,
        reason: reason.to_string(),
    }
}
