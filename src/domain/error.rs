//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Rejected user input. Returned by the validation functions; callers check
/// before mutating.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("only letters, numbers, hyphens and underscores are allowed")]
    IllegalCharacters,

    #[error("name must be {max} characters or fewer")]
    TooLong { max: usize },

    #[error("path cannot be empty")]
    EmptyPath,

    #[error("path must start with /")]
    MissingLeadingSlash,

    #[error("segment {position} ({segment:?}): {reason}")]
    InvalidSegment {
        /// 1-based position of the offending segment
        position: usize,
        segment: String,
        reason: Box<ValidationError>,
    },
}

/// Domain errors represent structural violations of the route tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("an entry named {name:?} already exists in {parent}")]
    NameTaken { parent: String, name: String },

    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("{directory} already has a {marker} file")]
    DuplicateMarker { directory: String, marker: String },

    #[error("the root directory cannot be renamed or removed")]
    RootImmutable,
}

/// Result type for tree operations.
pub type DomainResult<T> = Result<T, DomainError>;
