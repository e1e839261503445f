//! Error types for the NetProtect agent configuration editor.

use std::path::PathBuf;
use thiserror::Error;

/// Rejected edits to an in-memory agent configuration.
///
/// Every variant is recoverable: the document is left untouched and the
/// message is meant to be shown to the user as a transient notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Section index {index} out of range ({len} sections)")]
    SectionOutOfRange { index: usize, len: usize },

    #[error("Field index {index} out of range in section {section} ({len} fields)")]
    FieldOutOfRange {
        section: String,
        index: usize,
        len: usize,
    },

    #[error("Section {0} cannot be renamed")]
    SectionNameLocked(String),

    #[error("Query section names must start with [query_] (got {0})")]
    QueryPrefixRequired(String),

    #[error("Section names must be a single bracketed line (got {0:?})")]
    InvalidSectionName(String),

    #[error("Section name {0} is reserved")]
    ReservedSectionName(String),

    #[error("A section named {0} already exists")]
    DuplicateSectionName(String),

    #[error("Field {key} in section {section} is read-only")]
    FieldLocked { section: String, key: String },

    #[error("Value for {key} in section {section} must fit on one line")]
    MultilineValue { section: String, key: String },

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Field {key} not found in section {section}")]
    FieldNotFound { section: String, key: String },
}

/// Errors surfaced by the client, session, settings, and CLI layers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not authenticated: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Edit rejected: {0}")]
    Edit(#[from] EditError),

    #[error("Failed to access {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Interactive prompt failed: {0}")]
    Prompt(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl ApiError {
    /// Wrap an I/O error with the path that produced it.
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ApiError::FileAccess {
            path: path.into(),
            source,
        }
    }
}
