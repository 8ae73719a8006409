//! Error types for rl-rotate.
//!
//! This crate provides:
//! - [`RlError`] - Top-level error enum shared by the engine and its collaborators
//! - Collaborator errors ([`SourceError`], [`RemovalError`])
//! - [`ErrorCategory`] and [`exit_code`] so front ends can map failures to process exit codes

use thiserror::Error;

/// Top-level error type for rl-rotate.
#[derive(Error, Debug)]
pub enum RlError {
    /// Configuration errors: unknown criterion or filter key, operand of the
    /// wrong shape, out-of-range operand, malformed regex or date bound.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Listing collaborator errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Removal collaborator errors
    #[error("Removal error: {0}")]
    Removal(#[from] RemovalError),

    /// Generic errors (wrapped anyhow)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RlError {
    /// Shorthand for building a [`RlError::Config`].
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Errors raised while enumerating candidate items.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The location to list does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The location exists but cannot be read
    #[error("Permission denied: {0}")]
    Permission(String),

    /// Any other I/O failure while listing
    #[error("I/O error: {0}")]
    Io(String),
}

/// Errors raised while removing matched items.
#[derive(Error, Debug)]
pub enum RemovalError {
    /// The item vanished before it could be removed
    #[error("Item not found: {0}")]
    NotFound(String),

    /// The item could not be removed due to permissions
    #[error("Permission denied: {0}")]
    Permission(String),

    /// Any other I/O failure while removing
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(err.to_string()),
            std::io::ErrorKind::PermissionDenied => Self::Permission(err.to_string()),
            _ => Self::Io(err.to_string()),
        }
    }
}

impl From<std::io::Error> for RemovalError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(err.to_string()),
            std::io::ErrorKind::PermissionDenied => Self::Permission(err.to_string()),
            _ => Self::Io(err.to_string()),
        }
    }
}

/// Broad classification of a failure, used to pick an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller asked for something invalid. Nothing was listed or removed.
    Configuration,

    /// Candidates could not be enumerated.
    Listing,

    /// Some matched items could not be removed.
    Removal,

    /// Anything else
    Internal,
}

/// Classifies an error.
pub fn classify_error(error: &RlError) -> ErrorCategory {
    match error {
        RlError::Config(_) => ErrorCategory::Configuration,
        RlError::Source(_) => ErrorCategory::Listing,
        RlError::Removal(_) => ErrorCategory::Removal,
        RlError::Other(_) => ErrorCategory::Internal,
    }
}

/// Process exit code for an error.
///
/// `2` configuration, `3` listing, `4` removal (partial failure), `1` otherwise.
pub fn exit_code(error: &RlError) -> i32 {
    match classify_error(error) {
        ErrorCategory::Configuration => 2,
        ErrorCategory::Listing => 3,
        ErrorCategory::Removal => 4,
        ErrorCategory::Internal => 1,
    }
}

/// Result type alias using RlError.
pub type Result<T> = std::result::Result<T, RlError>;
