//! Error types for shelf-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from catalog and lending operations.
///
/// Every variant is a caller-correctable precondition violation; none of them
/// is transient, so there is nothing to retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    /// A constructor received an empty or otherwise unusable field.
    #[error("invalid argument: {field} must be a non-empty string")]
    InvalidArgument { field: &'static str },

    /// An id (or key) is already registered.
    #[error("{kind} with id '{id}' already exists")]
    DuplicateKey { kind: &'static str, id: String },

    /// A referenced book or borrower is missing, or a search matched nothing.
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// The book's availability does not allow the requested transition.
    #[error("book '{id}' {reason}")]
    InvalidState { id: String, reason: &'static str },
}

/// Errors raised while loading a catalog seed and replaying it into a library.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Underlying I/O failure while reading the seed file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error, with the offending file path.
    #[error("failed to parse catalog seed at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The seed file does not exist.
    #[error("catalog seed not found at {path}")]
    SeedNotFound { path: PathBuf },

    /// Replaying an entry through the library was rejected.
    #[error("catalog seed rejected: {0}")]
    Library(#[from] LibraryError),
}
