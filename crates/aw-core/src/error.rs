//! Error types for scenario loading and registration.

use thiserror::Error;

/// Alias for `Result<T, CatalogError>`.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised while building the scenario catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A scenario with the same id is already registered.
    #[error("scenario already registered: {0}")]
    DuplicateScenario(String),

    /// A scenario definition is structurally inconsistent.
    #[error("invalid scenario {id}: {reason}")]
    InvalidScenario {
        /// The offending scenario id.
        id: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A definition file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A definition could not be parsed.
    #[error("failed to parse {origin}: {source}")]
    Parse {
        /// File path or name of the embedded definition.
        origin: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

impl CatalogError {
    /// Shorthand for [`CatalogError::InvalidScenario`].
    pub fn invalid(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidScenario {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
