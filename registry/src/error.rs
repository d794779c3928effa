//! Error types for registry operations.
//!
//! Provides a unified error type covering the loader-level failure modes:
//! I/O, deserialization, invalid definition files, checksum verification,
//! and empty source chains. Service-level errors (provider missing, unknown
//! form id) live in [`ServiceError`](crate::ServiceError).

use thiserror::Error;

/// Errors that can occur while loading or verifying form definitions.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A definition file could not be understood.
    #[error("invalid definition file {path}: {reason}")]
    InvalidDefinition {
        /// Offending file path.
        path: String,
        /// Parse failure detail.
        reason: String,
    },

    /// A recorded checksum no longer matches the definition markup.
    #[error("checksum mismatch for form {id}")]
    ChecksumMismatch {
        /// Form id with the stale checksum.
        id: u32,
    },

    /// All configured loader sources failed.
    #[error("no definition sources available")]
    NoSourcesAvailable,
}

/// Convenience alias for results with [`RegistryError`].
pub type Result<T> = std::result::Result<T, RegistryError>;
