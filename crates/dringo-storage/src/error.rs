//! Storage error types.
//!
//! Every variant carries the key (or path) involved and the underlying
//! reason, so a log line is enough to diagnose the failure.

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to prepare the storage root directory.
    #[error("failed to open storage at '{path}': {reason}")]
    Open { path: String, reason: String },

    /// Failed to read a value from storage.
    #[error("failed to read key '{key}': {reason}")]
    Read { key: String, reason: String },

    /// Failed to write a value to storage.
    #[error("failed to write key '{key}': {reason}")]
    Write { key: String, reason: String },

    /// The key cannot be mapped to a storage location.
    #[error("invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },
}
