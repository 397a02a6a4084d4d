//! Error types for `dringo-core`.
//!
//! Registration outcomes such as "invalid email" or "already registered" are
//! not errors; they are values of
//! [`RegistrationOutcome`](crate::registry::RegistrationOutcome). The
//! variants here are the failures that stop an operation from completing.

use dringo_storage::StorageError;

/// Errors from waitlist operations.
#[derive(Debug, thiserror::Error)]
pub enum WaitlistError {
    /// The underlying storage backend returned an error.
    #[error("waitlist storage error: {0}")]
    Storage(#[from] StorageError),

    /// The stored waitlist could not be parsed.
    #[error("waitlist '{key}' is corrupt: {reason}")]
    Corrupt { key: String, reason: String },

    /// The waitlist could not be encoded for storage.
    #[error("failed to serialize waitlist: {reason}")]
    Serialization { reason: String },

    /// The remote transport could not be constructed.
    #[error("remote transport setup failed: {reason}")]
    Transport { reason: String },
}
