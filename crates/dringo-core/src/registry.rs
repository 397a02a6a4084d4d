//! Authoritative waitlist registry.
//!
//! The registry keeps the whole waitlist as a single value in a
//! [`StorageBackend`] and performs validate → deduplicate → append → persist
//! on every registration. There is no in-memory cache: each call re-reads
//! and re-writes the full list.
//!
//! # Concurrency
//!
//! The read-modify-write cycle is serialized by an async mutex, so two
//! requests racing inside one process cannot both pass the duplicate check.
//! Separate processes pointed at the same file are not coordinated.

use std::sync::Arc;

use dringo_storage::StorageBackend;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::email::is_valid_email;
use crate::entry::{WaitlistEntry, decode_entries, encode_entries_pretty, is_listed};
use crate::error::WaitlistError;

/// Default storage key for the server-side waitlist.
pub const DEFAULT_WAITLIST_KEY: &str = "waitlist.json";

/// Result of a registration attempt that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationOutcome {
    /// The email was appended and persisted.
    Registered,
    /// An entry with the same email (ignoring case) already exists.
    AlreadyRegistered,
    /// The input failed the email pattern. Storage was not touched.
    InvalidEmail,
}

/// The server-side waitlist, stored as one JSON array under a single key.
pub struct WaitlistRegistry {
    storage: Arc<dyn StorageBackend>,
    key: String,
    clock: Arc<dyn Clock>,
    /// Serializes the load → check → persist cycle.
    write_lock: Mutex<()>,
}

impl WaitlistRegistry {
    /// Create a registry storing its list under `key`.
    pub fn new(storage: Arc<dyn StorageBackend>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            clock: Arc::new(SystemClock),
            write_lock: Mutex::new(()),
        }
    }

    /// Replace the time source used for `ts`.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Register `raw_email` on the waitlist.
    ///
    /// The email is stored exactly as given; only the duplicate check
    /// ignores case.
    ///
    /// # Errors
    ///
    /// Returns [`WaitlistError`] only when the updated list cannot be
    /// encoded or written. An unreadable or corrupt list is treated as empty.
    pub async fn register(&self, raw_email: &str) -> Result<RegistrationOutcome, WaitlistError> {
        if !is_valid_email(raw_email) {
            debug!("rejected registration with malformed email");
            return Ok(RegistrationOutcome::InvalidEmail);
        }

        let _guard = self.write_lock.lock().await;

        let mut entries = self.load_lenient().await;
        if is_listed(&entries, raw_email) {
            debug!(total = entries.len(), "email already on waitlist");
            return Ok(RegistrationOutcome::AlreadyRegistered);
        }

        entries.push(WaitlistEntry::new(raw_email, self.clock.now()));
        self.persist(&entries).await?;

        info!(total = entries.len(), "waitlist registration recorded");
        Ok(RegistrationOutcome::Registered)
    }

    /// Read the current list, in registration order.
    ///
    /// Unlike [`register`](Self::register), this reports a corrupt list
    /// instead of hiding it.
    ///
    /// # Errors
    ///
    /// Returns [`WaitlistError::Storage`] if the backend read fails and
    /// [`WaitlistError::Corrupt`] if the stored bytes do not parse.
    pub async fn entries(&self) -> Result<Vec<WaitlistEntry>, WaitlistError> {
        match self.storage.get(&self.key).await? {
            Some(raw) => decode_entries(&self.key, &raw),
            None => Ok(Vec::new()),
        }
    }

    /// Load the list, degrading every failure to an empty list.
    async fn load_lenient(&self) -> Vec<WaitlistEntry> {
        match self.entries().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(key = %self.key, error = %e, "waitlist unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    async fn persist(&self, entries: &[WaitlistEntry]) -> Result<(), WaitlistError> {
        let bytes = encode_entries_pretty(entries)?;
        self.storage.put(&self.key, &bytes).await?;
        Ok(())
    }
}

impl std::fmt::Debug for WaitlistRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WaitlistRegistry")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
