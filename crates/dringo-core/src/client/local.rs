//! Local fallback waitlist.
//!
//! Mirrors the server registry against a separately keyed list in a local
//! key-value store. Failures never propagate: a list that cannot be read,
//! parsed, or written simply means "not added".

use std::sync::Arc;

use dringo_storage::StorageBackend;
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::entry::{WaitlistEntry, decode_entries, encode_entries_compact, is_listed};
use crate::error::WaitlistError;

/// Key holding the local fallback list.
pub const LOCAL_WAITLIST_KEY: &str = "dringo_waitlist";

/// Best-effort waitlist kept in the client's own store.
pub struct LocalWaitlist {
    storage: Arc<dyn StorageBackend>,
    clock: Arc<dyn Clock>,
}

impl LocalWaitlist {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            storage,
            clock: Arc::new(SystemClock),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Add `email` to the local list.
    ///
    /// Returns `true` only if the email was newly added. An existing entry
    /// (ignoring case) or any storage problem yields `false`.
    pub async fn register_locally(&self, email: &str) -> bool {
        match self.try_register(email).await {
            Ok(added) => added,
            Err(e) => {
                warn!(error = %e, "local waitlist unavailable");
                false
            }
        }
    }

    /// The locally stored entries, or an empty list if they cannot be read.
    pub async fn entries(&self) -> Vec<WaitlistEntry> {
        self.load().await.unwrap_or_default()
    }

    async fn try_register(&self, email: &str) -> Result<bool, WaitlistError> {
        let mut entries = self.load().await?;
        if is_listed(&entries, email) {
            debug!("email already in local waitlist");
            return Ok(false);
        }

        entries.push(WaitlistEntry::new(email, self.clock.now()));
        let bytes = encode_entries_compact(&entries)?;
        self.storage.put(LOCAL_WAITLIST_KEY, &bytes).await?;
        Ok(true)
    }

    async fn load(&self) -> Result<Vec<WaitlistEntry>, WaitlistError> {
        match self.storage.get(LOCAL_WAITLIST_KEY).await? {
            Some(raw) => decode_entries(LOCAL_WAITLIST_KEY, &raw),
            None => Ok(Vec::new()),
        }
    }
}

impl std::fmt::Debug for LocalWaitlist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalWaitlist").finish_non_exhaustive()
    }
}
