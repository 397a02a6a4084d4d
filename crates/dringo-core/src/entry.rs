//! Waitlist entry model and its JSON encoding.
//!
//! A waitlist is persisted as a JSON array of `{ "email": ..., "ts": ... }`
//! objects, in registration order. The same shape is used by the server's
//! flat file and by the client's local fallback store.
//!
//! Only `email` takes part in deduplication. `ts` is kept as the raw JSON
//! value that was read, so an entry written by another tool with a date-only
//! or otherwise unusual timestamp still decodes and is re-emitted unchanged
//! when the list is rewritten.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::WaitlistError;

/// One registered email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    /// The email exactly as submitted.
    pub email: String,
    /// When the entry was recorded, as stored. Entries created here hold an
    /// ISO-8601 string with millisecond precision and a `Z` suffix.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub ts: Value,
}

impl WaitlistEntry {
    /// Create an entry stamped `YYYY-MM-DDTHH:MM:SS.mmmZ`.
    pub fn new(email: impl Into<String>, registered_at: DateTime<Utc>) -> Self {
        let stamp = registered_at
            .trunc_subsecs(3)
            .to_rfc3339_opts(SecondsFormat::Millis, true);
        Self {
            email: email.into(),
            ts: Value::String(stamp),
        }
    }

    /// The registration time, if `ts` is an RFC 3339 string.
    pub fn registered_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.ts.as_str()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// `ts` for display: the string itself, or its JSON text otherwise.
    pub fn ts_display(&self) -> String {
        match &self.ts {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    /// Case-insensitive comparison against another address.
    pub fn matches_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }
}

/// Returns `true` if any entry matches `email` case-insensitively.
pub fn is_listed(entries: &[WaitlistEntry], email: &str) -> bool {
    entries.iter().any(|e| e.matches_email(email))
}

/// Parse a stored waitlist.
///
/// # Errors
///
/// Returns [`WaitlistError::Corrupt`] if the bytes are not a JSON array of
/// objects with a string `email`.
pub fn decode_entries(key: &str, raw: &[u8]) -> Result<Vec<WaitlistEntry>, WaitlistError> {
    serde_json::from_slice(raw).map_err(|e| WaitlistError::Corrupt {
        key: key.to_owned(),
        reason: e.to_string(),
    })
}

/// Encode a waitlist as pretty-printed JSON (two-space indent).
///
/// # Errors
///
/// Returns [`WaitlistError::Serialization`] if encoding fails.
pub fn encode_entries_pretty(entries: &[WaitlistEntry]) -> Result<Vec<u8>, WaitlistError> {
    serde_json::to_vec_pretty(entries).map_err(|e| WaitlistError::Serialization {
        reason: e.to_string(),
    })
}

/// Encode a waitlist as compact JSON.
///
/// # Errors
///
/// Returns [`WaitlistError::Serialization`] if encoding fails.
pub fn encode_entries_compact(entries: &[WaitlistEntry]) -> Result<Vec<u8>, WaitlistError> {
    serde_json::to_vec(entries).map_err(|e| WaitlistError::Serialization {
        reason: e.to_string(),
    })
}
