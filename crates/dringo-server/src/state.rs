//! Shared application state.
//!
//! Built once at startup and shared across handlers via `Arc`.

use std::sync::Arc;

use dringo_core::registry::WaitlistRegistry;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// The authoritative waitlist.
    pub registry: Arc<WaitlistRegistry>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("registry", &self.registry)
            .finish()
    }
}
