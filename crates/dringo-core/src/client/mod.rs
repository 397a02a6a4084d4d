//! Browser-side pieces of the signup flow.
//!
//! The page submits to a third-party endpoint through an opaque transport
//! and only falls back to a local key-value store when that call fails
//! outright. The local store is never reconciled with the server's list.

pub mod local;
pub mod orchestrator;
pub mod remote;
pub mod view;

pub use local::{LOCAL_WAITLIST_KEY, LocalWaitlist};
pub use orchestrator::{RejectionReason, SubmissionOrchestrator, SubmissionOutcome, WaitlistForm};
pub use remote::{HttpRemote, RemoteAttempt, RemoteTransport};
pub use view::{Section, Theme, ViewState};
