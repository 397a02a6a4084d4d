//! Signup form submission workflow.
//!
//! One submission runs validate → remote attempt → (local fallback) and
//! ends in exactly one [`SubmissionOutcome`]. The remote response is never
//! observed, so a completed remote call is reported as success even if the
//! endpoint rejected the address.

use std::sync::Arc;

use tracing::{info, warn};

use crate::client::local::LocalWaitlist;
use crate::client::remote::{RemoteAttempt, RemoteTransport};
use crate::email::{is_valid_email, trim_input};

pub const MSG_INVALID: &str = "Please enter a valid email.";
pub const MSG_SAVING: &str = "Saving...";
pub const MSG_REMOTE_ACCEPTED: &str = "Thanks — you’re on the waitlist!";
pub const MSG_LOCAL_ACCEPTED: &str = "Saved locally — you’re on the waitlist! (no server available)";
pub const MSG_ALREADY: &str = "You’re already on the waitlist.";

/// The form controls a submission reads and updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistForm {
    /// Text in the email field.
    pub input: String,
    /// Status line shown under the form.
    pub message: String,
    /// Whether the submit button accepts clicks.
    pub submit_enabled: bool,
}

impl WaitlistForm {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            message: String::new(),
            submit_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    InvalidFormat,
}

/// Terminal state of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Input failed validation; nothing was contacted.
    Rejected(RejectionReason),
    /// The remote call completed. Acceptance is assumed, not confirmed.
    RemoteAccepted,
    /// The remote call failed and the email was added to the local list.
    AcceptedLocally,
    /// The remote call failed and the local list already had the email
    /// (or could not be updated).
    AlreadyRegistered,
}

impl SubmissionOutcome {
    /// Text shown to the user for this outcome.
    pub fn message(self) -> &'static str {
        match self {
            Self::Rejected(RejectionReason::InvalidFormat) => MSG_INVALID,
            Self::RemoteAccepted => MSG_REMOTE_ACCEPTED,
            Self::AcceptedLocally => MSG_LOCAL_ACCEPTED,
            Self::AlreadyRegistered => MSG_ALREADY,
        }
    }

    /// Whether the email field is emptied afterwards.
    pub fn clears_input(self) -> bool {
        matches!(self, Self::RemoteAccepted | Self::AcceptedLocally)
    }
}

/// Drives a [`WaitlistForm`] through one submission.
pub struct SubmissionOrchestrator {
    remote: Arc<dyn RemoteTransport>,
    local: LocalWaitlist,
}

impl SubmissionOrchestrator {
    pub fn new(remote: Arc<dyn RemoteTransport>, local: LocalWaitlist) -> Self {
        Self { remote, local }
    }

    pub fn local(&self) -> &LocalWaitlist {
        &self.local
    }

    /// Submit the form's current input.
    ///
    /// Holding `&mut form` for the whole call means the same form cannot be
    /// submitted twice concurrently; the submit control is also disabled
    /// while the remote call is pending.
    pub async fn submit(&self, form: &mut WaitlistForm) -> SubmissionOutcome {
        form.message.clear();

        let email = trim_input(&form.input).to_owned();
        if !is_valid_email(&email) {
            return Self::finish(form, SubmissionOutcome::Rejected(RejectionReason::InvalidFormat));
        }

        form.message = MSG_SAVING.to_owned();
        form.submit_enabled = false;

        let outcome = match self.remote.submit(&email).await {
            RemoteAttempt::AttemptSucceededUnverified => SubmissionOutcome::RemoteAccepted,
            RemoteAttempt::TransportError(reason) => {
                warn!(error = %reason, "waitlist submission failed, falling back to local store");
                if self.local.register_locally(&email).await {
                    SubmissionOutcome::AcceptedLocally
                } else {
                    SubmissionOutcome::AlreadyRegistered
                }
            }
        };

        info!(outcome = ?outcome, "waitlist submission finished");
        Self::finish(form, outcome)
    }

    fn finish(form: &mut WaitlistForm, outcome: SubmissionOutcome) -> SubmissionOutcome {
        outcome.message().clone_into(&mut form.message);
        if outcome.clears_input() {
            form.input.clear();
        }
        form.submit_enabled = true;
        outcome
    }
}

impl std::fmt::Debug for SubmissionOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionOrchestrator")
            .field("local", &self.local)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use dringo_storage::{MemoryBackend, StorageBackend};

    /// Records every call and replies with a fixed attempt.
    struct ScriptedRemote {
        reply: RemoteAttempt,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedRemote {
        fn new(reply: RemoteAttempt) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl RemoteTransport for ScriptedRemote {
        async fn submit(&self, email: &str) -> RemoteAttempt {
            self.calls.lock().unwrap().push(email.to_owned());
            self.reply.clone()
        }
    }

    fn offline() -> Arc<ScriptedRemote> {
        ScriptedRemote::new(RemoteAttempt::TransportError("connection refused".to_owned()))
    }

    fn orchestrator(remote: Arc<ScriptedRemote>) -> (MemoryBackend, SubmissionOrchestrator) {
        let storage = MemoryBackend::new();
        let local = LocalWaitlist::new(Arc::new(storage.clone()));
        (storage, SubmissionOrchestrator::new(remote, local))
    }

    #[tokio::test]
    async fn invalid_input_contacts_nothing() {
        let remote = offline();
        let (storage, orch) = orchestrator(Arc::clone(&remote));
        let mut form = WaitlistForm::new("not-an-email");

        let outcome = orch.submit(&mut form).await;

        assert_eq!(outcome, SubmissionOutcome::Rejected(RejectionReason::InvalidFormat));
        assert_eq!(form.message, MSG_INVALID);
        assert_eq!(form.input, "not-an-email");
        assert!(form.submit_enabled);
        assert!(remote.calls().is_empty());
        assert!(!storage.exists(crate::client::LOCAL_WAITLIST_KEY).await.unwrap());
    }

    #[tokio::test]
    async fn input_is_trimmed_before_sending() {
        let remote = ScriptedRemote::new(RemoteAttempt::AttemptSucceededUnverified);
        let (_storage, orch) = orchestrator(Arc::clone(&remote));
        let mut form = WaitlistForm::new("  user@example.com \n");

        orch.submit(&mut form).await;
        assert_eq!(remote.calls(), vec!["user@example.com".to_owned()]);
    }

    #[tokio::test]
    async fn remote_completion_is_optimistic_success() {
        let remote = ScriptedRemote::new(RemoteAttempt::AttemptSucceededUnverified);
        let (storage, orch) = orchestrator(remote);
        let mut form = WaitlistForm::new("user@example.com");

        let outcome = orch.submit(&mut form).await;

        assert_eq!(outcome, SubmissionOutcome::RemoteAccepted);
        assert_eq!(form.message, MSG_REMOTE_ACCEPTED);
        assert!(form.input.is_empty());
        assert!(form.submit_enabled);
        assert!(!storage.exists(crate::client::LOCAL_WAITLIST_KEY).await.unwrap());
    }

    #[tokio::test]
    async fn transport_error_falls_back_to_local_store() {
        let (_storage, orch) = orchestrator(offline());
        let mut form = WaitlistForm::new("user@example.com");

        let outcome = orch.submit(&mut form).await;

        assert_eq!(outcome, SubmissionOutcome::AcceptedLocally);
        assert_eq!(form.message, MSG_LOCAL_ACCEPTED);
        assert!(form.input.is_empty());
        assert!(form.submit_enabled);

        let entries = orch.local().entries().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].email, "user@example.com");
    }

    #[tokio::test]
    async fn local_duplicate_keeps_input() {
        let (_storage, orch) = orchestrator(offline());

        let mut first = WaitlistForm::new("user@example.com");
        orch.submit(&mut first).await;

        let mut second = WaitlistForm::new("USER@example.com");
        let outcome = orch.submit(&mut second).await;

        assert_eq!(outcome, SubmissionOutcome::AlreadyRegistered);
        assert_eq!(second.message, MSG_ALREADY);
        assert_eq!(second.input, "USER@example.com");
        assert!(second.submit_enabled);
        assert_eq!(orch.local().entries().await.len(), 1);
    }

    #[tokio::test]
    async fn corrupt_local_store_reports_already_registered() {
        let (storage, orch) = orchestrator(offline());
        storage
            .put(crate::client::LOCAL_WAITLIST_KEY, b"\xff\xfe")
            .await
            .unwrap();
        let mut form = WaitlistForm::new("user@example.com");

        assert_eq!(orch.submit(&mut form).await, SubmissionOutcome::AlreadyRegistered);
    }

    #[test]
    fn outcome_messages_match_page_copy() {
        assert_eq!(SubmissionOutcome::RemoteAccepted.message(), "Thanks — you’re on the waitlist!");
        assert_eq!(
            SubmissionOutcome::AcceptedLocally.message(),
            "Saved locally — you’re on the waitlist! (no server available)"
        );
        assert_eq!(SubmissionOutcome::AlreadyRegistered.message(), "You’re already on the waitlist.");
        assert_eq!(
            SubmissionOutcome::Rejected(RejectionReason::InvalidFormat).message(),
            "Please enter a valid email."
        );
    }

    #[tokio::test]
    async fn previous_message_is_replaced() {
        let (_storage, orch) = orchestrator(offline());
        let mut form = WaitlistForm::new("bad");
        form.message = "stale".to_owned();

        orch.submit(&mut form).await;
        assert_eq!(form.message, MSG_INVALID);
    }
}
