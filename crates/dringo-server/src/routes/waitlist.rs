//! Waitlist signup route: `POST /api/waitlist`.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use dringo_core::registry::RegistrationOutcome;

use crate::error::AppError;
use crate::state::AppState;

/// Path the landing page posts signups to.
pub const WAITLIST_PATH: &str = "/api/waitlist";

/// Build the waitlist router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(WAITLIST_PATH, post(join_waitlist))
}

// ── Request / Response types ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JoinResponse {
    pub success: bool,
}

// ── Handlers ─────────────────────────────────────────────────────────

/// Add an email to the waitlist.
///
/// A body that is not JSON, or whose `email` is missing or not a string, is
/// answered exactly like a malformed address.
async fn join_waitlist(
    State(state): State<Arc<AppState>>,
    body: Result<Json<JoinRequest>, JsonRejection>,
) -> Result<Json<JoinResponse>, AppError> {
    let email = match body {
        Ok(Json(JoinRequest { email: Some(email) })) => email,
        Ok(Json(JoinRequest { email: None })) => return Err(AppError::InvalidEmail),
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "unreadable waitlist request");
            return Err(AppError::InvalidEmail);
        }
    };

    match state.registry.register(&email).await? {
        RegistrationOutcome::Registered => Ok(Json(JoinResponse { success: true })),
        RegistrationOutcome::AlreadyRegistered => Err(AppError::AlreadyRegistered),
        RegistrationOutcome::InvalidEmail => Err(AppError::InvalidEmail),
    }
}
