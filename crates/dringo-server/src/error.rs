//! HTTP error responses.
//!
//! Every error is rendered as `{"error": "<message>"}`. The messages for
//! client errors are part of the public API and match what the landing page
//! expects.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use dringo_core::error::WaitlistError;

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Missing, non-string, or malformed email (also unparseable bodies).
    InvalidEmail,
    /// The email is already on the waitlist.
    AlreadyRegistered,
    /// Persisting the waitlist failed. The detail is logged, not returned.
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::InvalidEmail => (StatusCode::BAD_REQUEST, "Invalid email"),
            Self::AlreadyRegistered => (StatusCode::CONFLICT, "Already on waitlist"),
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
            }
        };

        (status, axum::Json(ErrorBody { error })).into_response()
    }
}

impl From<WaitlistError> for AppError {
    fn from(err: WaitlistError) -> Self {
        Self::Internal(err.to_string())
    }
}
