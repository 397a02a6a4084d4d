//! Core library for Dringo.
//!
//! Contains the waitlist registration workflow: email validation, the
//! authoritative file-backed [`registry`], and the browser-side [`client`]
//! pieces (local fallback store, opaque remote transport, submission
//! orchestrator, and page view state). This crate depends on
//! `dringo-storage` for the key-value backend and knows nothing about HTTP
//! routing.

pub mod client;
pub mod clock;
pub mod email;
pub mod entry;
pub mod error;
pub mod registry;
