//! Dringo HTTP server.
//!
//! Wires the waitlist registry and a static file service into an Axum
//! router. The JSON API lives at `/api/waitlist`; every other path is
//! served from the landing page's asset directory.

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
