//! HTTP route handlers.

pub mod waitlist;
