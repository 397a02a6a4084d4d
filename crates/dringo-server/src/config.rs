//! Server configuration for Dringo.
//!
//! Loads configuration from environment variables with sensible defaults.
//! All settings can be overridden via `DRINGO_*` environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use dringo_core::registry::DEFAULT_WAITLIST_KEY;

/// Default listener port, matching the original landing page server.
pub const DEFAULT_PORT: u16 = 3000;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Directory holding the waitlist file.
    pub data_dir: PathBuf,
    /// File name (storage key) of the waitlist inside `data_dir`.
    pub waitlist_key: String,
    /// Directory served for every non-API path.
    pub static_dir: PathBuf,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Upper bound on in-flight signup requests.
    pub max_inflight_signups: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT` — port to bind on, listening on `0.0.0.0`
    /// - `DRINGO_BIND_ADDR` — full bind address (overrides `PORT`, default: `127.0.0.1:3000`)
    /// - `DRINGO_DATA_DIR` — directory for the waitlist file (default: `./data`)
    /// - `DRINGO_WAITLIST_KEY` — waitlist file name (default: `waitlist.json`)
    /// - `DRINGO_STATIC_DIR` — landing page assets (default: `./public`)
    /// - `DRINGO_LOG_LEVEL` — log filter (default: `info`)
    /// - `DRINGO_MAX_INFLIGHT` — concurrent signup requests (default: `64`)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default_addr = SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT));

        // Priority: DRINGO_BIND_ADDR > PORT > default 127.0.0.1:3000
        let bind_addr = if let Some(addr) = lookup("DRINGO_BIND_ADDR") {
            addr.parse().unwrap_or(default_addr)
        } else if let Some(port_str) = lookup("PORT") {
            let port: u16 = port_str.parse().unwrap_or(DEFAULT_PORT);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            default_addr
        };

        let data_dir = lookup("DRINGO_DATA_DIR").map_or_else(|| PathBuf::from("./data"), PathBuf::from);

        let waitlist_key = lookup("DRINGO_WAITLIST_KEY")
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| DEFAULT_WAITLIST_KEY.to_owned());

        let static_dir = lookup("DRINGO_STATIC_DIR").map_or_else(|| PathBuf::from("./public"), PathBuf::from);

        let log_level = lookup("DRINGO_LOG_LEVEL").unwrap_or_else(|| "info".to_owned());

        let max_inflight_signups = lookup("DRINGO_MAX_INFLIGHT")
            .and_then(|v| v.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(64);

        Self {
            bind_addr,
            data_dir,
            waitlist_key,
            static_dir,
            log_level,
            max_inflight_signups,
        }
    }
}
