//! Application assembly: state construction and the router with its layers.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use dringo_core::registry::WaitlistRegistry;
use dringo_storage::{FileBackend, StorageBackend};

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// Open the waitlist storage and build the shared state.
///
/// # Errors
///
/// Fails if the data directory cannot be created.
pub fn build_state(config: &ServerConfig) -> anyhow::Result<Arc<AppState>> {
    let storage: Arc<dyn StorageBackend> = Arc::new(
        FileBackend::open(&config.data_dir)
            .with_context(|| format!("failed to open data dir {}", config.data_dir.display()))?,
    );
    info!(
        data_dir = %config.data_dir.display(),
        key = %config.waitlist_key,
        "waitlist storage ready"
    );

    let registry = Arc::new(WaitlistRegistry::new(storage, config.waitlist_key.clone()));
    Ok(Arc::new(AppState { registry }))
}

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let api = routes::waitlist::router().layer(ConcurrencyLimitLayer::new(config.max_inflight_signups));

    // The page and the API are normally same-origin; CORS only matters for
    // previews hosted elsewhere.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let assets = ServeDir::new(&config.static_dir).append_index_html_on_directories(true);

    Router::new()
        .merge(api)
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .with_state(state)
}
