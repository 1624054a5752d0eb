//! `autosave serve` -- HTTP server for the auto-save form.
//!
//! Serves the editing page and the partial-update endpoints using
//! `axum` + `tokio`. Every response to an update is the field's fragment
//! re-rendered as HTML, ready for the client to swap in place.
//!
//! Endpoints:
//! - GET  /                             - Full page, one fragment per field
//! - PUT  /item/{id}/field/{field}      - Update one field
//! - POST /item/{id}/sort/{field}       - Reorder a list field
//! - GET  /health                       - Server status
//!
//! Update bodies are form-encoded: `{field}_text` (repeated for lists)
//! plus `item_id`.

mod handlers;
mod state;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use autosave_core::RecordStore;

use self::handlers::{
    handle_health, handle_index, handle_not_found, handle_reorder_list, handle_update_field,
};
use self::state::AppState;
use crate::config::ServeConfig;
use crate::error::CliError;

/// Build the application router around `state`.
pub(crate) fn router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    // CORS: permissive, the page is a local demo.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::PUT, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_index))
        .route("/health", get(handle_health))
        .route("/item/{id}/field/{field}", put(handle_update_field))
        .route("/item/{id}/sort/{field}", post(handle_reorder_list))
        .fallback(handle_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

/// Start the HTTP server and run until Ctrl+C.
pub(crate) async fn start_server(config: ServeConfig) -> Result<(), CliError> {
    let state = Arc::new(AppState::new(RecordStore::demo()));
    let app = router(state, config.max_body_bytes);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| CliError::Bind {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!(%addr, "auto-save demo listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shut down");
    Ok(())
}

/// Wait for a shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("received shutdown signal");
}
