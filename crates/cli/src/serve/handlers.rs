//! HTTP route handlers: page, field update, list reorder, health.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};

use autosave_core::{reorder_list, update_field, FieldName, Fragment, Submission, UpdateError};

use super::state::AppState;

const SERVER_ERROR_BODY: &str = "Server error";

fn status_for(error: &UpdateError) -> StatusCode {
    match error {
        UpdateError::Missing { .. }
        | UpdateError::Empty { .. }
        | UpdateError::NotReorderable(_) => StatusCode::BAD_REQUEST,
        UpdateError::UnknownField(_) | UpdateError::RecordNotFound(_) => StatusCode::NOT_FOUND,
        UpdateError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Turn a handler result into the fragment or a plain-text error.
///
/// Internal faults are logged in full but answered with a generic body.
fn fragment_response(
    action: &'static str,
    item_id: u32,
    field: &str,
    result: Result<Fragment, UpdateError>,
) -> Response {
    match result {
        Ok(fragment) => {
            tracing::info!(action, item_id, field, "field saved");
            Html(fragment.into_html()).into_response()
        }
        Err(e) if e.is_client_error() => {
            tracing::warn!(action, item_id, field, error = %e, "rejected field update");
            (status_for(&e), e.to_string()).into_response()
        }
        Err(e) => {
            tracing::error!(action, item_id, field, error = %e, "field update failed");
            (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_BODY).into_response()
        }
    }
}

/// Fallback handler for unmatched routes.
pub(crate) async fn handle_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "not found")
}

/// GET /health
pub(crate) async fn handle_health() -> impl IntoResponse {
    let response = serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(response))
}

/// GET /
pub(crate) async fn handle_index(State(state): State<Arc<AppState>>) -> Response {
    match state.store.render_page() {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to render page");
            (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_BODY).into_response()
        }
    }
}

/// PUT /item/{id}/field/{field}
pub(crate) async fn handle_update_field(
    State(state): State<Arc<AppState>>,
    Path((item_id, field)): Path<(u32, String)>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let submission = Submission::new(pairs);
    let result = field
        .parse::<FieldName>()
        .and_then(|name| update_field(&state.store, item_id, name, &submission));
    fragment_response("update", item_id, &field, result)
}

/// POST /item/{id}/sort/{field}
pub(crate) async fn handle_reorder_list(
    State(state): State<Arc<AppState>>,
    Path((item_id, field)): Path<(u32, String)>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let submission = Submission::new(pairs);
    let result = field
        .parse::<FieldName>()
        .and_then(|name| reorder_list(&state.store, item_id, name, &submission));
    fragment_response("reorder", item_id, &field, result)
}
