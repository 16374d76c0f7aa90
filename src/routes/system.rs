//! Info and health endpoints.

use axum::extract::{Json, State};
use axum::response::IntoResponse;
use surreal_http::ResponseBody;

use crate::state::AppState;

use super::types::HealthResponse;

/// Landing page: points clients at the documentation.
pub async fn info() -> impl IntoResponse {
    Json(ResponseBody::for_status(200))
}

/// Check server health.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let ds = state.datastore();
    Json(HealthResponse {
        status: if ds.is_open() { "ok" } else { "closed" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_secs(),
        keys: ds.len(),
    })
}
