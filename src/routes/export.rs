//! Datastore export as newline-delimited JSON.

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use surreal_http::Error;

use crate::state::AppState;

use super::types::KeyResponse;

/// Dump every key, one JSON object per line, ordered by key.
pub async fn export(State(state): State<AppState>) -> Result<Response, Error> {
    let records = state.datastore().export()?;
    let count = records.len();

    let mut body = String::new();
    for (key, record) in records {
        let line = serde_json::to_string(&KeyResponse::new(key, record)).map_err(Error::other)?;
        body.push_str(&line);
        body.push('\n');
    }

    tracing::info!(records = count, "datastore exported");
    Ok(([(CONTENT_TYPE, "application/x-ndjson")], body).into_response())
}
