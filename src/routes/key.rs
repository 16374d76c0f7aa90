//! Single-key endpoints.
//!
//! Each request runs in its own transaction. Extractor rejections are taken
//! as `Result` so they flow through the same error translation as storage
//! failures.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path, State};
use surreal_http::{Error, HttpError};

use crate::state::AppState;

use super::types::{KeyResponse, PutRequest};

/// Read a key.
pub async fn get_key(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<KeyResponse>, Error> {
    let Path(key) = path?;
    let tx = state.datastore().begin()?;
    let record = tx.get(&key)?.ok_or(HttpError::NOT_FOUND)?;
    Ok(Json(KeyResponse::new(key, record)))
}

/// Write a key, optionally guarded by its expected current version.
pub async fn put_key(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<PutRequest>, JsonRejection>,
) -> Result<Json<KeyResponse>, Error> {
    let Path(key) = path?;
    let Json(req) = body?;

    let mut tx = state.datastore().begin()?;
    let record = tx.set(&key, &req.value, req.version)?;
    tx.commit()?;

    tracing::debug!(%key, version = record.version, "key written");
    Ok(Json(KeyResponse::new(key, record)))
}

/// Remove a key, returning its last value.
pub async fn delete_key(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<KeyResponse>, Error> {
    let Path(key) = path?;

    let mut tx = state.datastore().begin()?;
    let removed = tx.del(&key)?.ok_or(HttpError::NOT_FOUND)?;
    tx.commit()?;

    tracing::debug!(%key, "key removed");
    Ok(Json(KeyResponse::new(key, removed)))
}
