//! HTTP API routes for Surreal Server.

mod export;
mod key;
mod sql;
mod system;
pub mod types;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use surreal_http::{Error, HttpError};
use tower_http::trace::TraceLayer;

use crate::request_id::request_id_middleware;
use crate::state::AppState;

/// Builds the main application router.
pub fn router(state: AppState) -> Router {
    let protected = Router::new().route("/export", get(export::export));

    #[cfg(feature = "auth")]
    let protected = protected.route_layer(middleware::from_fn_with_state(
        state.clone(),
        crate::auth::auth_middleware,
    ));

    Router::new()
        .route("/", get(system::info))
        .route("/health", get(system::health))
        .route(
            "/key/{key}",
            get(key::get_key).put(key::put_key).delete(key::delete_key),
        )
        .route("/sql", post(sql::query))
        .merge(protected)
        // Unknown paths and methods answer with the catalog bodies too
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(DefaultBodyLimit::max(state.max_body_size()))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

async fn not_found() -> Error {
    HttpError::NOT_FOUND.into()
}

async fn method_not_allowed() -> Error {
    HttpError::METHOD_NOT_ALLOWED.into()
}
