//! Bearer token authentication middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use subtle::ConstantTimeEq;
use surreal_http::{Error, HttpError};

use crate::state::AppState;

/// Middleware that checks `Authorization: Bearer <token>` on protected routes.
///
/// When no auth token is configured in `AppState`, all requests pass through.
pub async fn auth_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, Error> {
    let Some(expected) = state.auth_token() else {
        return Ok(next.run(req).await);
    };

    let presented = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match presented {
        Some(token) if ct_eq(token.as_bytes(), expected.as_bytes()) => Ok(next.run(req).await),
        Some(_) => {
            tracing::warn!(path = %req.uri().path(), "rejected invalid bearer token");
            Err(HttpError::UNAUTHORIZED.into())
        }
        None => Err(HttpError::UNAUTHORIZED.into()),
    }
}

/// Constant-time comparison of two byte slices.
fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.ct_eq(b).into()
}
