//! Per-request correlation IDs.
//!
//! Error bodies carry no request identity, so the `X-Request-Id` response
//! header is how a client ties a failed call to the `request failed` log line
//! written while translating the error. That log line runs inside the
//! `request` span opened here.

use axum::extract::Request;
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use uuid::Uuid;

static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Longest client-supplied ID that is kept as is.
const MAX_LEN: usize = 64;

/// Correlation ID of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(HeaderValue);

impl RequestId {
    /// Uses the client's `X-Request-Id` when it is a plain token, otherwise
    /// generates a UUID v4.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(&X_REQUEST_ID)
            .filter(|v| is_token(v.as_bytes()))
            .cloned()
            .map_or_else(Self::generate, Self)
    }

    fn generate() -> Self {
        let id = Uuid::new_v4().hyphenated().to_string();
        // A hyphenated UUID is always a valid header value
        Self(HeaderValue::from_str(&id).unwrap_or(HeaderValue::from_static("unknown")))
    }

    pub fn as_str(&self) -> &str {
        self.0.to_str().unwrap_or_default()
    }
}

fn is_token(id: &[u8]) -> bool {
    !id.is_empty()
        && id.len() <= MAX_LEN
        && id
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
}

/// Tags the request and its response with a [`RequestId`] and runs the
/// handler inside a `request` span carrying it.
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let id = RequestId::from_headers(req.headers());
    req.headers_mut().insert(X_REQUEST_ID.clone(), id.0.clone());

    let span = tracing::info_span!(
        "request",
        request_id = id.as_str(),
        method = %req.method(),
        path = req.uri().path(),
    );
    let mut response = next.run(req).instrument(span).await;
    response.headers_mut().insert(X_REQUEST_ID.clone(), id.0);
    response
}
