//! Response assembly: classification + catalog lookup + one send.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::catalog::{self, CatalogEntry};
use crate::classify::{Classification, classify};
use crate::error::Error;

/// JSON body sent with every error (and with the server's info page).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseBody {
    pub code: u16,
    pub details: String,
    pub documentation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub information: Option<String>,
}

impl From<&CatalogEntry> for ResponseBody {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            code: entry.code,
            details: entry.details.to_string(),
            documentation: entry.documentation.to_string(),
            information: entry.information.map(str::to_string),
        }
    }
}

impl ResponseBody {
    /// Fresh copy of the catalog template for `code` (500 when unknown).
    pub fn for_status(code: u16) -> Self {
        catalog::resolve(code).into()
    }
}

/// Destination of a translated error.
///
/// `send` consumes the sink, so a response is transmitted exactly once.
pub trait ResponseSink {
    type Output;

    fn send(self, status: StatusCode, body: ResponseBody) -> Self::Output;
}

/// Sink producing an axum JSON response.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSink;

impl ResponseSink for JsonSink {
    type Output = Response;

    fn send(self, status: StatusCode, body: ResponseBody) -> Response {
        (status, Json(body)).into_response()
    }
}

/// Translates `err` into a status and body and hands both to `sink`.
pub fn respond<S: ResponseSink>(err: Option<&Error>, sink: S) -> S::Output {
    let Classification { status, detail } = classify(err);
    let entry = catalog::resolve(status);
    if entry.code != status {
        tracing::debug!(status, "no response template for status, using 500");
    }

    let mut body = ResponseBody::from(entry);
    if let Some(detail) = detail.filter(|d| !d.is_empty()) {
        body.information = Some(detail);
    }

    if entry.code >= 500 {
        match err {
            Some(e) => tracing::error!(code = entry.code, error = %e, "request failed"),
            None => tracing::error!(code = entry.code, "request failed"),
        }
    } else {
        tracing::debug!(code = entry.code, "request rejected");
    }

    let status = StatusCode::from_u16(entry.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    sink.send(status, body)
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        respond(Some(&self), JsonSink)
    }
}
