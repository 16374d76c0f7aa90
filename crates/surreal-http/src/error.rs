//! Every failure a request handler can hand to the translator.
//!
//! `Error` is a closed set: one variant per upstream failure category plus
//! a catch-all for anything unrecognised. The translator only borrows it.

use axum::extract::rejection::{JsonRejection, PathRejection, StringRejection};
use axum::http::StatusCode;
use surreal_core::kvs::{self, CkError, DbError, KvError, TxError};
use surreal_core::sql::ParseError;

/// Framework-level error carrying the HTTP status it should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{status}")]
pub struct HttpError {
    status: StatusCode,
}

impl HttpError {
    pub const UNAUTHORIZED: Self = Self::new(StatusCode::UNAUTHORIZED);
    pub const NOT_FOUND: Self = Self::new(StatusCode::NOT_FOUND);
    pub const METHOD_NOT_ALLOWED: Self = Self::new(StatusCode::METHOD_NOT_ALLOWED);

    pub const fn new(status: StatusCode) -> Self {
        Self { status }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Numeric status code.
    pub fn code(&self) -> u16 {
        self.status.as_u16()
    }
}

/// Error type returned by request handlers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The datastore is unavailable.
    #[error(transparent)]
    Db(#[from] DbError),

    /// A transaction failed.
    #[error(transparent)]
    Tx(#[from] TxError),

    /// A write conflicted with the stored state.
    #[error(transparent)]
    Kv(#[from] KvError),

    /// A write violated a constraint.
    #[error(transparent)]
    Ck(#[from] CkError),

    /// The query text could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Raised by the HTTP framework itself (routing, extraction, auth).
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Anything else.
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wraps an error of unrecognised origin.
    pub fn other(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Other(err.into())
    }
}

impl From<kvs::Error> for Error {
    fn from(err: kvs::Error) -> Self {
        match err {
            kvs::Error::Db(e) => Self::Db(e),
            kvs::Error::Tx(e) => Self::Tx(e),
            kvs::Error::Kv(e) => Self::Kv(e),
            kvs::Error::Ck(e) => Self::Ck(e),
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "JSON body rejected");
        Self::Http(HttpError::new(rejection.status()))
    }
}

impl From<StringRejection> for Error {
    fn from(rejection: StringRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "text body rejected");
        Self::Http(HttpError::new(rejection.status()))
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "path parameters rejected");
        Self::Http(HttpError::new(rejection.status()))
    }
}
