//! Surreal HTTP — turns any failure raised while serving a request into the
//! JSON response the client receives.
//!
//! The pipeline is: [`Error`] → [`classify`](classify::classify) (status and
//! optional detail) → [`catalog`] lookup (unknown statuses become 500) →
//! [`ResponseBody`] → one call to a [`ResponseSink`].
//!
//! [`Error`] implements axum's `IntoResponse`, so handlers can simply return
//! `Result<_, Error>`.

pub mod catalog;
pub mod classify;
pub mod error;
pub mod respond;

pub use catalog::CatalogEntry;
pub use classify::{Classification, classify};
pub use error::{Error, HttpError};
pub use respond::{JsonSink, ResponseBody, ResponseSink, respond};
