//! Surreal Server - HTTP front end for the Surreal key-value database.
//!
//! Storage and query parsing live in `surreal-core`; turning their failures
//! into client responses lives in `surreal-http`. This crate wires both into
//! an axum router. Feature-gated:
//! - `auth` — bearer token check on `/export`

#[cfg(feature = "auth")]
pub mod auth;
pub mod config;
pub mod request_id;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
