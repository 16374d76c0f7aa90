//! Surreal Core — storage and query layer for Surreal Server.
//!
//! - `kvs`  — in-memory versioned key-value store with optimistic transactions
//! - `sql`  — parser for the statement language accepted on `/sql`
//! - `exec` — runs a parsed query inside a single transaction
//!
//! **Zero transport dependencies** — every error raised here is a plain
//! `thiserror` type; the HTTP crate decides how it reaches the client.

pub mod exec;
pub mod kvs;
pub mod sql;

pub use kvs::{Datastore, Record, Transaction};
