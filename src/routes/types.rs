//! Request and response types for the HTTP API.

use serde::{Deserialize, Serialize};
use surreal_core::Record;

/// Body of `PUT /key/{key}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PutRequest {
    pub value: String,
    /// Version the key must currently have (0 for "must not exist").
    #[serde(default)]
    pub version: Option<u64>,
}

/// A stored key, as returned by the key endpoints and `/export`.
#[derive(Debug, Clone, Serialize)]
pub struct KeyResponse {
    pub key: String,
    pub value: String,
    pub version: u64,
}

impl KeyResponse {
    pub fn new(key: String, record: Record) -> Self {
        Self {
            key,
            value: record.value,
            version: record.version,
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub keys: usize,
}
