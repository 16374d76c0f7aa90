//! Shared application state: the datastore and server settings.

use std::sync::Arc;
use std::time::Instant;

use surreal_core::Datastore;
use surreal_core::kvs::DEFAULT_MAX_VALUE_LEN;

use crate::config::Config;

/// Default body limit for states not built from a [`Config`].
const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Shared application state, cloneable across handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    datastore: Datastore,
    max_body_size: usize,
    start_time: Instant,
    #[cfg(feature = "auth")]
    auth_token: Option<String>,
}

impl AppState {
    /// Creates a new application state from config.
    pub fn new(config: &Config) -> Self {
        Self::build(
            Datastore::new(config.max_value_size),
            config.max_body_size,
            config.auth_token.clone(),
        )
    }

    /// Creates a state with default limits and no authentication (for tests
    /// and ephemeral use).
    pub fn new_in_memory() -> Self {
        Self::build(
            Datastore::new(DEFAULT_MAX_VALUE_LEN),
            DEFAULT_MAX_BODY_SIZE,
            None,
        )
    }

    /// Creates a state with custom body and value limits (for tests).
    pub fn new_in_memory_with_limits(max_body_size: usize, max_value_len: usize) -> Self {
        Self::build(Datastore::new(max_value_len), max_body_size, None)
    }

    /// Creates a state with token authentication enabled (for tests).
    #[cfg(feature = "auth")]
    pub fn new_in_memory_with_auth(auth_token: String) -> Self {
        Self::build(
            Datastore::new(DEFAULT_MAX_VALUE_LEN),
            DEFAULT_MAX_BODY_SIZE,
            Some(auth_token),
        )
    }

    #[cfg_attr(not(feature = "auth"), allow(unused_variables))]
    fn build(datastore: Datastore, max_body_size: usize, auth_token: Option<String>) -> Self {
        Self {
            inner: Arc::new(Inner {
                datastore,
                max_body_size,
                start_time: Instant::now(),
                #[cfg(feature = "auth")]
                auth_token,
            }),
        }
    }

    pub fn datastore(&self) -> &Datastore {
        &self.inner.datastore
    }

    pub fn max_body_size(&self) -> usize {
        self.inner.max_body_size
    }

    pub fn uptime_secs(&self) -> u64 {
        self.inner.start_time.elapsed().as_secs()
    }

    #[cfg(feature = "auth")]
    pub fn auth_token(&self) -> Option<&str> {
        self.inner.auth_token.as_deref()
    }
}
