//! In-memory versioned key-value store.
//!
//! Every key carries a version that starts at 1 on first write and is bumped
//! on each committed write. A missing key behaves as version 0. All mutation
//! goes through [`Transaction`], which validates the versions it wrote
//! against at commit time and applies its writes atomically.

mod error;
mod tx;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

pub use error::{CkError, DbError, Error, KvError, TxError};
pub use tx::Transaction;

/// Default limit for a single value, in bytes.
pub const DEFAULT_MAX_VALUE_LEN: usize = 64 * 1024;

/// A stored value together with its version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub value: String,
    pub version: u64,
}

/// Shared handle to the store, cloneable across handlers.
#[derive(Clone)]
pub struct Datastore {
    inner: Arc<Inner>,
}

struct Inner {
    records: RwLock<BTreeMap<String, Record>>,
    open: AtomicBool,
    max_value_len: usize,
    /// Runs once right after the next committed read, to interleave writers.
    #[cfg(test)]
    after_read: parking_lot::Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl Datastore {
    /// Creates an empty, open datastore.
    pub fn new(max_value_len: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                records: RwLock::new(BTreeMap::new()),
                open: AtomicBool::new(true),
                max_value_len,
                #[cfg(test)]
                after_read: parking_lot::Mutex::new(None),
            }),
        }
    }

    /// Starts a new transaction.
    pub fn begin(&self) -> Result<Transaction, DbError> {
        self.ensure_open()?;
        Ok(Transaction::new(self.clone()))
    }

    /// Closes the datastore. Open transactions fail on their next commit.
    pub fn close(&self) {
        if self.inner.open.swap(false, Ordering::AcqRel) {
            tracing::info!("datastore closed");
        }
    }

    pub fn is_open(&self) -> bool {
        self.inner.open.load(Ordering::Acquire)
    }

    /// Maximum accepted value length in bytes.
    pub fn max_value_len(&self) -> usize {
        self.inner.max_value_len
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.inner.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every record, ordered by key.
    pub fn export(&self) -> Result<Vec<(String, Record)>, DbError> {
        self.ensure_open()?;
        let records = self.inner.records.read();
        Ok(records
            .iter()
            .map(|(k, r)| (k.clone(), r.clone()))
            .collect())
    }

    fn ensure_open(&self) -> Result<(), DbError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(DbError::Closed)
        }
    }

    /// Committed record for `key`, read under a single lock acquisition.
    fn get_committed(&self, key: &str) -> Option<Record> {
        let record = self.inner.records.read().get(key).cloned();
        self.run_after_read();
        record
    }

    #[cfg(test)]
    fn run_after_read(&self) {
        let hook = self.inner.after_read.lock().take();
        if let Some(hook) = hook {
            hook();
        }
    }

    #[cfg(not(test))]
    #[inline]
    fn run_after_read(&self) {}

    #[cfg(test)]
    pub(crate) fn set_after_read(&self, hook: impl FnOnce() + Send + 'static) {
        *self.inner.after_read.lock() = Some(Box::new(hook));
    }
}

impl Default for Datastore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_VALUE_LEN)
    }
}
