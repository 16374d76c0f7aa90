//! Error types raised by the key-value layer.
//!
//! Each failure category is its own type so that callers can map them
//! independently (the HTTP layer turns them into distinct status codes).

/// The datastore cannot serve requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DbError {
    /// The datastore has been closed and no longer accepts work.
    #[error("the datastore is closed")]
    Closed,
}

/// A transaction was used incorrectly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TxError {
    /// The transaction was already committed or cancelled.
    #[error("the transaction has already been committed or cancelled")]
    Finished,
}

/// A write conflicted with the current state of a key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KvError {
    /// The key's version differs from the one the write was made against.
    #[error("version mismatch on key {key}")]
    VersionMismatch {
        key: String,
        expected: u64,
        actual: u64,
    },
}

/// A write violated a datastore constraint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CkError {
    #[error("keys must not be empty")]
    EmptyKey,

    #[error("value for key {key} is {len} bytes, exceeding the limit of {max} bytes")]
    ValueTooLong { key: String, len: usize, max: usize },
}

/// Any error produced by the key-value layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Tx(#[from] TxError),

    #[error(transparent)]
    Kv(#[from] KvError),

    #[error(transparent)]
    Ck(#[from] CkError),
}
