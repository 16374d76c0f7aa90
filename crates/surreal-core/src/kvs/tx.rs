//! Optimistic transactions over a [`Datastore`].

use std::collections::BTreeMap;

use super::{CkError, Datastore, DbError, Error, KvError, Record, TxError};

/// A buffered write and the committed version it was made against.
#[derive(Debug, Clone)]
struct Pending {
    base: u64,
    value: Option<String>,
}

impl Pending {
    fn visible(&self) -> Option<Record> {
        self.value.as_ref().map(|v| Record {
            value: v.clone(),
            version: self.base + 1,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Open,
    Committed,
    Cancelled,
}

/// A unit of work against the datastore.
///
/// Reads see the transaction's own writes. Writes are buffered until
/// [`commit`](Self::commit); dropping an open transaction discards them.
pub struct Transaction {
    store: Datastore,
    writes: BTreeMap<String, Pending>,
    state: State,
}

impl Transaction {
    pub(super) fn new(store: Datastore) -> Self {
        Self {
            store,
            writes: BTreeMap::new(),
            state: State::Open,
        }
    }

    /// Whether the transaction was committed or cancelled.
    pub fn is_finished(&self) -> bool {
        self.state != State::Open
    }

    /// Reads a key, observing this transaction's pending writes first.
    pub fn get(&self, key: &str) -> Result<Option<Record>, Error> {
        self.ensure_open()?;
        Ok(self.visible(key))
    }

    /// Buffers a write of `value` under `key`.
    ///
    /// When `expected_version` is given, the key's currently visible version
    /// must match it (0 for a missing key). Returns the record as it will
    /// look once committed.
    pub fn set(
        &mut self,
        key: &str,
        value: &str,
        expected_version: Option<u64>,
    ) -> Result<Record, Error> {
        self.ensure_open()?;
        if key.is_empty() {
            return Err(CkError::EmptyKey.into());
        }
        let max = self.store.max_value_len();
        if value.len() > max {
            return Err(CkError::ValueTooLong {
                key: key.to_string(),
                len: value.len(),
                max,
            }
            .into());
        }
        let (base, visible) = self.snapshot(key);
        if let Some(expected) = expected_version {
            let actual = visible.map_or(0, |r| r.version);
            if actual != expected {
                return Err(KvError::VersionMismatch {
                    key: key.to_string(),
                    expected,
                    actual,
                }
                .into());
            }
        }

        self.writes.insert(
            key.to_string(),
            Pending {
                base,
                value: Some(value.to_string()),
            },
        );
        Ok(Record {
            value: value.to_string(),
            version: base + 1,
        })
    }

    /// Buffers the removal of `key`, returning the record it hid.
    pub fn del(&mut self, key: &str) -> Result<Option<Record>, Error> {
        self.ensure_open()?;
        if key.is_empty() {
            return Err(CkError::EmptyKey.into());
        }
        let (base, previous) = self.snapshot(key);
        self.writes
            .insert(key.to_string(), Pending { base, value: None });
        Ok(previous)
    }

    /// Applies every buffered write atomically.
    ///
    /// Fails with a conflict if any written key changed since this
    /// transaction first touched it; in that case nothing is applied.
    pub fn commit(&mut self) -> Result<(), Error> {
        self.ensure_open()?;
        if !self.store.is_open() {
            self.state = State::Cancelled;
            return Err(DbError::Closed.into());
        }

        let mut records = self.store.inner.records.write();
        for (key, pending) in &self.writes {
            let actual = records.get(key).map_or(0, |r| r.version);
            if actual != pending.base {
                self.state = State::Cancelled;
                return Err(KvError::VersionMismatch {
                    key: key.clone(),
                    expected: pending.base,
                    actual,
                }
                .into());
            }
        }
        for (key, pending) in std::mem::take(&mut self.writes) {
            match pending.value {
                Some(value) => {
                    records.insert(
                        key,
                        Record {
                            value,
                            version: pending.base + 1,
                        },
                    );
                }
                None => {
                    records.remove(&key);
                }
            }
        }
        drop(records);

        self.state = State::Committed;
        Ok(())
    }

    /// Discards every buffered write.
    pub fn cancel(&mut self) -> Result<(), Error> {
        self.ensure_open()?;
        self.writes.clear();
        self.state = State::Cancelled;
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), TxError> {
        match self.state {
            State::Open => Ok(()),
            State::Committed | State::Cancelled => Err(TxError::Finished),
        }
    }

    fn visible(&self, key: &str) -> Option<Record> {
        match self.writes.get(key) {
            Some(pending) => pending.visible(),
            None => self.store.get_committed(key),
        }
    }

    /// Base version for a write to `key` and the record currently visible.
    ///
    /// Both come from the same read: the pending write if there is one,
    /// otherwise one lookup of the committed record.
    fn snapshot(&self, key: &str) -> (u64, Option<Record>) {
        match self.writes.get(key) {
            Some(pending) => (pending.base, pending.visible()),
            None => {
                let record = self.store.get_committed(key);
                (record.as_ref().map_or(0, |r| r.version), record)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Datastore {
        Datastore::new(16)
    }

    #[test]
    fn test_read_your_writes() {
        let ds = store();
        let mut tx = ds.begin().unwrap();
        let rec = tx.set("k", "v", None).unwrap();
        assert_eq!(rec.version, 1);
        assert_eq!(tx.get("k").unwrap(), Some(rec));
        // Not visible outside until committed
        assert_eq!(ds.begin().unwrap().get("k").unwrap(), None);

        tx.commit().unwrap();
        let rec = ds.begin().unwrap().get("k").unwrap().unwrap();
        assert_eq!(rec.value, "v");
        assert_eq!(rec.version, 1);
    }

    #[test]
    fn test_versions_bump_once_per_commit() {
        let ds = store();
        for expected in 1..=3 {
            let mut tx = ds.begin().unwrap();
            tx.set("k", "a", None).unwrap();
            let rec = tx.set("k", "b", None).unwrap();
            assert_eq!(rec.version, expected);
            tx.commit().unwrap();
        }
    }

    #[test]
    fn test_expected_version_mismatch() {
        let ds = store();
        let mut tx = ds.begin().unwrap();
        tx.set("k", "v", Some(0)).unwrap();
        tx.commit().unwrap();

        let mut tx = ds.begin().unwrap();
        let err = tx.set("k", "v2", Some(5)).unwrap_err();
        assert_eq!(
            err,
            Error::Kv(KvError::VersionMismatch {
                key: "k".to_string(),
                expected: 5,
                actual: 1,
            })
        );
        assert_eq!(err.to_string(), "version mismatch on key k");
    }

    #[test]
    fn test_concurrent_writers_conflict_on_commit() {
        let ds = store();
        let mut a = ds.begin().unwrap();
        let mut b = ds.begin().unwrap();
        a.set("k", "from-a", None).unwrap();
        b.set("k", "from-b", None).unwrap();
        a.commit().unwrap();

        let err = b.commit().unwrap_err();
        assert!(matches!(err, Error::Kv(KvError::VersionMismatch { .. })));
        assert!(b.is_finished());
        let rec = ds.begin().unwrap().get("k").unwrap().unwrap();
        assert_eq!(rec.value, "from-a");
    }

    #[test]
    fn test_failed_commit_applies_nothing() {
        let ds = store();
        let mut a = ds.begin().unwrap();
        let mut b = ds.begin().unwrap();
        a.set("z", "1", None).unwrap();
        b.set("y", "1", None).unwrap();
        b.set("z", "2", None).unwrap();
        a.commit().unwrap();
        assert!(b.commit().is_err());
        assert_eq!(ds.begin().unwrap().get("y").unwrap(), None);
    }

    #[test]
    fn test_conditional_write_against_concurrent_commit_conflicts() {
        let ds = store();
        let mut tx = ds.begin().unwrap();
        tx.set("k", "v1", None).unwrap();
        tx.commit().unwrap();

        // Another writer commits v2 right after our transaction reads v1.
        let other = ds.clone();
        ds.set_after_read(move || {
            let mut tx = other.begin().unwrap();
            tx.set("k", "theirs", Some(1)).unwrap();
            tx.commit().unwrap();
        });

        let mut tx = ds.begin().unwrap();
        let rec = tx.set("k", "mine", Some(1)).unwrap();
        assert_eq!(rec.version, 2);
        let err = tx.commit().unwrap_err();
        assert_eq!(
            err,
            Error::Kv(KvError::VersionMismatch {
                key: "k".to_string(),
                expected: 1,
                actual: 2,
            })
        );

        let rec = ds.begin().unwrap().get("k").unwrap().unwrap();
        assert_eq!(rec.value, "theirs");
        assert_eq!(rec.version, 2);
    }

    #[test]
    fn test_delete_against_concurrent_commit_conflicts() {
        let ds = store();
        let mut tx = ds.begin().unwrap();
        tx.set("k", "v1", None).unwrap();
        tx.commit().unwrap();

        let other = ds.clone();
        ds.set_after_read(move || {
            let mut tx = other.begin().unwrap();
            tx.set("k", "theirs", None).unwrap();
            tx.commit().unwrap();
        });

        let mut tx = ds.begin().unwrap();
        let removed = tx.del("k").unwrap().unwrap();
        assert_eq!(removed.value, "v1");
        assert!(matches!(
            tx.commit().unwrap_err(),
            Error::Kv(KvError::VersionMismatch { .. })
        ));
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn test_delete() {
        let ds = store();
        let mut tx = ds.begin().unwrap();
        tx.set("k", "v", None).unwrap();
        tx.commit().unwrap();

        let mut tx = ds.begin().unwrap();
        let removed = tx.del("k").unwrap().unwrap();
        assert_eq!(removed.value, "v");
        assert_eq!(tx.get("k").unwrap(), None);
        assert_eq!(tx.del("k").unwrap(), None);
        tx.commit().unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn test_constraints() {
        let ds = store();
        let mut tx = ds.begin().unwrap();
        assert_eq!(tx.set("", "v", None).unwrap_err(), Error::Ck(CkError::EmptyKey));
        let err = tx.set("k", &"x".repeat(17), None).unwrap_err();
        assert_eq!(
            err,
            Error::Ck(CkError::ValueTooLong {
                key: "k".to_string(),
                len: 17,
                max: 16,
            })
        );
    }

    #[test]
    fn test_finished_transaction_rejects_work() {
        let ds = store();
        let mut tx = ds.begin().unwrap();
        tx.cancel().unwrap();
        assert_eq!(tx.get("k").unwrap_err(), Error::Tx(TxError::Finished));
        assert_eq!(tx.commit().unwrap_err(), Error::Tx(TxError::Finished));

        let mut tx = ds.begin().unwrap();
        tx.commit().unwrap();
        assert_eq!(
            tx.set("k", "v", None).unwrap_err(),
            Error::Tx(TxError::Finished)
        );
    }

    #[test]
    fn test_commit_after_close() {
        let ds = store();
        let mut tx = ds.begin().unwrap();
        tx.set("k", "v", None).unwrap();
        ds.close();
        assert_eq!(tx.commit().unwrap_err(), Error::Db(DbError::Closed));
    }
}
