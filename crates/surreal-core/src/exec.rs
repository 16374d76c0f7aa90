//! Query execution against the datastore.

use crate::kvs::{self, Datastore, Record};
use crate::sql::{Query, Statement};

/// Runs every statement of `query` inside one transaction.
///
/// Returns one result per statement: the record read, written or removed
/// (`None` for misses and for `COMMIT`/`CANCEL`). `COMMIT` and `CANCEL` end
/// the transaction early, so any statement after them fails. A transaction
/// still open after the last statement is committed; on error it is dropped
/// without applying anything.
pub fn execute(ds: &Datastore, query: &Query) -> Result<Vec<Option<Record>>, kvs::Error> {
    let mut tx = ds.begin()?;
    let mut results = Vec::with_capacity(query.statements.len());

    for statement in &query.statements {
        let result = match statement {
            Statement::Get { key } => tx.get(key)?,
            Statement::Set {
                key,
                value,
                version,
            } => Some(tx.set(key, value, *version)?),
            Statement::Del { key } => tx.del(key)?,
            Statement::Commit => {
                tx.commit()?;
                None
            }
            Statement::Cancel => {
                tx.cancel()?;
                None
            }
        };
        results.push(result);
    }

    if !tx.is_finished() {
        tx.commit()?;
    }
    tracing::debug!(statements = results.len(), "query executed");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kvs::{KvError, TxError};
    use crate::sql::parse;

    fn run(ds: &Datastore, q: &str) -> Result<Vec<Option<Record>>, kvs::Error> {
        execute(ds, &parse(q).unwrap())
    }

    #[test]
    fn test_implicit_commit() {
        let ds = Datastore::default();
        let out = run(&ds, "SET a = \"1\"; GET a; GET missing").unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out[1].as_ref().unwrap().value, "1");
        assert!(out[2].is_none());
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn test_cancel_discards_writes() {
        let ds = Datastore::default();
        run(&ds, "SET a = \"1\"; CANCEL").unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn test_statement_after_commit_fails() {
        let ds = Datastore::default();
        let err = run(&ds, "SET a = \"1\"; COMMIT; GET a").unwrap_err();
        assert_eq!(err, kvs::Error::Tx(TxError::Finished));
        // The explicit commit already went through
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn test_error_discards_transaction() {
        let ds = Datastore::default();
        let err = run(&ds, "SET a = \"1\"; SET b = \"2\" VERSION 4").unwrap_err();
        assert!(matches!(err, kvs::Error::Kv(KvError::VersionMismatch { .. })));
        assert!(ds.is_empty());
    }

    #[test]
    fn test_closed_store() {
        let ds = Datastore::default();
        ds.close();
        let err = run(&ds, "GET a").unwrap_err();
        assert_eq!(err, kvs::Error::Db(kvs::DbError::Closed));
    }
}
