//! Maps an [`Error`] to the status it should produce.

use crate::error::Error;

/// Outcome of classifying an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub status: u16,
    /// Message to surface to the client in place of the catalog default.
    pub detail: Option<String>,
}

/// Decides the status and client-visible detail for `err`.
///
/// Only the five internal categories expose their message. Framework errors
/// keep the catalog text, and anything unrecognised (including no error at
/// all) is reported as a bad request without detail.
pub fn classify(err: Option<&Error>) -> Classification {
    let (status, detail) = match err {
        Some(Error::Db(e)) => (503, Some(e.to_string())),
        Some(Error::Tx(e)) => (500, Some(e.to_string())),
        Some(Error::Kv(e)) => (409, Some(e.to_string())),
        Some(Error::Ck(e)) => (403, Some(e.to_string())),
        Some(Error::Parse(e)) => (400, Some(e.to_string())),
        Some(Error::Http(e)) => (e.code(), None),
        Some(Error::Other(_)) | None => (400, None),
    };
    Classification { status, detail }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HttpError;
    use axum::http::StatusCode;
    use surreal_core::kvs::{CkError, DbError, KvError, TxError};
    use surreal_core::sql;

    fn status_of(err: Error) -> (u16, Option<String>) {
        let c = classify(Some(&err));
        (c.status, c.detail)
    }

    #[test]
    fn internal_categories_expose_their_message() {
        assert_eq!(
            status_of(DbError::Closed.into()),
            (503, Some("the datastore is closed".into()))
        );
        assert_eq!(
            status_of(TxError::Finished.into()),
            (
                500,
                Some("the transaction has already been committed or cancelled".into())
            )
        );
        assert_eq!(
            status_of(
                KvError::VersionMismatch {
                    key: "X".into(),
                    expected: 1,
                    actual: 2,
                }
                .into()
            ),
            (409, Some("version mismatch on key X".into()))
        );
        assert_eq!(
            status_of(CkError::EmptyKey.into()),
            (403, Some("keys must not be empty".into()))
        );

        let parse_err = sql::parse("NOPE").unwrap_err();
        let message = parse_err.to_string();
        assert_eq!(status_of(parse_err.into()), (400, Some(message)));
    }

    #[test]
    fn framework_errors_use_their_own_code() {
        assert_eq!(status_of(HttpError::NOT_FOUND.into()), (404, None));
        assert_eq!(
            status_of(HttpError::new(StatusCode::IM_A_TEAPOT).into()),
            (418, None)
        );
    }

    #[test]
    fn unrecognised_and_absent_are_bad_requests() {
        assert_eq!(status_of(Error::other("disk on fire")), (400, None));
        assert_eq!(
            classify(None),
            Classification {
                status: 400,
                detail: None,
            }
        );
    }

    #[test]
    fn classification_is_idempotent() {
        let err: Error = CkError::ValueTooLong {
            key: "k".into(),
            len: 10,
            max: 5,
        }
        .into();
        assert_eq!(classify(Some(&err)), classify(Some(&err)));
    }
}
