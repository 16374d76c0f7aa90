//! Statement language accepted by the `/sql` endpoint.
//!
//! ```text
//! GET <key>
//! SET <key> = "<value>" [VERSION <n>]
//! DEL <key>
//! COMMIT
//! CANCEL
//! ```
//!
//! Statements are separated by `;`. Keywords are case-insensitive, keys are
//! made of `[A-Za-z0-9_:.-]` and values are double-quoted strings supporting
//! the `\" \\ \n \t` escapes.

mod lexer;
mod parser;

pub use parser::parse;

/// A parsed query: one or more statements run in a single transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Get {
        key: String,
    },
    Set {
        key: String,
        value: String,
        version: Option<u64>,
    },
    Del {
        key: String,
    },
    Commit,
    Cancel,
}

/// The query text could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("parse error at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub message: String,
    /// 1-based line of the offending input.
    pub line: usize,
    /// 1-based column (in characters) of the offending input.
    pub column: usize,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}
