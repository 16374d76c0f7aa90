//! Recursive-descent parser producing a [`Query`].

use super::lexer::{Lexer, Token, TokenKind};
use super::{ParseError, Query, Statement};

/// Parses query text into its statements.
pub fn parse(input: &str) -> Result<Query, ParseError> {
    let mut lexer = Lexer::new(input);
    let tokens = lexer.tokenize()?;
    let (line, column) = lexer.position();
    Parser {
        tokens,
        pos: 0,
        end: (line, column),
    }
    .query()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    end: (usize, usize),
}

impl Parser {
    fn query(mut self) -> Result<Query, ParseError> {
        let mut statements = Vec::new();
        loop {
            while self.eat(&TokenKind::Semi) {}
            if self.peek().is_none() {
                break;
            }
            statements.push(self.statement()?);
            match self.advance() {
                None => break,
                Some(Token {
                    kind: TokenKind::Semi,
                    ..
                }) => {}
                Some(token) => return Err(unexpected(&token, "';'")),
            }
        }

        if statements.is_empty() {
            return Err(self.error_at_end("query contains no statements"));
        }
        Ok(Query { statements })
    }

    fn statement(&mut self) -> Result<Statement, ParseError> {
        let (word, line, column) = self.expect_word("a statement")?;
        match word.to_ascii_uppercase().as_str() {
            "GET" => Ok(Statement::Get { key: self.key()? }),
            "DEL" => Ok(Statement::Del { key: self.key()? }),
            "SET" => {
                let key = self.key()?;
                self.expect(&TokenKind::Eq, "'='")?;
                let value = self.string()?;
                let version = if self.eat_keyword("VERSION") {
                    Some(self.version()?)
                } else {
                    None
                };
                Ok(Statement::Set {
                    key,
                    value,
                    version,
                })
            }
            "COMMIT" => Ok(Statement::Commit),
            "CANCEL" => Ok(Statement::Cancel),
            _ => Err(ParseError::new(
                format!("unknown statement '{word}'"),
                line,
                column,
            )),
        }
    }

    fn key(&mut self) -> Result<String, ParseError> {
        self.expect_word("a key").map(|(word, _, _)| word)
    }

    fn string(&mut self) -> Result<String, ParseError> {
        match self.advance() {
            Some(Token {
                kind: TokenKind::Str(s),
                ..
            }) => Ok(s),
            Some(token) => Err(unexpected(&token, "a quoted string")),
            None => Err(self.error_at_end("expected a quoted string")),
        }
    }

    fn version(&mut self) -> Result<u64, ParseError> {
        let (word, line, column) = self.expect_word("a version number")?;
        word.parse::<u64>().map_err(|_| {
            ParseError::new(format!("invalid version number '{word}'"), line, column)
        })
    }

    /// Consumes a word token, returning it with its position.
    fn expect_word(&mut self, what: &str) -> Result<(String, usize, usize), ParseError> {
        match self.advance() {
            Some(Token {
                kind: TokenKind::Word(word),
                line,
                column,
            }) => Ok((word, line, column)),
            Some(token) => Err(unexpected(&token, what)),
            None => Err(self.error_at_end(&format!("expected {what}"))),
        }
    }

    fn expect(&mut self, kind: &TokenKind, what: &str) -> Result<(), ParseError> {
        match self.advance() {
            Some(token) if token.kind == *kind => Ok(()),
            Some(token) => Err(unexpected(&token, what)),
            None => Err(self.error_at_end(&format!("expected {what}"))),
        }
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek().is_some_and(|t| t.kind == *kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let matched = self.peek().is_some_and(
            |t| matches!(&t.kind, TokenKind::Word(w) if w.eq_ignore_ascii_case(keyword)),
        );
        if matched {
            self.pos += 1;
        }
        matched
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn error_at_end(&self, message: &str) -> ParseError {
        ParseError::new(message, self.end.0, self.end.1)
    }
}

fn unexpected(token: &Token, expected: &str) -> ParseError {
    let found = match &token.kind {
        TokenKind::Word(w) => format!("'{w}'"),
        TokenKind::Str(_) => "a string".to_string(),
        TokenKind::Eq => "'='".to_string(),
        TokenKind::Semi => "';'".to_string(),
    };
    ParseError::new(
        format!("expected {expected}, found {found}"),
        token.line,
        token.column,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_statements() {
        let q = parse(
            "get a; SET b = \"x\"; set c = \"y\" version 2; DEL d; COMMIT; cancel",
        )
        .unwrap();
        assert_eq!(
            q.statements,
            vec![
                Statement::Get { key: "a".into() },
                Statement::Set {
                    key: "b".into(),
                    value: "x".into(),
                    version: None,
                },
                Statement::Set {
                    key: "c".into(),
                    value: "y".into(),
                    version: Some(2),
                },
                Statement::Del { key: "d".into() },
                Statement::Commit,
                Statement::Cancel,
            ]
        );
    }

    #[test]
    fn test_empty_statements_are_skipped() {
        let q = parse(";;GET a;;\n").unwrap();
        assert_eq!(q.statements.len(), 1);
    }

    #[test]
    fn test_empty_query() {
        let err = parse("  ;  ").unwrap_err();
        assert_eq!(err.message, "query contains no statements");
        assert!(parse("").is_err());
    }

    #[test]
    fn test_unknown_statement() {
        let err = parse("GET a; DROP b").unwrap_err();
        assert_eq!(err.message, "unknown statement 'DROP'");
        assert_eq!((err.line, err.column), (1, 8));
        assert_eq!(
            err.to_string(),
            "parse error at line 1, column 8: unknown statement 'DROP'"
        );
    }

    #[test]
    fn test_missing_separator() {
        let err = parse("GET a GET b").unwrap_err();
        assert_eq!(err.message, "expected ';', found 'GET'");
        assert_eq!(err.column, 7);
    }

    #[test]
    fn test_set_errors() {
        let err = parse("SET a \"x\"").unwrap_err();
        assert_eq!(err.message, "expected '=', found a string");

        let err = parse("SET a = b").unwrap_err();
        assert_eq!(err.message, "expected a quoted string, found 'b'");

        let err = parse("SET a = \"x\" VERSION two").unwrap_err();
        assert_eq!(err.message, "invalid version number 'two'");

        let err = parse("SET a =").unwrap_err();
        assert_eq!(err.message, "expected a quoted string");
        assert_eq!((err.line, err.column), (1, 8));
    }

    #[test]
    fn test_missing_key() {
        let err = parse("GET ;").unwrap_err();
        assert_eq!(err.message, "expected a key, found ';'");
    }
}
