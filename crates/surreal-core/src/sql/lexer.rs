//! Tokenizer for the statement language.

use std::iter::Peekable;
use std::str::Chars;

use super::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum TokenKind {
    /// Keyword, key or integer; the parser decides which.
    Word(String),
    Str(String),
    Eq,
    Semi,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

pub(super) struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '.' | '-')
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Position just past the last consumed character.
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    /// Splits the whole input into tokens.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
            self.bump();
        }
        let (line, column) = self.position();
        let Some(&c) = self.chars.peek() else {
            return Ok(None);
        };

        let kind = match c {
            ';' => {
                self.bump();
                TokenKind::Semi
            }
            '=' => {
                self.bump();
                TokenKind::Eq
            }
            '"' => {
                self.bump();
                TokenKind::Str(self.string(line, column)?)
            }
            c if is_word_char(c) => {
                let mut word = String::new();
                while let Some(&c) = self.chars.peek() {
                    if !is_word_char(c) {
                        break;
                    }
                    word.push(c);
                    self.bump();
                }
                TokenKind::Word(word)
            }
            other => {
                return Err(ParseError::new(
                    format!("unexpected character '{other}'"),
                    line,
                    column,
                ));
            }
        };

        Ok(Some(Token { kind, line, column }))
    }

    /// Reads the rest of a string literal after its opening quote.
    fn string(&mut self, line: usize, column: usize) -> Result<String, ParseError> {
        let mut out = String::new();
        loop {
            let (esc_line, esc_column) = self.position();
            match self.bump() {
                None => return Err(ParseError::new("unterminated string", line, column)),
                Some('"') => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('"') => out.push('"'),
                    Some('\\') => out.push('\\'),
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(other) => {
                        return Err(ParseError::new(
                            format!("invalid escape sequence '\\{other}'"),
                            esc_line,
                            esc_column,
                        ));
                    }
                    None => return Err(ParseError::new("unterminated string", line, column)),
                },
                Some(c) => out.push(c),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_words_and_punctuation() {
        assert_eq!(
            kinds("SET user:1 = \"a\";"),
            vec![
                TokenKind::Word("SET".into()),
                TokenKind::Word("user:1".into()),
                TokenKind::Eq,
                TokenKind::Str("a".into()),
                TokenKind::Semi,
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            kinds(r#""say \"hi\"\n\t\\""#),
            vec![TokenKind::Str("say \"hi\"\n\t\\".into())]
        );
    }

    #[test]
    fn test_positions_track_lines() {
        let tokens = Lexer::new("GET a;\n  DEL b").tokenize().unwrap();
        let del = &tokens[3];
        assert_eq!(del.kind, TokenKind::Word("DEL".into()));
        assert_eq!((del.line, del.column), (2, 3));
    }

    #[test]
    fn test_errors() {
        let err = Lexer::new("GET a\n  #").tokenize().unwrap_err();
        assert_eq!((err.line, err.column), (2, 3));

        let err = Lexer::new("SET a = \"open").tokenize().unwrap_err();
        assert_eq!(err.message, "unterminated string");
        assert_eq!((err.line, err.column), (1, 9));

        let err = Lexer::new(r#""\q""#).tokenize().unwrap_err();
        assert_eq!(err.message, "invalid escape sequence '\\q'");
        assert_eq!(err.column, 2);
    }
}
