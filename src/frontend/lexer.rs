//! Lexer for Dragoman schemas
//!
//! Converts source text into a stream of located tokens.

use crate::frontend::token::{Keyword, Token, TokenKind};
use crate::utils::{Error, Location, Result};

/// The lexer state
pub struct Lexer {
    /// Source code as chars
    source: Vec<char>,
    /// Current position in source
    pos: usize,
    /// Start position of current token
    start: usize,
    /// File name for diagnostics
    file: String,
    /// Current one-based line
    line: usize,
    /// Position of the first char of the current line
    line_start: usize,
}

impl Lexer {
    /// Create a new lexer for the given source code
    pub fn new(source: &str, file: impl Into<String>) -> Self {
        Self {
            source: source.chars().collect(),
            pos: 0,
            start: 0,
            file: file.into(),
            line: 1,
            line_start: 0,
        }
    }

    /// Get the current character without advancing
    fn peek(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    /// Get the next character without advancing
    fn peek_next(&self) -> Option<char> {
        self.source.get(self.pos + 1).copied()
    }

    /// Advance to the next character
    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        self.pos += 1;
        c
    }

    /// Location of the current token start
    fn location(&self) -> Location {
        Location::new(self.file.clone(), self.line, self.start - self.line_start)
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.location())
    }

    /// Skip whitespace, newlines and `;;` comments
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' => {
                    self.advance();
                }
                '\n' => {
                    self.advance();
                    self.line += 1;
                    self.line_start = self.pos;
                }
                ';' if self.peek_next() == Some(';') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn is_ident_start(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '&' | '_' | ',' | '.' | '%' | '/' | '#' | '\'' | ':')
    }

    fn is_ident_continue(c: char) -> bool {
        c.is_ascii_alphanumeric()
            || matches!(c, '&' | '_' | ',' | '.' | '-' | '%' | '#' | '/' | '+' | '\'' | ':')
    }

    /// Read an identifier (first char already consumed)
    fn read_identifier(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if Self::is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let text: String = self.source[self.start..self.pos].iter().collect();
        self.make_token(TokenKind::Ident(text))
    }

    /// Read `(KEYWORD` (the `(` already consumed)
    fn read_keyword(&mut self) -> Result<Token> {
        while let Some(c) = self.peek() {
            if c.is_ascii_alphabetic() {
                self.advance();
            } else {
                break;
            }
        }

        let text: String = self.source[self.start + 1..self.pos].iter().collect();

        match Keyword::lookup(&text) {
            Some(kw) => Ok(self.make_token(TokenKind::Open(kw))),
            None => Err(Error::UnrecognizedInput {
                text: format!("({}", text),
                location: self.location(),
            }),
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();
        self.start = self.pos;

        let Some(c) = self.advance() else {
            return Ok(self.make_token(TokenKind::Eof));
        };

        match c {
            '(' => self.read_keyword(),
            ')' => Ok(self.make_token(TokenKind::Close)),
            '+' | '-' => Ok(self.read_identifier()),
            c if Self::is_ident_start(c) => Ok(self.read_identifier()),
            c => Err(Error::UnrecognizedInput {
                text: c.to_string(),
                location: self.location(),
            }),
        }
    }

    /// Tokenize the entire source
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ErrorKind;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source, "test.dgl")
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn ident(s: &str) -> TokenKind {
        TokenKind::Ident(s.to_string())
    }

    #[test]
    fn test_simple_tokens() {
        assert_eq!(
            kinds("(OBJECT Point (ENTRY x integer))"),
            vec![
                TokenKind::Open(Keyword::Object),
                ident("Point"),
                TokenKind::Open(Keyword::Entry),
                ident("x"),
                ident("integer"),
                TokenKind::Close,
                TokenKind::Close,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_ignore_case() {
        assert_eq!(
            kinds("(enumerate (Poly (poLYMorph (dict (markers (shared (case (require (array"),
            vec![
                TokenKind::Open(Keyword::Enum),
                TokenKind::Open(Keyword::Polymorph),
                TokenKind::Open(Keyword::Polymorph),
                TokenKind::Open(Keyword::Dict),
                TokenKind::Open(Keyword::Markers),
                TokenKind::Open(Keyword::Shared),
                TokenKind::Open(Keyword::Case),
                TokenKind::Open(Keyword::Require),
                TokenKind::Open(Keyword::Array),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifier_punctuation() {
        assert_eq!(
            kinds("a&b x.y/z #tag 'q' k:v - + -1 f0"),
            vec![
                ident("a&b"),
                ident("x.y/z"),
                ident("#tag"),
                ident("'q'"),
                ident("k:v"),
                ident("-"),
                ident("+"),
                ident("-1"),
                ident("f0"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_and_locations() {
        let tokens = Lexer::new(";; header\n  (ENTRY\n\tname ;; trailing\n)", "test.dgl")
            .tokenize()
            .unwrap();

        assert_eq!(tokens[0].kind, TokenKind::Open(Keyword::Entry));
        assert_eq!(tokens[0].location, Location::new("test.dgl", 2, 2));
        assert_eq!(tokens[1].location, Location::new("test.dgl", 3, 1));
        assert_eq!(tokens[2].kind, TokenKind::Close);
        assert_eq!(tokens[2].location, Location::new("test.dgl", 4, 0));
    }

    #[test]
    fn test_unknown_keyword() {
        let err = Lexer::new("\n (STRUCT Foo)", "test.dgl").tokenize().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lexical);
        assert_eq!(err.location(), Some(&Location::new("test.dgl", 2, 1)));
        assert!(err.to_string().contains("(STRUCT"));
    }

    #[test]
    fn test_identifiers_are_ascii() {
        let err = Lexer::new("(ENTRY café string)", "test.dgl").tokenize().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lexical);
        assert_eq!(err.location().map(|l| l.column), Some(10));

        assert!(Lexer::new("(ENTRY été string)", "test.dgl").tokenize().is_err());
    }

    #[test]
    fn test_unrecognized_char() {
        let err = Lexer::new("(OBJECT Foo ; )", "test.dgl").tokenize().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lexical);
        assert_eq!(err.location().map(|l| l.column), Some(12));
    }
}
