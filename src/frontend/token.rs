//! Token definitions for Dragoman schemas

use std::fmt;

use crate::utils::Location;

/// A token produced by the lexer
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: Location,
}

impl Token {
    pub fn new(kind: TokenKind, location: Location) -> Self {
        Self { kind, location }
    }
}

/// Token kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `(KEYWORD`, which opens a construct
    Open(Keyword),
    /// Bare `)`
    Close,
    /// Names, tags and type references
    Ident(String),
    /// End of file
    Eof,
}

/// Construct keywords. Each one is lexed together with its leading `(`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Array,
    Case,
    Dict,
    Entry,
    Enum,
    Markers,
    Object,
    Polymorph,
    Require,
    Shared,
}

impl Keyword {
    /// Look up a keyword, ignoring case
    pub fn lookup(s: &str) -> Option<Keyword> {
        match s.to_ascii_uppercase().as_str() {
            "ARRAY" => Some(Keyword::Array),
            "CASE" => Some(Keyword::Case),
            "DICT" => Some(Keyword::Dict),
            "ENTRY" => Some(Keyword::Entry),
            "ENUM" | "ENUMERATE" => Some(Keyword::Enum),
            "MARKERS" => Some(Keyword::Markers),
            "OBJECT" => Some(Keyword::Object),
            "POLY" | "POLYMORPH" => Some(Keyword::Polymorph),
            "REQUIRE" => Some(Keyword::Require),
            "SHARED" => Some(Keyword::Shared),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Array => "ARRAY",
            Keyword::Case => "CASE",
            Keyword::Dict => "DICT",
            Keyword::Entry => "ENTRY",
            Keyword::Enum => "ENUM",
            Keyword::Markers => "MARKERS",
            Keyword::Object => "OBJECT",
            Keyword::Polymorph => "POLYMORPH",
            Keyword::Require => "REQUIRE",
            Keyword::Shared => "SHARED",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Open(kw) => write!(f, "({}", kw.as_str()),
            TokenKind::Close => write!(f, ")"),
            TokenKind::Ident(name) => write!(f, "\"{}\"", name),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}
