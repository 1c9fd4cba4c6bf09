//! Token definitions for the formula lexer

use std::fmt;

/// Kinds of token recognized by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// End of input
    Eof,
    /// Identifier: `[A-Za-z_][A-Za-z0-9_]*`
    Ident,
    /// Number literal: digits with an optional fraction
    Number,
    Plus,
    Minus,
    Asterisk,
    LParen,
    RParen,
}

impl TokenKind {
    /// Whether this kind is a binary operator
    pub fn is_operator(self) -> bool {
        matches!(self, TokenKind::Plus | TokenKind::Minus | TokenKind::Asterisk)
    }

    /// Operator precedence; `+` and `-` bind weaker than `*`.
    ///
    /// Returns `None` for non-operator kinds.
    pub fn precedence(self) -> Option<u8> {
        match self {
            TokenKind::Plus | TokenKind::Minus => Some(1),
            TokenKind::Asterisk => Some(2),
            _ => None,
        }
    }
}

/// A token: a kind plus the exact source text it was scanned from.
///
/// Tokens are immutable once produced. The text of the end-of-input token is
/// empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new<S: Into<String>>(kind: TokenKind, text: S) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Build a number token from an already-resolved value.
    ///
    /// Used by the converter when an identifier resolves to a number; `f64`
    /// formatting round-trips exactly, so no precision is lost.
    pub fn number(value: f64) -> Self {
        Self::new(TokenKind::Number, value.to_string())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "<eof>"),
            _ => write!(f, "{}", self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_table() {
        assert_eq!(TokenKind::Plus.precedence(), Some(1));
        assert_eq!(TokenKind::Minus.precedence(), Some(1));
        assert_eq!(TokenKind::Asterisk.precedence(), Some(2));
        assert_eq!(TokenKind::LParen.precedence(), None);
        assert_eq!(TokenKind::Ident.precedence(), None);
    }

    #[test]
    fn test_number_round_trip() {
        let token = Token::number(0.1 + 0.2);
        let parsed: f64 = token.text.parse().unwrap();
        assert_eq!(parsed, 0.1 + 0.2);
    }
}
