//! Formula lexer
//!
//! Scans raw formula text into a finite sequence of [`Token`]s. The lexer
//! owns no shared state: it is a source slice plus a byte position, so a
//! fresh one can be built per call and used from any thread.
//!
//! Recognized input: ASCII spaces (skipped), identifiers
//! (`[A-Za-z_][A-Za-z0-9_]*`), number literals (digits with an optional
//! `.digits` fraction; no exponent, no sign — `-` is always the binary
//! operator), and the punctuation `+ - * ( )`. Anything else is a lex error
//! carrying the character and its byte offset.

use crate::error::{EngineError, EngineResult};
use crate::token::{Token, TokenKind};

/// Streaming lexer over one formula string.
#[derive(Debug)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            finished: false,
        }
    }

    /// Scan the next token.
    ///
    /// Yields exactly one [`TokenKind::Eof`] token at end of input; calling
    /// again after that keeps returning `Eof`.
    pub fn next_token(&mut self) -> EngineResult<Token> {
        self.skip_spaces();

        let Some(&byte) = self.input.as_bytes().get(self.pos) else {
            self.finished = true;
            return Ok(Token::new(TokenKind::Eof, ""));
        };

        match byte {
            b'+' => Ok(self.single(TokenKind::Plus)),
            b'-' => Ok(self.single(TokenKind::Minus)),
            b'*' => Ok(self.single(TokenKind::Asterisk)),
            b'(' => Ok(self.single(TokenKind::LParen)),
            b')' => Ok(self.single(TokenKind::RParen)),
            b'0'..=b'9' => self.scan_number(),
            b'A'..=b'Z' | b'a'..=b'z' | b'_' => Ok(self.scan_identifier()),
            _ => Err(EngineError::Lex {
                ch: self.current_char(),
                offset: self.pos,
            }),
        }
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let text = &self.input[self.pos..self.pos + 1];
        self.pos += 1;
        Token::new(kind, text)
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.pos;
        while matches!(
            self.input.as_bytes().get(self.pos),
            Some(b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_')
        ) {
            self.pos += 1;
        }
        Token::new(TokenKind::Ident, &self.input[start..self.pos])
    }

    fn scan_number(&mut self) -> EngineResult<Token> {
        let start = self.pos;
        self.skip_digits();

        if self.input.as_bytes().get(self.pos) == Some(&b'.') {
            // A dot must be followed by at least one fraction digit
            if !matches!(self.input.as_bytes().get(self.pos + 1), Some(b'0'..=b'9')) {
                return Err(EngineError::Syntax(format!(
                    "Malformed number at byte {}",
                    self.pos
                )));
            }
            self.pos += 1;
            self.skip_digits();
        }

        Ok(Token::new(TokenKind::Number, &self.input[start..self.pos]))
    }

    fn skip_digits(&mut self) {
        while matches!(self.input.as_bytes().get(self.pos), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
    }

    fn skip_spaces(&mut self) {
        while self.input.as_bytes().get(self.pos) == Some(&b' ') {
            self.pos += 1;
        }
    }

    fn current_char(&self) -> char {
        self.input[self.pos..]
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

impl Iterator for Lexer<'_> {
    type Item = EngineResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_token() {
            Ok(token) => Some(Ok(token)),
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

/// Tokenize a formula string to completion.
///
/// The returned list is terminated implicitly by end of input; it never
/// contains the `Eof` token itself.
pub fn tokenize(input: &str) -> EngineResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut lexer = Lexer::new(input);
    loop {
        let token = lexer.next_token()?;
        if token.kind == TokenKind::Eof {
            return Ok(tokens);
        }
        tokens.push(token);
    }
}
