//! Feed tokens to the parser with single-token pushback.
//!
//! `TokenSource` is the seam to the lexer: anything that can yield the
//! next `Token` on demand. The parser never talks to a source directly;
//! it reads through `PushbackStream`, which adds the one capability the
//! grammar needs beyond straight consumption, deferring exactly one
//! already-read token so the next read returns it again.
//!
//! The pushback buffer holds at most one token. Pushing back while the
//! slot is occupied is a bug in a grammar routine, not a user input
//! error, and is enforced with a `debug_assert`; the grammar is written
//! so it never pushes back twice without an intervening read.
//!
//! Two filtered reads live here as well: `next_identifier`, which
//! accepts keywords in identifier position (proto keywords are not
//! reserved), and `next_integer`, which accepts an optionally signed
//! decimal integer literal.
//!
//! ## Examples
//! Push a token back and read it again.
//! ```
//! # use proto_rs::core::parser::stream::{PushbackStream, VecSource};
//! # use proto_rs::core::scanner::{Position, Token, TokenType};
//! let source = VecSource::new(vec![
//!     Token::new(TokenType::Identifier, "foo", Position::new(1, 1, 0)),
//! ]);
//! let mut stream = PushbackStream::new(source);
//! let tok = stream.next();
//! assert_eq!(tok.literal(), "foo");
//! stream.push_back(tok);
//! assert_eq!(stream.next().literal(), "foo");
//! assert_eq!(stream.next().kind(), TokenType::Eof);
//! ```

use crate::core::parser::error::SyntaxError;
use crate::core::scanner::{Lexer, Position, Token, TokenType};

/// Yield tokens on demand. The external-lexer seam.
pub trait TokenSource {
    /// Produce the next token. Must return `Eof` tokens forever once the
    /// input is exhausted.
    fn scan(&mut self) -> Token;
}

impl TokenSource for Lexer<'_> {
    fn scan(&mut self) -> Token {
        Lexer::scan(self)
    }
}

/// A token source backed by a prerecorded vector, for tests and for
/// callers that tokenize up front.
///
/// An `Eof` token is synthesized past the end of the vector if the
/// vector does not carry its own.
#[derive(Debug)]
pub struct VecSource {
    tokens: Vec<Token>,
    index: usize,
}

impl VecSource {
    /// Create a source over the given tokens.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, index: 0 }
    }
}

impl TokenSource for VecSource {
    fn scan(&mut self) -> Token {
        if let Some(token) = self.tokens.get(self.index) {
            self.index += 1;
            token.clone()
        } else {
            let position = self
                .tokens
                .last()
                .map(|t| t.position().clone())
                .unwrap_or_default();
            Token::new(TokenType::Eof, "", position)
        }
    }
}

/// Wrap a `TokenSource` with a single-slot pushback buffer.
#[derive(Debug)]
pub struct PushbackStream<S: TokenSource> {
    source: S,
    deferred: Option<Token>,
}

impl<S: TokenSource> PushbackStream<S> {
    /// Create a stream over the given source.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            deferred: None,
        }
    }

    /// Consume and return the next token, honoring the pushback slot.
    ///
    /// Not an `Iterator`: the stream never ends, it yields `Eof` tokens
    /// forever once the input is exhausted.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Token {
        if let Some(token) = self.deferred.take() {
            return token;
        }
        self.source.scan()
    }

    /// Defer a previously read token so the next `next()` returns it.
    ///
    /// The slot holds at most one token; occupying it twice indicates a
    /// grammar-routine bug.
    pub fn push_back(&mut self, token: Token) {
        debug_assert!(
            self.deferred.is_none(),
            "pushback slot already occupied"
        );
        self.deferred = Some(token);
    }

    /// Read the next token, accepting keywords in identifier position.
    ///
    /// A keyword token comes back with kind `Identifier` and its literal
    /// intact; any other token is returned unchanged, and the caller
    /// decides whether it fits.
    pub fn next_identifier(&mut self) -> Token {
        let token = self.next();
        if token.kind().is_keyword() {
            let position = token.position().clone();
            let literal = token.into_literal();
            return Token::new(TokenType::Identifier, literal, position);
        }
        token
    }

    /// Read an optionally signed decimal integer literal.
    ///
    /// # Errors
    /// Returns a `SyntaxError` with a generic "decimal integer"
    /// description when the next token is not numeric; callers refine
    /// the description with `SyntaxError::with_expected`.
    pub fn next_integer(&mut self) -> Result<(Position, i32), SyntaxError> {
        let token = self.next();
        match token.kind() {
            TokenType::Minus => {
                let number = self.next();
                if number.kind() != TokenType::Number {
                    return Err(SyntaxError::new(
                        number.position().clone(),
                        number.describe(),
                        "decimal integer",
                    ));
                }
                let value = parse_decimal(&number)?;
                Ok((token.position().clone(), -value))
            }
            TokenType::Number => {
                let value = parse_decimal(&token)?;
                Ok((token.position().clone(), value))
            }
            _ => Err(SyntaxError::new(
                token.position().clone(),
                token.describe(),
                "decimal integer",
            )),
        }
    }
}

fn parse_decimal(token: &Token) -> Result<i32, SyntaxError> {
    token.literal().parse::<i32>().map_err(|_| {
        SyntaxError::new(
            token.position().clone(),
            token.literal(),
            "decimal integer",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(tokens: Vec<Token>) -> PushbackStream<VecSource> {
        PushbackStream::new(VecSource::new(tokens))
    }

    fn tok(kind: TokenType, literal: &str) -> Token {
        Token::new(kind, literal, Position::new(1, 1, 0))
    }

    #[test]
    fn vec_source_synthesizes_eof() {
        let mut s = stream(vec![tok(TokenType::Semicolon, ";")]);
        assert_eq!(s.next().kind(), TokenType::Semicolon);
        assert_eq!(s.next().kind(), TokenType::Eof);
        assert_eq!(s.next().kind(), TokenType::Eof);
    }

    #[test]
    fn pushback_returns_token_first() {
        let mut s = stream(vec![
            tok(TokenType::Identifier, "a"),
            tok(TokenType::Identifier, "b"),
        ]);
        let a = s.next();
        s.push_back(a);
        assert_eq!(s.next().literal(), "a");
        assert_eq!(s.next().literal(), "b");
    }

    #[test]
    #[should_panic(expected = "pushback slot already occupied")]
    #[cfg(debug_assertions)]
    fn double_pushback_is_a_bug() {
        let mut s = stream(vec![
            tok(TokenType::Identifier, "a"),
            tok(TokenType::Identifier, "b"),
        ]);
        let a = s.next();
        let b = s.next();
        s.push_back(a);
        s.push_back(b);
    }

    #[test]
    fn keywords_pass_the_identifier_filter() {
        let mut s = stream(vec![tok(TokenType::Message, "message")]);
        let ident = s.next_identifier();
        assert_eq!(ident.kind(), TokenType::Identifier);
        assert_eq!(ident.literal(), "message");
    }

    #[test]
    fn non_identifiers_are_returned_unchanged() {
        let mut s = stream(vec![tok(TokenType::Semicolon, ";")]);
        assert_eq!(s.next_identifier().kind(), TokenType::Semicolon);
    }

    #[test]
    fn next_integer_parses_signed_values() {
        let mut s = stream(vec![
            tok(TokenType::Number, "42"),
            tok(TokenType::Minus, "-"),
            tok(TokenType::Number, "1"),
        ]);
        assert_eq!(s.next_integer().unwrap().1, 42);
        assert_eq!(s.next_integer().unwrap().1, -1);
    }

    #[test]
    fn next_integer_rejects_non_numbers() {
        let mut s = stream(vec![tok(TokenType::Equals, "=")]);
        let err = s.next_integer().unwrap_err();
        assert_eq!(err.found, "=");
        assert_eq!(err.expected, "decimal integer");
    }

    #[test]
    fn next_integer_rejects_floats() {
        let mut s = stream(vec![tok(TokenType::Number, "1.5")]);
        assert!(s.next_integer().is_err());
    }
}
