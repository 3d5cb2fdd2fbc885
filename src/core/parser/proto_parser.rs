//! The recursive-descent parser driver.
//!
//! `ProtoParser` owns the token stream and the tree under construction.
//! The grammar itself lives in [`super::components`], one module per
//! declaration family; this module carries the entry points and the
//! token-level helpers the grammar modules share.
//!
//! Parsing is fail-fast: the first unexpected token aborts with a
//! [`SyntaxError`] carrying the offending position, the found text, and
//! what was expected there.
//!
//! ## Examples
//! ```
//! use proto_rs::core::parser::parse_source;
//!
//! let ast = parse_source(
//!     r#"syntax = "proto3";
//!        message Greeting { string text = 1; }"#,
//! )
//! .unwrap();
//! assert_eq!(ast.root().elements.len(), 2);
//! ```

use tracing::debug;

use super::ast::Ast;
use super::components::ContainerKind;
use super::error::SyntaxError;
use super::stream::{PushbackStream, TokenSource};
use crate::core::scanner::{Lexer, Token, TokenType};

/// Recursive-descent parser for a single `.proto` input.
pub struct ProtoParser<S: TokenSource> {
    pub(crate) stream: PushbackStream<S>,
    pub(crate) ast: Ast,
}

impl<'a> ProtoParser<Lexer<'a>> {
    /// Create a parser reading directly from source text.
    #[must_use]
    pub fn from_source(source: &'a str) -> Self {
        Self::new(Lexer::new(source))
    }
}

impl<S: TokenSource> ProtoParser<S> {
    /// Create a parser over any token source.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            stream: PushbackStream::new(source),
            ast: Ast::new(),
        }
    }

    /// Record the source filename on the tree root.
    #[must_use]
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.ast.root_mut().filename = Some(filename.into());
        self
    }

    /// Consume all input and return the finished tree.
    ///
    /// # Errors
    /// Returns the first [`SyntaxError`] encountered; the partial tree
    /// is discarded.
    pub fn parse(mut self) -> Result<Ast, SyntaxError> {
        debug!("parsing proto input");
        let root = self.ast.root_id();
        self.parse_container_elements(root, ContainerKind::Proto)?;
        debug!(nodes = self.ast.len(), "parse complete");
        Ok(self.ast)
    }

    /// Read the next token and require the given kind.
    pub(crate) fn expect(
        &mut self,
        kind: TokenType,
        expected: &str,
    ) -> Result<Token, SyntaxError> {
        let token = self.stream.next();
        if token.kind() == kind {
            Ok(token)
        } else {
            Err(self.unexpected(&token, expected))
        }
    }

    /// Read the next token and require an identifier, accepting
    /// keywords in identifier position.
    pub(crate) fn expect_identifier(
        &mut self,
        expected: &str,
    ) -> Result<Token, SyntaxError> {
        let token = self.stream.next_identifier();
        if token.kind() == TokenType::Identifier {
            Ok(token)
        } else {
            Err(self.unexpected(&token, expected))
        }
    }

    /// Build a syntax error for an unexpected token.
    pub(crate) fn unexpected(
        &self,
        token: &Token,
        expected: impl Into<String>,
    ) -> SyntaxError {
        SyntaxError::new(token.position().clone(), token.describe(), expected)
    }
}

/// Parse source text into a tree in one call.
///
/// # Errors
/// Returns the first [`SyntaxError`] in the input.
///
/// ## Examples
/// ```
/// use proto_rs::core::parser::parse_source;
///
/// assert!(parse_source("syntax = \"proto3\";").is_ok());
/// assert!(parse_source("syntax proto3").is_err());
/// ```
pub fn parse_source(source: &str) -> Result<Ast, SyntaxError> {
    ProtoParser::from_source(source).parse()
}
