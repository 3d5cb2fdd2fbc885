//! Lexical token definitions for the `.proto` scanner.
//!
//! This module declares token kinds, source positions, and the `Token`
//! container emitted by the lexer.
//!
//! # Model
//! - `TokenType` enumerates the discrete kinds recognized by the scanner,
//!   including every proto keyword. Kinds carry no payload; the associated
//!   source text always travels in `Token::literal`.
//! - `Position` records `(line, column, offset)` with 1-based line and
//!   column and a 0-based byte offset.
//! - `Token` pairs a `TokenType` with its literal text and start position.
//!
//! # Text payloads
//! Literal retention is normalized by the lexer: string literals carry
//! their content without the surrounding quotes, and comment tokens carry
//! their text without the `//` or `/* */` markers. Punctuation tokens
//! carry their source spelling.
//!
//! Keywords are not reserved words in proto: any keyword kind may appear
//! where an identifier is expected, and the parser's identifier filter
//! accepts it with its literal intact.

use std::fmt;

/// Lexical token kinds recognized by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    // Keywords
    /// The `syntax` keyword.
    Syntax,
    /// The `package` keyword.
    Package,
    /// The `import` keyword.
    Import,
    /// The `option` keyword.
    Option,
    /// The `message` keyword.
    Message,
    /// The `enum` keyword.
    Enum,
    /// The `service` keyword.
    Service,
    /// The `rpc` keyword.
    Rpc,
    /// The `oneof` keyword.
    Oneof,
    /// The `map` keyword.
    Map,
    /// The `reserved` keyword.
    Reserved,
    /// The `extensions` keyword.
    Extensions,
    /// The `extend` keyword.
    Extend,
    /// The `group` keyword.
    Group,
    /// The `returns` keyword.
    Returns,
    /// The `stream` keyword.
    Stream,
    /// The `repeated` field label.
    Repeated,
    /// The `optional` field label.
    Optional,
    /// The `required` field label.
    Required,
    /// The `public` import modifier.
    Public,
    /// The `weak` import modifier.
    Weak,
    /// The `to` keyword in ranges.
    To,
    /// The `max` keyword in ranges.
    Max,

    // Literals
    /// An identifier.
    Identifier,
    /// A numeric literal (integer or floating point source text).
    Number,
    /// A quoted string literal, delimiters stripped.
    StrLit,

    // Comments
    /// A `//` comment, text after the slashes.
    LineComment,
    /// A `/* */` comment, text between the markers.
    BlockComment,

    // Punctuation
    /// The left brace `{`.
    LeftBrace,
    /// The right brace `}`.
    RightBrace,
    /// The left bracket `[`.
    LeftBracket,
    /// The right bracket `]`.
    RightBracket,
    /// The left parenthesis `(`.
    LeftParen,
    /// The right parenthesis `)`.
    RightParen,
    /// The left angle bracket `<`.
    LeftAngle,
    /// The right angle bracket `>`.
    RightAngle,
    /// The equals sign `=`.
    Equals,
    /// The semicolon `;`.
    Semicolon,
    /// The colon `:`.
    Colon,
    /// The comma `,`.
    Comma,
    /// The dot `.`.
    Dot,
    /// The minus sign `-`.
    Minus,

    /// A character the scanner does not recognize.
    Unsupported,

    /// End-of-input marker emitted after the final token.
    Eof,
}

impl TokenType {
    /// Whether this kind is a proto keyword.
    ///
    /// Keywords are accepted in identifier position throughout the
    /// grammar (a field may be named `option`, an enum value `max`).
    #[must_use]
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenType::Syntax
                | TokenType::Package
                | TokenType::Import
                | TokenType::Option
                | TokenType::Message
                | TokenType::Enum
                | TokenType::Service
                | TokenType::Rpc
                | TokenType::Oneof
                | TokenType::Map
                | TokenType::Reserved
                | TokenType::Extensions
                | TokenType::Extend
                | TokenType::Group
                | TokenType::Returns
                | TokenType::Stream
                | TokenType::Repeated
                | TokenType::Optional
                | TokenType::Required
                | TokenType::Public
                | TokenType::Weak
                | TokenType::To
                | TokenType::Max
        )
    }

    /// Whether this kind is a comment token.
    #[must_use]
    pub fn is_comment(self) -> bool {
        matches!(self, TokenType::LineComment | TokenType::BlockComment)
    }

    /// Map identifier text to its keyword kind, if any.
    #[must_use]
    pub fn keyword(text: &str) -> Option<Self> {
        let kind = match text {
            "syntax" => TokenType::Syntax,
            "package" => TokenType::Package,
            "import" => TokenType::Import,
            "option" => TokenType::Option,
            "message" => TokenType::Message,
            "enum" => TokenType::Enum,
            "service" => TokenType::Service,
            "rpc" => TokenType::Rpc,
            "oneof" => TokenType::Oneof,
            "map" => TokenType::Map,
            "reserved" => TokenType::Reserved,
            "extensions" => TokenType::Extensions,
            "extend" => TokenType::Extend,
            "group" => TokenType::Group,
            "returns" => TokenType::Returns,
            "stream" => TokenType::Stream,
            "repeated" => TokenType::Repeated,
            "optional" => TokenType::Optional,
            "required" => TokenType::Required,
            "public" => TokenType::Public,
            "weak" => TokenType::Weak,
            "to" => TokenType::To,
            "max" => TokenType::Max,
            _ => return None,
        };
        Some(kind)
    }
}

/// A position in the source text.
///
/// Lines and columns are 1-based; `offset` is the 0-based byte offset of
/// the position in the input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Position {
    /// Line number, 1-based.
    pub line: u32,
    /// Column number, 1-based.
    pub column: u32,
    /// Byte offset into the input, 0-based.
    pub offset: usize,
}

impl Position {
    /// Create a new position with explicit line, column, and offset.
    #[must_use]
    pub fn new(line: u32, column: u32, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A lexical token with its kind, literal text, and start position.
///
/// ## Examples
/// ```
/// # use proto_rs::core::scanner::{Position, Token, TokenType};
/// let tok = Token::new(TokenType::Identifier, "User", Position::new(1, 6, 5));
/// assert_eq!(tok.kind(), TokenType::Identifier);
/// assert_eq!(tok.literal(), "User");
/// assert_eq!(tok.position().line, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenType,
    literal: String,
    position: Position,
}

impl Token {
    /// Construct a token from a kind, literal text, and start position.
    #[must_use]
    pub fn new(
        kind: TokenType,
        literal: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            kind,
            literal: literal.into(),
            position,
        }
    }

    /// Returns the token kind.
    #[must_use]
    pub fn kind(&self) -> TokenType {
        self.kind
    }

    /// Returns the literal source text of the token.
    #[must_use]
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Returns the start position of the token.
    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Consume the token, returning its literal text.
    #[must_use]
    pub fn into_literal(self) -> String {
        self.literal
    }

    /// Literal text suitable for error messages; EOF renders as `<eof>`.
    #[must_use]
    pub fn describe(&self) -> &str {
        if self.kind == TokenType::Eof {
            "<eof>"
        } else {
            &self.literal
        }
    }
}
