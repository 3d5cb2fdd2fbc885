//! Lexical analysis for `.proto` source text.
//!
//! The scanner turns raw text into `Token`s carrying a kind, literal
//! text, and start `Position`. It is deliberately separate from the
//! parser: the parser consumes tokens through the `TokenSource` seam in
//! `core::parser::stream`, so any token producer (including prerecorded
//! vectors in tests) can stand in for the `Lexer`.

pub mod lexer;
pub mod tokens;

pub use lexer::Lexer;
pub use tokens::{Position, Token, TokenType};
