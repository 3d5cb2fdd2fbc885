//! Syntax error reporting for the parser.
//!
//! There is exactly one error kind: `SyntaxError`, carrying the position
//! of the first offending token, the literal that was found, a short
//! description of what the grammar expected, and optionally the kind of
//! node being parsed when the mismatch occurred. Every grammar routine
//! returns the first error it encounters; there is no recovery tier and
//! no warning tier, and a failed parse exposes no partial tree.
//!
//! ## Examples
//! ```
//! # use proto_rs::core::parser::SyntaxError;
//! # use proto_rs::core::scanner::Position;
//! let err = SyntaxError::new(Position::new(2, 5, 12), "==", "enum field integer")
//!     .in_context("EnumValue");
//! assert_eq!(err.to_string(), r#"2:5: found "==", expected enum field integer (in EnumValue)"#);
//! ```

use std::error::Error;
use std::fmt;

use crate::core::scanner::Position;

/// The single error kind produced by every grammar routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Position of the offending token.
    pub position: Position,
    /// Literal text of the offending token (`<eof>` at end of input).
    pub found: String,
    /// Description of the construct the grammar expected.
    pub expected: String,
    /// Kind of the enclosing node being parsed, when known.
    pub context: Option<&'static str>,
}

impl SyntaxError {
    /// Create a syntax error from a position, the found literal, and an
    /// expected-construct description.
    #[must_use]
    pub fn new(
        position: Position,
        found: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self {
            position,
            found: found.into(),
            expected: expected.into(),
            context: None,
        }
    }

    /// Replace the expected-construct description.
    ///
    /// Used when a shared extraction helper (integer, identifier) fails
    /// and the calling grammar routine knows the more precise phrase.
    #[must_use]
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = expected.into();
        self
    }

    /// Attach the kind of the node that was being parsed.
    #[must_use]
    pub fn in_context(mut self, context: &'static str) -> Self {
        self.context = Some(context);
        self
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: found {:?}, expected {}",
            self.position, self.found, self.expected
        )?;
        if let Some(context) = self.context {
            write!(f, " (in {context})")?;
        }
        Ok(())
    }
}

impl Error for SyntaxError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_without_context() {
        let err = SyntaxError::new(Position::new(1, 8, 7), "}", "enum opening {");
        assert_eq!(err.to_string(), "1:8: found \"}\", expected enum opening {");
    }

    #[test]
    fn with_expected_overrides_description() {
        let err = SyntaxError::new(Position::new(1, 1, 0), "x", "decimal integer")
            .with_expected("enum field integer");
        assert_eq!(err.expected, "enum field integer");
    }

    #[test]
    fn context_is_appended() {
        let err = SyntaxError::new(Position::new(3, 2, 20), ";", "rpc name")
            .in_context("RpcDecl");
        assert!(err.to_string().ends_with("(in RpcDecl)"));
    }
}
