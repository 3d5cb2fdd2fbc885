//! Tokenize `.proto` source text into a stream of tokens.
//!
//! The lexer walks the input character by character, skipping whitespace
//! and emitting `Token`s with their start `Position`. It recognizes
//! identifiers (mapped to keyword kinds where applicable), numeric and
//! quoted string literals, `//` and `/* */` comments, and the proto
//! punctuation set. A single `Eof` token is emitted once input is
//! consumed; further calls keep returning `Eof`.
//!
//! Positions are 1-based (line, column) with a 0-based byte offset.
//! Characters the scanner does not recognize become `Unsupported` tokens
//! rather than errors; the parser reports them with a precise position
//! when they appear where the grammar does not allow them.
//!
//! ## Examples
//! ```
//! # use proto_rs::core::scanner::{Lexer, TokenType};
//! let toks = Lexer::tokenize("enum E {}");
//! assert_eq!(toks[0].kind(), TokenType::Enum);
//! assert_eq!(toks.last().unwrap().kind(), TokenType::Eof);
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use crate::core::scanner::tokens::{Position, Token, TokenType};

/// Hand-written scanner over a source string.
///
/// The lexer is the concrete implementation behind the parser's
/// `TokenSource` seam; tests may substitute prerecorded token vectors.
#[derive(Debug)]
pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over the given source text.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Scan the entire input, returning all tokens including the
    /// trailing `Eof`.
    #[must_use]
    pub fn tokenize(source: &'a str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.scan();
            let done = token.kind() == TokenType::Eof;
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    /// Current position of the next unread character.
    fn position(&mut self) -> Position {
        let offset = self
            .chars
            .peek()
            .map_or(self.source.len(), |&(offset, _)| offset);
        Position::new(self.line, self.column, offset)
    }

    /// Consume one character, updating line and column counters.
    fn bump(&mut self) -> Option<char> {
        let (_, ch) = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Peek the next unread character.
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, ch)| ch)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            let _ = self.bump();
        }
    }

    /// Scan and return the next token.
    pub fn scan(&mut self) -> Token {
        self.skip_whitespace();
        let position = self.position();

        let Some(ch) = self.peek() else {
            return Token::new(TokenType::Eof, "", position);
        };

        if ch.is_ascii_alphabetic() || ch == '_' {
            return self.scan_identifier(position);
        }
        if ch.is_ascii_digit() {
            return self.scan_number(position);
        }
        if ch == '"' || ch == '\'' {
            return self.scan_string(position);
        }
        if ch == '/' {
            return self.scan_slash(position);
        }

        let _ = self.bump();
        let kind = match ch {
            '{' => TokenType::LeftBrace,
            '}' => TokenType::RightBrace,
            '[' => TokenType::LeftBracket,
            ']' => TokenType::RightBracket,
            '(' => TokenType::LeftParen,
            ')' => TokenType::RightParen,
            '<' => TokenType::LeftAngle,
            '>' => TokenType::RightAngle,
            '=' => TokenType::Equals,
            ';' => TokenType::Semicolon,
            ':' => TokenType::Colon,
            ',' => TokenType::Comma,
            '.' => TokenType::Dot,
            '-' => TokenType::Minus,
            _ => TokenType::Unsupported,
        };
        Token::new(kind, ch.to_string(), position)
    }

    fn scan_identifier(&mut self, position: Position) -> Token {
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                text.push(ch);
                let _ = self.bump();
            } else {
                break;
            }
        }
        let kind = TokenType::keyword(&text).unwrap_or(TokenType::Identifier);
        Token::new(kind, text, position)
    }

    fn scan_number(&mut self, position: Position) -> Token {
        let mut text = String::new();
        let mut prev = '\0';
        while let Some(ch) = self.peek() {
            let is_exponent_sign =
                (ch == '+' || ch == '-') && (prev == 'e' || prev == 'E');
            if ch.is_ascii_alphanumeric() || ch == '.' || is_exponent_sign {
                text.push(ch);
                prev = ch;
                let _ = self.bump();
            } else {
                break;
            }
        }
        Token::new(TokenType::Number, text, position)
    }

    /// Scan a quoted string, stripping the delimiters. Escape sequences
    /// are preserved verbatim; an unterminated string ends at end of
    /// input and is reported by the parser where it is consumed.
    fn scan_string(&mut self, position: Position) -> Token {
        let quote = self.bump().unwrap_or('"');
        let mut text = String::new();
        while let Some(ch) = self.bump() {
            if ch == quote {
                break;
            }
            text.push(ch);
            if ch == '\\' {
                if let Some(escaped) = self.bump() {
                    text.push(escaped);
                }
            }
        }
        Token::new(TokenType::StrLit, text, position)
    }

    fn scan_slash(&mut self, position: Position) -> Token {
        let _ = self.bump();
        match self.peek() {
            Some('/') => {
                let _ = self.bump();
                let mut text = String::new();
                while let Some(ch) = self.peek() {
                    if ch == '\n' {
                        break;
                    }
                    text.push(ch);
                    let _ = self.bump();
                }
                Token::new(TokenType::LineComment, text, position)
            }
            Some('*') => {
                let _ = self.bump();
                let mut text = String::new();
                let mut prev = '\0';
                while let Some(ch) = self.bump() {
                    if prev == '*' && ch == '/' {
                        text.pop();
                        break;
                    }
                    text.push(ch);
                    prev = ch;
                }
                Token::new(TokenType::BlockComment, text, position)
            }
            _ => Token::new(TokenType::Unsupported, "/", position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenType> {
        Lexer::tokenize(source)
            .iter()
            .map(Token::kind)
            .collect()
    }

    #[test]
    fn scans_enum_declaration() {
        assert_eq!(
            kinds("enum E { A = 1; }"),
            vec![
                TokenType::Enum,
                TokenType::Identifier,
                TokenType::LeftBrace,
                TokenType::Identifier,
                TokenType::Equals,
                TokenType::Number,
                TokenType::Semicolon,
                TokenType::RightBrace,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn tracks_positions() {
        let toks = Lexer::tokenize("a\n  bb");
        assert_eq!(toks[0].position(), &Position::new(1, 1, 0));
        assert_eq!(toks[1].position(), &Position::new(2, 3, 4));
        assert_eq!(toks[1].literal(), "bb");
    }

    #[test]
    fn strips_string_delimiters() {
        let toks = Lexer::tokenize(r#"import "a.proto";"#);
        assert_eq!(toks[1].kind(), TokenType::StrLit);
        assert_eq!(toks[1].literal(), "a.proto");
    }

    #[test]
    fn single_quoted_strings() {
        let toks = Lexer::tokenize("'x.proto'");
        assert_eq!(toks[0].kind(), TokenType::StrLit);
        assert_eq!(toks[0].literal(), "x.proto");
    }

    #[test]
    fn line_comment_keeps_text_after_slashes() {
        let toks = Lexer::tokenize("// a note\nx");
        assert_eq!(toks[0].kind(), TokenType::LineComment);
        assert_eq!(toks[0].literal(), " a note");
        assert_eq!(toks[1].literal(), "x");
        assert_eq!(toks[1].position().line, 2);
    }

    #[test]
    fn block_comment_inner_text() {
        let toks = Lexer::tokenize("/* one\ntwo */ x");
        assert_eq!(toks[0].kind(), TokenType::BlockComment);
        assert_eq!(toks[0].literal(), " one\ntwo ");
        assert_eq!(toks[1].literal(), "x");
    }

    #[test]
    fn minus_is_its_own_token() {
        assert_eq!(
            kinds("-1"),
            vec![TokenType::Minus, TokenType::Number, TokenType::Eof]
        );
    }

    #[test]
    fn keywords_and_identifiers() {
        let toks = Lexer::tokenize("message max foo_bar");
        assert_eq!(toks[0].kind(), TokenType::Message);
        assert_eq!(toks[1].kind(), TokenType::Max);
        assert_eq!(toks[2].kind(), TokenType::Identifier);
        assert_eq!(toks[2].literal(), "foo_bar");
    }

    #[test]
    fn qualified_name_splits_on_dots() {
        assert_eq!(
            kinds("foo.bar"),
            vec![
                TokenType::Identifier,
                TokenType::Dot,
                TokenType::Identifier,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn float_literals_stay_single_tokens() {
        let toks = Lexer::tokenize("1.5e+3 0x1F");
        assert_eq!(toks[0].kind(), TokenType::Number);
        assert_eq!(toks[0].literal(), "1.5e+3");
        assert_eq!(toks[1].literal(), "0x1F");
    }

    #[test]
    fn eof_repeats() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.scan().kind(), TokenType::Eof);
        assert_eq!(lexer.scan().kind(), TokenType::Eof);
    }

    #[test]
    fn unsupported_character() {
        let toks = Lexer::tokenize("@");
        assert_eq!(toks[0].kind(), TokenType::Unsupported);
        assert_eq!(toks[0].literal(), "@");
    }
}
