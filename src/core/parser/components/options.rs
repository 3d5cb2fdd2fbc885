//! Option statements, option names, and option constants.
//!
//! Grammar shared by three surfaces: standalone `option name = value;`
//! statements, bracket-embedded modifier lists on fields (`[a = 1,
//! b = 2]`), and the single embedded option an enum value may carry.
//! Constants cover scalars, bracketed lists, and braced aggregates in
//! text-format style.

use crate::core::parser::ast::{
    Comment, Constant, Documented, LiteralValue, NamedConstant, Node, NodeId,
    ProtoOption,
};
use crate::core::parser::error::SyntaxError;
use crate::core::parser::proto_parser::ProtoParser;
use crate::core::parser::stream::TokenSource;
use crate::core::scanner::{Position, TokenType};

impl<S: TokenSource> ProtoParser<S> {
    /// Parse `option name = constant`, keyword already consumed.
    pub(crate) fn parse_option_statement(
        &mut self,
        container: NodeId,
        position: Position,
        doc: Option<Comment>,
    ) -> Result<(), SyntaxError> {
        let mut option = self.parse_option_body(position, false)?;
        if let Some(doc) = doc {
            option.set_doc(doc);
        }
        let id = self.ast.alloc(Node::Option(option));
        self.ast.append(container, id);
        Ok(())
    }

    /// Parse `name = constant` into an option value.
    pub(crate) fn parse_option_body(
        &mut self,
        position: Position,
        is_embedded: bool,
    ) -> Result<ProtoOption, SyntaxError> {
        let mut option = ProtoOption::new(position);
        option.is_embedded = is_embedded;
        option.name = self.parse_option_name()?;
        self.expect(TokenType::Equals, "= after option name")
            .map_err(|e| e.in_context("Option"))?;
        option.value = self.parse_constant()?;
        Ok(option)
    }

    /// Parse an option name: a dotted identifier whose first segment
    /// may be a parenthesized extension path, e.g. `(my.ext).field`.
    fn parse_option_name(&mut self) -> Result<String, SyntaxError> {
        let token = self.stream.next();
        if token.kind() == TokenType::LeftParen {
            let (_, path) = self.read_qualified_identifier("extension name")?;
            self.expect(TokenType::RightParen, ") after extension name")?;
            let mut name = format!("({path})");
            let next = self.stream.next();
            if next.kind() == TokenType::Dot {
                let (_, rest) =
                    self.read_qualified_identifier("option field path")?;
                name.push('.');
                name.push_str(&rest);
            } else {
                self.stream.push_back(next);
            }
            return Ok(name);
        }
        self.stream.push_back(token);
        let (_, name) = self.read_qualified_identifier("option name")?;
        Ok(name)
    }

    /// Parse an option constant: scalar, `[list]`, or `{aggregate}`.
    pub(crate) fn parse_constant(&mut self) -> Result<Constant, SyntaxError> {
        let token = self.stream.next();
        match token.kind() {
            TokenType::StrLit => Ok(Constant::Scalar(LiteralValue {
                source: token.literal().to_string(),
                is_string: true,
                position: token.position().clone(),
            })),
            TokenType::Number => Ok(Constant::Scalar(LiteralValue {
                source: token.literal().to_string(),
                is_string: false,
                position: token.position().clone(),
            })),
            TokenType::Minus => {
                let number =
                    self.expect(TokenType::Number, "number after -")?;
                Ok(Constant::Scalar(LiteralValue {
                    source: format!("-{}", number.literal()),
                    is_string: false,
                    position: token.position().clone(),
                }))
            }
            TokenType::LeftBracket => self.parse_list_constant(),
            TokenType::LeftBrace => self.parse_aggregate_constant(),
            t if t == TokenType::Identifier || t.is_keyword() => {
                let position = token.position().clone();
                let source =
                    self.read_dotted_continuation(token.into_literal())?;
                Ok(Constant::Scalar(LiteralValue {
                    source,
                    is_string: false,
                    position,
                }))
            }
            _ => Err(self.unexpected(&token, "option constant")),
        }
    }

    /// Parse `constant, constant, ...]`, opening bracket consumed.
    fn parse_list_constant(&mut self) -> Result<Constant, SyntaxError> {
        let mut items = Vec::new();
        let first = self.stream.next();
        if first.kind() == TokenType::RightBracket {
            return Ok(Constant::List(items));
        }
        self.stream.push_back(first);
        loop {
            items.push(self.parse_constant()?);
            let token = self.stream.next();
            match token.kind() {
                TokenType::Comma => {}
                TokenType::RightBracket => return Ok(Constant::List(items)),
                _ => {
                    return Err(self.unexpected(&token, ", or ] in list"));
                }
            }
        }
    }

    /// Parse `name: constant ...}`, opening brace consumed. Separators
    /// between entries are optional, text-format style, and the colon
    /// may be omitted before a nested aggregate.
    fn parse_aggregate_constant(&mut self) -> Result<Constant, SyntaxError> {
        let mut entries = Vec::new();
        loop {
            let token = self.stream.next();
            match token.kind() {
                TokenType::RightBrace => {
                    return Ok(Constant::Aggregate(entries));
                }
                TokenType::Comma | TokenType::Semicolon => {}
                TokenType::Eof => {
                    return Err(self
                        .unexpected(&token, "closing }")
                        .in_context("Option"));
                }
                _ => {
                    self.stream.push_back(token);
                    let name = self
                        .expect_identifier("aggregate entry name")
                        .map_err(|e| e.in_context("Option"))?;
                    let next = self.stream.next();
                    if next.kind() != TokenType::Colon {
                        self.stream.push_back(next);
                    }
                    let value = self.parse_constant()?;
                    entries.push(NamedConstant {
                        name: name.into_literal(),
                        value,
                    });
                }
            }
        }
    }

    /// Parse a bracketed option list `name = c, ...]`, opening bracket
    /// consumed.
    pub(crate) fn parse_embedded_options(
        &mut self,
    ) -> Result<Vec<ProtoOption>, SyntaxError> {
        let mut options = Vec::new();
        loop {
            let position = {
                let token = self.stream.next();
                let position = token.position().clone();
                self.stream.push_back(token);
                position
            };
            options.push(self.parse_option_body(position, true)?);
            let token = self.stream.next();
            match token.kind() {
                TokenType::Comma => {}
                TokenType::RightBracket => return Ok(options),
                _ => {
                    return Err(
                        self.unexpected(&token, ", or ] after option")
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse_source;

    fn first_option(source: &str) -> ProtoOption {
        let ast = parse_source(source).unwrap();
        let id = ast.children(ast.root_id())[0];
        match ast.node(id) {
            Node::Option(o) => o.clone(),
            other => panic!("expected option, got {other:?}"),
        }
    }

    #[test]
    fn string_constant() {
        let o = first_option("option java_package = \"com.example\";");
        assert_eq!(o.name, "java_package");
        assert_eq!(o.value.to_string(), "\"com.example\"");
        assert!(!o.is_embedded);
    }

    #[test]
    fn extension_name_with_field_path() {
        let o = first_option("option (my.ext).deadline = 30.0;");
        assert_eq!(o.name, "(my.ext).deadline");
        assert_eq!(o.value.to_string(), "30.0");
    }

    #[test]
    fn negative_number_constant() {
        let o = first_option("option floor = -42;");
        assert_eq!(o.value.to_string(), "-42");
    }

    #[test]
    fn aggregate_constant_renders_in_source_order() {
        let o = first_option(
            "option (envelope) = { wait: true, limit: 3 };",
        );
        assert_eq!(o.value.to_string(), "{ wait: true limit: 3 }");
    }

    #[test]
    fn nested_aggregate_without_colon() {
        let o = first_option("option (rule) = { inner { flag: false } };");
        match &o.value {
            Constant::Aggregate(entries) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].name, "inner");
                assert!(matches!(entries[0].value, Constant::Aggregate(_)));
            }
            other => panic!("expected aggregate, got {other:?}"),
        }
    }

    #[test]
    fn list_constant() {
        let o = first_option("option kinds = [\"a\", \"b\"];");
        assert_eq!(o.value.to_string(), "[\"a\", \"b\"]");
    }

    #[test]
    fn missing_equals_is_reported() {
        let err = parse_source("option name \"x\";").unwrap_err();
        assert_eq!(err.expected, "= after option name");
        assert_eq!(err.context, Some("Option"));
    }
}
