//! Enum declarations and enum values.

use super::ContainerKind;
use crate::core::parser::ast::{
    Comment, Documented, EnumDecl, EnumValue, Node, NodeId,
};
use crate::core::parser::error::SyntaxError;
use crate::core::parser::proto_parser::ProtoParser;
use crate::core::parser::stream::TokenSource;
use crate::core::scanner::{Position, Token, TokenType};

impl<S: TokenSource> ProtoParser<S> {
    /// Parse `enum Name { ... }`, keyword already consumed.
    pub(crate) fn parse_enum(
        &mut self,
        container: NodeId,
        position: Position,
        doc: Option<Comment>,
    ) -> Result<(), SyntaxError> {
        let mut decl = EnumDecl::new(position);
        let name = self.expect_identifier("enum name")?;
        decl.name = name.into_literal();
        if let Some(doc) = doc {
            decl.set_doc(doc);
        }
        self.expect(TokenType::LeftBrace, "{ after enum name")
            .map_err(|e| e.in_context("Enum"))?;
        let id = self.ast.alloc(Node::Enum(decl));
        self.parse_container_elements(id, ContainerKind::Enum)?;
        self.ast.append(container, id);
        Ok(())
    }

    /// Parse `NAME = integer [option]` from the name token onward.
    ///
    /// The name accepts keywords (an enum value may be called `max`).
    /// At most one embedded option is admitted between the brackets.
    pub(crate) fn parse_enum_value(
        &mut self,
        container: NodeId,
        first: Token,
        doc: Option<Comment>,
    ) -> Result<(), SyntaxError> {
        let position = first.position().clone();
        if first.kind() != TokenType::Identifier && !first.kind().is_keyword()
        {
            return Err(self
                .unexpected(&first, "enum value name")
                .in_context("Enum"));
        }
        let mut value = EnumValue::new(position);
        value.name = first.into_literal();
        self.expect(TokenType::Equals, "= after enum value name")
            .map_err(|e| e.in_context("EnumValue"))?;
        let (_, integer) = self
            .stream
            .next_integer()
            .map_err(|e| e.with_expected("enum field integer"))?;
        value.integer = integer;
        let token = self.stream.next();
        let token = if token.kind() == TokenType::LeftBracket {
            let start = {
                let name = self.stream.next();
                let position = name.position().clone();
                self.stream.push_back(name);
                position
            };
            let option = self.parse_option_body(start, true)?;
            value.value_option = Some(option);
            self.expect(TokenType::RightBracket, "] after enum value option")
                .map_err(|e| e.in_context("EnumValue"))?;
            self.stream.next()
        } else {
            token
        };
        if token.kind() != TokenType::Semicolon {
            return Err(self
                .unexpected(&token, "; after enum value")
                .in_context("EnumValue"));
        }
        // the container loop owns the terminator and its inline comment
        self.stream.push_back(token);
        if let Some(doc) = doc {
            value.set_doc(doc);
        }
        let id = self.ast.alloc(Node::EnumValue(value));
        self.ast.append(container, id);
        Ok(())
    }
}
