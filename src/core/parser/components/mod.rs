//! Grammar routines, one module per declaration family.
//!
//! Every braced construct funnels through the same container loop in
//! this module: it merges consecutive `//` comment lines, hands a
//! pending comment to the next declaration as its doc, claims same-line
//! comments after `;` as inline comments, and dispatches the first
//! token of each declaration to the family module that parses it.
//!
//! Statement terminators stay with the loop. Declaration routines parse
//! up to (not including) their trailing `;`, so the loop sees every
//! semicolon and can scan for the inline comment that may follow it on
//! the same line.

use tracing::trace;

use super::ast::{Comment, FieldLabel, Node, NodeId};
use super::error::SyntaxError;
use super::proto_parser::ProtoParser;
use super::stream::TokenSource;
use crate::core::scanner::{Position, Token, TokenType};

mod enums;
mod fields;
mod file;
mod messages;
mod options;
mod services;

/// Which braced construct a container loop is reading, deciding the
/// declaration keywords admitted in its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContainerKind {
    /// The file top level; ends at end of input.
    Proto,
    /// A `message`, `extend`, or `group` body.
    Message,
    /// A `oneof` body.
    Oneof,
    /// An `enum` body.
    Enum,
    /// A `service` body.
    Service,
}

impl ContainerKind {
    fn context(self) -> &'static str {
        match self {
            ContainerKind::Proto => "Proto",
            ContainerKind::Message => "Message",
            ContainerKind::Oneof => "Oneof",
            ContainerKind::Enum => "Enum",
            ContainerKind::Service => "Service",
        }
    }
}

impl<S: TokenSource> ProtoParser<S> {
    /// Read body elements until the container's terminator.
    ///
    /// The top level terminates at end of input; every other kind
    /// terminates at `}`.
    pub(crate) fn parse_container_elements(
        &mut self,
        container: NodeId,
        kind: ContainerKind,
    ) -> Result<(), SyntaxError> {
        loop {
            let token = self.stream.next();
            match token.kind() {
                t if t.is_comment() => {
                    let comment = comment_from(&token);
                    self.merge_or_append_comment(container, comment);
                }
                TokenType::Semicolon => {
                    self.maybe_scan_inline_comment(
                        container,
                        token.position().line,
                    );
                }
                TokenType::Eof => {
                    if kind == ContainerKind::Proto {
                        return Ok(());
                    }
                    return Err(self
                        .unexpected(&token, "closing }")
                        .in_context(kind.context()));
                }
                TokenType::RightBrace if kind != ContainerKind::Proto => {
                    self.ast
                        .node_mut(container)
                        .set_end_line(token.position().line);
                    return Ok(());
                }
                _ => {
                    let doc = self.ast.take_trailing_comment(container);
                    trace!(
                        token = token.describe(),
                        container = kind.context(),
                        "declaration"
                    );
                    self.parse_element(container, kind, token, doc)?;
                }
            }
        }
    }

    /// Dispatch the first token of a declaration.
    fn parse_element(
        &mut self,
        container: NodeId,
        kind: ContainerKind,
        token: Token,
        doc: Option<Comment>,
    ) -> Result<(), SyntaxError> {
        let position = token.position().clone();
        match kind {
            ContainerKind::Proto => match token.kind() {
                TokenType::Syntax => self.parse_syntax(container, position, doc),
                TokenType::Package => {
                    self.parse_package(container, position, doc)
                }
                TokenType::Import => self.parse_import(container, position, doc),
                TokenType::Option => {
                    self.parse_option_statement(container, position, doc)
                }
                TokenType::Message => {
                    self.parse_message(container, position, doc)
                }
                TokenType::Extend => self.parse_extend(container, position, doc),
                TokenType::Enum => self.parse_enum(container, position, doc),
                TokenType::Service => {
                    self.parse_service(container, position, doc)
                }
                _ => Err(self
                    .unexpected(&token, "top-level declaration")
                    .in_context(kind.context())),
            },
            ContainerKind::Message => match token.kind() {
                TokenType::Option => {
                    self.parse_option_statement(container, position, doc)
                }
                TokenType::Message => {
                    self.parse_message(container, position, doc)
                }
                TokenType::Extend => self.parse_extend(container, position, doc),
                TokenType::Enum => self.parse_enum(container, position, doc),
                TokenType::Oneof => self.parse_oneof(container, position, doc),
                TokenType::Map => {
                    self.parse_map_field(container, position, doc)
                }
                TokenType::Reserved => {
                    self.parse_reserved(container, position, doc)
                }
                TokenType::Extensions => {
                    self.parse_extensions(container, position, doc)
                }
                TokenType::Optional
                | TokenType::Required
                | TokenType::Repeated => {
                    self.parse_labeled_field(container, token, doc)
                }
                TokenType::Group => {
                    self.parse_group(container, position, FieldLabel::Unlabeled, doc)
                }
                TokenType::Identifier | TokenType::Dot => {
                    self.parse_normal_field(container, token, doc)
                }
                // keywords double as type names ("map" aside)
                t if t.is_keyword() => {
                    self.parse_normal_field(container, token, doc)
                }
                _ => Err(self
                    .unexpected(&token, "field or declaration")
                    .in_context(kind.context())),
            },
            ContainerKind::Oneof => match token.kind() {
                TokenType::Option => {
                    self.parse_option_statement(container, position, doc)
                }
                TokenType::Group => {
                    self.parse_group(container, position, FieldLabel::Unlabeled, doc)
                }
                TokenType::Identifier | TokenType::Dot => {
                    self.parse_normal_field(container, token, doc)
                }
                t if t.is_keyword() => {
                    self.parse_normal_field(container, token, doc)
                }
                _ => Err(self
                    .unexpected(&token, "oneof field")
                    .in_context(kind.context())),
            },
            ContainerKind::Enum => match token.kind() {
                TokenType::Option => {
                    self.parse_option_statement(container, position, doc)
                }
                TokenType::Reserved => {
                    self.parse_reserved(container, position, doc)
                }
                _ => self.parse_enum_value(container, token, doc),
            },
            ContainerKind::Service => match token.kind() {
                TokenType::Option => {
                    self.parse_option_statement(container, position, doc)
                }
                TokenType::Rpc => self.parse_rpc(container, position, doc),
                _ => Err(self
                    .unexpected(&token, "rpc or option")
                    .in_context(kind.context())),
            },
        }
    }

    /// Merge a line comment into the container's trailing comment when
    /// both are `//` style on consecutive lines; append otherwise.
    pub(crate) fn merge_or_append_comment(
        &mut self,
        container: NodeId,
        comment: Comment,
    ) {
        if !comment.cstyle {
            if let Some(&last) = self.ast.children(container).last() {
                if let Node::Comment(existing) = self.ast.node_mut(last) {
                    if !existing.cstyle
                        && existing.last_line() + 1 == comment.position.line
                    {
                        existing.lines.extend(comment.lines);
                        return;
                    }
                }
            }
        }
        let id = self.ast.alloc(Node::Comment(comment));
        self.ast.append(container, id);
    }

    /// After a statement terminator, claim a comment that starts on the
    /// same source line as the trailing comment of the statement just
    /// appended. Anything else is pushed back.
    pub(crate) fn maybe_scan_inline_comment(
        &mut self,
        container: NodeId,
        line: u32,
    ) {
        let token = self.stream.next();
        if token.kind().is_comment() && token.position().line == line {
            if let Some(&last) = self.ast.children(container).last() {
                let comment = comment_from(&token);
                if self
                    .ast
                    .node_mut(last)
                    .set_inline_comment(comment)
                    .is_ok()
                {
                    return;
                }
            }
        }
        self.stream.push_back(token);
    }

    /// Read a dotted identifier, first segment already consumed.
    fn read_dotted_continuation(
        &mut self,
        mut name: String,
    ) -> Result<String, SyntaxError> {
        loop {
            let token = self.stream.next();
            if token.kind() != TokenType::Dot {
                self.stream.push_back(token);
                return Ok(name);
            }
            let segment = self.expect_identifier("identifier after .")?;
            name.push('.');
            name.push_str(segment.literal());
        }
    }

    /// Read a full dotted identifier such as `google.protobuf.Any`.
    pub(crate) fn read_qualified_identifier(
        &mut self,
        expected: &str,
    ) -> Result<(Position, String), SyntaxError> {
        let first = self.expect_identifier(expected)?;
        let position = first.position().clone();
        let name = self.read_dotted_continuation(first.into_literal())?;
        Ok((position, name))
    }

    /// Read a type reference, which may carry a leading dot for a fully
    /// qualified name.
    pub(crate) fn read_type_name(
        &mut self,
        first: Token,
        expected: &str,
    ) -> Result<(Position, String), SyntaxError> {
        let position = first.position().clone();
        if first.kind() == TokenType::Dot {
            let (_, rest) = self.read_qualified_identifier(expected)?;
            return Ok((position, format!(".{rest}")));
        }
        if first.kind().is_keyword() {
            let name = first.into_literal();
            return Ok((position, self.read_dotted_continuation(name)?));
        }
        if first.kind() != TokenType::Identifier {
            return Err(self.unexpected(&first, expected));
        }
        let name = self.read_dotted_continuation(first.into_literal())?;
        Ok((position, name))
    }
}

/// Build a comment value from a scanned comment token.
pub(crate) fn comment_from(token: &Token) -> Comment {
    Comment::new(
        token.position().clone(),
        token.literal(),
        token.kind() == TokenType::BlockComment,
    )
}
