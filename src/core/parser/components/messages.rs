//! Message-level declarations: `message`, `extend`, `group`,
//! `reserved`, and `extensions`.

use super::ContainerKind;
use crate::core::parser::ast::{
    Comment, Documented, Extensions, FieldLabel, GroupDecl, MessageDecl, Node,
    NodeId, Reserved, TagRange,
};
use crate::core::parser::error::SyntaxError;
use crate::core::parser::proto_parser::ProtoParser;
use crate::core::parser::stream::TokenSource;
use crate::core::scanner::{Position, TokenType};

impl<S: TokenSource> ProtoParser<S> {
    /// Parse `message Name { ... }`, keyword already consumed.
    pub(crate) fn parse_message(
        &mut self,
        container: NodeId,
        position: Position,
        doc: Option<Comment>,
    ) -> Result<(), SyntaxError> {
        let mut message = MessageDecl::new(position);
        let name = self.expect_identifier("message name")?;
        message.name = name.into_literal();
        if let Some(doc) = doc {
            message.set_doc(doc);
        }
        self.expect(TokenType::LeftBrace, "{ after message name")
            .map_err(|e| e.in_context("Message"))?;
        let id = self.ast.alloc(Node::Message(message));
        self.parse_container_elements(id, ContainerKind::Message)?;
        self.ast.append(container, id);
        Ok(())
    }

    /// Parse `extend Name { ... }`, keyword already consumed. An
    /// extend body reads like a message body.
    pub(crate) fn parse_extend(
        &mut self,
        container: NodeId,
        position: Position,
        doc: Option<Comment>,
    ) -> Result<(), SyntaxError> {
        let mut message = MessageDecl::new(position);
        message.is_extend = true;
        let start = self.stream.next();
        let (_, name) = self.read_type_name(start, "extended type name")?;
        message.name = name;
        if let Some(doc) = doc {
            message.set_doc(doc);
        }
        self.expect(TokenType::LeftBrace, "{ after extended type")
            .map_err(|e| e.in_context("Message"))?;
        let id = self.ast.alloc(Node::Message(message));
        self.parse_container_elements(id, ContainerKind::Message)?;
        self.ast.append(container, id);
        Ok(())
    }

    /// Parse `group Name = number { ... }`, keyword already consumed.
    /// The label, if any, was read by the caller.
    pub(crate) fn parse_group(
        &mut self,
        container: NodeId,
        position: Position,
        label: FieldLabel,
        doc: Option<Comment>,
    ) -> Result<(), SyntaxError> {
        let mut group = GroupDecl::new(position);
        group.label = label;
        let name = self.expect_identifier("group name")?;
        group.name = name.into_literal();
        self.expect(TokenType::Equals, "= after group name")
            .map_err(|e| e.in_context("Group"))?;
        let (_, sequence) = self
            .stream
            .next_integer()
            .map_err(|e| e.with_expected("group sequence number"))?;
        group.sequence = sequence;
        if let Some(doc) = doc {
            group.set_doc(doc);
        }
        self.expect(TokenType::LeftBrace, "{ after group number")
            .map_err(|e| e.in_context("Group"))?;
        let id = self.ast.alloc(Node::Group(group));
        self.parse_container_elements(id, ContainerKind::Message)?;
        self.ast.append(container, id);
        Ok(())
    }

    /// Parse `reserved` ranges or field names, keyword already
    /// consumed. A single statement holds either tag ranges or quoted
    /// field names.
    pub(crate) fn parse_reserved(
        &mut self,
        container: NodeId,
        position: Position,
        doc: Option<Comment>,
    ) -> Result<(), SyntaxError> {
        let mut reserved = Reserved::new(position);
        loop {
            let token = self.stream.next();
            match token.kind() {
                TokenType::StrLit => {
                    reserved.field_names.push(token.into_literal());
                }
                TokenType::Comma => {}
                TokenType::Number | TokenType::Minus => {
                    self.stream.push_back(token);
                    reserved.ranges.push(self.parse_tag_range()?);
                }
                _ => {
                    self.stream.push_back(token);
                    break;
                }
            }
        }
        if reserved.ranges.is_empty() && reserved.field_names.is_empty() {
            let token = self.stream.next();
            return Err(self
                .unexpected(&token, "reserved range or field name")
                .in_context("Reserved"));
        }
        if let Some(doc) = doc {
            reserved.set_doc(doc);
        }
        let id = self.ast.alloc(Node::Reserved(reserved));
        self.ast.append(container, id);
        Ok(())
    }

    /// Parse `extensions range, range, ...`, keyword already consumed.
    pub(crate) fn parse_extensions(
        &mut self,
        container: NodeId,
        position: Position,
        doc: Option<Comment>,
    ) -> Result<(), SyntaxError> {
        let mut extensions = Extensions::new(position);
        loop {
            extensions.ranges.push(
                self.parse_tag_range()
                    .map_err(|e| e.in_context("Extensions"))?,
            );
            let token = self.stream.next();
            if token.kind() != TokenType::Comma {
                self.stream.push_back(token);
                break;
            }
        }
        if let Some(doc) = doc {
            extensions.set_doc(doc);
        }
        let id = self.ast.alloc(Node::Extensions(extensions));
        self.ast.append(container, id);
        Ok(())
    }

    /// Parse one tag range: `N`, `N to M`, or `N to max`.
    fn parse_tag_range(&mut self) -> Result<TagRange, SyntaxError> {
        let (_, from) = self
            .stream
            .next_integer()
            .map_err(|e| e.with_expected("range start integer"))?;
        let token = self.stream.next();
        if token.kind() != TokenType::To {
            self.stream.push_back(token);
            return Ok(TagRange {
                from,
                to: None,
                max: false,
            });
        }
        let bound = self.stream.next();
        if bound.kind() == TokenType::Max {
            return Ok(TagRange {
                from,
                to: None,
                max: true,
            });
        }
        self.stream.push_back(bound);
        let (_, to) = self
            .stream
            .next_integer()
            .map_err(|e| e.with_expected("range end integer or max"))?;
        Ok(TagRange {
            from,
            to: Some(to),
            max: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::core::parser::ast::Node;
    use crate::core::parser::parse_source;

    #[test]
    fn nested_messages_have_qualified_names() {
        let ast = parse_source(
            "message Outer { message Inner { bool ok = 1; } }",
        )
        .unwrap();
        let outer = ast.children(ast.root_id())[0];
        let inner = ast.children(outer)[0];
        assert_eq!(ast.qualified_name(inner).unwrap(), "Outer.Inner");
    }

    #[test]
    fn extend_is_a_flagged_message() {
        let ast = parse_source(
            "extend google.protobuf.MessageOptions { bool flag = 51234; }",
        )
        .unwrap();
        match ast.node(ast.children(ast.root_id())[0]) {
            Node::Message(m) => {
                assert!(m.is_extend);
                assert_eq!(m.name, "google.protobuf.MessageOptions");
            }
            other => panic!("expected message, got {other:?}"),
        }
    }

    #[test]
    fn labeled_group() {
        let ast = parse_source(
            "message M { optional group Result = 1 { string url = 2; } }",
        )
        .unwrap();
        let message = ast.children(ast.root_id())[0];
        match ast.node(ast.children(message)[0]) {
            Node::Group(g) => {
                assert_eq!(g.name, "Result");
                assert_eq!(g.sequence, 1);
                assert_eq!(
                    g.label,
                    crate::core::parser::ast::FieldLabel::Optional
                );
                assert_eq!(g.elements.len(), 1);
            }
            other => panic!("expected group, got {other:?}"),
        }
    }

    #[test]
    fn reserved_mixes_ranges_and_spans() {
        let ast = parse_source(
            "message M { reserved 2, 15, 9 to 11, 40 to max; }",
        )
        .unwrap();
        let message = ast.children(ast.root_id())[0];
        match ast.node(ast.children(message)[0]) {
            Node::Reserved(r) => {
                let rendered: Vec<String> =
                    r.ranges.iter().map(ToString::to_string).collect();
                assert_eq!(
                    rendered,
                    vec!["2", "15", "9 to 11", "40 to max"]
                );
            }
            other => panic!("expected reserved, got {other:?}"),
        }
    }

    #[test]
    fn reserved_field_names() {
        let ast = parse_source(
            "message M { reserved \"foo\", \"bar\"; }",
        )
        .unwrap();
        let message = ast.children(ast.root_id())[0];
        match ast.node(ast.children(message)[0]) {
            Node::Reserved(r) => {
                assert_eq!(r.field_names, vec!["foo", "bar"]);
                assert!(r.ranges.is_empty());
            }
            other => panic!("expected reserved, got {other:?}"),
        }
    }

    #[test]
    fn extensions_ranges() {
        let ast = parse_source(
            "message M { extensions 100 to 199, 500 to max; }",
        )
        .unwrap();
        let message = ast.children(ast.root_id())[0];
        match ast.node(ast.children(message)[0]) {
            Node::Extensions(e) => {
                assert_eq!(e.ranges.len(), 2);
                assert_eq!(e.ranges[1].to_string(), "500 to max");
            }
            other => panic!("expected extensions, got {other:?}"),
        }
    }

    #[test]
    fn unterminated_message_reports_context() {
        let err = parse_source("message M { string a = 1;").unwrap_err();
        assert_eq!(err.found, "<eof>");
        assert_eq!(err.context, Some("Message"));
    }
}
