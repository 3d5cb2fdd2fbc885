//! Message fields: normal, labeled, `map<K, V>`, and `oneof` bodies.

use super::ContainerKind;
use crate::core::parser::ast::{
    Comment, Documented, FieldDecl, FieldLabel, MapFieldDecl, Node, NodeId,
    OneofDecl, ProtoOption,
};
use crate::core::parser::error::SyntaxError;
use crate::core::parser::proto_parser::ProtoParser;
use crate::core::parser::stream::TokenSource;
use crate::core::scanner::{Position, Token, TokenType};

impl<S: TokenSource> ProtoParser<S> {
    /// Parse a field that opened with a cardinality label. The label
    /// may introduce a `group` instead of a normal field.
    pub(crate) fn parse_labeled_field(
        &mut self,
        container: NodeId,
        label_token: Token,
        doc: Option<Comment>,
    ) -> Result<(), SyntaxError> {
        let position = label_token.position().clone();
        let label = match label_token.kind() {
            TokenType::Optional => FieldLabel::Optional,
            TokenType::Required => FieldLabel::Required,
            TokenType::Repeated => FieldLabel::Repeated,
            _ => {
                return Err(
                    self.unexpected(&label_token, "field label")
                );
            }
        };
        let token = self.stream.next();
        if token.kind() == TokenType::Group {
            return self.parse_group(container, position, label, doc);
        }
        self.parse_field_from(container, position, label, token, doc)
    }

    /// Parse an unlabeled field whose first type token was already
    /// consumed.
    pub(crate) fn parse_normal_field(
        &mut self,
        container: NodeId,
        first: Token,
        doc: Option<Comment>,
    ) -> Result<(), SyntaxError> {
        let position = first.position().clone();
        self.parse_field_from(
            container,
            position,
            FieldLabel::Unlabeled,
            first,
            doc,
        )
    }

    /// Parse `type name = number [options]` from the type's first
    /// token onward.
    fn parse_field_from(
        &mut self,
        container: NodeId,
        position: Position,
        label: FieldLabel,
        type_start: Token,
        doc: Option<Comment>,
    ) -> Result<(), SyntaxError> {
        let mut field = FieldDecl::new(position);
        field.label = label;
        let (_, type_name) =
            self.read_type_name(type_start, "field type")?;
        field.type_name = type_name;
        let name = self
            .expect_identifier("field name")
            .map_err(|e| e.in_context("Field"))?;
        field.name = name.into_literal();
        self.expect(TokenType::Equals, "= after field name")
            .map_err(|e| e.in_context("Field"))?;
        let (_, sequence) = self
            .stream
            .next_integer()
            .map_err(|e| e.with_expected("field sequence number"))?;
        field.sequence = sequence;
        field.options = self.maybe_parse_embedded_options()?;
        if let Some(doc) = doc {
            field.set_doc(doc);
        }
        let id = self.ast.alloc(Node::Field(field));
        self.ast.append(container, id);
        Ok(())
    }

    /// Parse `map<key, value> name = number [options]`, the `map`
    /// keyword already consumed.
    pub(crate) fn parse_map_field(
        &mut self,
        container: NodeId,
        position: Position,
        doc: Option<Comment>,
    ) -> Result<(), SyntaxError> {
        let mut field = MapFieldDecl::new(position);
        self.expect(TokenType::LeftAngle, "< after map")
            .map_err(|e| e.in_context("MapField"))?;
        let key = self.expect_identifier("map key type")?;
        field.key_type = key.into_literal();
        self.expect(TokenType::Comma, ", between map types")
            .map_err(|e| e.in_context("MapField"))?;
        let value_start = self.stream.next();
        let (_, value_type) =
            self.read_type_name(value_start, "map value type")?;
        field.value_type = value_type;
        self.expect(TokenType::RightAngle, "> after map types")
            .map_err(|e| e.in_context("MapField"))?;
        let name = self.expect_identifier("field name")?;
        field.name = name.into_literal();
        self.expect(TokenType::Equals, "= after field name")
            .map_err(|e| e.in_context("MapField"))?;
        let (_, sequence) = self
            .stream
            .next_integer()
            .map_err(|e| e.with_expected("field sequence number"))?;
        field.sequence = sequence;
        field.options = self.maybe_parse_embedded_options()?;
        if let Some(doc) = doc {
            field.set_doc(doc);
        }
        let id = self.ast.alloc(Node::MapField(field));
        self.ast.append(container, id);
        Ok(())
    }

    /// Parse `oneof name { ... }`, keyword already consumed.
    pub(crate) fn parse_oneof(
        &mut self,
        container: NodeId,
        position: Position,
        doc: Option<Comment>,
    ) -> Result<(), SyntaxError> {
        let mut oneof = OneofDecl::new(position);
        let name = self.expect_identifier("oneof name")?;
        oneof.name = name.into_literal();
        if let Some(doc) = doc {
            oneof.set_doc(doc);
        }
        self.expect(TokenType::LeftBrace, "{ after oneof name")
            .map_err(|e| e.in_context("Oneof"))?;
        let id = self.ast.alloc(Node::Oneof(oneof));
        self.parse_container_elements(id, ContainerKind::Oneof)?;
        self.ast.append(container, id);
        Ok(())
    }

    /// Consume a `[options]` list when one follows.
    fn maybe_parse_embedded_options(
        &mut self,
    ) -> Result<Vec<ProtoOption>, SyntaxError> {
        let token = self.stream.next();
        if token.kind() == TokenType::LeftBracket {
            self.parse_embedded_options()
        } else {
            self.stream.push_back(token);
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::parser::ast::{FieldLabel, Node};
    use crate::core::parser::parse_source;

    #[test]
    fn labeled_and_unlabeled_fields() {
        let ast = parse_source(
            "message M {\n  string name = 1;\n  repeated int32 scores = 2;\n}",
        )
        .unwrap();
        let message = ast.children(ast.root_id())[0];
        let fields = ast.children(message);
        match ast.node(fields[0]) {
            Node::Field(f) => {
                assert_eq!(f.name, "name");
                assert_eq!(f.type_name, "string");
                assert_eq!(f.sequence, 1);
                assert_eq!(f.label, FieldLabel::Unlabeled);
            }
            other => panic!("expected field, got {other:?}"),
        }
        match ast.node(fields[1]) {
            Node::Field(f) => assert_eq!(f.label, FieldLabel::Repeated),
            other => panic!("expected field, got {other:?}"),
        }
    }

    #[test]
    fn fully_qualified_field_type() {
        let ast = parse_source(
            "message M { .google.protobuf.Any payload = 1; }",
        )
        .unwrap();
        let message = ast.children(ast.root_id())[0];
        match ast.node(ast.children(message)[0]) {
            Node::Field(f) => {
                assert_eq!(f.type_name, ".google.protobuf.Any");
            }
            other => panic!("expected field, got {other:?}"),
        }
    }

    #[test]
    fn field_with_embedded_options() {
        let ast = parse_source(
            "message M { int64 when = 1 [deprecated = true, jstype = JS_STRING]; }",
        )
        .unwrap();
        let message = ast.children(ast.root_id())[0];
        match ast.node(ast.children(message)[0]) {
            Node::Field(f) => {
                assert_eq!(f.options.len(), 2);
                assert!(f.options[0].is_embedded);
                assert_eq!(f.options[0].name, "deprecated");
                assert_eq!(f.options[1].value.to_string(), "JS_STRING");
            }
            other => panic!("expected field, got {other:?}"),
        }
    }

    #[test]
    fn map_field() {
        let ast = parse_source(
            "message M { map<string, Project> projects = 3; }",
        )
        .unwrap();
        let message = ast.children(ast.root_id())[0];
        match ast.node(ast.children(message)[0]) {
            Node::MapField(f) => {
                assert_eq!(f.key_type, "string");
                assert_eq!(f.value_type, "Project");
                assert_eq!(f.name, "projects");
                assert_eq!(f.sequence, 3);
            }
            other => panic!("expected map field, got {other:?}"),
        }
    }

    #[test]
    fn oneof_members_are_unlabeled() {
        let ast = parse_source(
            "message M { oneof choice { string a = 1; int32 b = 2; } }",
        )
        .unwrap();
        let message = ast.children(ast.root_id())[0];
        let oneof = ast.children(message)[0];
        match ast.node(oneof) {
            Node::Oneof(o) => assert_eq!(o.name, "choice"),
            other => panic!("expected oneof, got {other:?}"),
        }
        assert_eq!(ast.children(oneof).len(), 2);
        assert_eq!(ast.qualified_name(oneof).unwrap(), "M.choice");
    }

    #[test]
    fn keyword_as_field_name() {
        let ast = parse_source("message M { string option = 1; }").unwrap();
        let message = ast.children(ast.root_id())[0];
        match ast.node(ast.children(message)[0]) {
            Node::Field(f) => assert_eq!(f.name, "option"),
            other => panic!("expected field, got {other:?}"),
        }
    }

    #[test]
    fn missing_sequence_number() {
        let err =
            parse_source("message M { string name = x; }").unwrap_err();
        assert_eq!(err.expected, "field sequence number");
        assert_eq!(err.found, "x");
    }
}
