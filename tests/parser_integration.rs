//! End-to-end parsing of realistic `.proto` inputs.

use proto_rs::core::parser::ast::{Ast, FieldLabel, Node, NodeId};
use proto_rs::core::parser::parse_source;

fn child_of(ast: &Ast, id: NodeId, index: usize) -> NodeId {
    ast.children(id)[index]
}

#[test]
fn doc_comment_attaches_forward() {
    let ast = parse_source(
        "enum Status {\n  // The zero value.\n  UNKNOWN = 0;\n}",
    )
    .unwrap();
    let decl = child_of(&ast, ast.root_id(), 0);
    let elements = ast.children(decl);
    assert_eq!(elements.len(), 1, "the comment must not remain a sibling");
    match ast.node(elements[0]) {
        Node::EnumValue(v) => {
            assert_eq!(v.name, "UNKNOWN");
            let doc = v.doc.as_ref().unwrap();
            assert_eq!(doc.text(), " The zero value.");
        }
        other => panic!("expected enum value, got {other:?}"),
    }
}

#[test]
fn inline_comment_is_claimed_with_leading_space() {
    let ast = parse_source("enum E {\n  foo = 1; // note\n}").unwrap();
    let decl = child_of(&ast, ast.root_id(), 0);
    let elements = ast.children(decl);
    assert_eq!(elements.len(), 1, "no stray comment element may follow");
    match ast.node(elements[0]) {
        Node::EnumValue(v) => {
            assert_eq!(v.name, "foo");
            assert_eq!(v.integer, 1);
            let inline = v.inline_comment.as_ref().unwrap();
            assert_eq!(inline.text(), " note");
        }
        other => panic!("expected enum value, got {other:?}"),
    }
}

#[test]
fn consecutive_comment_lines_merge_into_one_doc() {
    let ast = parse_source(
        "message M {\n  // first line\n  // second line\n  bool ok = 1;\n}",
    )
    .unwrap();
    let message = child_of(&ast, ast.root_id(), 0);
    assert_eq!(ast.children(message).len(), 1);
    match ast.node(child_of(&ast, message, 0)) {
        Node::Field(f) => {
            let doc = f.doc.as_ref().unwrap();
            assert_eq!(doc.lines, vec![" first line", " second line"]);
        }
        other => panic!("expected field, got {other:?}"),
    }
}

#[test]
fn separated_comment_lines_stay_separate() {
    let ast = parse_source(
        "enum E {\n  // about A\n\n  // about nothing\n  A = 0;\n}",
    )
    .unwrap();
    let decl = child_of(&ast, ast.root_id(), 0);
    let elements = ast.children(decl);
    // the first comment stays standalone; the second becomes A's doc
    assert_eq!(elements.len(), 2);
    match ast.node(elements[0]) {
        Node::Comment(c) => assert_eq!(c.text(), " about A"),
        other => panic!("expected comment, got {other:?}"),
    }
    match ast.node(elements[1]) {
        Node::EnumValue(v) => {
            assert_eq!(v.doc.as_ref().unwrap().text(), " about nothing");
        }
        other => panic!("expected enum value, got {other:?}"),
    }
}

#[test]
fn block_comments_never_merge() {
    let ast = parse_source(
        "enum E {\n  /* one */\n  /* two */\n  A = 0;\n}",
    )
    .unwrap();
    let decl = child_of(&ast, ast.root_id(), 0);
    // first block comment standalone, second claimed as doc
    assert_eq!(ast.children(decl).len(), 2);
}

#[test]
fn embedded_option_on_enum_value() {
    let ast = parse_source("enum E { BAR = 2 [deprecated = true]; }").unwrap();
    let decl = child_of(&ast, ast.root_id(), 0);
    match ast.node(child_of(&ast, decl, 0)) {
        Node::EnumValue(v) => {
            assert_eq!(v.name, "BAR");
            assert_eq!(v.integer, 2);
            let option = v.value_option.as_ref().unwrap();
            assert_eq!(option.name, "deprecated");
            assert_eq!(option.value.to_string(), "true");
            assert!(option.is_embedded);
        }
        other => panic!("expected enum value, got {other:?}"),
    }
}

#[test]
fn negative_enum_integer() {
    let ast = parse_source("enum E { NEG = -1; }").unwrap();
    let decl = child_of(&ast, ast.root_id(), 0);
    match ast.node(child_of(&ast, decl, 0)) {
        Node::EnumValue(v) => assert_eq!(v.integer, -1),
        other => panic!("expected enum value, got {other:?}"),
    }
}

#[test]
fn error_points_at_second_equals() {
    let err = parse_source("enum E { X == 1; }").unwrap_err();
    assert_eq!(err.expected, "enum field integer");
    assert_eq!(err.found, "=");
    assert_eq!(err.position.line, 1);
    assert_eq!(err.position.column, 13);
}

#[test]
fn element_order_mirrors_source_order() {
    let ast = parse_source(
        "enum E {\n  option allow_alias = true;\n  A = 0;\n\n  // standalone trailer\n}",
    )
    .unwrap();
    let decl = child_of(&ast, ast.root_id(), 0);
    let kinds: Vec<&str> = ast
        .children(decl)
        .iter()
        .map(|id| ast.node(*id).kind_name())
        .collect();
    assert_eq!(kinds, vec!["Option", "EnumValue", "Comment"]);
}

#[test]
fn parent_links_are_consistent_throughout() {
    let ast = parse_source(
        r#"syntax = "proto3";
package acme.billing;

message Invoice {
  message Line {
    string sku = 1;
    uint32 quantity = 2;
  }
  repeated Line lines = 1;
  oneof payer {
    string customer_id = 2;
    Account account = 3;
  }
  map<string, string> labels = 4;
  reserved 5, 6 to 9;
}

enum Currency {
  EUR = 0;
  USD = 1;
}

service Billing {
  rpc Issue (Invoice) returns (Receipt);
}
"#,
    )
    .unwrap();
    let mut stack = vec![ast.root_id()];
    let mut seen = 0;
    while let Some(id) = stack.pop() {
        for &child in ast.children(id) {
            assert_eq!(
                ast.node(child).parent(),
                Some(id),
                "child {:?} must point back at its container",
                ast.node(child).kind_name()
            );
            seen += 1;
            stack.push(child);
        }
    }
    assert!(seen > 10);
}

#[test]
fn qualified_names_cross_nesting_levels() {
    let ast = parse_source(
        "message Outer { message Inner { enum Kind { A = 0; } } }",
    )
    .unwrap();
    let outer = child_of(&ast, ast.root_id(), 0);
    let inner = child_of(&ast, outer, 0);
    let kind = child_of(&ast, inner, 0);
    let a = child_of(&ast, kind, 0);
    assert_eq!(ast.qualified_name(a).unwrap(), "Outer.Inner.Kind.A");
}

#[test]
fn full_file_parses_with_every_statement_kind() {
    let ast = parse_source(
        r#"syntax = "proto2";
package zoo;

import "animals.proto";
import public "habitats.proto";

option java_package = "org.zoo";

message Cage {
  optional string label = 1 [default = "unnamed"];
  required int32 size = 2;
  repeated .zoo.Animal occupants = 3;
  optional group Dimensions = 4 {
    optional int32 width = 5;
  }
  extensions 100 to 199;
}

extend Cage {
  optional bool heated = 150;
}

service Keeper {
  rpc Feed (FeedRequest) returns (stream FeedReply) {
    option deadline = 30.0;
  }
}
"#,
    )
    .unwrap();
    let kinds: Vec<&str> = ast
        .children(ast.root_id())
        .iter()
        .map(|id| ast.node(*id).kind_name())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "Syntax", "Package", "Import", "Import", "Option", "Message",
            "Message", "Service"
        ]
    );

    let cage = child_of(&ast, ast.root_id(), 5);
    match ast.node(child_of(&ast, cage, 0)) {
        Node::Field(f) => {
            assert_eq!(f.label, FieldLabel::Optional);
            assert_eq!(f.options[0].name, "default");
            assert_eq!(f.options[0].value.to_string(), "\"unnamed\"");
        }
        other => panic!("expected field, got {other:?}"),
    }
    match ast.node(child_of(&ast, cage, 3)) {
        Node::Group(g) => {
            assert_eq!(g.name, "Dimensions");
            assert_eq!(g.sequence, 4);
            assert_eq!(g.label, FieldLabel::Optional);
        }
        other => panic!("expected group, got {other:?}"),
    }

    let extend = child_of(&ast, ast.root_id(), 6);
    match ast.node(extend) {
        Node::Message(m) => assert!(m.is_extend),
        other => panic!("expected message, got {other:?}"),
    }

    let service = child_of(&ast, ast.root_id(), 7);
    match ast.node(child_of(&ast, service, 0)) {
        Node::Rpc(r) => {
            assert!(!r.streams_request);
            assert!(r.streams_returns);
            assert_eq!(r.options.len(), 1);
        }
        other => panic!("expected rpc, got {other:?}"),
    }
}

#[test]
fn comment_after_stray_semicolon_is_not_lost() {
    // nothing precedes the semicolon, so the comment cannot attach
    // inline; it is retained and ends up as the doc of A
    let ast = parse_source("enum E {\n  ; // floating\n  A = 0;\n}").unwrap();
    let decl = child_of(&ast, ast.root_id(), 0);
    let elements = ast.children(decl);
    assert_eq!(elements.len(), 1);
    match ast.node(elements[0]) {
        Node::EnumValue(v) => {
            assert_eq!(v.doc.as_ref().unwrap().text(), " floating");
        }
        other => panic!("expected enum value, got {other:?}"),
    }
}

#[test]
fn keywords_serve_as_identifiers() {
    let ast = parse_source(
        "message message { string option = 1; }",
    )
    .unwrap();
    let m = child_of(&ast, ast.root_id(), 0);
    match ast.node(m) {
        Node::Message(decl) => assert_eq!(decl.name, "message"),
        other => panic!("expected message, got {other:?}"),
    }
}

#[test]
fn eof_inside_body_names_the_container() {
    let err = parse_source("service S { rpc A (X) returns (Y);").unwrap_err();
    assert_eq!(err.found, "<eof>");
    assert_eq!(err.context, Some("Service"));
}
