//! Golden-output checks for the alignment printer.

use proto_rs::core::parser::parse_source;
use proto_rs::core::printer::print;

#[test]
fn whole_file_renders_canonically() {
    let ast = parse_source(
        r#"syntax = "proto3";

package acme.search;

import "base.proto";
import public "shared.proto";

// A query against the index.
message Query {
  string text = 1; // raw user input
  uint32 page = 2;
  uint32 page_size = 3;
}

enum Ranking {
  RELEVANCE = 0;
  FRESHNESS = 1;
}

service Search {
  rpc Run (Query) returns (Results);
}
"#,
    )
    .unwrap();

    let expected = r#"syntax = "proto3";

package acme.search;

import "base.proto";
import public "shared.proto";

// A query against the index.
message Query {
  string text      = 1; // raw user input
  uint32 page      = 2;
  uint32 page_size = 3;
}

enum Ranking {
  RELEVANCE = 0;
  FRESHNESS = 1;
}

service Search {
  rpc Run (Query) returns (Results);
}
"#;
    assert_eq!(print(&ast), expected);
}

#[test]
fn enum_values_with_options_form_their_own_block() {
    let ast = parse_source(
        "enum Level {\n  LOW = 0;\n  MID = 5;\n  HIGH = 10 [deprecated = true];\n}",
    )
    .unwrap();
    let expected = "enum Level {\n  LOW = 0;\n  MID = 5;\n  HIGH = 10 [deprecated = true];\n}\n";
    assert_eq!(print(&ast), expected);
}

#[test]
fn imports_align_their_modifiers() {
    let ast = parse_source(
        "import \"a.proto\";\nimport public \"b.proto\";\nimport weak \"c.proto\";",
    )
    .unwrap();
    let expected = "import \"a.proto\";\nimport public \"b.proto\";\nimport weak   \"c.proto\";\n";
    assert_eq!(print(&ast), expected);
}

#[test]
fn map_fields_and_oneofs_render_nested() {
    let ast = parse_source(
        "message M {\n  map<string, int64> hits = 1;\n  oneof target {\n    string host = 2;\n    uint32 port = 3;\n  }\n}",
    )
    .unwrap();
    let expected = "message M {\n  map<string, int64> hits = 1;\n  oneof target {\n    string host = 2;\n    uint32 port = 3;\n  }\n}\n";
    assert_eq!(print(&ast), expected);
}

#[test]
fn reserved_and_extensions_statements() {
    let ast = parse_source(
        "message M {\n  reserved 2, 9 to 11, 40 to max;\n  reserved \"old_name\";\n  extensions 100 to 199;\n}",
    )
    .unwrap();
    let expected = "message M {\n  reserved 2, 9 to 11, 40 to max;\n  reserved \"old_name\";\n  extensions 100 to 199;\n}\n";
    assert_eq!(print(&ast), expected);
}

#[test]
fn adjacent_blocks_stay_adjacent() {
    let ast = parse_source(
        "message A {\n  string x = 1;\n}\nmessage B {\n  string y = 1;\n}\n\nenum E {\n  V = 0;\n}",
    )
    .unwrap();
    let expected = "message A {\n  string x = 1;\n}\nmessage B {\n  string y = 1;\n}\n\nenum E {\n  V = 0;\n}\n";
    assert_eq!(print(&ast), expected);
}

#[test]
fn rpc_bodies_do_not_widen_gaps() {
    let ast = parse_source(
        "service S {\n  rpc A (X) returns (Y) {\n    option timeout = 5;\n  }\n  rpc B (X) returns (Y);\n}",
    )
    .unwrap();
    let expected = "service S {\n  rpc A (X) returns (Y) {\n    option timeout = 5;\n  }\n  rpc B (X) returns (Y);\n}\n";
    assert_eq!(print(&ast), expected);
}

#[test]
fn rpc_body_trailing_comment_prints_inside_braces() {
    let ast = parse_source(
        "service S {\n  rpc Get (Req) returns (Resp) {\n    option x = 1;\n    // keep last\n  }\n}",
    )
    .unwrap();
    let expected = "service S {\n  rpc Get (Req) returns (Resp) {\n    option x = 1;\n    // keep last\n  }\n}\n";
    assert_eq!(print(&ast), expected);
}

#[test]
fn standalone_block_comment_renders_between_statements() {
    let ast = parse_source(
        "enum E {\n  A = 0;\n  /* unused range below */\n}",
    )
    .unwrap();
    let expected = "enum E {\n  A = 0;\n  /* unused range below */\n}\n";
    assert_eq!(print(&ast), expected);
}
