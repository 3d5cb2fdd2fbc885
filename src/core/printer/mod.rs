//! Column-aligned rendering of a tree back to `.proto` text.
//!
//! The printer is a [`Visitor`] that walks a finished tree and emits
//! canonical source. Consecutive leaf statements of the same kind with
//! the same column shape on consecutive source lines form an alignment
//! block: the widest cell in each column position sets the column
//! width, so names, `=` signs, and numbers line up. A standalone
//! comment, a blank source line, or a differently shaped statement
//! closes the block. Source gaps of two or more lines are reproduced as
//! one blank line.
//!
//! ## Examples
//! ```
//! use proto_rs::core::parser::parse_source;
//! use proto_rs::core::printer::print;
//!
//! let ast = parse_source("enum D { NORTH = 0; EAST = 10; }").unwrap();
//! assert_eq!(print(&ast), "enum D {\n  NORTH =  0;\n  EAST  = 10;\n}\n");
//! ```

pub mod columns;

use self::columns::{column_widths, render_row, Aligned, Columns};

use crate::core::parser::ast::{
    Ast, Comment, EnumDecl, EnumValue, Extensions, FieldDecl, GroupDecl,
    Import, MapFieldDecl, MessageDecl, Node, NodeId, OneofDecl, Package,
    Proto, ProtoOption, Reserved, RpcDecl, ServiceDecl, Syntax,
};
use crate::core::parser::visitor::Visitor;

/// Accumulates aligned output while visiting the tree.
pub struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    /// Create an empty printer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            out: String::new(),
            indent: 0,
        }
    }

    /// Render a whole tree.
    #[must_use]
    pub fn print(mut self, ast: &Ast) -> String {
        self.print_elements(ast, ast.children(ast.root_id()));
        self.out
    }

    fn push_indent(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
    }

    fn push_line(&mut self, text: &str) {
        self.push_indent();
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn print_comment(&mut self, comment: &Comment) {
        if comment.cstyle {
            self.push_line(&format!("/*{}*/", comment.text()));
        } else {
            for line in &comment.lines {
                self.push_line(&format!("//{line}"));
            }
        }
    }

    fn print_doc(&mut self, doc: Option<&Comment>) {
        if let Some(doc) = doc {
            self.print_comment(doc);
        }
    }

    fn inline_suffix(comment: &Comment) -> String {
        if comment.cstyle {
            format!(" /*{}*/", comment.text())
        } else {
            format!(" //{}", comment.text())
        }
    }

    /// Emit the children of a container, grouping alignable runs.
    fn print_elements(&mut self, ast: &Ast, ids: &[NodeId]) {
        let mut prev_line: Option<u32> = None;
        let mut i = 0;
        while i < ids.len() {
            let id = ids[i];
            let start = start_line(ast, id);
            if let Some(prev) = prev_line {
                if start > prev + 1 {
                    self.out.push('\n');
                }
            }
            if let Some(cells) = row_cells(ast.node(id)) {
                let (block_ids, rows, last_line) =
                    collect_block(ast, ids, i, cells);
                let widths = column_widths(&rows);
                for (block_id, row) in block_ids.iter().zip(&rows) {
                    let node = ast.node(*block_id);
                    self.print_doc(node.doc());
                    let mut text = render_row(row, &widths);
                    if let Some(comment) = inline_of(node) {
                        text.push_str(&Self::inline_suffix(comment));
                    }
                    self.push_line(&text);
                }
                prev_line = Some(last_line);
                i += block_ids.len();
            } else {
                ast.accept(id, self);
                prev_line = Some(end_line_of(ast.node(id)));
                i += 1;
            }
        }
    }

    fn print_single_row<C: Columns>(&mut self, node: &C, inline: Option<&Comment>) {
        let cells = node.columns();
        let widths = column_widths(std::slice::from_ref(&cells));
        let mut text = render_row(&cells, &widths);
        if let Some(comment) = inline {
            text.push_str(&Self::inline_suffix(comment));
        }
        self.push_line(&text);
    }

    fn open_block(&mut self, header: &str) {
        self.push_line(&format!("{header} {{"));
        self.indent += 1;
    }

    fn close_block(&mut self) {
        self.indent -= 1;
        self.push_line("}");
    }

    fn rpc_signature(rpc: &RpcDecl) -> String {
        let request_stream = if rpc.streams_request { "stream " } else { "" };
        let returns_stream = if rpc.streams_returns { "stream " } else { "" };
        format!(
            "rpc {} ({}{}) returns ({}{})",
            rpc.name,
            request_stream,
            rpc.request_type,
            returns_stream,
            rpc.returns_type
        )
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Visitor for Printer {
    fn visit_proto(&mut self, ast: &Ast, id: NodeId, _node: &Proto) {
        self.print_elements(ast, ast.children(id));
    }

    fn visit_syntax(&mut self, _ast: &Ast, _id: NodeId, node: &Syntax) {
        self.print_doc(node.doc.as_ref());
        let mut text = format!("syntax = \"{}\";", node.value);
        if let Some(comment) = &node.inline_comment {
            text.push_str(&Self::inline_suffix(comment));
        }
        self.push_line(&text);
    }

    fn visit_package(&mut self, _ast: &Ast, _id: NodeId, node: &Package) {
        self.print_doc(node.doc.as_ref());
        let mut text = format!("package {};", node.name);
        if let Some(comment) = &node.inline_comment {
            text.push_str(&Self::inline_suffix(comment));
        }
        self.push_line(&text);
    }

    fn visit_import(&mut self, _ast: &Ast, _id: NodeId, node: &Import) {
        self.print_doc(node.doc.as_ref());
        self.print_single_row(node, node.inline_comment.as_ref());
    }

    fn visit_option(&mut self, _ast: &Ast, _id: NodeId, node: &ProtoOption) {
        self.print_doc(node.doc.as_ref());
        self.print_single_row(node, node.inline_comment.as_ref());
    }

    fn visit_message(&mut self, ast: &Ast, id: NodeId, node: &MessageDecl) {
        self.print_doc(node.doc.as_ref());
        let keyword = if node.is_extend { "extend" } else { "message" };
        self.open_block(&format!("{keyword} {}", node.name));
        self.print_elements(ast, ast.children(id));
        self.close_block();
    }

    fn visit_field(&mut self, _ast: &Ast, _id: NodeId, node: &FieldDecl) {
        self.print_doc(node.doc.as_ref());
        self.print_single_row(node, node.inline_comment.as_ref());
    }

    fn visit_map_field(
        &mut self,
        _ast: &Ast,
        _id: NodeId,
        node: &MapFieldDecl,
    ) {
        self.print_doc(node.doc.as_ref());
        self.print_single_row(node, node.inline_comment.as_ref());
    }

    fn visit_oneof(&mut self, ast: &Ast, id: NodeId, node: &OneofDecl) {
        self.print_doc(node.doc.as_ref());
        self.open_block(&format!("oneof {}", node.name));
        self.print_elements(ast, ast.children(id));
        self.close_block();
    }

    fn visit_group(&mut self, ast: &Ast, id: NodeId, node: &GroupDecl) {
        self.print_doc(node.doc.as_ref());
        let label = node.label.keyword();
        let prefix = if label.is_empty() {
            String::new()
        } else {
            format!("{label} ")
        };
        self.open_block(&format!(
            "{prefix}group {} = {}",
            node.name, node.sequence
        ));
        self.print_elements(ast, ast.children(id));
        self.close_block();
    }

    fn visit_enum(&mut self, ast: &Ast, id: NodeId, node: &EnumDecl) {
        self.print_doc(node.doc.as_ref());
        self.open_block(&format!("enum {}", node.name));
        self.print_elements(ast, ast.children(id));
        self.close_block();
    }

    fn visit_enum_value(&mut self, _ast: &Ast, _id: NodeId, node: &EnumValue) {
        self.print_doc(node.doc.as_ref());
        self.print_single_row(node, node.inline_comment.as_ref());
    }

    fn visit_service(&mut self, ast: &Ast, id: NodeId, node: &ServiceDecl) {
        self.print_doc(node.doc.as_ref());
        self.open_block(&format!("service {}", node.name));
        self.print_elements(ast, ast.children(id));
        self.close_block();
    }

    fn visit_rpc(&mut self, _ast: &Ast, _id: NodeId, node: &RpcDecl) {
        self.print_doc(node.doc.as_ref());
        let signature = Self::rpc_signature(node);
        if node.options.is_empty() && node.trailing_comment.is_none() {
            let mut text = format!("{signature};");
            if let Some(comment) = &node.inline_comment {
                text.push_str(&Self::inline_suffix(comment));
            }
            self.push_line(&text);
            return;
        }
        self.open_block(&signature);
        for option in &node.options {
            self.print_doc(option.doc.as_ref());
            let mut text =
                format!("option {} = {};", option.name, option.value);
            if let Some(comment) = &option.inline_comment {
                text.push_str(&Self::inline_suffix(comment));
            }
            self.push_line(&text);
        }
        if let Some(comment) = &node.trailing_comment {
            self.print_comment(comment);
        }
        self.close_block();
        if let Some(comment) = &node.inline_comment {
            // body form: the comment followed the closing brace
            let suffix = Self::inline_suffix(comment);
            self.out.pop();
            self.out.push_str(&suffix);
            self.out.push('\n');
        }
    }

    fn visit_reserved(&mut self, _ast: &Ast, _id: NodeId, node: &Reserved) {
        self.print_doc(node.doc.as_ref());
        let body = if node.field_names.is_empty() {
            let ranges: Vec<String> =
                node.ranges.iter().map(ToString::to_string).collect();
            ranges.join(", ")
        } else {
            let names: Vec<String> = node
                .field_names
                .iter()
                .map(|n| format!("\"{n}\""))
                .collect();
            names.join(", ")
        };
        let mut text = format!("reserved {body};");
        if let Some(comment) = &node.inline_comment {
            text.push_str(&Self::inline_suffix(comment));
        }
        self.push_line(&text);
    }

    fn visit_extensions(
        &mut self,
        _ast: &Ast,
        _id: NodeId,
        node: &Extensions,
    ) {
        self.print_doc(node.doc.as_ref());
        let ranges: Vec<String> =
            node.ranges.iter().map(ToString::to_string).collect();
        let mut text = format!("extensions {};", ranges.join(", "));
        if let Some(comment) = &node.inline_comment {
            text.push_str(&Self::inline_suffix(comment));
        }
        self.push_line(&text);
    }

    fn visit_comment(&mut self, _ast: &Ast, _id: NodeId, node: &Comment) {
        self.print_comment(node);
    }
}

/// Render a tree as aligned `.proto` text.
#[must_use]
pub fn print(ast: &Ast) -> String {
    Printer::new().print(ast)
}

/// Alignment cells for a node, when its kind prints as a row.
fn row_cells(node: &Node) -> Option<Vec<Aligned>> {
    match node {
        Node::Import(n) => Some(n.columns()),
        Node::Option(n) => Some(n.columns()),
        Node::Field(n) => Some(n.columns()),
        Node::MapField(n) => Some(n.columns()),
        Node::EnumValue(n) => Some(n.columns()),
        _ => None,
    }
}

fn inline_of(node: &Node) -> Option<&Comment> {
    match node {
        Node::Import(n) => n.inline_comment.as_ref(),
        Node::Option(n) => n.inline_comment.as_ref(),
        Node::Field(n) => n.inline_comment.as_ref(),
        Node::MapField(n) => n.inline_comment.as_ref(),
        Node::EnumValue(n) => n.inline_comment.as_ref(),
        _ => None,
    }
}

/// Last source line occupied by a node: the closing brace line for
/// body-carrying kinds, the final comment line for comments, and the
/// position line for single-line statements.
fn end_line_of(node: &Node) -> u32 {
    match node {
        Node::Message(n) => n.end_line,
        Node::Oneof(n) => n.end_line,
        Node::Group(n) => n.end_line,
        Node::Enum(n) => n.end_line,
        Node::Service(n) => n.end_line,
        Node::Rpc(n) => n.end_line,
        Node::Comment(n) => n.last_line(),
        _ => node.position().line,
    }
}

/// First printed line of a node: its doc's line when one is attached.
fn start_line(ast: &Ast, id: NodeId) -> u32 {
    let node = ast.node(id);
    node.doc()
        .map_or(node.position().line, |doc| doc.position.line)
}

/// Extend an alignable run while kind, column count, and line
/// adjacency hold. Returns the block ids, their rows, and the line of
/// the last row.
fn collect_block(
    ast: &Ast,
    ids: &[NodeId],
    from: usize,
    first: Vec<Aligned>,
) -> (Vec<NodeId>, Vec<Vec<Aligned>>, u32) {
    let kind = ast.node(ids[from]).kind_name();
    let count = first.len();
    let mut block_ids = vec![ids[from]];
    let mut rows = vec![first];
    let mut last_line = ast.node(ids[from]).position().line;
    for &next in &ids[from + 1..] {
        let node = ast.node(next);
        if node.kind_name() != kind {
            break;
        }
        let Some(cells) = row_cells(node) else { break };
        if cells.len() != count || start_line(ast, next) > last_line + 1 {
            break;
        }
        last_line = node.position().line;
        block_ids.push(next);
        rows.push(cells);
    }
    (block_ids, rows, last_line)
}
