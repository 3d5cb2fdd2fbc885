//! Double-dispatch traversal over the syntax tree.
//!
//! `Visitor` declares one hook per node kind, each defaulting to a
//! no-op, so implementations override only the kinds they care about.
//! Dispatch happens through [`Ast::accept`], which matches on the node
//! kind and calls the matching hook.
//!
//! Containers do not descend automatically. A visitor that wants to
//! walk a subtree iterates `ast.children(id)` itself and calls
//! `accept` per child, which keeps pre-order, post-order, and filtered
//! walks all expressible with the same trait.
//!
//! ## Examples
//! Count enum declarations anywhere in a file.
//! ```
//! # use proto_rs::core::parser::ast::{Ast, EnumDecl, NodeId};
//! # use proto_rs::core::parser::visitor::Visitor;
//! # use proto_rs::core::parser::parse_source;
//! struct EnumCounter {
//!     count: usize,
//! }
//!
//! impl Visitor for EnumCounter {
//!     fn visit_enum(&mut self, ast: &Ast, id: NodeId, _decl: &EnumDecl) {
//!         self.count += 1;
//!         for child in ast.children(id) {
//!             ast.accept(*child, self);
//!         }
//!     }
//!
//!     fn visit_message(
//!         &mut self,
//!         ast: &Ast,
//!         id: NodeId,
//!         _decl: &proto_rs::core::parser::ast::MessageDecl,
//!     ) {
//!         for child in ast.children(id) {
//!             ast.accept(*child, self);
//!         }
//!     }
//! }
//!
//! let ast = parse_source("message M { enum E { A = 0; } }").unwrap();
//! let mut counter = EnumCounter { count: 0 };
//! for child in ast.children(ast.root_id()) {
//!     ast.accept(*child, &mut counter);
//! }
//! assert_eq!(counter.count, 1);
//! ```

use super::ast::{
    Ast, Comment, EnumDecl, EnumValue, Extensions, FieldDecl, GroupDecl,
    Import, MapFieldDecl, MessageDecl, Node, NodeId, OneofDecl, Package,
    Proto, ProtoOption, Reserved, RpcDecl, ServiceDecl, Syntax,
};

/// One hook per node kind, all defaulting to no-ops.
#[allow(unused_variables)]
pub trait Visitor {
    /// Called for the file root.
    fn visit_proto(&mut self, ast: &Ast, id: NodeId, node: &Proto) {}

    /// Called for a `syntax` statement.
    fn visit_syntax(&mut self, ast: &Ast, id: NodeId, node: &Syntax) {}

    /// Called for a `package` statement.
    fn visit_package(&mut self, ast: &Ast, id: NodeId, node: &Package) {}

    /// Called for an `import` statement.
    fn visit_import(&mut self, ast: &Ast, id: NodeId, node: &Import) {}

    /// Called for an `option` statement.
    fn visit_option(&mut self, ast: &Ast, id: NodeId, node: &ProtoOption) {}

    /// Called for a `message` or `extend` declaration.
    fn visit_message(&mut self, ast: &Ast, id: NodeId, node: &MessageDecl) {}

    /// Called for a normal field.
    fn visit_field(&mut self, ast: &Ast, id: NodeId, node: &FieldDecl) {}

    /// Called for a `map<K, V>` field.
    fn visit_map_field(&mut self, ast: &Ast, id: NodeId, node: &MapFieldDecl) {}

    /// Called for a `oneof` declaration.
    fn visit_oneof(&mut self, ast: &Ast, id: NodeId, node: &OneofDecl) {}

    /// Called for a proto2 `group`.
    fn visit_group(&mut self, ast: &Ast, id: NodeId, node: &GroupDecl) {}

    /// Called for an `enum` declaration.
    fn visit_enum(&mut self, ast: &Ast, id: NodeId, node: &EnumDecl) {}

    /// Called for an enum value.
    fn visit_enum_value(&mut self, ast: &Ast, id: NodeId, node: &EnumValue) {}

    /// Called for a `service` declaration.
    fn visit_service(&mut self, ast: &Ast, id: NodeId, node: &ServiceDecl) {}

    /// Called for an `rpc` declaration.
    fn visit_rpc(&mut self, ast: &Ast, id: NodeId, node: &RpcDecl) {}

    /// Called for a `reserved` statement.
    fn visit_reserved(&mut self, ast: &Ast, id: NodeId, node: &Reserved) {}

    /// Called for an `extensions` statement.
    fn visit_extensions(&mut self, ast: &Ast, id: NodeId, node: &Extensions) {}

    /// Called for a standalone comment element.
    fn visit_comment(&mut self, ast: &Ast, id: NodeId, node: &Comment) {}
}

impl Ast {
    /// Dispatch one node to the hook matching its kind.
    pub fn accept<V: Visitor + ?Sized>(&self, id: NodeId, visitor: &mut V) {
        match self.node(id) {
            Node::Proto(n) => visitor.visit_proto(self, id, n),
            Node::Syntax(n) => visitor.visit_syntax(self, id, n),
            Node::Package(n) => visitor.visit_package(self, id, n),
            Node::Import(n) => visitor.visit_import(self, id, n),
            Node::Option(n) => visitor.visit_option(self, id, n),
            Node::Message(n) => visitor.visit_message(self, id, n),
            Node::Field(n) => visitor.visit_field(self, id, n),
            Node::MapField(n) => visitor.visit_map_field(self, id, n),
            Node::Oneof(n) => visitor.visit_oneof(self, id, n),
            Node::Group(n) => visitor.visit_group(self, id, n),
            Node::Enum(n) => visitor.visit_enum(self, id, n),
            Node::EnumValue(n) => visitor.visit_enum_value(self, id, n),
            Node::Service(n) => visitor.visit_service(self, id, n),
            Node::Rpc(n) => visitor.visit_rpc(self, id, n),
            Node::Reserved(n) => visitor.visit_reserved(self, id, n),
            Node::Extensions(n) => visitor.visit_extensions(self, id, n),
            Node::Comment(n) => visitor.visit_comment(self, id, n),
        }
    }
}
