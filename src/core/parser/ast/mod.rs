//! Abstract syntax tree for `.proto` files.
//!
//! The parser produces a position-carrying AST stored in an arena. Nodes
//! live in a flat `Vec` inside `Ast`; containers hold their children as
//! ordered `NodeId` lists and every node carries a non-owning `NodeId`
//! back-reference to its parent. Ownership therefore runs strictly
//! parent → children, while upward navigation (qualified names) walks
//! the parent ids.
//!
//! # Model
//! - `Node` is a flat sum type over the seventeen element kinds of a
//!   proto file, from the `Proto` root down to bare `Comment`s.
//! - Capabilities are expressed as small traits -- `HasPosition`,
//!   `Parented`, `Documented`, `NodeLabel`, `ElementContainer`,
//!   `InlineCommentable` -- derived per variant struct by `ast_derive`
//!   where they are mechanical.
//! - Element order inside a container exactly mirrors source order,
//!   including standalone comments that were never claimed as docs.
//!
//! All nodes are created during a single parse pass. The only mutations
//! after creation are the comment-claiming moves that complete before
//! the enclosing container's parse routine returns; consumers of a
//! finished `Ast` only read.
//!
//! ## Examples
//! Build a tiny tree by hand and inspect the parent link.
//! ```
//! # use proto_rs::core::parser::ast::{Ast, EnumDecl, Node};
//! # use proto_rs::core::scanner::Position;
//! let mut ast = Ast::new();
//! let root = ast.root_id();
//! let mut decl = EnumDecl::new(Position::new(1, 1, 0));
//! decl.name = "Role".into();
//! let id = ast.alloc(Node::Enum(decl));
//! ast.append(root, id);
//! assert_eq!(ast.node(id).parent(), Some(root));
//! assert_eq!(ast.root().elements.len(), 1);
//! ```

use std::fmt;

use crate::core::scanner::Position;
use crate::{AstContainer, AstLeaf, NodeKindName};

/// Marker trait for nodes that expose a source position.
pub trait HasPosition {
    /// Return the source position of this node.
    fn position(&self) -> &Position;
}

/// Upward navigation through the non-owning parent back-reference.
pub trait Parented {
    /// The enclosing container node, or `None` for the root.
    fn parent(&self) -> Option<NodeId>;

    /// Record the enclosing container. Assigned exactly once, when the
    /// node is appended.
    fn set_parent(&mut self, parent: NodeId);
}

/// Nodes that can carry a leading documentation comment.
pub trait Documented {
    /// The leading doc comment claimed for this node, if any.
    fn doc(&self) -> Option<&Comment>;

    /// Attach a claimed doc comment.
    fn set_doc(&mut self, doc: Comment);
}

/// Stable node-kind name for diagnostics and debugging.
pub trait NodeLabel {
    /// Return the node kind name.
    fn node_label(&self) -> &'static str;
}

/// Capability of owning an ordered child sequence.
///
/// Held by `Proto`, `MessageDecl`, `EnumDecl`, `ServiceDecl`,
/// `OneofDecl`, and `GroupDecl`. Insertion order is semantically
/// meaningful and preserved for re-printing.
pub trait ElementContainer {
    /// Children in source order.
    fn elements(&self) -> &[NodeId];

    /// Mutable access to the child sequence, used during parsing only.
    fn elements_mut(&mut self) -> &mut Vec<NodeId>;
}

/// Nodes that can claim a trailing same-line comment.
pub trait InlineCommentable {
    /// Attach a trailing inline comment.
    fn set_inline_comment(&mut self, comment: Comment);
}

/// Index of a node in the `Ast` arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A source comment: one or more consecutive comment lines.
///
/// `cstyle` distinguishes `/* */` comments from `//` comments. A
/// comment is a tree element only until claimed as some sibling's doc
/// or inline comment; unclaimed comments (for example at the end of a
/// block) remain elements in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Comment text lines, markers stripped, leading whitespace kept.
    pub lines: Vec<String>,
    /// True for `/* */` comments, false for `//` comments.
    pub cstyle: bool,
    /// Position of the comment opener.
    pub position: Position,
    /// The enclosing container while the comment is an element.
    pub parent: Option<NodeId>,
}

impl Comment {
    /// Create a comment from a single raw token text.
    ///
    /// Block comment text may span lines; it is split so `lines` always
    /// holds one entry per source line.
    #[must_use]
    pub fn new(position: Position, text: &str, cstyle: bool) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
            cstyle,
            position,
            parent: None,
        }
    }

    /// Line number of the last line of this comment.
    #[must_use]
    pub fn last_line(&self) -> u32 {
        let extra = u32::try_from(self.lines.len().saturating_sub(1)).unwrap_or(0);
        self.position.line + extra
    }

    /// The comment text with lines rejoined.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl HasPosition for Comment {
    fn position(&self) -> &Position {
        &self.position
    }
}

impl Parented for Comment {
    fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    fn set_parent(&mut self, parent: NodeId) {
        debug_assert!(
            self.parent.is_none(),
            "parent is assigned exactly once, at append time"
        );
        self.parent = Some(parent);
    }
}

impl NodeLabel for Comment {
    fn node_label(&self) -> &'static str {
        "Comment"
    }
}

/// The file root: an ordered sequence of top-level elements.
#[derive(Debug, Clone, AstContainer)]
pub struct Proto {
    /// Source filename, when known to the caller.
    pub filename: Option<String>,
    /// Top-level elements in source order.
    pub elements: Vec<NodeId>,
    /// Unused on the root; leading file comments stay elements.
    pub doc: Option<Comment>,
    /// Start of input.
    pub position: Position,
    /// Always `None`; the root has no parent.
    pub parent: Option<NodeId>,
}

impl Proto {
    /// Create an empty file root.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            filename: None,
            elements: Vec::new(),
            doc: None,
            position,
            parent: None,
        }
    }
}

/// A `syntax = "proto3";` statement.
#[derive(Debug, Clone, AstLeaf)]
pub struct Syntax {
    /// The declared syntax level, e.g. `proto2` or `proto3`.
    pub value: String,
    /// Leading doc comment.
    pub doc: Option<Comment>,
    /// Trailing same-line comment.
    pub inline_comment: Option<Comment>,
    /// Position of the `syntax` keyword.
    pub position: Position,
    /// Enclosing container.
    pub parent: Option<NodeId>,
}

impl Syntax {
    /// Create an empty syntax statement.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            value: String::new(),
            doc: None,
            inline_comment: None,
            position,
            parent: None,
        }
    }
}

/// A `package a.b.c;` statement.
#[derive(Debug, Clone, AstLeaf)]
pub struct Package {
    /// The dotted package name.
    pub name: String,
    /// Leading doc comment.
    pub doc: Option<Comment>,
    /// Trailing same-line comment.
    pub inline_comment: Option<Comment>,
    /// Position of the `package` keyword.
    pub position: Position,
    /// Enclosing container.
    pub parent: Option<NodeId>,
}

impl Package {
    /// Create an empty package statement.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            name: String::new(),
            doc: None,
            inline_comment: None,
            position,
            parent: None,
        }
    }
}

/// Visibility modifier on an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportKind {
    /// Plain `import`.
    #[default]
    Default,
    /// `import weak`.
    Weak,
    /// `import public`.
    Public,
}

/// An `import "other.proto";` statement.
#[derive(Debug, Clone, AstLeaf)]
pub struct Import {
    /// Import visibility modifier.
    pub kind: ImportKind,
    /// The imported file, quotes stripped.
    pub filename: String,
    /// Leading doc comment.
    pub doc: Option<Comment>,
    /// Trailing same-line comment.
    pub inline_comment: Option<Comment>,
    /// Position of the `import` keyword.
    pub position: Position,
    /// Enclosing container.
    pub parent: Option<NodeId>,
}

impl Import {
    /// Create an empty import statement.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            kind: ImportKind::Default,
            filename: String::new(),
            doc: None,
            inline_comment: None,
            position,
            parent: None,
        }
    }
}

/// A scalar constant as written in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralValue {
    /// Source text (unquoted for strings).
    pub source: String,
    /// Whether the constant was a quoted string.
    pub is_string: bool,
    /// Position of the constant.
    pub position: Position,
}

/// A `name: value` entry inside an aggregate constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedConstant {
    /// Entry name.
    pub name: String,
    /// Entry value.
    pub value: Constant,
}

/// An option constant: scalar, list, or aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constant {
    /// A string, number, boolean, or identifier constant.
    Scalar(LiteralValue),
    /// A bracketed list of constants.
    List(Vec<Constant>),
    /// A braced aggregate of named constants.
    Aggregate(Vec<NamedConstant>),
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Scalar(lit) => {
                if lit.is_string {
                    write!(f, "\"{}\"", lit.source)
                } else {
                    write!(f, "{}", lit.source)
                }
            }
            Constant::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Constant::Aggregate(entries) => {
                write!(f, "{{")?;
                for entry in entries {
                    write!(f, " {}: {}", entry.name, entry.value)?;
                }
                write!(f, " }}")
            }
        }
    }
}

/// An option: a standalone `option` statement or a bracket-embedded
/// modifier on a field, enum value, or rpc.
#[derive(Debug, Clone, AstLeaf)]
pub struct ProtoOption {
    /// Option name, including any parenthesized extension path.
    pub name: String,
    /// Option constant.
    pub value: Constant,
    /// True when the option was written inside `[ ... ]` brackets.
    pub is_embedded: bool,
    /// Leading doc comment.
    pub doc: Option<Comment>,
    /// Trailing same-line comment.
    pub inline_comment: Option<Comment>,
    /// Position of the option name (or `option` keyword).
    pub position: Position,
    /// Enclosing container.
    pub parent: Option<NodeId>,
}

impl ProtoOption {
    /// Create an empty option.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            name: String::new(),
            value: Constant::Scalar(LiteralValue {
                source: String::new(),
                is_string: false,
                position: position.clone(),
            }),
            is_embedded: false,
            doc: None,
            inline_comment: None,
            position,
            parent: None,
        }
    }
}

/// A `message` (or `extend`) declaration with a braced body.
#[derive(Debug, Clone, AstContainer)]
pub struct MessageDecl {
    /// The message name (or extended type name for `extend`).
    pub name: String,
    /// True when declared with the `extend` keyword.
    pub is_extend: bool,
    /// Body elements in source order.
    pub elements: Vec<NodeId>,
    /// Leading doc comment.
    pub doc: Option<Comment>,
    /// Position of the introducing keyword.
    pub position: Position,
    /// Line of the closing brace, recorded when the body ends.
    pub end_line: u32,
    /// Enclosing container.
    pub parent: Option<NodeId>,
}

impl MessageDecl {
    /// Create an empty message declaration.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            name: String::new(),
            is_extend: false,
            elements: Vec::new(),
            doc: None,
            end_line: position.line,
            position,
            parent: None,
        }
    }
}

/// Cardinality label on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldLabel {
    /// No label (proto3 singular, oneof members).
    #[default]
    Unlabeled,
    /// `optional`.
    Optional,
    /// `required` (proto2).
    Required,
    /// `repeated`.
    Repeated,
}

impl FieldLabel {
    /// Source keyword for this label, empty when unlabeled.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            FieldLabel::Unlabeled => "",
            FieldLabel::Optional => "optional",
            FieldLabel::Required => "required",
            FieldLabel::Repeated => "repeated",
        }
    }
}

/// A normal message or oneof field.
#[derive(Debug, Clone, AstLeaf)]
pub struct FieldDecl {
    /// Field name.
    pub name: String,
    /// Field type as written (possibly dotted).
    pub type_name: String,
    /// Field number.
    pub sequence: i32,
    /// Cardinality label.
    pub label: FieldLabel,
    /// Bracket-embedded options.
    pub options: Vec<ProtoOption>,
    /// Leading doc comment.
    pub doc: Option<Comment>,
    /// Trailing same-line comment.
    pub inline_comment: Option<Comment>,
    /// Position of the first field token.
    pub position: Position,
    /// Enclosing container.
    pub parent: Option<NodeId>,
}

impl FieldDecl {
    /// Create an empty field.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            name: String::new(),
            type_name: String::new(),
            sequence: 0,
            label: FieldLabel::Unlabeled,
            options: Vec::new(),
            doc: None,
            inline_comment: None,
            position,
            parent: None,
        }
    }
}

/// A `map<K, V>` field.
#[derive(Debug, Clone, AstLeaf)]
pub struct MapFieldDecl {
    /// Field name.
    pub name: String,
    /// Map key type.
    pub key_type: String,
    /// Map value type.
    pub value_type: String,
    /// Field number.
    pub sequence: i32,
    /// Bracket-embedded options.
    pub options: Vec<ProtoOption>,
    /// Leading doc comment.
    pub doc: Option<Comment>,
    /// Trailing same-line comment.
    pub inline_comment: Option<Comment>,
    /// Position of the `map` keyword.
    pub position: Position,
    /// Enclosing container.
    pub parent: Option<NodeId>,
}

impl MapFieldDecl {
    /// Create an empty map field.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            name: String::new(),
            key_type: String::new(),
            value_type: String::new(),
            sequence: 0,
            options: Vec::new(),
            doc: None,
            inline_comment: None,
            position,
            parent: None,
        }
    }
}

/// A `oneof` declaration.
#[derive(Debug, Clone, AstContainer)]
pub struct OneofDecl {
    /// The oneof name.
    pub name: String,
    /// Body elements (fields, options, comments) in source order.
    pub elements: Vec<NodeId>,
    /// Leading doc comment.
    pub doc: Option<Comment>,
    /// Position of the `oneof` keyword.
    pub position: Position,
    /// Line of the closing brace, recorded when the body ends.
    pub end_line: u32,
    /// Enclosing container.
    pub parent: Option<NodeId>,
}

impl OneofDecl {
    /// Create an empty oneof.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            name: String::new(),
            elements: Vec::new(),
            doc: None,
            end_line: position.line,
            position,
            parent: None,
        }
    }
}

/// A proto2 `group` field with a message body.
#[derive(Debug, Clone, AstContainer)]
pub struct GroupDecl {
    /// The group name.
    pub name: String,
    /// Field number.
    pub sequence: i32,
    /// Cardinality label.
    pub label: FieldLabel,
    /// Body elements in source order.
    pub elements: Vec<NodeId>,
    /// Leading doc comment.
    pub doc: Option<Comment>,
    /// Position of the first group token.
    pub position: Position,
    /// Line of the closing brace, recorded when the body ends.
    pub end_line: u32,
    /// Enclosing container.
    pub parent: Option<NodeId>,
}

impl GroupDecl {
    /// Create an empty group.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            name: String::new(),
            sequence: 0,
            label: FieldLabel::Unlabeled,
            elements: Vec::new(),
            doc: None,
            end_line: position.line,
            position,
            parent: None,
        }
    }
}

/// An `enum` declaration.
#[derive(Debug, Clone, AstContainer)]
pub struct EnumDecl {
    /// The enum name.
    pub name: String,
    /// Body elements (values, options, comments) in source order.
    pub elements: Vec<NodeId>,
    /// Leading doc comment.
    pub doc: Option<Comment>,
    /// Position of the `enum` keyword.
    pub position: Position,
    /// Line of the closing brace, recorded when the body ends.
    pub end_line: u32,
    /// Enclosing container.
    pub parent: Option<NodeId>,
}

impl EnumDecl {
    /// Create an empty enum declaration.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            name: String::new(),
            elements: Vec::new(),
            doc: None,
            end_line: position.line,
            position,
            parent: None,
        }
    }
}

/// A value inside an enum body: `NAME = tag [option];`.
#[derive(Debug, Clone, AstLeaf)]
pub struct EnumValue {
    /// Value name.
    pub name: String,
    /// Signed numeric tag.
    pub integer: i32,
    /// The single bracket-embedded option, if present.
    pub value_option: Option<ProtoOption>,
    /// Leading doc comment.
    pub doc: Option<Comment>,
    /// Trailing same-line comment.
    pub inline_comment: Option<Comment>,
    /// Position of the value name.
    pub position: Position,
    /// Enclosing container.
    pub parent: Option<NodeId>,
}

impl EnumValue {
    /// Create an empty enum value.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            name: String::new(),
            integer: 0,
            value_option: None,
            doc: None,
            inline_comment: None,
            position,
            parent: None,
        }
    }
}

/// A `service` declaration.
#[derive(Debug, Clone, AstContainer)]
pub struct ServiceDecl {
    /// The service name.
    pub name: String,
    /// Body elements (rpcs, options, comments) in source order.
    pub elements: Vec<NodeId>,
    /// Leading doc comment.
    pub doc: Option<Comment>,
    /// Position of the `service` keyword.
    pub position: Position,
    /// Line of the closing brace, recorded when the body ends.
    pub end_line: u32,
    /// Enclosing container.
    pub parent: Option<NodeId>,
}

impl ServiceDecl {
    /// Create an empty service declaration.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            name: String::new(),
            elements: Vec::new(),
            doc: None,
            end_line: position.line,
            position,
            parent: None,
        }
    }
}

/// An `rpc` declaration inside a service.
#[derive(Debug, Clone, AstLeaf)]
pub struct RpcDecl {
    /// Method name.
    pub name: String,
    /// Request message type.
    pub request_type: String,
    /// True for `stream` requests.
    pub streams_request: bool,
    /// Response message type.
    pub returns_type: String,
    /// True for `stream` responses.
    pub streams_returns: bool,
    /// Options from the optional `{ option ...; }` body.
    pub options: Vec<ProtoOption>,
    /// Unclaimed comment sitting before the body's closing brace.
    pub trailing_comment: Option<Comment>,
    /// Leading doc comment.
    pub doc: Option<Comment>,
    /// Trailing same-line comment.
    pub inline_comment: Option<Comment>,
    /// Position of the `rpc` keyword.
    pub position: Position,
    /// Line of the terminating `;` or of the body's closing brace.
    pub end_line: u32,
    /// Enclosing container.
    pub parent: Option<NodeId>,
}

impl RpcDecl {
    /// Create an empty rpc.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            name: String::new(),
            request_type: String::new(),
            streams_request: false,
            returns_type: String::new(),
            streams_returns: false,
            options: Vec::new(),
            trailing_comment: None,
            doc: None,
            inline_comment: None,
            end_line: position.line,
            position,
            parent: None,
        }
    }
}

/// A numeric tag range in `reserved` and `extensions` statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagRange {
    /// First tag in the range.
    pub from: i32,
    /// Last tag, when the range was written `from to N`.
    pub to: Option<i32>,
    /// True when the range was written `from to max`.
    pub max: bool,
}

impl fmt::Display for TagRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.from)?;
        if self.max {
            write!(f, " to max")
        } else if let Some(to) = self.to {
            write!(f, " to {to}")
        } else {
            Ok(())
        }
    }
}

/// A `reserved` statement: tag ranges or field names.
#[derive(Debug, Clone, AstLeaf)]
pub struct Reserved {
    /// Reserved tag ranges.
    pub ranges: Vec<TagRange>,
    /// Reserved field names.
    pub field_names: Vec<String>,
    /// Leading doc comment.
    pub doc: Option<Comment>,
    /// Trailing same-line comment.
    pub inline_comment: Option<Comment>,
    /// Position of the `reserved` keyword.
    pub position: Position,
    /// Enclosing container.
    pub parent: Option<NodeId>,
}

impl Reserved {
    /// Create an empty reserved statement.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            ranges: Vec::new(),
            field_names: Vec::new(),
            doc: None,
            inline_comment: None,
            position,
            parent: None,
        }
    }
}

/// A proto2 `extensions` statement.
#[derive(Debug, Clone, AstLeaf)]
pub struct Extensions {
    /// Extension tag ranges.
    pub ranges: Vec<TagRange>,
    /// Leading doc comment.
    pub doc: Option<Comment>,
    /// Trailing same-line comment.
    pub inline_comment: Option<Comment>,
    /// Position of the `extensions` keyword.
    pub position: Position,
    /// Enclosing container.
    pub parent: Option<NodeId>,
}

impl Extensions {
    /// Create an empty extensions statement.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            ranges: Vec::new(),
            doc: None,
            inline_comment: None,
            position,
            parent: None,
        }
    }
}

macro_rules! inline_commentable {
    ($($ty:ty),+ $(,)?) => {
        $(impl InlineCommentable for $ty {
            fn set_inline_comment(&mut self, comment: Comment) {
                self.inline_comment = Some(comment);
            }
        })+
    };
}

inline_commentable!(
    Syntax,
    Package,
    Import,
    ProtoOption,
    FieldDecl,
    MapFieldDecl,
    EnumValue,
    RpcDecl,
    Reserved,
    Extensions,
);

/// A node in the tree: flat sum type over every element kind.
#[derive(Debug, Clone, NodeKindName)]
pub enum Node {
    /// The file root.
    Proto(Proto),
    /// A `syntax` statement.
    Syntax(Syntax),
    /// A `package` statement.
    Package(Package),
    /// An `import` statement.
    Import(Import),
    /// An `option` statement.
    Option(ProtoOption),
    /// A `message` or `extend` declaration.
    Message(MessageDecl),
    /// A normal field.
    Field(FieldDecl),
    /// A `map<K, V>` field.
    MapField(MapFieldDecl),
    /// A `oneof` declaration.
    Oneof(OneofDecl),
    /// A proto2 `group`.
    Group(GroupDecl),
    /// An `enum` declaration.
    Enum(EnumDecl),
    /// An enum value.
    EnumValue(EnumValue),
    /// A `service` declaration.
    Service(ServiceDecl),
    /// An `rpc` declaration.
    Rpc(RpcDecl),
    /// A `reserved` statement.
    Reserved(Reserved),
    /// An `extensions` statement.
    Extensions(Extensions),
    /// A standalone comment element.
    Comment(Comment),
}

impl Node {
    /// Source position of the wrapped node.
    #[must_use]
    pub fn position(&self) -> &Position {
        match self {
            Node::Proto(n) => n.position(),
            Node::Syntax(n) => n.position(),
            Node::Package(n) => n.position(),
            Node::Import(n) => n.position(),
            Node::Option(n) => n.position(),
            Node::Message(n) => n.position(),
            Node::Field(n) => n.position(),
            Node::MapField(n) => n.position(),
            Node::Oneof(n) => n.position(),
            Node::Group(n) => n.position(),
            Node::Enum(n) => n.position(),
            Node::EnumValue(n) => n.position(),
            Node::Service(n) => n.position(),
            Node::Rpc(n) => n.position(),
            Node::Reserved(n) => n.position(),
            Node::Extensions(n) => n.position(),
            Node::Comment(n) => n.position(),
        }
    }

    /// Parent container of the wrapped node.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        match self {
            Node::Proto(n) => n.parent(),
            Node::Syntax(n) => n.parent(),
            Node::Package(n) => n.parent(),
            Node::Import(n) => n.parent(),
            Node::Option(n) => n.parent(),
            Node::Message(n) => n.parent(),
            Node::Field(n) => n.parent(),
            Node::MapField(n) => n.parent(),
            Node::Oneof(n) => n.parent(),
            Node::Group(n) => n.parent(),
            Node::Enum(n) => n.parent(),
            Node::EnumValue(n) => n.parent(),
            Node::Service(n) => n.parent(),
            Node::Rpc(n) => n.parent(),
            Node::Reserved(n) => n.parent(),
            Node::Extensions(n) => n.parent(),
            Node::Comment(n) => n.parent(),
        }
    }

    fn set_parent(&mut self, parent: NodeId) {
        match self {
            Node::Proto(n) => n.set_parent(parent),
            Node::Syntax(n) => n.set_parent(parent),
            Node::Package(n) => n.set_parent(parent),
            Node::Import(n) => n.set_parent(parent),
            Node::Option(n) => n.set_parent(parent),
            Node::Message(n) => n.set_parent(parent),
            Node::Field(n) => n.set_parent(parent),
            Node::MapField(n) => n.set_parent(parent),
            Node::Oneof(n) => n.set_parent(parent),
            Node::Group(n) => n.set_parent(parent),
            Node::Enum(n) => n.set_parent(parent),
            Node::EnumValue(n) => n.set_parent(parent),
            Node::Service(n) => n.set_parent(parent),
            Node::Rpc(n) => n.set_parent(parent),
            Node::Reserved(n) => n.set_parent(parent),
            Node::Extensions(n) => n.set_parent(parent),
            Node::Comment(n) => n.set_parent(parent),
        }
    }

    /// Record the line the wrapped node ends on, for kinds that span
    /// multiple lines.
    pub(crate) fn set_end_line(&mut self, line: u32) {
        match self {
            Node::Message(n) => n.end_line = line,
            Node::Oneof(n) => n.end_line = line,
            Node::Group(n) => n.end_line = line,
            Node::Enum(n) => n.end_line = line,
            Node::Service(n) => n.end_line = line,
            _ => {}
        }
    }

    /// Declared name of the wrapped node, where one exists.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Package(n) => Some(&n.name),
            Node::Option(n) => Some(&n.name),
            Node::Message(n) => Some(&n.name),
            Node::Field(n) => Some(&n.name),
            Node::MapField(n) => Some(&n.name),
            Node::Oneof(n) => Some(&n.name),
            Node::Group(n) => Some(&n.name),
            Node::Enum(n) => Some(&n.name),
            Node::EnumValue(n) => Some(&n.name),
            Node::Service(n) => Some(&n.name),
            Node::Rpc(n) => Some(&n.name),
            _ => None,
        }
    }

    /// Leading doc comment of the wrapped node, where one can exist.
    #[must_use]
    pub fn doc(&self) -> Option<&Comment> {
        match self {
            Node::Proto(n) => n.doc(),
            Node::Syntax(n) => n.doc(),
            Node::Package(n) => n.doc(),
            Node::Import(n) => n.doc(),
            Node::Option(n) => n.doc(),
            Node::Message(n) => n.doc(),
            Node::Field(n) => n.doc(),
            Node::MapField(n) => n.doc(),
            Node::Oneof(n) => n.doc(),
            Node::Group(n) => n.doc(),
            Node::Enum(n) => n.doc(),
            Node::EnumValue(n) => n.doc(),
            Node::Service(n) => n.doc(),
            Node::Rpc(n) => n.doc(),
            Node::Reserved(n) => n.doc(),
            Node::Extensions(n) => n.doc(),
            Node::Comment(_) => None,
        }
    }

    /// Children of the wrapped node, when it is a container.
    #[must_use]
    pub fn elements(&self) -> Option<&[NodeId]> {
        match self {
            Node::Proto(n) => Some(n.elements()),
            Node::Message(n) => Some(n.elements()),
            Node::Oneof(n) => Some(n.elements()),
            Node::Group(n) => Some(n.elements()),
            Node::Enum(n) => Some(n.elements()),
            Node::Service(n) => Some(n.elements()),
            _ => None,
        }
    }

    fn elements_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match self {
            Node::Proto(n) => Some(n.elements_mut()),
            Node::Message(n) => Some(n.elements_mut()),
            Node::Oneof(n) => Some(n.elements_mut()),
            Node::Group(n) => Some(n.elements_mut()),
            Node::Enum(n) => Some(n.elements_mut()),
            Node::Service(n) => Some(n.elements_mut()),
            _ => None,
        }
    }

    /// Attach a trailing inline comment, when the wrapped node can hold
    /// one. Returns the comment unchanged otherwise.
    ///
    /// # Errors
    /// The comment is handed back when this node kind has no inline
    /// comment slot, so the caller can retain it losslessly.
    pub fn set_inline_comment(
        &mut self,
        comment: Comment,
    ) -> Result<(), Comment> {
        match self {
            Node::Syntax(n) => n.set_inline_comment(comment),
            Node::Package(n) => n.set_inline_comment(comment),
            Node::Import(n) => n.set_inline_comment(comment),
            Node::Option(n) => n.set_inline_comment(comment),
            Node::Field(n) => n.set_inline_comment(comment),
            Node::MapField(n) => n.set_inline_comment(comment),
            Node::EnumValue(n) => n.set_inline_comment(comment),
            Node::Rpc(n) => n.set_inline_comment(comment),
            Node::Reserved(n) => n.set_inline_comment(comment),
            Node::Extensions(n) => n.set_inline_comment(comment),
            _ => return Err(comment),
        }
        Ok(())
    }
}

/// The arena-backed syntax tree.
///
/// Node zero is always the `Proto` root. Ids are handed out by `alloc`
/// and stay valid for the life of the tree.
#[derive(Debug, Clone)]
pub struct Ast {
    nodes: Vec<Node>,
}

impl Ast {
    /// Create a tree holding only an empty root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::Proto(Proto::new(Position::new(1, 1, 0)))],
        }
    }

    /// Id of the `Proto` root.
    #[must_use]
    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    /// The `Proto` root node.
    #[must_use]
    pub fn root(&self) -> &Proto {
        match &self.nodes[0] {
            Node::Proto(proto) => proto,
            _ => unreachable!("node zero is always the root"),
        }
    }

    pub(crate) fn root_mut(&mut self) -> &mut Proto {
        match &mut self.nodes[0] {
            Node::Proto(proto) => proto,
            _ => unreachable!("node zero is always the root"),
        }
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Number of nodes in the arena, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; the root is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Store a node, returning its id. The node is not yet an element
    /// of any container.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(node);
        id
    }

    /// Append a child to a container, assigning its parent.
    pub fn append(&mut self, container: NodeId, child: NodeId) {
        self.node_mut(child).set_parent(container);
        if let Some(elements) = self.node_mut(container).elements_mut() {
            elements.push(child);
        } else {
            debug_assert!(false, "append to a non-container node");
        }
    }

    /// Children of a node; empty for leaves.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).elements().unwrap_or(&[])
    }

    /// Detach and return the container's last element iff it is a bare
    /// comment.
    ///
    /// This is how a pending comment becomes the doc of the following
    /// declaration: the container loop calls this immediately before
    /// parsing each new child.
    pub fn take_trailing_comment(
        &mut self,
        container: NodeId,
    ) -> Option<Comment> {
        let last = *self.node(container).elements()?.last()?;
        if !matches!(self.node(last), Node::Comment(_)) {
            return None;
        }
        let _ = self.node_mut(container).elements_mut()?.pop();
        // A claimed comment is the newest allocation; reclaim its slot
        // when that holds, otherwise leave an unreferenced node behind.
        let mut comment = if last.index() == self.nodes.len() - 1 {
            match self.nodes.pop() {
                Some(Node::Comment(comment)) => comment,
                _ => unreachable!("checked to be a comment above"),
            }
        } else {
            match self.node(last) {
                Node::Comment(comment) => comment.clone(),
                _ => unreachable!("checked to be a comment above"),
            }
        };
        comment.parent = None;
        Some(comment)
    }

    /// Dotted name of a declaration within its enclosing declarations,
    /// computed by walking parent links upward.
    ///
    /// ## Examples
    /// `enum Kind` nested in `message Outer` yields `Outer.Kind`.
    #[must_use]
    pub fn qualified_name(&self, id: NodeId) -> Option<String> {
        let mut parts = vec![self.node(id).name()?.to_string()];
        let mut current = self.node(id).parent();
        while let Some(parent_id) = current {
            if let Some(name) = self.node(parent_id).name() {
                parts.push(name.to_string());
            }
            current = self.node(parent_id).parent();
        }
        parts.reverse();
        Some(parts.join("."))
    }
}

impl Default for Ast {
    fn default() -> Self {
        Self::new()
    }
}
