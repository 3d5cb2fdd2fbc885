//! Recursive-descent parsing of `.proto` source into a typed tree.
//!
//! The submodules split along the pipeline:
//! - [`stream`] wraps the scanner with single-token pushback and the
//!   shared token extractors,
//! - [`components`] holds the grammar, one module per declaration
//!   family, all funneling through one container loop,
//! - [`ast`] is the arena-backed tree the grammar builds,
//! - [`visitor`] is the read-side dispatch over finished trees,
//! - [`error`] is the single fail-fast error kind.
//!
//! Most callers only need [`parse_source`]:
//! ```
//! use proto_rs::core::parser::parse_source;
//!
//! let ast = parse_source("enum Mood { HAPPY = 0; }").unwrap();
//! assert_eq!(ast.root().elements.len(), 1);
//! ```

pub mod ast;
mod components;
pub mod error;
mod proto_parser;
pub mod stream;
pub mod visitor;

pub use error::SyntaxError;
pub use proto_parser::{parse_source, ProtoParser};
pub use visitor::Visitor;
