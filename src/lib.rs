//! Parser, visitor framework, and printer for Protocol Buffers
//! `.proto` definition files.
//!
//! The crate parses proto2 and proto3 sources into a typed,
//! position-carrying syntax tree, preserves comments (attaching them to
//! the declarations they document), and can print a tree back as
//! column-aligned `.proto` text.
//!
//! # Quick start
//! ```
//! use proto_rs::core::parser::parse_source;
//! use proto_rs::core::printer::print;
//!
//! let ast = parse_source(
//!     r#"syntax = "proto3";
//!
//! // A person with a name.
//! message Person {
//!   string name = 1; // display name
//! }
//! "#,
//! )
//! .unwrap();
//!
//! let out = print(&ast);
//! assert!(out.contains("// A person with a name."));
//! ```
//!
//! Trees are explored through the [`core::parser::visitor::Visitor`]
//! trait: one hook per node kind, with traversal left to the caller so
//! any walk order is expressible.

#![deny(clippy::expect_used)]
#![deny(clippy::style)]
#![deny(clippy::unwrap_used)]
#![deny(unsafe_code)]
#![forbid(clippy::correctness)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod core;

pub use ast_derive::{AstContainer, AstLeaf, NodeKindName};
