//! The parsing and printing pipeline.
//!
//! [`scanner`] tokenizes source text, [`parser`] builds the typed tree,
//! and [`printer`] renders a tree back to aligned `.proto` text.

pub mod parser;
pub mod printer;
pub mod scanner;
