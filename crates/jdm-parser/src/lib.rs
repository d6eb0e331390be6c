//! JDM Parser - text to graph/AST parser for the JDM decision engine
//!
//! This crate turns decision documents (JSON or YAML) into validated
//! [`jdm_core::Document`]s, and expression source into
//! [`jdm_core::ast::Expression`] trees.

pub mod document_parser;
pub mod error;
pub mod expression_parser;
mod lexer;
mod raw;
pub mod unary_test;

// Re-export main parser types
pub use document_parser::DocumentParser;
pub use error::{ParseError, Result};
pub use expression_parser::ExpressionParser;
pub use unary_test::UnaryTestParser;
