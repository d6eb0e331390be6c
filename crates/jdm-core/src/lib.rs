//! JDM Core - Core types and definitions for the JDM decision engine
//!
//! This crate provides the fundamental types used across the JDM ecosystem:
//! - Value types for runtime data
//! - Expression AST definitions
//! - The validated decision graph model (documents, nodes, edges)
//! - Error types

pub mod ast;
pub mod error;
pub mod graph;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, ExpressionError};
pub use graph::{Document, Edge, EdgeKind, Node, NodeKind};
pub use types::Value;
