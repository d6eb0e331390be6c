//! Expression AST definitions

pub mod expression;
pub mod operator;

pub use expression::{Expression, ExpressionKind};
pub use operator::{Operator, UnaryOperator};
