//! Operator execution modules
//!
//! Logical `and`/`or` short-circuit in the evaluator; everything else is
//! applied here to already evaluated operands.

mod binary;
mod comparison;
mod unary;

pub(crate) use binary::execute_binary_op;
pub(crate) use comparison::interval_contains;
pub(crate) use unary::execute_unary_op;
