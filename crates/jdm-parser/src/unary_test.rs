//! Decision-table cell parser
//!
//! A cell is a "unary test" against the column value `$`:
//!
//! | Cell                 | Meaning                         |
//! |----------------------|---------------------------------|
//! | *(empty)*, `-`       | always matches                  |
//! | `> 100`, `!= "x"`    | `$ > 100`, `$ != "x"`           |
//! | `[1..10)`            | `$ in [1..10)`                  |
//! | `"a", "b"`           | `$ == "a" or $ == "b"`          |
//! | `len($) > 3`         | used as is, tested for truth    |
//! | `"gold"`, `limit`    | `$ == "gold"`, `$ == limit`     |
//!
//! Every cell compiles to a single boolean [`Expression`].

use crate::expression_parser::ExpressionParser;
use jdm_core::ast::{Expression, ExpressionKind, Operator};
use jdm_core::ExpressionError;

/// Parser for decision-table input cells
pub struct UnaryTestParser;

impl UnaryTestParser {
    /// Parse a cell into a boolean test. Returns `Ok(None)` for a wildcard.
    pub fn parse(cell: &str) -> Result<Option<Expression>, ExpressionError> {
        let trimmed = cell.trim();
        if trimmed.is_empty() || trimmed == "-" {
            return Ok(None);
        }

        let mut combined: Option<Expression> = None;
        for (offset, part) in split_top_level(cell) {
            let test = Self::parse_single(part, offset)?;
            combined = Some(match combined {
                None => test,
                Some(left) => {
                    let position = left.position;
                    Expression::binary(left, Operator::Or, test, position)
                }
            });
        }

        match combined {
            Some(expr) => Ok(Some(expr)),
            None => Err(ExpressionError::new("Empty unary test", 0)),
        }
    }

    /// One comma-free test; `offset` is its byte offset in the full cell
    fn parse_single(part: &str, offset: usize) -> Result<Expression, ExpressionError> {
        let leading = part.len() - part.trim_start().len();
        let text = part.trim();
        let offset = offset + leading;
        if text.is_empty() {
            return Err(ExpressionError::new("Empty unary test", offset));
        }

        if let Some((op, width)) = leading_operator(text) {
            let rhs = ExpressionParser::parse_at(&text[width..], offset + width)?;
            return Ok(Expression::binary(Expression::input(offset), op, rhs, offset));
        }

        let expr = ExpressionParser::parse_at(text, offset)?;
        let test = match expr.kind {
            ExpressionKind::Interval { .. } => {
                Expression::binary(Expression::input(offset), Operator::In, expr, offset)
            }
            _ if expr.references_input() => expr,
            _ => Expression::binary(Expression::input(offset), Operator::Eq, expr, offset),
        };
        Ok(test)
    }
}

/// Comparison operator at the start of a test, and its byte width
fn leading_operator(text: &str) -> Option<(Operator, usize)> {
    const PREFIXES: [(&str, Operator); 6] = [
        ("<=", Operator::Le),
        (">=", Operator::Ge),
        ("!=", Operator::Ne),
        ("==", Operator::Eq),
        ("<", Operator::Lt),
        (">", Operator::Gt),
    ];

    PREFIXES
        .iter()
        .find(|(prefix, _)| text.starts_with(prefix))
        .map(|(prefix, op)| (*op, prefix.len()))
}

/// Split on commas that are outside strings and brackets, keeping the byte
/// offset of each piece.
fn split_top_level(cell: &str) -> Vec<(usize, &str)> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in cell.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            ',' if depth == 0 => {
                parts.push((start, &cell[start..i]));
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push((start, &cell[start..]));
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use jdm_core::Value;

    fn parse(cell: &str) -> Expression {
        UnaryTestParser::parse(cell).unwrap().unwrap()
    }

    fn binary_parts(expr: &Expression) -> (&Expression, Operator, &Expression) {
        match &expr.kind {
            ExpressionKind::Binary { left, op, right } => (left, *op, right),
            other => panic!("Expected binary, got {:?}", other),
        }
    }

    #[test]
    fn test_wildcards() {
        assert!(UnaryTestParser::parse("").unwrap().is_none());
        assert!(UnaryTestParser::parse("   ").unwrap().is_none());
        assert!(UnaryTestParser::parse("-").unwrap().is_none());
    }

    #[test]
    fn test_leading_comparison() {
        let expr = parse(">= 100");
        let (left, op, right) = binary_parts(&expr);
        assert_eq!(left.kind, ExpressionKind::Input);
        assert_eq!(op, Operator::Ge);
        assert_eq!(right.kind, ExpressionKind::Literal(Value::Number(100.0)));
    }

    #[test]
    fn test_plain_value_is_equality() {
        let expr = parse(r#""gold""#);
        let (left, op, right) = binary_parts(&expr);
        assert_eq!(left.kind, ExpressionKind::Input);
        assert_eq!(op, Operator::Eq);
        assert_eq!(right.kind, ExpressionKind::Literal(Value::from("gold")));
    }

    #[test]
    fn test_interval_is_membership() {
        let expr = parse("[18..65)");
        let (_, op, right) = binary_parts(&expr);
        assert_eq!(op, Operator::In);
        assert!(matches!(right.kind, ExpressionKind::Interval { .. }));
    }

    #[test]
    fn test_list_is_disjunction() {
        let expr = parse(r#""US", "CA", "a,b""#);
        let (left, op, right) = binary_parts(&expr);
        assert_eq!(op, Operator::Or);
        assert!(matches!(left.kind, ExpressionKind::Binary { op: Operator::Or, .. }));

        // quoted comma is not a separator
        let (_, _, last) = binary_parts(right);
        assert_eq!(last.kind, ExpressionKind::Literal(Value::from("a,b")));
    }

    #[test]
    fn test_commas_inside_calls_are_kept() {
        let expr = parse("max($, 10) > 20");
        let (_, op, _) = binary_parts(&expr);
        assert_eq!(op, Operator::Gt);
    }

    #[test]
    fn test_input_reference_used_as_is() {
        let expr = parse("$ > 1 and $ < 5");
        let (_, op, _) = binary_parts(&expr);
        assert_eq!(op, Operator::And);
    }

    #[test]
    fn test_error_positions_refer_to_cell() {
        let err = UnaryTestParser::parse("> 1, >= ").unwrap_err();
        assert_eq!(err.position, 7);

        let err = UnaryTestParser::parse("1,,2").unwrap_err();
        assert_eq!(err.position, 2);
    }
}
