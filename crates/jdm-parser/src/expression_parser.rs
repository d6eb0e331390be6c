//! Expression parser
//!
//! Parses string expressions into Expression AST nodes.
//!
//! Supported syntax:
//! - Path access: `customer.tier`, `items[0]`, `data["key"]`
//! - Literals: `42`, `3.14`, `"string"`, `'string'`, `true`, `false`, `null`,
//!   arrays `[1, 2]`, objects `{ tier: "gold" }`, intervals `[1..10)`
//! - Binary operators: `==`, `!=`, `<`, `<=`, `>`, `>=`, `+`, `-`, `*`, `/`, `%`, `^`,
//!   `and`/`&&`, `or`/`||`, `in`, `not in`
//! - Unary operators: `not`/`!`, `-`
//! - Ternary: `cond ? a : b`
//! - Function calls: `len(name)`, `round(total, 2)`
//! - `$` (node input) and `$context` (call context)

use crate::lexer::{tokenize, Spanned, Token};
use jdm_core::ast::{Expression, ExpressionKind, Operator, UnaryOperator};
use jdm_core::{ExpressionError, Value};

type Result<T> = std::result::Result<T, ExpressionError>;

/// Binding power used for the operand of `!` and unary `-`
const TIGHT_PREFIX_BP: u8 = 15;
/// Binding power used for the operand of `not`; covers comparisons
const NOT_PREFIX_BP: u8 = 5;

/// Expression parser
pub struct ExpressionParser {
    tokens: Vec<Spanned>,
    cursor: usize,
}

impl ExpressionParser {
    /// Parse an expression from a string
    pub fn parse(input: &str) -> Result<Expression> {
        Self::parse_at(input, 0)
    }

    /// Parse an expression whose text starts at byte `offset` of a larger
    /// source; reported positions are relative to that larger source.
    pub fn parse_at(input: &str, offset: usize) -> Result<Expression> {
        if input.trim().is_empty() {
            return Err(ExpressionError::new("Empty expression", offset));
        }

        let mut parser = Self {
            tokens: tokenize(input, offset)?,
            cursor: 0,
        };
        let expr = parser.parse_ternary()?;
        parser.expect_end()?;
        Ok(expr)
    }

    fn peek(&self) -> &Spanned {
        // tokenize always terminates with Eof, and the cursor never passes it
        &self.tokens[self.cursor.min(self.tokens.len() - 1)]
    }

    fn peek_token(&self) -> &Token {
        &self.peek().token
    }

    fn peek_nth(&self, n: usize) -> &Token {
        let idx = (self.cursor + n).min(self.tokens.len() - 1);
        &self.tokens[idx].token
    }

    fn advance(&mut self) -> Spanned {
        let current = self.peek().clone();
        if current.token != Token::Eof {
            self.cursor += 1;
        }
        current
    }

    fn expect(&mut self, expected: Token) -> Result<Spanned> {
        let next = self.peek();
        if next.token == expected {
            Ok(self.advance())
        } else {
            Err(unexpected(next, Some(&expected)))
        }
    }

    fn expect_end(&mut self) -> Result<()> {
        let next = self.peek();
        if next.token == Token::Eof {
            Ok(())
        } else {
            Err(unexpected(next, None))
        }
    }

    /// ternary := binary ('?' ternary ':' ternary)?
    fn parse_ternary(&mut self) -> Result<Expression> {
        let condition = self.parse_binary(0)?;

        if *self.peek_token() != Token::Question {
            return Ok(condition);
        }
        let position = self.advance().position;
        let true_expr = self.parse_ternary()?;
        self.expect(Token::Colon)?;
        let false_expr = self.parse_ternary()?;

        Ok(Expression::ternary(condition, true_expr, false_expr, position))
    }

    /// Precedence climbing over binary operators
    fn parse_binary(&mut self, min_bp: u8) -> Result<Expression> {
        let mut left = self.parse_prefix()?;

        while let Some((op, width)) = self.infix_operator() {
            let (left_bp, right_bp) = binding_power(op);
            if left_bp < min_bp {
                break;
            }

            let position = self.peek().position;
            for _ in 0..width {
                self.advance();
            }
            let right = self.parse_binary(right_bp)?;
            left = Expression::binary(left, op, right, position);
        }

        Ok(left)
    }

    /// The operator at the cursor, and how many tokens it spans
    fn infix_operator(&self) -> Option<(Operator, usize)> {
        let op = match self.peek_token() {
            Token::EqEq => Operator::Eq,
            Token::NotEq => Operator::Ne,
            Token::Lt => Operator::Lt,
            Token::Le => Operator::Le,
            Token::Gt => Operator::Gt,
            Token::Ge => Operator::Ge,
            Token::Plus => Operator::Add,
            Token::Minus => Operator::Sub,
            Token::Star => Operator::Mul,
            Token::Slash => Operator::Div,
            Token::Percent => Operator::Mod,
            Token::Caret => Operator::Pow,
            Token::AndAnd => Operator::And,
            Token::OrOr => Operator::Or,
            Token::Ident(word) => match word.as_str() {
                "and" => Operator::And,
                "or" => Operator::Or,
                "in" => Operator::In,
                "not" if matches!(self.peek_nth(1), Token::Ident(next) if next == "in") => {
                    return Some((Operator::NotIn, 2))
                }
                _ => return None,
            },
            _ => return None,
        };
        Some((op, 1))
    }

    fn parse_prefix(&mut self) -> Result<Expression> {
        let operand_bp = match self.peek_token() {
            Token::Bang | Token::Minus => TIGHT_PREFIX_BP,
            Token::Ident(word) if word == "not" => NOT_PREFIX_BP,
            _ => return self.parse_postfix(),
        };

        let start = self.advance();
        let op = match start.token {
            Token::Minus => UnaryOperator::Negate,
            _ => UnaryOperator::Not,
        };
        let operand = self.parse_binary(operand_bp)?;

        // Fold negative number literals
        if op == UnaryOperator::Negate {
            if let ExpressionKind::Literal(Value::Number(n)) = operand.kind {
                return Ok(Expression::literal(Value::Number(-n), start.position));
            }
        }
        Ok(Expression::unary(op, operand, start.position))
    }

    /// primary followed by any number of `.name`, `[index]`
    fn parse_postfix(&mut self) -> Result<Expression> {
        let mut expr = self.parse_primary()?;

        loop {
            match self.peek_token() {
                Token::Dot => {
                    let dot = self.advance();
                    let name = self.advance();
                    match name.token {
                        Token::Ident(property) => {
                            expr = Expression::member(expr, property, dot.position);
                        }
                        _ => return Err(unexpected(&name, None)),
                    }
                }
                Token::LBracket => {
                    let open = self.advance();
                    let index = self.parse_ternary()?;
                    self.expect(Token::RBracket)?;
                    expr = Expression::index(expr, index, open.position);
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        let start = self.advance();
        let position = start.position;

        match start.token {
            Token::Number(n) => Ok(Expression::literal(Value::Number(n), position)),
            Token::Str(s) => Ok(Expression::literal(Value::String(s), position)),
            Token::Dollar(name) => match name.as_str() {
                "" => Ok(Expression::input(position)),
                "context" => Ok(Expression::new(ExpressionKind::Context, position)),
                other => Err(ExpressionError::new(
                    format!("Unknown variable '${}'", other),
                    position,
                )),
            },
            Token::Ident(name) => match name.as_str() {
                "true" => Ok(Expression::literal(Value::Bool(true), position)),
                "false" => Ok(Expression::literal(Value::Bool(false), position)),
                "null" => Ok(Expression::literal(Value::Null, position)),
                "and" | "or" | "in" | "not" => Err(ExpressionError::new(
                    format!("Unexpected keyword '{}'", name),
                    position,
                )),
                _ if *self.peek_token() == Token::LParen => {
                    self.advance();
                    let args = self.parse_list(Token::RParen)?;
                    Ok(Expression::function_call(name, args, position))
                }
                _ => Ok(Expression::identifier(name, position)),
            },
            Token::LParen => {
                let inner = self.parse_ternary()?;
                if *self.peek_token() == Token::DotDot {
                    return self.parse_interval(inner, false, position);
                }
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Token::LBracket => {
                if *self.peek_token() == Token::RBracket {
                    self.advance();
                    return Ok(Expression::new(ExpressionKind::Array(Vec::new()), position));
                }
                let first = self.parse_ternary()?;
                if *self.peek_token() == Token::DotDot {
                    return self.parse_interval(first, true, position);
                }
                let mut items = vec![first];
                if *self.peek_token() == Token::Comma {
                    self.advance();
                    items.extend(self.parse_list(Token::RBracket)?);
                } else {
                    self.expect(Token::RBracket)?;
                }
                Ok(Expression::new(ExpressionKind::Array(items), position))
            }
            Token::LBrace => self.parse_object(position),
            _ => Err(unexpected(&start, None)),
        }
    }

    /// Comma-separated expressions up to `close`; trailing comma allowed
    fn parse_list(&mut self, close: Token) -> Result<Vec<Expression>> {
        let mut items = Vec::new();
        loop {
            if *self.peek_token() == close {
                self.advance();
                return Ok(items);
            }
            items.push(self.parse_ternary()?);
            match self.peek_token() {
                Token::Comma => {
                    self.advance();
                }
                t if *t == close => {}
                _ => return Err(unexpected(self.peek(), Some(&close))),
            }
        }
    }

    /// After `start ..`: parse the end bound and the closing bracket
    fn parse_interval(
        &mut self,
        start: Expression,
        start_inclusive: bool,
        position: usize,
    ) -> Result<Expression> {
        self.expect(Token::DotDot)?;
        let end = self.parse_ternary()?;
        let close = self.advance();
        let end_inclusive = match close.token {
            Token::RBracket => true,
            Token::RParen => false,
            _ => return Err(unexpected(&close, Some(&Token::RBracket))),
        };

        Ok(Expression::new(
            ExpressionKind::Interval {
                start: Box::new(start),
                end: Box::new(end),
                start_inclusive,
                end_inclusive,
            },
            position,
        ))
    }

    fn parse_object(&mut self, position: usize) -> Result<Expression> {
        let mut entries = Vec::new();
        loop {
            let key = self.advance();
            let name = match key.token {
                Token::RBrace => break,
                Token::Ident(name) | Token::Str(name) => name,
                _ => return Err(unexpected(&key, None)),
            };
            self.expect(Token::Colon)?;
            entries.push((name, self.parse_ternary()?));

            match self.peek_token() {
                Token::Comma => {
                    self.advance();
                }
                Token::RBrace => {}
                _ => return Err(unexpected(self.peek(), Some(&Token::RBrace))),
            }
        }
        Ok(Expression::new(ExpressionKind::Object(entries), position))
    }
}

/// (left, right) binding powers; higher binds tighter
fn binding_power(op: Operator) -> (u8, u8) {
    match op {
        Operator::Or => (1, 2),
        Operator::And => (3, 4),
        Operator::Eq | Operator::Ne => (5, 6),
        Operator::Lt | Operator::Le | Operator::Gt | Operator::Ge | Operator::In | Operator::NotIn => {
            (7, 8)
        }
        Operator::Add | Operator::Sub => (9, 10),
        Operator::Mul | Operator::Div | Operator::Mod => (11, 12),
        // right associative
        Operator::Pow => (14, 13),
    }
}

fn unexpected(found: &Spanned, expected: Option<&Token>) -> ExpressionError {
    let message = match (&found.token, expected) {
        (Token::Eof, Some(expected)) => {
            format!("Unexpected end of expression, expected {}", expected.describe())
        }
        (Token::Eof, None) => "Unexpected end of expression".to_string(),
        (token, Some(expected)) => format!(
            "Unexpected token {}, expected {}",
            token.describe(),
            expected.describe()
        ),
        (token, None) => format!("Unexpected token {}", token.describe()),
    };
    ExpressionError::new(message, found.position)
}
