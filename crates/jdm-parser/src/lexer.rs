//! Expression tokenizer

use jdm_core::ExpressionError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    Str(String),
    Ident(String),
    /// `$` or `$name`; the payload is the name without the dollar sign
    Dollar(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    AndAnd,
    OrOr,
    Bang,
    Question,
    Colon,
    Comma,
    Dot,
    DotDot,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Eof,
}

impl Token {
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::Number(n) => format!("number {}", n),
            Token::Str(s) => format!("string \"{}\"", s),
            Token::Ident(name) => format!("'{}'", name),
            Token::Dollar(name) => format!("'${}'", name),
            Token::Eof => "end of expression".to_string(),
            other => format!("'{}'", other.symbol()),
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Percent => "%",
            Token::Caret => "^",
            Token::EqEq => "==",
            Token::NotEq => "!=",
            Token::Lt => "<",
            Token::Le => "<=",
            Token::Gt => ">",
            Token::Ge => ">=",
            Token::AndAnd => "&&",
            Token::OrOr => "||",
            Token::Bang => "!",
            Token::Question => "?",
            Token::Colon => ":",
            Token::Comma => ",",
            Token::Dot => ".",
            Token::DotDot => "..",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBracket => "[",
            Token::RBracket => "]",
            Token::LBrace => "{",
            Token::RBrace => "}",
            _ => "",
        }
    }
}

/// Token with the byte offset of its first character
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Spanned {
    pub token: Token,
    pub position: usize,
}

/// Split `input` into tokens. Positions are offset by `base`.
pub(crate) fn tokenize(input: &str, base: usize) -> Result<Vec<Spanned>, ExpressionError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        let start = i;

        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        let token = match c {
            b'0'..=b'9' => {
                i = scan_number(bytes, i);
                let text = &input[start..i];
                let n = text.parse::<f64>().map_err(|_| {
                    ExpressionError::new(format!("Invalid number '{}'", text), base + start)
                })?;
                Token::Number(n)
            }
            b'"' | b'\'' => {
                let (s, end) = scan_string(input, i, base)?;
                i = end;
                Token::Str(s)
            }
            b'$' => {
                i += 1;
                let name_start = i;
                while i < bytes.len() && is_ident_char(bytes[i]) {
                    i += 1;
                }
                Token::Dollar(input[name_start..i].to_string())
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                while i < bytes.len() && is_ident_char(bytes[i]) {
                    i += 1;
                }
                Token::Ident(input[start..i].to_string())
            }
            _ => {
                let next = bytes.get(i + 1).copied();
                let (token, len) = match (c, next) {
                    (b'=', Some(b'=')) => (Token::EqEq, 2),
                    (b'!', Some(b'=')) => (Token::NotEq, 2),
                    (b'<', Some(b'=')) => (Token::Le, 2),
                    (b'>', Some(b'=')) => (Token::Ge, 2),
                    (b'&', Some(b'&')) => (Token::AndAnd, 2),
                    (b'|', Some(b'|')) => (Token::OrOr, 2),
                    (b'.', Some(b'.')) => (Token::DotDot, 2),
                    (b'+', _) => (Token::Plus, 1),
                    (b'-', _) => (Token::Minus, 1),
                    (b'*', _) => (Token::Star, 1),
                    (b'/', _) => (Token::Slash, 1),
                    (b'%', _) => (Token::Percent, 1),
                    (b'^', _) => (Token::Caret, 1),
                    (b'<', _) => (Token::Lt, 1),
                    (b'>', _) => (Token::Gt, 1),
                    (b'!', _) => (Token::Bang, 1),
                    (b'?', _) => (Token::Question, 1),
                    (b':', _) => (Token::Colon, 1),
                    (b',', _) => (Token::Comma, 1),
                    (b'.', _) => (Token::Dot, 1),
                    (b'(', _) => (Token::LParen, 1),
                    (b')', _) => (Token::RParen, 1),
                    (b'[', _) => (Token::LBracket, 1),
                    (b']', _) => (Token::RBracket, 1),
                    (b'{', _) => (Token::LBrace, 1),
                    (b'}', _) => (Token::RBrace, 1),
                    _ => {
                        let ch = input[start..].chars().next().unwrap_or('?');
                        return Err(ExpressionError::new(
                            format!("Unexpected character '{}'", ch),
                            base + start,
                        ));
                    }
                };
                i += len;
                token
            }
        };

        tokens.push(Spanned {
            token,
            position: base + start,
        });
    }

    tokens.push(Spanned {
        token: Token::Eof,
        position: base + input.len(),
    });
    Ok(tokens)
}

fn is_ident_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

/// Scan digits, an optional fraction and an optional exponent.
///
/// A `.` followed by another `.` ends the number so `1..10` lexes as an
/// interval.
fn scan_number(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i + 1 < bytes.len() && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit() {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }
    i
}

/// Scan a quoted string starting at `start`, returning its value and the
/// offset just past the closing quote.
fn scan_string(input: &str, start: usize, base: usize) -> Result<(String, usize), ExpressionError> {
    let mut chars = input[start..].char_indices();
    let quote = match chars.next() {
        Some((_, q)) => q,
        None => return Err(ExpressionError::new("Unterminated string", base + start)),
    };
    let mut value = String::new();

    while let Some((offset, c)) = chars.next() {
        match c {
            c if c == quote => return Ok((value, start + offset + c.len_utf8())),
            '\\' => match chars.next() {
                Some((_, 'n')) => value.push('\n'),
                Some((_, 't')) => value.push('\t'),
                Some((_, 'r')) => value.push('\r'),
                Some((_, escaped)) => value.push(escaped),
                None => break,
            },
            c => value.push(c),
        }
    }

    Err(ExpressionError::new("Unterminated string", base + start))
}
