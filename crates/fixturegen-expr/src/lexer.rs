//! Tokenizer for provider expressions.

use crate::error::{ExprError, ExprResult};

/// Identifiers that only make sense in a statement body.
const STATEMENT_KEYWORDS: &[&str] = &["return", "var", "let", "if", "for", "while"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Ident(String),
    Str(String),
    Int(i64),
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Question,
    Colon,
    Arrow,
    EqEq,
    NotEq,
    AndAnd,
    OrOr,
    Plus,
    Bang,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

pub(crate) fn tokenize(input: &str) -> ExprResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((offset, ch)) = chars.peek().copied() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        if matches!(ch, '{' | '}' | ';') {
            return Err(ExprError::UnsupportedBody(format!(
                "'{ch}' at offset {offset}; only a single expression is allowed"
            )));
        }

        if ch == '"' || ch == '\'' {
            let quote = ch;
            chars.next();
            let mut value = String::new();
            let mut closed = false;
            while let Some((_, c)) = chars.next() {
                if c == quote {
                    closed = true;
                    break;
                }
                if c == '\\' {
                    let (_, escaped) = chars.next().ok_or_else(|| {
                        ExprError::Malformed(format!("unterminated string at offset {offset}"))
                    })?;
                    value.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        other => other,
                    });
                    continue;
                }
                value.push(c);
            }
            if !closed {
                return Err(ExprError::Malformed(format!(
                    "unterminated string at offset {offset}"
                )));
            }
            tokens.push(Token {
                kind: TokenKind::Str(value),
                offset,
            });
            continue;
        }

        if ch.is_ascii_digit() {
            let mut digits = String::new();
            while let Some((_, c)) = chars.peek().copied() {
                if c.is_ascii_digit() {
                    digits.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            let value = digits
                .parse::<i64>()
                .map_err(|_| ExprError::Malformed(format!("integer '{digits}' out of range")))?;
            tokens.push(Token {
                kind: TokenKind::Int(value),
                offset,
            });
            continue;
        }

        if is_ident_start(ch) {
            let mut ident = String::new();
            while let Some((_, c)) = chars.peek().copied() {
                if is_ident_char(c) {
                    ident.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            if STATEMENT_KEYWORDS.contains(&ident.as_str()) {
                return Err(ExprError::UnsupportedBody(format!(
                    "statement keyword '{ident}' at offset {offset}"
                )));
            }
            tokens.push(Token {
                kind: TokenKind::Ident(ident),
                offset,
            });
            continue;
        }

        chars.next();
        let next = chars.peek().map(|(_, c)| *c);
        let kind = match (ch, next) {
            ('-', Some('>')) => Some(TokenKind::Arrow),
            ('=', Some('=')) => Some(TokenKind::EqEq),
            ('!', Some('=')) => Some(TokenKind::NotEq),
            ('&', Some('&')) => Some(TokenKind::AndAnd),
            ('|', Some('|')) => Some(TokenKind::OrOr),
            _ => None,
        };
        let kind = match kind {
            Some(kind) => {
                chars.next();
                kind
            }
            None => match ch {
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                '[' => TokenKind::LBracket,
                ']' => TokenKind::RBracket,
                ',' => TokenKind::Comma,
                '.' => TokenKind::Dot,
                '?' => TokenKind::Question,
                ':' => TokenKind::Colon,
                '+' => TokenKind::Plus,
                '!' => TokenKind::Bang,
                other => {
                    return Err(ExprError::Malformed(format!(
                        "unexpected character '{other}' at offset {offset}"
                    )))
                }
            },
        };
        tokens.push(Token { kind, offset });
    }

    Ok(tokens)
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}
