//! Recursive-descent parser for provider expressions.
//!
//! ```text
//! provider   := [ "(" IDENT "," IDENT ")" "->" ] expr
//! expr       := or [ "?" expr ":" expr ]
//! or         := and { "||" and }
//! and        := equality { "&&" equality }
//! equality   := additive { ("==" | "!=") additive }
//! additive   := unary { "+" unary }
//! unary      := "!" unary | postfix
//! postfix    := primary { "." IDENT [ "(" args ")" ] | "[" expr "]" }
//! primary    := STRING | INT | "true" | "false" | "null"
//!             | IDENT [ "(" args ")" ] | "(" expr ")"
//! ```

use crate::ast::{BinaryOp, Binding, Builtin, Expr, Literal, FIELD_PROPERTIES, METHODS, TYPE_PROPERTIES};
use crate::error::{ExprError, ExprResult};
use crate::lexer::{Token, TokenKind};

pub(crate) fn parse(tokens: Vec<Token>, source_len: usize) -> ExprResult<Expr> {
    let mut parser = Parser::new(tokens, source_len);
    parser.parse_header()?;
    let expr = parser.parse_expr()?;
    if let Some(token) = parser.peek() {
        return Err(parser.unexpected(token));
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    source_len: usize,
    field_name: String,
    type_name: String,
}

impl Parser {
    fn new(tokens: Vec<Token>, source_len: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            source_len,
            field_name: "field".to_string(),
            type_name: "type".to_string(),
        }
    }

    // `(a, b) ->` renames the two bound inputs.
    fn parse_header(&mut self) -> ExprResult<()> {
        let kinds: Vec<&TokenKind> = self.tokens.iter().take(6).map(|t| &t.kind).collect();
        let (field, ty) = match kinds.as_slice() {
            [TokenKind::LParen, TokenKind::Ident(f), TokenKind::Comma, TokenKind::Ident(t), TokenKind::RParen, TokenKind::Arrow] => {
                (f.clone(), t.clone())
            }
            _ => return Ok(()),
        };
        if field == ty {
            return Err(ExprError::Malformed(format!(
                "lambda parameters must be distinct, got '{field}' twice"
            )));
        }
        self.field_name = field;
        self.type_name = ty;
        self.pos = 6;
        Ok(())
    }

    fn parse_expr(&mut self) -> ExprResult<Expr> {
        let condition = self.parse_or()?;
        if !self.eat(&TokenKind::Question) {
            return Ok(condition);
        }
        let then = self.parse_expr()?;
        self.expect(&TokenKind::Colon, "':'")?;
        let otherwise = self.parse_expr()?;
        Ok(Expr::Conditional {
            condition: Box::new(condition),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    fn parse_or(&mut self) -> ExprResult<Expr> {
        let mut lhs = self.parse_and()?;
        while self.eat(&TokenKind::OrOr) {
            let rhs = self.parse_and()?;
            lhs = binary(BinaryOp::Or, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> ExprResult<Expr> {
        let mut lhs = self.parse_equality()?;
        while self.eat(&TokenKind::AndAnd) {
            let rhs = self.parse_equality()?;
            lhs = binary(BinaryOp::And, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_equality(&mut self) -> ExprResult<Expr> {
        let mut lhs = self.parse_additive()?;
        loop {
            let op = if self.eat(&TokenKind::EqEq) {
                BinaryOp::Eq
            } else if self.eat(&TokenKind::NotEq) {
                BinaryOp::NotEq
            } else {
                return Ok(lhs);
            };
            let rhs = self.parse_additive()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn parse_additive(&mut self) -> ExprResult<Expr> {
        let mut lhs = self.parse_unary()?;
        while self.eat(&TokenKind::Plus) {
            let rhs = self.parse_unary()?;
            lhs = binary(BinaryOp::Add, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> ExprResult<Expr> {
        if self.eat(&TokenKind::Bang) {
            let operand = self.parse_unary()?;
            return Ok(Expr::Not(Box::new(operand)));
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> ExprResult<Expr> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.eat(&TokenKind::Dot) {
                let name = self.expect_ident()?;
                if self.eat(&TokenKind::LParen) {
                    let args = self.parse_args()?;
                    check_method(&name, args.len())?;
                    expr = Expr::Method {
                        target: Box::new(expr),
                        name,
                        args,
                    };
                } else {
                    if !FIELD_PROPERTIES.contains(&name.as_str())
                        && !TYPE_PROPERTIES.contains(&name.as_str())
                    {
                        return Err(ExprError::Malformed(format!("unknown property '{name}'")));
                    }
                    expr = Expr::Property {
                        target: Box::new(expr),
                        name,
                    };
                }
            } else if self.eat(&TokenKind::LBracket) {
                let index = self.parse_expr()?;
                self.expect(&TokenKind::RBracket, "']'")?;
                expr = Expr::Index {
                    target: Box::new(expr),
                    index: Box::new(index),
                };
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_primary(&mut self) -> ExprResult<Expr> {
        let token = self.next().ok_or_else(|| {
            ExprError::Malformed(format!("unexpected end of input at offset {}", self.source_len))
        })?;

        match token.kind {
            TokenKind::Str(value) => Ok(Expr::Literal(Literal::Str(value))),
            TokenKind::Int(value) => Ok(Expr::Literal(Literal::Int(value))),
            TokenKind::LParen => {
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            TokenKind::Ident(name) => match name.as_str() {
                "true" => Ok(Expr::Literal(Literal::Bool(true))),
                "false" => Ok(Expr::Literal(Literal::Bool(false))),
                "null" => Ok(Expr::Literal(Literal::Null)),
                _ if self.eat(&TokenKind::LParen) => {
                    let function = Builtin::from_name(&name).ok_or_else(|| {
                        ExprError::Malformed(format!("unknown function '{name}'"))
                    })?;
                    let args = self.parse_args()?;
                    if args.len() != function.arity() {
                        return Err(ExprError::Malformed(format!(
                            "{}() takes {} argument(s), got {}",
                            function.name(),
                            function.arity(),
                            args.len()
                        )));
                    }
                    Ok(Expr::Call { function, args })
                }
                _ if name == self.field_name => Ok(Expr::Input(Binding::Field)),
                _ if name == self.type_name => Ok(Expr::Input(Binding::Type)),
                _ => Err(ExprError::Malformed(format!(
                    "unknown name '{name}' at offset {}",
                    token.offset
                ))),
            },
            other => Err(self.unexpected(&Token {
                kind: other,
                offset: token.offset,
            })),
        }
    }

    // Called after the opening parenthesis.
    fn parse_args(&mut self) -> ExprResult<Vec<Expr>> {
        let mut args = Vec::new();
        if self.eat(&TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expr()?);
            if self.eat(&TokenKind::RParen) {
                return Ok(args);
            }
            self.expect(&TokenKind::Comma, "',' or ')'")?;
        }
    }

    fn expect_ident(&mut self) -> ExprResult<String> {
        match self.next() {
            Some(Token {
                kind: TokenKind::Ident(name),
                ..
            }) => Ok(name),
            Some(token) => Err(self.unexpected(&token)),
            None => Err(ExprError::Malformed("expected identifier after '.'".to_string())),
        }
    }

    fn expect(&mut self, kind: &TokenKind, what: &str) -> ExprResult<()> {
        if self.eat(kind) {
            return Ok(());
        }
        match self.peek() {
            Some(token) => Err(ExprError::Malformed(format!(
                "expected {what} at offset {}, found {:?}",
                token.offset, token.kind
            ))),
            None => Err(ExprError::Malformed(format!("expected {what}, found end of input"))),
        }
    }

    fn unexpected(&self, token: &Token) -> ExprError {
        ExprError::Malformed(format!(
            "unexpected {:?} at offset {}",
            token.kind, token.offset
        ))
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek().is_some_and(|t| &t.kind == kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

fn check_method(name: &str, arity: usize) -> ExprResult<()> {
    match METHODS.iter().find(|(method, _)| *method == name) {
        Some((_, arities)) if arities.contains(&arity) => Ok(()),
        Some(_) => Err(ExprError::Malformed(format!(
            "{name}() does not take {arity} argument(s)"
        ))),
        None => Err(ExprError::Malformed(format!("unknown method '{name}'"))),
    }
}
