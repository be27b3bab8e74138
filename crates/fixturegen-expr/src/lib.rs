//! Custom value providers for fixturegen.
//!
//! A provider is a single expression evaluated against two bound inputs,
//! the field being resolved (`field`) and its owning type (`type`):
//!
//! ```text
//! quote(field.constantName + "_CUSTOM")
//! (f, t) -> t.isGeneric ? "null" : quote(f.name.toUpperCase())
//! ```
//!
//! Sources are compiled once into a [`CompiledProvider`]; block syntax and
//! statement keywords are rejected at compile time.

#![deny(unsafe_code)]

pub mod ast;
pub mod error;
pub mod eval;
mod lexer;
mod parser;

pub use error::{ExprError, ExprResult};
pub use eval::{java_string_literal, EvalContext};

use crate::ast::Expr;

/// A parsed provider expression, ready to evaluate repeatedly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledProvider {
    source: String,
    expr: Expr,
}

impl CompiledProvider {
    /// Original source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parsed expression tree.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Evaluate against one field.
    ///
    /// `Ok(None)` means the provider declined: it produced `null` or empty text.
    pub fn evaluate(&self, ctx: &mut EvalContext<'_, '_>) -> ExprResult<Option<String>> {
        match eval::evaluate(&self.expr, ctx)? {
            eval::Value::Null => Ok(None),
            value => {
                let text = value.to_text();
                if text.trim().is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(text))
                }
            }
        }
    }
}

/// Compile a provider source.
pub fn compile(source: &str) -> ExprResult<CompiledProvider> {
    let tokens = lexer::tokenize(source)?;
    let expr = parser::parse(tokens, source.len())?;
    Ok(CompiledProvider {
        source: source.to_string(),
        expr,
    })
}
