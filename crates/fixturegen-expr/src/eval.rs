//! Tree-walking evaluator for provider expressions.

use fixturegen_types::metadata::{FieldMetadata, TypeMetadata, TypeShape};
use fixturegen_types::naming;
use fixturegen_types::random::UuidSource;

use crate::ast::{BinaryOp, Binding, Builtin, Expr, Literal};
use crate::error::{ExprError, ExprResult};

/// Inputs bound while evaluating a provider.
pub struct EvalContext<'a, 'u> {
    pub field: &'a FieldMetadata,
    pub owner: &'a TypeMetadata,
    pub uuids: &'u mut dyn UuidSource,
}

impl<'a, 'u> EvalContext<'a, 'u> {
    pub fn new(
        field: &'a FieldMetadata,
        owner: &'a TypeMetadata,
        uuids: &'u mut dyn UuidSource,
    ) -> Self {
        Self {
            field,
            owner,
            uuids,
        }
    }
}

/// A runtime value.
#[derive(Debug, Clone)]
pub(crate) enum Value<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<Value<'a>>),
    Field(&'a FieldMetadata),
    Type(&'a TypeMetadata),
}

impl Value<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Field(_) => "field",
            Self::Type(_) => "type",
        }
    }

    /// Textual rendering used by `str()`, concatenation and the final result.
    pub(crate) fn to_text(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Str(s) => s.clone(),
            Self::List(items) => {
                let parts: Vec<String> = items.iter().map(Value::to_text).collect();
                format!("[{}]", parts.join(", "))
            }
            Self::Field(field) => field.name().to_string(),
            Self::Type(ty) => ty.type_ref().to_string(),
        }
    }

    fn equals(&self, other: &Value<'_>) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.equals(y))
            }
            (Value::Field(a), Value::Field(b)) => a.owner() == b.owner() && a.name() == b.name(),
            (Value::Type(a), Value::Type(b)) => a.type_ref() == b.type_ref(),
            _ => false,
        }
    }
}

pub(crate) fn evaluate<'a>(expr: &Expr, ctx: &mut EvalContext<'a, '_>) -> ExprResult<Value<'a>> {
    match expr {
        Expr::Literal(literal) => Ok(match literal {
            Literal::Str(s) => Value::Str(s.clone()),
            Literal::Int(i) => Value::Int(*i),
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Null => Value::Null,
        }),
        Expr::Input(Binding::Field) => Ok(Value::Field(ctx.field)),
        Expr::Input(Binding::Type) => Ok(Value::Type(ctx.owner)),
        Expr::Call { function, args } => {
            let args = evaluate_all(args, ctx)?;
            call_builtin(*function, args, ctx)
        }
        Expr::Property { target, name } => {
            let target = evaluate(target, ctx)?;
            property(target, name)
        }
        Expr::Method { target, name, args } => {
            let target = evaluate(target, ctx)?;
            let args = evaluate_all(args, ctx)?;
            method(target, name, args)
        }
        Expr::Index { target, index } => {
            let target = evaluate(target, ctx)?;
            let index = evaluate(index, ctx)?;
            match target {
                Value::List(items) => list_get(items, &index),
                other => Err(mismatch("index", "list", &other)),
            }
        }
        Expr::Not(operand) => {
            let value = evaluate(operand, ctx)?;
            Ok(Value::Bool(!as_bool(&value, "!")?))
        }
        Expr::Binary { op, lhs, rhs } => binary(*op, lhs, rhs, ctx),
        Expr::Conditional {
            condition,
            then,
            otherwise,
        } => {
            let condition = evaluate(condition, ctx)?;
            if as_bool(&condition, "?:")? {
                evaluate(then, ctx)
            } else {
                evaluate(otherwise, ctx)
            }
        }
    }
}

fn evaluate_all<'a>(exprs: &[Expr], ctx: &mut EvalContext<'a, '_>) -> ExprResult<Vec<Value<'a>>> {
    exprs.iter().map(|e| evaluate(e, ctx)).collect()
}

fn binary<'a>(
    op: BinaryOp,
    lhs: &Expr,
    rhs: &Expr,
    ctx: &mut EvalContext<'a, '_>,
) -> ExprResult<Value<'a>> {
    match op {
        // Short-circuit.
        BinaryOp::And => {
            let left = evaluate(lhs, ctx)?;
            if !as_bool(&left, "&&")? {
                return Ok(Value::Bool(false));
            }
            let right = evaluate(rhs, ctx)?;
            Ok(Value::Bool(as_bool(&right, "&&")?))
        }
        BinaryOp::Or => {
            let left = evaluate(lhs, ctx)?;
            if as_bool(&left, "||")? {
                return Ok(Value::Bool(true));
            }
            let right = evaluate(rhs, ctx)?;
            Ok(Value::Bool(as_bool(&right, "||")?))
        }
        BinaryOp::Eq | BinaryOp::NotEq => {
            let left = evaluate(lhs, ctx)?;
            let right = evaluate(rhs, ctx)?;
            let equal = left.equals(&right);
            Ok(Value::Bool(if op == BinaryOp::Eq { equal } else { !equal }))
        }
        BinaryOp::Add => {
            let left = evaluate(lhs, ctx)?;
            let right = evaluate(rhs, ctx)?;
            match (&left, &right) {
                (Value::Int(a), Value::Int(b)) => a
                    .checked_add(*b)
                    .map(Value::Int)
                    .ok_or_else(|| ExprError::Evaluation("integer overflow in '+'".to_string())),
                (Value::Str(_), _) | (_, Value::Str(_)) => {
                    Ok(Value::Str(left.to_text() + &right.to_text()))
                }
                _ => Err(ExprError::Evaluation(format!(
                    "'+' cannot combine {} and {}",
                    left.kind(),
                    right.kind()
                ))),
            }
        }
    }
}

fn call_builtin<'a>(
    function: Builtin,
    args: Vec<Value<'a>>,
    ctx: &mut EvalContext<'a, '_>,
) -> ExprResult<Value<'a>> {
    let arg = args.into_iter().next();
    match (function, arg) {
        (Builtin::Uuid, _) => Ok(Value::Str(ctx.uuids.next_uuid().to_string())),
        (Builtin::Quote, Some(value)) => Ok(Value::Str(java_string_literal(&value.to_text()))),
        (Builtin::Str, Some(value)) => Ok(Value::Str(value.to_text())),
        (Builtin::ConstantName, Some(value)) => naming::create_name(&value.to_text())
            .map(Value::Str)
            .map_err(|e| ExprError::Evaluation(e.to_string())),
        (function, None) => Err(ExprError::Evaluation(format!(
            "{}() is missing its argument",
            function.name()
        ))),
    }
}

fn property<'a>(target: Value<'a>, name: &str) -> ExprResult<Value<'a>> {
    match target {
        Value::Field(field) => field_property(field, name),
        Value::Type(ty) => type_property(ty, name),
        other => Err(ExprError::Evaluation(format!(
            "{} has no property '{name}'",
            other.kind()
        ))),
    }
}

fn field_property<'a>(field: &'a FieldMetadata, name: &str) -> ExprResult<Value<'a>> {
    Ok(match name {
        "name" => Value::Str(field.name().to_string()),
        "constantName" => Value::Str(
            naming::create_name(field.name()).map_err(|e| ExprError::Evaluation(e.to_string()))?,
        ),
        "type" => Value::Type(field.resolved()),
        "declaredType" => Value::Str(field.declared_type().to_string()),
        "isTransient" => Value::Bool(field.is_transient()),
        "owner" => Value::Str(field.owner().to_string()),
        other => {
            return Err(ExprError::Evaluation(format!("field has no property '{other}'")));
        }
    })
}

fn type_property<'a>(ty: &'a TypeMetadata, name: &str) -> ExprResult<Value<'a>> {
    Ok(match name {
        "simpleName" => Value::Str(ty.simple_name().to_string()),
        "qualifiedName" => Value::Str(ty.qualified_name().to_string()),
        "packageName" => Value::Str(ty.package_name().to_string()),
        "fixtureName" => Value::Str(ty.fixture_simple_name()),
        "fixtureQualifiedName" => Value::Str(ty.fixture_qualified_name()),
        "isGeneric" => Value::Bool(ty.is_generic()),
        "isEnum" => Value::Bool(ty.shape() == TypeShape::Enum),
        "isArray" => Value::Bool(ty.shape() == TypeShape::Array),
        "isPrimitive" => Value::Bool(matches!(ty.shape(), TypeShape::Primitive(_))),
        "typeArguments" => Value::List(
            ty.generic_parameters()
                .iter()
                .map(|p| Value::Type(&p.concrete))
                .collect(),
        ),
        "enumConstants" => Value::List(
            ty.enum_constants()
                .iter()
                .map(|c| Value::Str(c.clone()))
                .collect(),
        ),
        other => {
            return Err(ExprError::Evaluation(format!("type has no property '{other}'")));
        }
    })
}

fn method<'a>(target: Value<'a>, name: &str, args: Vec<Value<'a>>) -> ExprResult<Value<'a>> {
    match target {
        Value::Str(s) => string_method(&s, name, &args),
        Value::List(items) => list_method(items, name, &args),
        other => Err(ExprError::Evaluation(format!(
            "{} has no method '{name}'",
            other.kind()
        ))),
    }
}

fn string_method<'a>(s: &str, name: &str, args: &[Value<'a>]) -> ExprResult<Value<'a>> {
    let text_arg = |i: usize| -> ExprResult<String> {
        match args.get(i) {
            Some(Value::Str(a)) => Ok(a.clone()),
            Some(other) => Err(mismatch(name, "string", other)),
            None => Err(ExprError::Evaluation(format!("{name}() is missing an argument"))),
        }
    };

    Ok(match name {
        "toUpperCase" => Value::Str(s.to_uppercase()),
        "toLowerCase" => Value::Str(s.to_lowercase()),
        "length" => Value::Int(s.chars().count() as i64),
        "isEmpty" => Value::Bool(s.is_empty()),
        "trim" => Value::Str(s.trim().to_string()),
        "contains" => Value::Bool(s.contains(text_arg(0)?.as_str())),
        "startsWith" => Value::Bool(s.starts_with(text_arg(0)?.as_str())),
        "endsWith" => Value::Bool(s.ends_with(text_arg(0)?.as_str())),
        "replace" => Value::Str(s.replace(text_arg(0)?.as_str(), &text_arg(1)?)),
        "concat" => Value::Str(format!("{s}{}", text_arg(0)?)),
        "quote" => Value::Str(java_string_literal(s)),
        "capitalize" => Value::Str(naming::capitalize(s)),
        "substring" => {
            let chars: Vec<char> = s.chars().collect();
            let begin = as_index(args.first(), name)?;
            let end = match args.get(1) {
                Some(value) => as_index(Some(value), name)?,
                None => chars.len(),
            };
            if begin > end || end > chars.len() {
                return Err(ExprError::Evaluation(format!(
                    "substring({begin}, {end}) out of range for length {}",
                    chars.len()
                )));
            }
            Value::Str(chars[begin..end].iter().collect())
        }
        other => {
            return Err(ExprError::Evaluation(format!("string has no method '{other}'")));
        }
    })
}

fn list_method<'a>(items: Vec<Value<'a>>, name: &str, args: &[Value<'a>]) -> ExprResult<Value<'a>> {
    match name {
        "size" => Ok(Value::Int(items.len() as i64)),
        "isEmpty" => Ok(Value::Bool(items.is_empty())),
        "first" => Ok(items.into_iter().next().unwrap_or(Value::Null)),
        "get" => match args.first() {
            Some(index) => list_get(items, index),
            None => Err(ExprError::Evaluation("get() is missing an argument".to_string())),
        },
        other => Err(ExprError::Evaluation(format!("list has no method '{other}'"))),
    }
}

fn list_get<'a>(items: Vec<Value<'a>>, index: &Value<'_>) -> ExprResult<Value<'a>> {
    let len = items.len();
    let i = as_index(Some(index), "[]")?;
    items
        .into_iter()
        .nth(i)
        .ok_or_else(|| ExprError::Evaluation(format!("index {i} out of range for size {len}")))
}

fn as_bool(value: &Value<'_>, op: &str) -> ExprResult<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(mismatch(op, "boolean", other)),
    }
}

fn as_index(value: Option<&Value<'_>>, op: &str) -> ExprResult<usize> {
    match value {
        Some(Value::Int(i)) => usize::try_from(*i)
            .map_err(|_| ExprError::Evaluation(format!("{op}: negative index {i}"))),
        Some(other) => Err(mismatch(op, "integer", other)),
        None => Err(ExprError::Evaluation(format!("{op}: missing index"))),
    }
}

fn mismatch(op: &str, expected: &str, found: &Value<'_>) -> ExprError {
    ExprError::Evaluation(format!("{op}: expected {expected}, found {}", found.kind()))
}

/// Render text as a double-quoted Java string literal.
pub fn java_string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}
