//! Declared type references.
//!
//! A [`TypeRef`] is the parsed form of a Java type as written in a field
//! declaration: `int`, `java.util.List<java.lang.String>`, `T[]`. Text
//! round-trips through [`std::str::FromStr`] and [`std::fmt::Display`], and
//! serde uses the same textual form.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::known;

// ── Primitive kinds ──────────────────────────────────────────────────

/// Scalar kinds with a fixed default literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
}

impl PrimitiveKind {
    /// All primitive kinds, in declaration order.
    pub const ALL: [PrimitiveKind; 8] = [
        Self::Boolean,
        Self::Byte,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::Char,
    ];

    /// Java keyword for this kind.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Char => "char",
        }
    }

    /// Parse a Java primitive keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }

    /// Default literal text used for fixture constants.
    pub fn default_literal(&self) -> &'static str {
        match self {
            Self::Boolean => "false",
            Self::Byte => "0",
            Self::Short => "(short) 0",
            Self::Int => "0",
            Self::Long => "0L",
            Self::Float => "0.0f",
            Self::Double => "0.0",
            Self::Char => "' '",
        }
    }
}

impl std::fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

// ── Type references ──────────────────────────────────────────────────

/// A declared Java type reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    /// A primitive scalar (`int`, `boolean`, ...).
    Primitive(PrimitiveKind),
    /// A named class, interface or enum with optional type arguments.
    Declared { name: String, arguments: Vec<TypeRef> },
    /// An array of the component type.
    Array(Box<TypeRef>),
    /// A generic parameter of the owning type.
    Variable(String),
}

impl TypeRef {
    /// A declared type without type arguments.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Declared {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    /// A declared type with type arguments.
    pub fn generic(name: impl Into<String>, arguments: Vec<TypeRef>) -> Self {
        Self::Declared {
            name: name.into(),
            arguments,
        }
    }

    /// An array of this type.
    pub fn array_of(component: TypeRef) -> Self {
        Self::Array(Box::new(component))
    }

    /// Erased name: the declared name without type arguments, arrays as `component[]`.
    pub fn erasure(&self) -> String {
        match self {
            Self::Primitive(kind) => kind.keyword().to_string(),
            Self::Declared { name, .. } => name.clone(),
            Self::Array(component) => format!("{}[]", component.erasure()),
            Self::Variable(name) => name.clone(),
        }
    }

    /// Whether any part of this reference is a generic parameter.
    pub fn contains_variable(&self) -> bool {
        match self {
            Self::Primitive(_) => false,
            Self::Declared { arguments, .. } => arguments.iter().any(TypeRef::contains_variable),
            Self::Array(component) => component.contains_variable(),
            Self::Variable(_) => true,
        }
    }

    /// Reinterpret single-segment declared names matching `parameters` as variables.
    pub fn bind_variables(&self, parameters: &[String]) -> TypeRef {
        match self {
            Self::Declared { name, arguments } => {
                if arguments.is_empty() && parameters.iter().any(|p| p == name) {
                    Self::Variable(name.clone())
                } else {
                    Self::Declared {
                        name: name.clone(),
                        arguments: arguments
                            .iter()
                            .map(|a| a.bind_variables(parameters))
                            .collect(),
                    }
                }
            }
            Self::Array(component) => Self::array_of(component.bind_variables(parameters)),
            other => other.clone(),
        }
    }

    /// Replace generic parameters using `lookup`; unknown variables are kept.
    pub fn substitute<F>(&self, lookup: &F) -> TypeRef
    where
        F: Fn(&str) -> Option<TypeRef>,
    {
        match self {
            Self::Variable(name) => lookup(name).unwrap_or_else(|| self.clone()),
            Self::Declared { name, arguments } => Self::Declared {
                name: name.clone(),
                arguments: arguments.iter().map(|a| a.substitute(lookup)).collect(),
            },
            Self::Array(component) => Self::array_of(component.substitute(lookup)),
            Self::Primitive(_) => self.clone(),
        }
    }

    /// Rewrite every declared name with `qualify`.
    pub fn map_names<F>(&self, qualify: &F) -> TypeRef
    where
        F: Fn(&str) -> String,
    {
        match self {
            Self::Declared { name, arguments } => Self::Declared {
                name: qualify(name),
                arguments: arguments.iter().map(|a| a.map_names(qualify)).collect(),
            },
            Self::Array(component) => Self::array_of(component.map_names(qualify)),
            other => other.clone(),
        }
    }

    /// Innermost non-array type and the number of array dimensions.
    pub fn element_type(&self) -> (&TypeRef, usize) {
        let mut current = self;
        let mut depth = 0;
        while let Self::Array(component) = current {
            current = component;
            depth += 1;
        }
        (current, depth)
    }

    /// Every declared name referenced by this type, outermost first.
    pub fn declared_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Self::Declared { name, arguments } => {
                names.push(name);
                for argument in arguments {
                    argument.collect_names(names);
                }
            }
            Self::Array(component) => component.collect_names(names),
            _ => {}
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primitive(kind) => write!(f, "{kind}"),
            Self::Declared { name, arguments } => {
                write!(f, "{name}")?;
                if !arguments.is_empty() {
                    write!(f, "<")?;
                    for (i, argument) in arguments.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{argument}")?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            Self::Array(component) => write!(f, "{component}[]"),
            Self::Variable(name) => write!(f, "{name}"),
        }
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for TypeRef {
    type Error = TypeRefParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::str::FromStr for TypeRef {
    type Err = TypeRefParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut parser = TypeParser::new(input);
        let parsed = parser.parse_type()?;
        parser.skip_whitespace();
        if let Some(ch) = parser.peek() {
            return Err(parser.error(format!("unexpected '{ch}' after type")));
        }
        Ok(parsed)
    }
}

// ── Parser ───────────────────────────────────────────────────────────

/// A type reference failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid type reference '{input}': {message}")]
pub struct TypeRefParseError {
    pub input: String,
    pub message: String,
}

struct TypeParser<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> TypeParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, message: impl Into<String>) -> TypeRefParseError {
        TypeRefParseError {
            input: self.input.to_string(),
            message: message.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), TypeRefParseError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{expected}'")))
        }
    }

    fn parse_type(&mut self) -> Result<TypeRef, TypeRefParseError> {
        self.skip_whitespace();

        let mut ty = if self.eat('?') {
            self.parse_wildcard()?
        } else {
            let name = self.parse_name()?;
            match PrimitiveKind::from_keyword(&name) {
                Some(kind) => TypeRef::Primitive(kind),
                None => {
                    let arguments = if self.eat('<') {
                        self.parse_arguments()?
                    } else {
                        Vec::new()
                    };
                    TypeRef::Declared { name, arguments }
                }
            }
        };

        while self.eat('[') {
            self.expect(']')?;
            ty = TypeRef::array_of(ty);
        }
        Ok(ty)
    }

    // `? extends X` reads as X; `?` and `? super X` read as Object.
    fn parse_wildcard(&mut self) -> Result<TypeRef, TypeRefParseError> {
        self.skip_whitespace();
        let save = self.pos;
        if self.peek().is_some_and(is_ident_start) {
            let keyword = self.parse_ident();
            match keyword.as_str() {
                "extends" => return self.parse_type(),
                "super" => {
                    self.parse_type()?;
                    return Ok(TypeRef::named(known::OBJECT));
                }
                _ => self.pos = save,
            }
        }
        Ok(TypeRef::named(known::OBJECT))
    }

    fn parse_arguments(&mut self) -> Result<Vec<TypeRef>, TypeRefParseError> {
        let mut arguments = vec![self.parse_type()?];
        while self.eat(',') {
            arguments.push(self.parse_type()?);
        }
        self.expect('>')?;
        Ok(arguments)
    }

    fn parse_name(&mut self) -> Result<String, TypeRefParseError> {
        self.skip_whitespace();
        if !self.peek().is_some_and(is_ident_start) {
            return Err(match self.peek() {
                Some(ch) => self.error(format!("unexpected '{ch}'")),
                None => self.error("unexpected end of input"),
            });
        }

        let mut name = self.parse_ident();
        while self.peek() == Some('.') {
            self.pos += 1;
            if !self.peek().is_some_and(is_ident_start) {
                return Err(self.error("expected identifier after '.'"));
            }
            name.push('.');
            name.push_str(&self.parse_ident());
        }
        Ok(name)
    }

    fn parse_ident(&mut self) -> String {
        let mut ident = String::new();
        while let Some(ch) = self.peek() {
            if is_ident_char(ch) {
                ident.push(ch);
                self.pos += 1;
            } else {
                break;
            }
        }
        ident
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> TypeRef {
        input.parse().unwrap()
    }

    #[test]
    fn parses_primitives() {
        assert_eq!(parse("int"), TypeRef::Primitive(PrimitiveKind::Int));
        assert_eq!(parse(" boolean "), TypeRef::Primitive(PrimitiveKind::Boolean));
    }

    #[test]
    fn parses_nested_generics() {
        let ty = parse("java.util.Map<java.lang.String, java.util.List<java.lang.Integer>>");
        assert_eq!(
            ty,
            TypeRef::generic(
                "java.util.Map",
                vec![
                    TypeRef::named("java.lang.String"),
                    TypeRef::generic("java.util.List", vec![TypeRef::named("java.lang.Integer")]),
                ],
            )
        );
        assert_eq!(
            ty.to_string(),
            "java.util.Map<java.lang.String, java.util.List<java.lang.Integer>>"
        );
    }

    #[test]
    fn parses_arrays() {
        let ty = parse("int[][]");
        let (element, depth) = ty.element_type();
        assert_eq!(element, &TypeRef::Primitive(PrimitiveKind::Int));
        assert_eq!(depth, 2);
        assert_eq!(ty.erasure(), "int[][]");
    }

    #[test]
    fn parses_wildcards() {
        assert_eq!(
            parse("List<? extends Number>"),
            TypeRef::generic("List", vec![TypeRef::named("Number")])
        );
        assert_eq!(
            parse("List<?>"),
            TypeRef::generic("List", vec![TypeRef::named(known::OBJECT)])
        );
    }

    #[test]
    fn binds_variables() {
        let params = vec!["T".to_string()];
        let ty = parse("java.util.List<T>").bind_variables(&params);
        assert!(ty.contains_variable());

        let concrete = ty.substitute(&|name: &str| {
            (name == "T").then(|| TypeRef::named("java.lang.String"))
        });
        assert_eq!(concrete.to_string(), "java.util.List<java.lang.String>");
        assert!(!concrete.contains_variable());
    }

    #[test]
    fn rejects_malformed_input() {
        assert!("".parse::<TypeRef>().is_err());
        assert!("List<String".parse::<TypeRef>().is_err());
        assert!("int[".parse::<TypeRef>().is_err());
        assert!("a..b".parse::<TypeRef>().is_err());
        assert!("Map<String,>".parse::<TypeRef>().is_err());
        assert!("String extra".parse::<TypeRef>().is_err());
    }

    #[test]
    fn serde_uses_text_form() {
        let ty: TypeRef = serde_json::from_str("\"java.util.List<T>\"").unwrap();
        assert_eq!(ty, TypeRef::generic("java.util.List", vec![TypeRef::named("T")]));
        assert_eq!(serde_json::to_string(&ty).unwrap(), "\"java.util.List<T>\"");
        assert!(serde_json::from_str::<TypeRef>("\"List<\"").is_err());
    }
}
