//! Provider expression tree.

/// The two inputs a provider is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// The field being resolved.
    Field,
    /// The type that owns the field.
    Type,
}

/// Built-in functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Uuid,
    Quote,
    ConstantName,
    Str,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "uuid" => Some(Self::Uuid),
            "quote" => Some(Self::Quote),
            "constantName" => Some(Self::ConstantName),
            "str" => Some(Self::Str),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Uuid => "uuid",
            Self::Quote => "quote",
            Self::ConstantName => "constantName",
            Self::Str => "str",
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Self::Uuid => 0,
            Self::Quote | Self::ConstantName | Self::Str => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Eq,
    NotEq,
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Str(String),
    Int(i64),
    Bool(bool),
    Null,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(Literal),
    Input(Binding),
    Call {
        function: Builtin,
        args: Vec<Expr>,
    },
    Property {
        target: Box<Expr>,
        name: String,
    },
    Method {
        target: Box<Expr>,
        name: String,
        args: Vec<Expr>,
    },
    Index {
        target: Box<Expr>,
        index: Box<Expr>,
    },
    Not(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Conditional {
        condition: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
}

/// Properties readable on a field.
pub const FIELD_PROPERTIES: &[&str] = &[
    "name",
    "constantName",
    "type",
    "declaredType",
    "isTransient",
    "owner",
];

/// Properties readable on a type.
pub const TYPE_PROPERTIES: &[&str] = &[
    "simpleName",
    "qualifiedName",
    "packageName",
    "fixtureName",
    "fixtureQualifiedName",
    "isGeneric",
    "isEnum",
    "isArray",
    "isPrimitive",
    "typeArguments",
    "enumConstants",
];

/// Methods callable on strings and lists, with their accepted argument counts.
pub const METHODS: &[(&str, &[usize])] = &[
    ("toUpperCase", &[0]),
    ("toLowerCase", &[0]),
    ("length", &[0]),
    ("isEmpty", &[0]),
    ("trim", &[0]),
    ("contains", &[1]),
    ("startsWith", &[1]),
    ("endsWith", &[1]),
    ("replace", &[2]),
    ("substring", &[1, 2]),
    ("concat", &[1]),
    ("quote", &[0]),
    ("capitalize", &[0]),
    ("size", &[0]),
    ("first", &[0]),
    ("get", &[1]),
];
