//! Tables of well-known Java type names.
//!
//! These are fixed, read-only tables: boxed scalars, well-known value
//! objects, recognized container shapes and the short names that qualify
//! implicitly (the `java.lang` package plus common `java.util` imports).

use crate::type_ref::PrimitiveKind;

/// Qualified name of the root object type.
pub const OBJECT: &str = "java.lang.Object";
/// Qualified name of the string type.
pub const STRING: &str = "java.lang.String";
/// Qualified name of the UUID type.
pub const UUID: &str = "java.util.UUID";

/// Boxed scalar types and the primitive they wrap.
pub const BOXED_SCALARS: &[(&str, PrimitiveKind)] = &[
    ("java.lang.Boolean", PrimitiveKind::Boolean),
    ("java.lang.Byte", PrimitiveKind::Byte),
    ("java.lang.Short", PrimitiveKind::Short),
    ("java.lang.Integer", PrimitiveKind::Int),
    ("java.lang.Long", PrimitiveKind::Long),
    ("java.lang.Float", PrimitiveKind::Float),
    ("java.lang.Double", PrimitiveKind::Double),
    ("java.lang.Character", PrimitiveKind::Char),
];

/// Well-known value objects with a fixed default expression.
pub const WELL_KNOWN_VALUES: &[(&str, &str)] = &[
    ("java.math.BigDecimal", "java.math.BigDecimal.ZERO"),
    ("java.math.BigInteger", "java.math.BigInteger.ZERO"),
    ("java.time.Instant", "java.time.Instant.EPOCH"),
    ("java.time.LocalDate", "java.time.LocalDate.of(2000, 1, 1)"),
    ("java.time.LocalDateTime", "java.time.LocalDateTime.of(2000, 1, 1, 0, 0)"),
    ("java.time.Duration", "java.time.Duration.ZERO"),
];

/// Container kinds recognized by erasure of their declared shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    List,
    LinkedList,
    Set,
    LinkedSet,
    SortedSet,
    Map,
    LinkedMap,
    SortedMap,
    ConcurrentMap,
    Queue,
    Deque,
    Optional,
}

impl ContainerKind {
    /// Canonical empty-container construction expression.
    pub fn empty_expression(&self) -> &'static str {
        match self {
            Self::List => "new java.util.ArrayList<>()",
            Self::LinkedList => "new java.util.LinkedList<>()",
            Self::Set => "new java.util.HashSet<>()",
            Self::LinkedSet => "new java.util.LinkedHashSet<>()",
            Self::SortedSet => "new java.util.TreeSet<>()",
            Self::Map => "new java.util.HashMap<>()",
            Self::LinkedMap => "new java.util.LinkedHashMap<>()",
            Self::SortedMap => "new java.util.TreeMap<>()",
            Self::ConcurrentMap => "new java.util.concurrent.ConcurrentHashMap<>()",
            Self::Queue => "new java.util.PriorityQueue<>()",
            Self::Deque => "new java.util.ArrayDeque<>()",
            Self::Optional => "java.util.Optional.empty()",
        }
    }
}

/// Declared container shapes, matched by erased qualified name.
pub const CONTAINERS: &[(&str, ContainerKind)] = &[
    ("java.lang.Iterable", ContainerKind::List),
    ("java.util.Collection", ContainerKind::List),
    ("java.util.List", ContainerKind::List),
    ("java.util.ArrayList", ContainerKind::List),
    ("java.util.LinkedList", ContainerKind::LinkedList),
    ("java.util.Set", ContainerKind::Set),
    ("java.util.HashSet", ContainerKind::Set),
    ("java.util.LinkedHashSet", ContainerKind::LinkedSet),
    ("java.util.SortedSet", ContainerKind::SortedSet),
    ("java.util.NavigableSet", ContainerKind::SortedSet),
    ("java.util.TreeSet", ContainerKind::SortedSet),
    ("java.util.Map", ContainerKind::Map),
    ("java.util.HashMap", ContainerKind::Map),
    ("java.util.LinkedHashMap", ContainerKind::LinkedMap),
    ("java.util.SortedMap", ContainerKind::SortedMap),
    ("java.util.NavigableMap", ContainerKind::SortedMap),
    ("java.util.TreeMap", ContainerKind::SortedMap),
    ("java.util.concurrent.ConcurrentMap", ContainerKind::ConcurrentMap),
    ("java.util.concurrent.ConcurrentHashMap", ContainerKind::ConcurrentMap),
    ("java.util.Queue", ContainerKind::Queue),
    ("java.util.PriorityQueue", ContainerKind::Queue),
    ("java.util.Deque", ContainerKind::Deque),
    ("java.util.ArrayDeque", ContainerKind::Deque),
    ("java.util.Optional", ContainerKind::Optional),
];

/// Short names that qualify without an explicit package.
const IMPLICIT_IMPORTS: &[&str] = &[
    "java.lang.Object",
    "java.lang.String",
    "java.lang.Boolean",
    "java.lang.Byte",
    "java.lang.Short",
    "java.lang.Integer",
    "java.lang.Long",
    "java.lang.Float",
    "java.lang.Double",
    "java.lang.Character",
    "java.lang.Number",
    "java.lang.CharSequence",
    "java.lang.Comparable",
    "java.lang.Iterable",
    "java.util.UUID",
    "java.util.Collection",
    "java.util.List",
    "java.util.ArrayList",
    "java.util.LinkedList",
    "java.util.Set",
    "java.util.HashSet",
    "java.util.LinkedHashSet",
    "java.util.SortedSet",
    "java.util.NavigableSet",
    "java.util.TreeSet",
    "java.util.Map",
    "java.util.HashMap",
    "java.util.LinkedHashMap",
    "java.util.SortedMap",
    "java.util.NavigableMap",
    "java.util.TreeMap",
    "java.util.Queue",
    "java.util.PriorityQueue",
    "java.util.Deque",
    "java.util.ArrayDeque",
    "java.util.Optional",
    "java.math.BigDecimal",
    "java.math.BigInteger",
    "java.time.Instant",
    "java.time.LocalDate",
    "java.time.LocalDateTime",
    "java.time.Duration",
];

/// Boxed scalar wrapped by `qualified_name`, if any.
pub fn boxed_scalar(qualified_name: &str) -> Option<PrimitiveKind> {
    BOXED_SCALARS
        .iter()
        .find(|(name, _)| *name == qualified_name)
        .map(|(_, kind)| *kind)
}

/// Default expression of a well-known value object, if any.
pub fn well_known_value(qualified_name: &str) -> Option<&'static str> {
    WELL_KNOWN_VALUES
        .iter()
        .find(|(name, _)| *name == qualified_name)
        .map(|(_, expr)| *expr)
}

/// Container kind of an erased qualified name, if recognized.
pub fn container_kind(qualified_name: &str) -> Option<ContainerKind> {
    CONTAINERS
        .iter()
        .find(|(name, _)| *name == qualified_name)
        .map(|(_, kind)| *kind)
}

/// Qualify an implicitly imported short name (`String` → `java.lang.String`).
pub fn implicit_qualification(simple_name: &str) -> Option<&'static str> {
    IMPLICIT_IMPORTS
        .iter()
        .copied()
        .find(|qualified| simple_name_of(qualified) == simple_name)
}

/// Whether a qualified name belongs to the fixed tables above.
pub fn is_library_type(qualified_name: &str) -> bool {
    IMPLICIT_IMPORTS.contains(&qualified_name)
        || boxed_scalar(qualified_name).is_some()
        || well_known_value(qualified_name).is_some()
        || container_kind(qualified_name).is_some()
}

/// Last dotted segment of a qualified name.
pub fn simple_name_of(qualified_name: &str) -> &str {
    qualified_name
        .rsplit_once('.')
        .map_or(qualified_name, |(_, simple)| simple)
}

/// Package part of a qualified name (empty for the default package).
pub fn package_of(qualified_name: &str) -> &str {
    qualified_name
        .rsplit_once('.')
        .map_or("", |(package, _)| package)
}
