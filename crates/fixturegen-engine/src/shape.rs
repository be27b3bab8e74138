//! Value-shape classification.
//!
//! Every resolved field type is classified exactly once; the value pipeline
//! then matches on the shape instead of probing a chain of handlers.

use fixturegen_types::known::{self, ContainerKind};
use fixturegen_types::{PrimitiveKind, TypeMetadata, TypeShape};

/// Default-value category of a resolved type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueShape {
    /// A primitive or its boxed wrapper.
    Scalar(PrimitiveKind),
    String,
    Uuid,
    /// A value object with a fixed default expression.
    WellKnown(&'static str),
    Enum,
    Container(ContainerKind),
    Array,
    /// A described class.
    Class,
    /// Anything else.
    Unknown,
}

/// Shape tags accepted as provider keys.
pub const SHAPE_TAGS: &[&str] = &[
    "scalar",
    "string",
    "uuid",
    "value",
    "enum",
    "container",
    "array",
    "class",
    "unknown",
];

impl ValueShape {
    /// Provider key for this shape.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::String => "string",
            Self::Uuid => "uuid",
            Self::WellKnown(_) => "value",
            Self::Enum => "enum",
            Self::Container(_) => "container",
            Self::Array => "array",
            Self::Class => "class",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_tag(key: &str) -> bool {
        SHAPE_TAGS.contains(&key)
    }
}

/// Classify a resolved type.
pub fn classify(ty: &TypeMetadata) -> ValueShape {
    match ty.shape() {
        TypeShape::Primitive(kind) => ValueShape::Scalar(kind),
        TypeShape::Array => ValueShape::Array,
        TypeShape::Enum => ValueShape::Enum,
        TypeShape::Class => {
            let name = ty.qualified_name();
            if let Some(kind) = known::boxed_scalar(name) {
                ValueShape::Scalar(kind)
            } else if name == known::STRING {
                ValueShape::String
            } else if name == known::UUID {
                ValueShape::Uuid
            } else if let Some(expression) = known::well_known_value(name) {
                ValueShape::WellKnown(expression)
            } else if let Some(container) = known::container_kind(name) {
                ValueShape::Container(container)
            } else if ty.is_described() {
                ValueShape::Class
            } else {
                ValueShape::Unknown
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixturegen_types::{TypeCatalog, TypeDescription, TypeRef};

    fn shape_of(catalog: &TypeCatalog, text: &str) -> ValueShape {
        let ty: TypeRef = text.parse().unwrap();
        classify(&TypeMetadata::of(catalog, &ty).unwrap())
    }

    #[test]
    fn classifies_every_shape() {
        let catalog = TypeCatalog::from_descriptions(vec![
            TypeDescription::class("com.acme", "Item"),
            TypeDescription::enumeration("com.acme", "Color", ["RED"]),
        ])
        .unwrap();

        assert_eq!(shape_of(&catalog, "int"), ValueShape::Scalar(PrimitiveKind::Int));
        assert_eq!(
            shape_of(&catalog, "java.lang.Long"),
            ValueShape::Scalar(PrimitiveKind::Long)
        );
        assert_eq!(shape_of(&catalog, "java.lang.String"), ValueShape::String);
        assert_eq!(shape_of(&catalog, "java.util.UUID"), ValueShape::Uuid);
        assert_eq!(
            shape_of(&catalog, "java.time.Instant"),
            ValueShape::WellKnown("java.time.Instant.EPOCH")
        );
        assert_eq!(shape_of(&catalog, "com.acme.Color"), ValueShape::Enum);
        assert_eq!(
            shape_of(&catalog, "java.util.Map<java.lang.String, com.acme.Item>"),
            ValueShape::Container(ContainerKind::Map)
        );
        assert_eq!(shape_of(&catalog, "int[]"), ValueShape::Array);
        assert_eq!(shape_of(&catalog, "com.acme.Item"), ValueShape::Class);
        assert_eq!(shape_of(&catalog, "org.other.Thing"), ValueShape::Unknown);
        assert_eq!(shape_of(&catalog, "java.lang.Object"), ValueShape::Unknown);
    }

    #[test]
    fn tags_cover_every_shape() {
        for shape in [
            ValueShape::Scalar(PrimitiveKind::Int),
            ValueShape::String,
            ValueShape::Uuid,
            ValueShape::WellKnown("x"),
            ValueShape::Enum,
            ValueShape::Container(ContainerKind::List),
            ValueShape::Array,
            ValueShape::Class,
            ValueShape::Unknown,
        ] {
            assert!(ValueShape::is_tag(shape.tag()));
        }
        assert!(!ValueShape::is_tag("java.lang.String"));
    }
}
