//! Raw type descriptions supplied by the driver.
//!
//! This is the input contract of the engine: one [`TypeDescription`] per
//! known type, carrying its fields, generic parameters and the declarative
//! directives (naming, custom providers, creation methods). Descriptions
//! deserialize from JSON/YAML with camelCase keys.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::type_ref::TypeRef;

/// Shape of a described type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// An ordinary class (or record).
    #[default]
    Class,
    /// An enum with declared enumerators.
    Enum,
}

/// A declared generic parameter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParameter {
    /// Parameter name (`T`).
    pub name: String,
    /// Upper bound used when no concrete argument is supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound: Option<TypeRef>,
}

impl TypeParameter {
    /// An unbounded parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bound: None,
        }
    }
}

/// A naming directive attached to a field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantDirective {
    /// Constant name to emit.
    pub name: String,
    /// Explicit literal value text; bypasses value resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Constant of the field type's fixture to reference instead of a value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl ConstantDirective {
    /// A directive that only renames the constant.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            reference: None,
        }
    }

    /// Attach an explicit literal value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Attach an upstream constant reference.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

/// One declared field of a type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescription {
    /// Field identifier (lowerCamelCase).
    pub name: String,
    /// Declared type as written.
    #[serde(rename = "type")]
    pub declared_type: TypeRef,
    /// Class-level (static) field.
    #[serde(default, rename = "static")]
    pub is_static: bool,
    /// Transient field.
    #[serde(default, rename = "transient")]
    pub is_transient: bool,
    /// Naming directives, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constants: Vec<ConstantDirective>,
}

impl FieldDescription {
    /// A plain instance field.
    pub fn new(name: impl Into<String>, declared_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            declared_type,
            is_static: false,
            is_transient: false,
            constants: Vec::new(),
        }
    }

    /// Add a naming directive.
    pub fn with_constant(mut self, directive: ConstantDirective) -> Self {
        self.constants.push(directive);
        self
    }

    /// Mark the field static.
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Mark the field transient.
    pub fn as_transient(mut self) -> Self {
        self.is_transient = true;
        self
    }
}

/// A creation-method directive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CreatorDirective {
    /// Build the instance with a constructor call.
    #[serde(rename_all = "camelCase")]
    Constructor {
        /// Constant or field names, in constructor parameter order.
        #[serde(default)]
        parameters: Vec<String>,
        /// Explicit method name.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    /// Build the instance with a builder setter chain.
    #[serde(rename_all = "camelCase")]
    Builder {
        /// Constant or field names, in setter order.
        #[serde(default)]
        setters: Vec<String>,
        /// Static method returning the builder.
        #[serde(default = "default_builder_method")]
        builder_method: String,
        /// Terminal method producing the instance.
        #[serde(default = "default_build_method")]
        build_method: String,
        /// Prefix prepended to setter names (`with` → `withName`).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        setter_prefix: Option<String>,
        /// Explicit method name.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

impl CreatorDirective {
    /// A constructor directive over the given parameters.
    pub fn constructor<I, S>(parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Constructor {
            parameters: parameters.into_iter().map(Into::into).collect(),
            name: None,
        }
    }

    /// A builder directive over the given setters, with default method names.
    pub fn builder<I, S>(setters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Builder {
            setters: setters.into_iter().map(Into::into).collect(),
            builder_method: default_builder_method(),
            build_method: default_build_method(),
            setter_prefix: None,
            name: None,
        }
    }
}

fn default_builder_method() -> String {
    "builder".to_string()
}

fn default_build_method() -> String {
    "build".to_string()
}

/// Description of one type known to a run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescription {
    /// Package name; empty for the default package.
    #[serde(default)]
    pub package: String,
    /// Simple name without generics.
    pub name: String,
    /// Class or enum.
    #[serde(default)]
    pub kind: TypeKind,
    /// Declared generic parameters, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParameter>,
    /// Declared fields, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDescription>,
    /// Declared enumerators (enums only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_constants: Vec<String>,
    /// Annotated as a fixture generation target.
    #[serde(default)]
    pub fixture: bool,
    /// Custom value providers: type name or shape tag → expression.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub providers: BTreeMap<String, String>,
    /// Creation-method directives, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub creators: Vec<CreatorDirective>,
}

impl TypeDescription {
    /// A class description with no fields.
    pub fn class(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// An enum description with the given enumerators.
    pub fn enumeration<I, S>(package: impl Into<String>, name: impl Into<String>, constants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            package: package.into(),
            name: name.into(),
            kind: TypeKind::Enum,
            enum_constants: constants.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Qualified name without generics.
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }

    /// Declared generic parameter names.
    pub fn parameter_names(&self) -> Vec<String> {
        self.type_parameters.iter().map(|p| p.name.clone()).collect()
    }

    /// Add a field.
    pub fn with_field(mut self, field: FieldDescription) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a generic parameter.
    pub fn with_type_parameter(mut self, parameter: TypeParameter) -> Self {
        self.type_parameters.push(parameter);
        self
    }

    /// Add a custom provider directive.
    pub fn with_provider(mut self, key: impl Into<String>, expression: impl Into<String>) -> Self {
        self.providers.insert(key.into(), expression.into());
        self
    }

    /// Add a creation-method directive.
    pub fn with_creator(mut self, creator: CreatorDirective) -> Self {
        self.creators.push(creator);
        self
    }

    /// Mark the type as a fixture generation target.
    pub fn as_fixture(mut self) -> Self {
        self.fixture = true;
        self
    }
}

/// A request to generate one fixture.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Qualified name of the target type.
    pub type_name: String,
    /// Concrete type arguments for a specific instantiation of a generic type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_arguments: Option<Vec<TypeRef>>,
}

impl GenerationRequest {
    /// Request the default instantiation of a type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            type_arguments: None,
        }
    }

    /// Request a specific instantiation of a generic type.
    pub fn with_arguments(mut self, arguments: Vec<TypeRef>) -> Self {
        self.type_arguments = Some(arguments);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_description() {
        let json = r#"{
            "package": "com.acme",
            "name": "Item",
            "fixture": true,
            "typeParameters": [{ "name": "T" }],
            "fields": [
                { "name": "itemId", "type": "java.util.UUID",
                  "constants": [{ "name": "ITEM_ID_1" }, { "name": "ITEM_ID_2", "value": "null" }] },
                { "name": "payload", "type": "T", "transient": true },
                { "name": "COUNTER", "type": "int", "static": true }
            ],
            "providers": { "java.lang.String": "quote(field.name)" },
            "creators": [
                { "kind": "constructor", "parameters": ["itemId"] },
                { "kind": "builder", "setters": ["payload"], "setterPrefix": "with" }
            ]
        }"#;

        let desc: TypeDescription = serde_json::from_str(json).unwrap();
        assert_eq!(desc.qualified_name(), "com.acme.Item");
        assert!(desc.fixture);
        assert_eq!(desc.parameter_names(), vec!["T".to_string()]);
        assert_eq!(desc.fields[0].constants.len(), 2);
        assert_eq!(desc.fields[0].constants[1].value.as_deref(), Some("null"));
        assert!(desc.fields[1].is_transient);
        assert!(desc.fields[2].is_static);
        assert_eq!(desc.creators.len(), 2);
        match &desc.creators[1] {
            CreatorDirective::Builder {
                builder_method,
                build_method,
                setter_prefix,
                ..
            } => {
                assert_eq!(builder_method, "builder");
                assert_eq!(build_method, "build");
                assert_eq!(setter_prefix.as_deref(), Some("with"));
            }
            other => panic!("expected builder, got {other:?}"),
        }
    }

    #[test]
    fn default_package_qualified_name() {
        let desc = TypeDescription::class("", "Plain");
        assert_eq!(desc.qualified_name(), "Plain");
        assert_eq!(desc.kind, TypeKind::Class);
    }

    #[test]
    fn rejects_bad_type_text() {
        let json = r#"{ "name": "Broken", "fields": [{ "name": "x", "type": "List<" }] }"#;
        assert!(serde_json::from_str::<TypeDescription>(json).is_err());
    }
}
