//! The set of types known to one generation run.

use std::collections::BTreeMap;

use crate::description::TypeDescription;
use crate::error::{FixtureError, FixtureResult};
use crate::known;
use crate::type_ref::{PrimitiveKind, TypeRef};

/// Read-only catalog of type descriptions keyed by qualified name.
#[derive(Clone, Debug, Default)]
pub struct TypeCatalog {
    types: BTreeMap<String, TypeDescription>,
}

impl TypeCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, rejecting duplicate qualified names.
    pub fn from_descriptions<I>(descriptions: I) -> FixtureResult<Self>
    where
        I: IntoIterator<Item = TypeDescription>,
    {
        let mut catalog = Self::new();
        for description in descriptions {
            catalog.insert(description)?;
        }
        Ok(catalog)
    }

    /// Add a description.
    pub fn insert(&mut self, description: TypeDescription) -> FixtureResult<()> {
        let name = description.qualified_name();
        if self.types.contains_key(&name) {
            return Err(FixtureError::DuplicateTarget(format!(
                "type '{name}' is described more than once"
            )));
        }
        self.types.insert(name, description);
        Ok(())
    }

    /// Look up a description by qualified name.
    pub fn get(&self, qualified_name: &str) -> Option<&TypeDescription> {
        self.types.get(qualified_name)
    }

    /// Look up a description, failing with `UnknownTypeReference`.
    pub fn require(&self, qualified_name: &str) -> FixtureResult<&TypeDescription> {
        self.get(qualified_name).ok_or_else(|| {
            FixtureError::UnknownTypeReference(format!(
                "type '{qualified_name}' is not in the catalog"
            ))
        })
    }

    /// Number of described types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All descriptions, ordered by qualified name.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDescription> {
        self.types.values()
    }

    /// Qualified names of every type annotated as a fixture target.
    pub fn fixture_targets(&self) -> Vec<String> {
        self.types
            .iter()
            .filter(|(_, d)| d.fixture)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Qualify a declared name as seen from `package`.
    ///
    /// Dotted names are taken as already qualified. A short name resolves to
    /// a catalog type of the same package, then to an implicitly imported
    /// library type, then to the only catalog type with that simple name.
    pub fn qualify(&self, name: &str, package: &str) -> String {
        if name.contains('.') {
            return name.to_string();
        }

        let same_package = if package.is_empty() {
            name.to_string()
        } else {
            format!("{package}.{name}")
        };
        if self.types.contains_key(&same_package) {
            return same_package;
        }

        if let Some(qualified) = known::implicit_qualification(name) {
            return qualified.to_string();
        }

        let mut by_simple = self.types.values().filter(|d| d.name == name);
        match (by_simple.next(), by_simple.next()) {
            (Some(only), None) => only.qualified_name(),
            _ => name.to_string(),
        }
    }

    /// Qualify every declared name inside a type reference.
    pub fn qualify_type(&self, ty: &TypeRef, package: &str) -> TypeRef {
        ty.map_names(&|name: &str| self.qualify(name, package))
    }

    /// Whether `name` (optionally with `[]` suffixes) names a known type.
    pub fn is_known_type(&self, name: &str) -> bool {
        let mut element = name.trim();
        while let Some(stripped) = element.strip_suffix("[]") {
            element = stripped.trim_end();
        }
        PrimitiveKind::from_keyword(element).is_some()
            || self.types.contains_key(element)
            || known::is_library_type(element)
    }
}
