//! Value provider pipeline.
//!
//! Resolution order for one field, first match wins:
//!
//! ```text
//! 1. custom provider   exact qualified type name, then shape tag
//! 2. scalar            primitive and boxed defaults
//! 3. well-known value  String, UUID, BigDecimal, Instant, ...
//! 4. declared type     first enumerator; plain classes get the null token
//! 5. container         canonical empty collection, empty array
//! 6. fallback          the null token
//! ```
//!
//! Custom providers that decline (null or empty text) or fail at evaluation
//! time are skipped with a warning; resolution itself never fails.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use fixturegen_expr::{compile, CompiledProvider, EvalContext};
use fixturegen_types::{
    FieldMetadata, FixtureError, FixtureResult, TypeCatalog, TypeMetadata, TypeRef, UuidSource,
};

use crate::render;
use crate::shape::{classify, ValueShape};

// ── Provider table ─────────────────────────────────────────────────────

/// Compiled custom providers keyed by qualified type name or shape tag.
#[derive(Clone, Debug, Default)]
pub struct ProviderTable {
    entries: BTreeMap<String, CompiledProvider>,
}

impl ProviderTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile provider directives. Keys are qualified as seen from
    /// `package`; a key that is neither a shape tag nor a known type fails
    /// with `UnknownTypeReference`.
    pub fn compile(
        sources: &BTreeMap<String, String>,
        catalog: &TypeCatalog,
        package: &str,
    ) -> FixtureResult<Self> {
        let mut entries = BTreeMap::new();
        for (key, source) in sources {
            let key = normalize_key(key, catalog, package)?;
            let provider = compile(source).map_err(|e| {
                let err: FixtureError = e.into();
                debug!(key = %key, error = %err, "Provider failed to compile");
                err
            })?;
            entries.insert(key, provider);
        }
        Ok(Self { entries })
    }

    /// This table with `overrides` layered on top; overrides win on collision.
    pub fn layered(&self, overrides: &ProviderTable) -> ProviderTable {
        let mut entries = self.entries.clone();
        for (key, provider) in &overrides.entries {
            entries.insert(key.clone(), provider.clone());
        }
        ProviderTable { entries }
    }

    pub fn get(&self, key: &str) -> Option<&CompiledProvider> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn normalize_key(key: &str, catalog: &TypeCatalog, package: &str) -> FixtureResult<String> {
    let key = key.trim();
    if ValueShape::is_tag(key) {
        return Ok(key.to_string());
    }
    let parsed: TypeRef = key.parse().map_err(|e| {
        FixtureError::UnknownTypeReference(format!("provider key '{key}': {e}"))
    })?;
    let erased = catalog.qualify_type(&parsed, package).erasure();
    if catalog.is_known_type(&erased) {
        Ok(erased)
    } else {
        Err(FixtureError::UnknownTypeReference(format!(
            "provider key '{key}' is neither a shape tag nor a known type"
        )))
    }
}

// ── Pipeline ───────────────────────────────────────────────────────────

/// Per-pass value resolution for the fields of one type.
pub struct ValuePipeline<'a> {
    providers: ProviderTable,
    owner: &'a TypeMetadata,
    null_token: &'a str,
    uuids: Box<dyn UuidSource>,
}

impl<'a> ValuePipeline<'a> {
    pub fn new(
        providers: ProviderTable,
        owner: &'a TypeMetadata,
        null_token: &'a str,
        uuids: Box<dyn UuidSource>,
    ) -> Self {
        Self {
            providers,
            owner,
            null_token,
            uuids,
        }
    }

    /// Resolve the default value text of one field. Never fails, never empty.
    pub fn resolve(&mut self, field: &FieldMetadata) -> String {
        let ty = field.resolved();
        let shape = classify(ty);

        if let Some(value) = self.custom(field, shape) {
            debug!(field = field.name(), stage = "custom", value = %value, "Resolved field");
            return value;
        }

        let value = match shape {
            ValueShape::Scalar(kind) => kind.default_literal().to_string(),
            ValueShape::String => match fixturegen_types::naming::create_name(field.name()) {
                Ok(name) => render::java_string_literal(&format!("{name}_VALUE")),
                Err(_) => render::java_string_literal(&format!("{}_VALUE", field.name())),
            },
            ValueShape::Uuid => render::uuid_expression(&self.uuids.next_uuid()),
            ValueShape::WellKnown(expression) => expression.to_string(),
            ValueShape::Enum => match ty.enum_constants().first() {
                Some(first) => render::enum_constant(ty.qualified_name(), first),
                None => self.null_token.to_string(),
            },
            ValueShape::Container(kind) => kind.empty_expression().to_string(),
            ValueShape::Array => render::empty_array(ty.type_ref()),
            ValueShape::Class | ValueShape::Unknown => self.null_token.to_string(),
        };
        debug!(field = field.name(), stage = shape.tag(), value = %value, "Resolved field");
        value
    }

    fn custom(&mut self, field: &FieldMetadata, shape: ValueShape) -> Option<String> {
        let keys = [field.resolved().qualified_name(), shape.tag()];
        for key in keys {
            let Some(provider) = self.providers.get(key) else {
                continue;
            };
            let mut ctx = EvalContext::new(field, self.owner, self.uuids.as_mut());
            match provider.evaluate(&mut ctx) {
                Ok(Some(value)) => return Some(value),
                Ok(None) => {
                    warn!(
                        field = field.name(),
                        key,
                        provider = provider.source(),
                        "Custom provider declined; falling through"
                    );
                }
                Err(e) => {
                    warn!(
                        field = field.name(),
                        key,
                        provider = provider.source(),
                        error = %e,
                        "Custom provider failed; falling through"
                    );
                }
            }
        }
        None
    }
}
