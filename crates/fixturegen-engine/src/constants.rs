//! Constant assembly and cross-fixture references.
//!
//! Each field yields one constant per naming directive, or one constant
//! named by the naming strategy. Value precedence is: explicit directive
//! value, then a reference into another generated fixture, then the value
//! pipeline (run at most once per field).

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use fixturegen_types::naming;
use fixturegen_types::{FieldMetadata, FixtureError, FixtureResult, TargetModel};

use crate::provider::ValuePipeline;
use crate::registry::FixtureRegistry;
use crate::render;
use crate::types::{ConstantEntry, FixtureSummary};

/// Run-level context the assembler reads.
pub struct ConstantContext<'a> {
    pub registry: &'a FixtureRegistry,
    /// Every generation target of the run.
    pub targets: &'a BTreeSet<String>,
}

/// Name a creation method uses when it refers to a field by its field name.
pub fn primary_constant_name(field: &FieldMetadata) -> FixtureResult<String> {
    match field.field().constants.first() {
        Some(directive) => Ok(directive.name.clone()),
        None => naming::create_name(field.name()),
    }
}

/// The generation target a field cross-references, if any. A type never
/// cross-references its own fixture.
pub fn cross_reference_target<'f>(
    model: &TargetModel,
    field: &'f FieldMetadata,
    targets: &BTreeSet<String>,
) -> Option<&'f str> {
    let name = field.resolved().qualified_name();
    (targets.contains(name) && name != model.metadata().qualified_name()).then_some(name)
}

/// The generation target that must be published before this field's
/// constants can be assembled. Fields whose directives all carry explicit
/// values never read the upstream fixture.
pub fn upstream_dependency<'f>(
    model: &TargetModel,
    field: &'f FieldMetadata,
    targets: &BTreeSet<String>,
) -> Option<&'f str> {
    let directives = &field.field().constants;
    let reads_upstream = directives.is_empty() || directives.iter().any(|d| d.value.is_none());
    cross_reference_target(model, field, targets).filter(|_| reads_upstream)
}

/// Assemble the constants of one target, sorted by name.
pub fn assemble(
    model: &TargetModel,
    fields: &[&FieldMetadata],
    pipeline: &mut ValuePipeline<'_>,
    ctx: &ConstantContext<'_>,
) -> FixtureResult<Vec<ConstantEntry>> {
    let package = model.metadata().package_name();
    let mut by_name: BTreeMap<String, ConstantEntry> = BTreeMap::new();

    for field in fields {
        let declared_type = render::render_type(field.resolved().type_ref(), package);
        let target = cross_reference_target(model, field, ctx.targets);

        let directives: Vec<(String, Option<&str>, Option<&str>)> =
            if field.field().constants.is_empty() {
                vec![(naming::create_name(field.name())?, None, None)]
            } else {
                field
                    .field()
                    .constants
                    .iter()
                    .map(|d| {
                        naming::validate_constant_name(&d.name)?;
                        Ok((d.name.clone(), d.value.as_deref(), d.reference.as_deref()))
                    })
                    .collect::<FixtureResult<_>>()?
            };

        let mut upstream: Option<FixtureSummary> = None;
        let mut resolved: Option<String> = None;

        for (directive_index, (name, explicit, reference)) in directives.into_iter().enumerate() {
            let value = match (explicit, target, reference) {
                (Some(explicit), _, _) => explicit.to_string(),
                (None, Some(target), reference) => {
                    let summary = match upstream.take() {
                        Some(summary) => summary,
                        None => lookup(ctx.registry, target, field)?,
                    };
                    let text = reference_text(&summary, reference, package)?;
                    upstream = Some(summary);
                    text
                }
                (None, None, Some(reference)) => {
                    return Err(FixtureError::UnresolvedFixtureReference(format!(
                        "field '{}' references constant '{reference}' but its type '{}' is not a generation target",
                        field.name(),
                        field.resolved().qualified_name()
                    )));
                }
                (None, None, None) => resolved
                    .get_or_insert_with(|| pipeline.resolve(field))
                    .clone(),
            };

            let entry = ConstantEntry {
                name,
                declared_type: declared_type.clone(),
                value,
                source_order: (field.index(), directive_index),
                field_name: field.name().to_string(),
            };
            insert_unique(&mut by_name, entry)?;
        }
    }

    let constants: Vec<ConstantEntry> = by_name.into_values().collect();
    debug!(
        type_name = model.metadata().qualified_name(),
        constants = constants.len(),
        "Assembled constants"
    );
    Ok(constants)
}

fn lookup(
    registry: &FixtureRegistry,
    target: &str,
    field: &FieldMetadata,
) -> FixtureResult<FixtureSummary> {
    registry.get(target).ok_or_else(|| {
        FixtureError::UnresolvedFixtureReference(format!(
            "field '{}' references '{target}', which was not generated in this run",
            field.name()
        ))
    })
}

fn reference_text(
    summary: &FixtureSummary,
    reference: Option<&str>,
    package: &str,
) -> FixtureResult<String> {
    let fixture = render::render_name(&summary.fixture_name, package);
    match reference {
        Some(constant) => {
            if summary.has_constant(constant) {
                Ok(format!("{fixture}.{constant}"))
            } else {
                Err(FixtureError::UnknownConstantReference(format!(
                    "'{constant}' is not a constant of {}",
                    summary.fixture_name
                )))
            }
        }
        None => Ok(format!("{fixture}.{}()", summary.default_method)),
    }
}

fn insert_unique(
    by_name: &mut BTreeMap<String, ConstantEntry>,
    entry: ConstantEntry,
) -> FixtureResult<()> {
    match by_name.get(&entry.name) {
        Some(existing) if existing.value == entry.value => Ok(()),
        Some(existing) => Err(FixtureError::DuplicateConstantName {
            name: entry.name.clone(),
            first: existing.value.clone(),
            second: entry.value,
        }),
        None => {
            by_name.insert(entry.name.clone(), entry);
            Ok(())
        }
    }
}
