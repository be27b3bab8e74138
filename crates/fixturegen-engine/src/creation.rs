//! Creation method assembly.
//!
//! Directive parameters name either an assembled constant or an included
//! field; a field stands for its primary constant. Method names are derived
//! from the constant names in word case:
//!
//! ```text
//! constructor [STRING_FIELD, COUNT]  → createItemWithStringFieldAndCount
//! builder     [itemId] prefix "with" → buildItemWithItemId
//!                                       Item.builder().withItemId(ITEM_ID).build()
//! ```

use std::collections::BTreeSet;

use tracing::{debug, warn};

use fixturegen_types::naming;
use fixturegen_types::{
    CreatorDirective, FieldMetadata, FixtureError, FixtureResult, TargetModel, TypeShape,
};

use crate::constants::primary_constant_name;
use crate::render;
use crate::types::{ConstantEntry, CreationKind, CreationMethodDescriptor};

/// A directive parameter resolved to a constant and its owning field.
struct Argument<'c> {
    constant: &'c str,
    field_name: &'c str,
}

/// Assemble the creation methods of one target, in directive order.
///
/// Without creator directives a single default constructor method is
/// synthesized. It passes one argument per included field, that field's
/// primary constant (its first naming directive, or the strategy name).
/// Further constants of the same field are aliases and are not passed.
pub fn assemble(
    model: &TargetModel,
    fields: &[&FieldMetadata],
    constants: &[ConstantEntry],
    null_token: &str,
) -> FixtureResult<Vec<CreationMethodDescriptor>> {
    let metadata = model.metadata();
    let package = metadata.package_name();
    let rendered = render::render_name(metadata.qualified_name(), package);
    let return_type = render::render_type(metadata.type_ref(), package);
    let creators = &model.description().creators;

    if metadata.shape() == TypeShape::Enum {
        if !creators.is_empty() {
            warn!(
                type_name = metadata.qualified_name(),
                creators = creators.len(),
                "Ignoring creation directives on an enum"
            );
        }
        let body = match metadata.enum_constants().first() {
            Some(first) => render::enum_constant(&rendered, first),
            None => null_token.to_string(),
        };
        return Ok(vec![CreationMethodDescriptor {
            method_name: format!("create{}", metadata.simple_name()),
            return_type,
            body,
            source_kind: CreationKind::Constructor,
        }]);
    }

    let constructed = if metadata.is_generic() {
        format!("{rendered}<>")
    } else {
        rendered.clone()
    };

    let mut methods = Vec::new();
    if creators.is_empty() {
        let parameters = fields
            .iter()
            .map(|f| primary_constant_name(f))
            .collect::<FixtureResult<Vec<_>>>()?;
        let arguments = resolve_all(&parameters, fields, constants)?;
        methods.push(CreationMethodDescriptor {
            method_name: format!("create{}", metadata.simple_name()),
            return_type: return_type.clone(),
            body: constructor_body(&constructed, &arguments),
            source_kind: CreationKind::Constructor,
        });
    }

    for creator in creators {
        let method = match creator {
            CreatorDirective::Constructor { parameters, name } => {
                let arguments = resolve_all(parameters, fields, constants)?;
                CreationMethodDescriptor {
                    method_name: method_name(name.as_deref(), "create", metadata.simple_name(), &arguments)?,
                    return_type: return_type.clone(),
                    body: constructor_body(&constructed, &arguments),
                    source_kind: CreationKind::Constructor,
                }
            }
            CreatorDirective::Builder {
                setters,
                builder_method,
                build_method,
                setter_prefix,
                name,
            } => {
                let arguments = resolve_all(setters, fields, constants)?;
                let chain: String = arguments
                    .iter()
                    .map(|a| {
                        let setter = match setter_prefix.as_deref() {
                            Some(prefix) if !prefix.is_empty() => {
                                format!("{prefix}{}", naming::capitalize(a.field_name))
                            }
                            _ => a.field_name.to_string(),
                        };
                        format!(".{setter}({})", a.constant)
                    })
                    .collect();
                CreationMethodDescriptor {
                    method_name: method_name(name.as_deref(), "build", metadata.simple_name(), &arguments)?,
                    return_type: return_type.clone(),
                    body: format!("{rendered}.{builder_method}(){chain}.{build_method}()"),
                    source_kind: CreationKind::Builder,
                }
            }
        };
        methods.push(method);
    }

    let mut seen = BTreeSet::new();
    for method in &methods {
        if !seen.insert(method.method_name.as_str()) {
            return Err(FixtureError::DuplicateCreationMethod(format!(
                "'{}' is generated more than once for {}",
                method.method_name,
                metadata.qualified_name()
            )));
        }
    }

    debug!(
        type_name = metadata.qualified_name(),
        methods = methods.len(),
        "Assembled creation methods"
    );
    Ok(methods)
}

fn resolve_all<'c>(
    parameters: &[String],
    fields: &'c [&'c FieldMetadata],
    constants: &'c [ConstantEntry],
) -> FixtureResult<Vec<Argument<'c>>> {
    parameters
        .iter()
        .map(|p| resolve(p, fields, constants))
        .collect()
}

/// Constant names first, then field names of included fields.
fn resolve<'c>(
    parameter: &str,
    fields: &'c [&'c FieldMetadata],
    constants: &'c [ConstantEntry],
) -> FixtureResult<Argument<'c>> {
    if let Some(entry) = find_constant(constants, parameter) {
        return Ok(Argument {
            constant: &entry.name,
            field_name: &entry.field_name,
        });
    }
    if let Some(field) = fields.iter().find(|f| f.name() == parameter) {
        let primary = primary_constant_name(field)?;
        if let Some(entry) = find_constant(constants, &primary) {
            return Ok(Argument {
                constant: &entry.name,
                field_name: field.name(),
            });
        }
    }
    Err(FixtureError::UnknownConstantReference(format!(
        "creation directive parameter '{parameter}' is neither a constant nor an included field"
    )))
}

fn find_constant<'c>(constants: &'c [ConstantEntry], name: &str) -> Option<&'c ConstantEntry> {
    constants
        .binary_search_by(|c| c.name.as_str().cmp(name))
        .ok()
        .map(|i| &constants[i])
}

fn method_name(
    explicit: Option<&str>,
    verb: &str,
    simple_name: &str,
    arguments: &[Argument<'_>],
) -> FixtureResult<String> {
    if let Some(name) = explicit {
        if !naming::is_constant_identifier(name) {
            return Err(FixtureError::InvalidIdentifierFormat(format!(
                "'{name}' is not a valid method name"
            )));
        }
        return Ok(name.to_string());
    }
    let words: Vec<String> = arguments
        .iter()
        .map(|a| naming::to_word_case(a.constant))
        .collect();
    if words.is_empty() {
        Ok(format!("{verb}{simple_name}"))
    } else {
        Ok(format!("{verb}{simple_name}With{}", words.join("And")))
    }
}

fn constructor_body(constructed: &str, arguments: &[Argument<'_>]) -> String {
    let list: Vec<&str> = arguments.iter().map(|a| a.constant).collect();
    format!("new {constructed}({})", list.join(", "))
}
