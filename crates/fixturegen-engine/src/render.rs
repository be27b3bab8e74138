//! Java text rendering helpers.

use fixturegen_types::known;
use fixturegen_types::{TypeCatalog, TypeDescription, TypeRef};
use uuid::Uuid;

pub use fixturegen_expr::java_string_literal;

/// Render a qualified name as seen from `package`: short for `java.lang`
/// and the same package, qualified otherwise.
pub fn render_name(qualified_name: &str, package: &str) -> String {
    let owner = known::package_of(qualified_name);
    if owner == "java.lang" || owner == package {
        known::simple_name_of(qualified_name).to_string()
    } else {
        qualified_name.to_string()
    }
}

/// Render a type reference as seen from `package`.
pub fn render_type(ty: &TypeRef, package: &str) -> String {
    ty.map_names(&|name: &str| render_name(name, package)).to_string()
}

/// `java.util.UUID.fromString("…")` for a baked UUID.
pub fn uuid_expression(uuid: &Uuid) -> String {
    format!("{}.fromString(\"{}\")", known::UUID, uuid.hyphenated())
}

/// Empty array of the erased component type, extra dimensions as `[]`.
pub fn empty_array(ty: &TypeRef) -> String {
    let (element, depth) = ty.element_type();
    let extra = "[]".repeat(depth.saturating_sub(1));
    format!("new {}[0]{extra}", element.erasure())
}

/// Qualified reference to an enumerator.
pub fn enum_constant(qualified_name: &str, constant: &str) -> String {
    format!("{qualified_name}.{constant}")
}

/// Declared generic parameter list with bounds (`<T, N extends Number>`).
pub fn type_parameter_list(catalog: &TypeCatalog, description: &TypeDescription) -> String {
    if description.type_parameters.is_empty() {
        return String::new();
    }
    let names = description.parameter_names();
    let parameters: Vec<String> = description
        .type_parameters
        .iter()
        .map(|p| match &p.bound {
            Some(bound) => {
                let bound = catalog.qualify_type(&bound.bind_variables(&names), &description.package);
                format!("{} extends {}", p.name, render_type(&bound, &description.package))
            }
            None => p.name.clone(),
        })
        .collect();
    format!("<{}>", parameters.join(", "))
}

/// Output path of a fixture relative to the source root.
pub fn relative_path(package: &str, fixture_simple_name: &str) -> String {
    if package.is_empty() {
        format!("{fixture_simple_name}.java")
    } else {
        format!("{}/{fixture_simple_name}.java", package.replace('.', "/"))
    }
}
