//! Fixture text composition.

use std::fmt::Write;

use fixturegen_types::{TargetModel, TypeCatalog};

use crate::render;
use crate::types::{ConstantEntry, CreationMethodDescriptor};

/// Header comment emitted at the top of every generated file.
pub const HEADER: &str = "// Generated by fixturegen. Do not edit.";

const INDENT: &str = "    ";

/// Render the source text of a fixture.
pub fn compose(
    catalog: &TypeCatalog,
    model: &TargetModel,
    constants: &[ConstantEntry],
    methods: &[CreationMethodDescriptor],
    emit_header: bool,
) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_fixture(&mut out, catalog, model, constants, methods, emit_header);
    out
}

fn write_fixture(
    out: &mut String,
    catalog: &TypeCatalog,
    model: &TargetModel,
    constants: &[ConstantEntry],
    methods: &[CreationMethodDescriptor],
    emit_header: bool,
) -> std::fmt::Result {
    let metadata = model.metadata();

    if emit_header {
        writeln!(out, "{HEADER}")?;
    }
    if !metadata.package_name().is_empty() {
        writeln!(out, "package {};", metadata.package_name())?;
        writeln!(out)?;
    }

    let parameters = render::type_parameter_list(catalog, model.description());
    writeln!(
        out,
        "public class {}{parameters} {{",
        metadata.fixture_simple_name()
    )?;

    if !constants.is_empty() {
        writeln!(out)?;
        for constant in constants {
            writeln!(
                out,
                "{INDENT}public static final {} {} = {};",
                constant.declared_type, constant.name, constant.value
            )?;
        }
    }

    for method in methods {
        writeln!(out)?;
        writeln!(
            out,
            "{INDENT}public static {} {}() {{",
            method.return_type, method.method_name
        )?;
        writeln!(out, "{INDENT}{INDENT}return {};", method.body)?;
        writeln!(out, "{INDENT}}}")?;
    }

    writeln!(out, "}}")
}
