//! Catalog file loading.

use std::path::Path;

use tracing::debug;

use fixturegen_types::{TypeCatalog, TypeDescription};

use crate::error::CliResult;

/// Load a catalog: a list of type descriptions, YAML for `.yaml`/`.yml`
/// files and JSON otherwise.
pub fn load_catalog(path: &Path) -> CliResult<TypeCatalog> {
    let text = std::fs::read_to_string(path)?;
    let descriptions: Vec<TypeDescription> = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => serde_yaml::from_str(&text)?,
        _ => serde_json::from_str(&text)?,
    };
    let catalog = TypeCatalog::from_descriptions(descriptions)?;
    debug!(path = %path.display(), types = catalog.len(), "Loaded catalog");
    Ok(catalog)
}
