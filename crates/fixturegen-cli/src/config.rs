//! Driver configuration.
//!
//! Layered, lowest precedence first: built-in defaults, a TOML file, then
//! `FIXTUREGEN_*` environment variables (`__` separates nested keys, e.g.
//! `FIXTUREGEN_GENERATION__UUID_SEED=7`). Command-line flags are applied
//! last by the caller.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use fixturegen_engine::GenerationConfig;

/// Settings of one `fixturegen` invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Directory generated sources are written under.
    pub out_dir: PathBuf,
    /// Engine settings.
    pub generation: GenerationConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("generated"),
            generation: GenerationConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        builder = builder.add_source(
            config::Environment::with_prefix("FIXTUREGEN")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_sources() {
        let config = CliConfig::load(None).unwrap();
        assert_eq!(config.out_dir, PathBuf::from("generated"));
        assert!(config.generation.emit_header);
        assert_eq!(config.generation.null_token, "null");
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
out_dir = "src/test/java"

[generation]
emit_header = false
uuid_seed = 11
workers = 2

[generation.providers]
string = "quote(field.name)"
"#
        )
        .unwrap();

        let config = CliConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.out_dir, PathBuf::from("src/test/java"));
        assert!(!config.generation.emit_header);
        assert!(config.generation.include_transient);
        assert_eq!(config.generation.uuid_seed, Some(11));
        assert_eq!(config.generation.workers, 2);
        assert_eq!(
            config.generation.providers.get("string").map(String::as_str),
            Some("quote(field.name)")
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(CliConfig::load(Some(Path::new("/nonexistent/fixturegen.toml"))).is_err());
    }
}
