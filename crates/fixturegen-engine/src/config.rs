//! Generation configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fixturegen_types::{FixtureError, FixtureResult};

/// Run-wide generation settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Include transient fields in constants and default creation methods.
    pub include_transient: bool,
    /// Emit the generated-file header comment.
    pub emit_header: bool,
    /// Maximum passes running concurrently within one dependency level.
    pub workers: usize,
    /// Seed for reproducible UUID literals; random when unset.
    pub uuid_seed: Option<u64>,
    /// Default custom providers (type name or shape tag → expression).
    pub providers: BTreeMap<String, String>,
    /// Absence token used when no value can be resolved.
    pub null_token: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            include_transient: true,
            emit_header: true,
            workers: default_workers(),
            uuid_seed: None,
            providers: BTreeMap::new(),
            null_token: "null".to_string(),
        }
    }
}

impl GenerationConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.uuid_seed = Some(seed);
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_provider(mut self, key: impl Into<String>, expression: impl Into<String>) -> Self {
        self.providers.insert(key.into(), expression.into());
        self
    }

    pub fn without_transient(mut self) -> Self {
        self.include_transient = false;
        self
    }

    pub fn without_header(mut self) -> Self {
        self.emit_header = false;
        self
    }

    /// Reject settings that would let a pass emit an empty value.
    pub fn validate(&self) -> FixtureResult<()> {
        if self.null_token.trim().is_empty() {
            return Err(FixtureError::InvalidConfiguration(
                "null_token must not be blank".to_string(),
            ));
        }
        Ok(())
    }

    /// Worker count clamped to at least one.
    pub fn effective_workers(&self) -> usize {
        self.workers.max(1)
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
