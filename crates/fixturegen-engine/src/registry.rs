//! Registry of completed fixtures shared between passes.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use fixturegen_types::{FixtureError, FixtureResult};

use crate::types::FixtureSummary;

/// Write-once map from target type name to its published summary.
#[derive(Debug, Default)]
pub struct FixtureRegistry {
    fixtures: DashMap<String, FixtureSummary>,
}

impl FixtureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a completed fixture. Re-publishing an identical summary is a
    /// no-op; a different summary for the same type is rejected.
    pub fn publish(&self, summary: FixtureSummary) -> FixtureResult<()> {
        match self.fixtures.entry(summary.type_name.clone()) {
            Entry::Occupied(existing) => {
                if existing.get() == &summary {
                    Ok(())
                } else {
                    Err(FixtureError::DuplicateTarget(format!(
                        "fixture for '{}' was already published with different contents",
                        summary.type_name
                    )))
                }
            }
            Entry::Vacant(slot) => {
                debug!(
                    type_name = %summary.type_name,
                    fixture = %summary.fixture_name,
                    constants = summary.constants.len(),
                    "Published fixture"
                );
                slot.insert(summary);
                Ok(())
            }
        }
    }

    /// Summary of a published fixture.
    pub fn get(&self, type_name: &str) -> Option<FixtureSummary> {
        self.fixtures.get(type_name).map(|s| s.clone())
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.fixtures.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }

    /// Published type names, sorted.
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.fixtures.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(method: &str) -> FixtureSummary {
        FixtureSummary {
            type_name: "com.acme.Item".into(),
            fixture_name: "com.acme.ItemFixture".into(),
            constants: vec!["ITEM_ID".into()],
            default_method: method.into(),
        }
    }

    #[test]
    fn publish_is_write_once() {
        let registry = FixtureRegistry::new();
        registry.publish(summary("createItem")).unwrap();
        registry.publish(summary("createItem")).unwrap();
        assert!(matches!(
            registry.publish(summary("buildItem")),
            Err(FixtureError::DuplicateTarget(_))
        ));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("com.acme.Item").unwrap().default_method, "createItem");
        assert!(registry.get("com.acme.Other").is_none());
    }

    #[test]
    fn concurrent_publishers_see_one_winner() {
        let registry = FixtureRegistry::new();
        std::thread::scope(|s| {
            for i in 0..8 {
                let registry = &registry;
                s.spawn(move || {
                    let mut summary = summary("createItem");
                    summary.type_name = format!("com.acme.Item{i}");
                    registry.publish(summary).unwrap();
                });
            }
        });
        assert_eq!(registry.len(), 8);
        assert_eq!(registry.type_names()[0], "com.acme.Item0");
    }
}
