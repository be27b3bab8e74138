//! Fixture engine: orchestrates generation passes over a type catalog.
//!
//! Pipeline of one pass:
//! 1. Resolve the target model (metadata + fields)
//! 2. Layer the type's provider directives over the run-wide defaults
//! 3. Assemble constants (pipeline values, cross-references)
//! 4. Assemble creation methods
//! 5. Compose the fixture text and publish its summary
//!
//! A run schedules its passes by dependency level and runs each level on
//! scoped worker threads.

use std::collections::BTreeSet;

use tracing::{debug, info, info_span, warn};

use fixturegen_types::{
    uuid_source, FieldMetadata, FixtureError, FixtureResult, GenerationRequest, TargetModel,
    TypeCatalog,
};

use crate::compose;
use crate::config::GenerationConfig;
use crate::constants::{self, upstream_dependency, ConstantContext};
use crate::creation;
use crate::provider::{ProviderTable, ValuePipeline};
use crate::registry::FixtureRegistry;
use crate::render;
use crate::schedule::{schedule, PassNode};
use crate::types::{GeneratedFixture, RunOutcome, RunReport};

/// The fixture generation engine.
///
/// Holds the catalog of known types, the run-wide default providers and the
/// registry of fixtures published so far.
pub struct FixtureEngine {
    catalog: TypeCatalog,
    config: GenerationConfig,
    /// Run-wide providers, compiled once.
    defaults: ProviderTable,
    registry: FixtureRegistry,
}

impl FixtureEngine {
    /// Create an engine with the default configuration.
    pub fn new(catalog: TypeCatalog) -> FixtureResult<Self> {
        Self::with_config(catalog, GenerationConfig::default())
    }

    /// Create an engine with a custom configuration. Fails when the null
    /// token is blank, or when a default provider does not compile or names
    /// an unknown type.
    pub fn with_config(catalog: TypeCatalog, config: GenerationConfig) -> FixtureResult<Self> {
        config.validate()?;
        let defaults = ProviderTable::compile(&config.providers, &catalog, "")?;
        debug!(
            types = catalog.len(),
            providers = defaults.len(),
            "Fixture engine ready"
        );
        Ok(Self {
            catalog,
            config,
            defaults,
            registry: FixtureRegistry::new(),
        })
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Fixtures published by earlier passes.
    pub fn registry(&self) -> &FixtureRegistry {
        &self.registry
    }

    /// Generate and publish a single fixture.
    ///
    /// Cross-references resolve against fixtures already in the registry;
    /// this is also how a failed pass of a run is retried.
    pub fn generate(&self, request: &GenerationRequest) -> FixtureResult<GeneratedFixture> {
        let model = TargetModel::resolve(&self.catalog, request)?;
        let targets = self.targets(std::slice::from_ref(request));
        self.pass(&model, &targets)
    }

    /// Generate every request, respecting cross-fixture dependencies.
    ///
    /// Outcomes are reported in request order; one failed pass never stops
    /// the others, but passes that reference it fail in turn.
    pub fn run(&self, requests: &[GenerationRequest]) -> RunReport {
        let span = info_span!("fixture_run", requests = requests.len());
        let _guard = span.enter();

        let mut results: Vec<Option<FixtureResult<GeneratedFixture>>> =
            (0..requests.len()).map(|_| None).collect();
        let targets = self.targets(requests);

        // 1. Reject repeated targets and resolve models
        let mut seen = BTreeSet::new();
        let mut models: Vec<(usize, TargetModel)> = Vec::new();
        for (i, request) in requests.iter().enumerate() {
            if !seen.insert(request.type_name.as_str()) {
                results[i] = Some(Err(FixtureError::DuplicateTarget(format!(
                    "'{}' is requested more than once",
                    request.type_name
                ))));
                continue;
            }
            match TargetModel::resolve(&self.catalog, request) {
                Ok(model) => models.push((i, model)),
                Err(e) => results[i] = Some(Err(e)),
            }
        }

        // 2. Schedule by dependency level
        let nodes: Vec<PassNode> = models
            .iter()
            .map(|(_, model)| PassNode {
                type_name: model.metadata().qualified_name().to_string(),
                depends_on: self
                    .included_fields(model)
                    .into_iter()
                    .filter_map(|f| upstream_dependency(model, f, &targets))
                    .map(str::to_string)
                    .collect(),
            })
            .collect();
        let plan = schedule(&nodes);
        for (node, error) in plan.rejected {
            results[models[node].0] = Some(Err(error));
        }

        // 3. Run each level on scoped workers
        let workers = self.config.effective_workers();
        for level in &plan.levels {
            for chunk in level.chunks(workers) {
                let finished: Vec<(usize, FixtureResult<GeneratedFixture>)> =
                    std::thread::scope(|s| {
                        let handles: Vec<_> = chunk
                            .iter()
                            .map(|&node| {
                                let (slot, model) = &models[node];
                                let targets = &targets;
                                s.spawn(move || (*slot, self.pass(model, targets)))
                            })
                            .collect();
                        handles
                            .into_iter()
                            .map(|h| h.join().unwrap_or_else(|p| std::panic::resume_unwind(p)))
                            .collect()
                    });
                for (slot, result) in finished {
                    results[slot] = Some(result);
                }
            }
        }

        let outcomes: Vec<RunOutcome> = requests
            .iter()
            .zip(results)
            .map(|(request, result)| RunOutcome {
                request: request.clone(),
                result: result.unwrap_or_else(|| {
                    Err(FixtureError::UnresolvedFixtureReference(format!(
                        "'{}' was never scheduled",
                        request.type_name
                    )))
                }),
            })
            .collect();

        for (request, error) in outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.request, e)))
        {
            warn!(type_name = %request.type_name, error = %error, "Fixture pass failed");
        }

        let report = RunReport { outcomes };
        info!(
            total = report.outcomes.len(),
            succeeded = report.succeeded(),
            failed = report.failed(),
            levels = plan.levels.len(),
            "Fixture run complete"
        );
        report
    }

    /// One generation pass; publishes the summary on success.
    fn pass(
        &self,
        model: &TargetModel,
        targets: &BTreeSet<String>,
    ) -> FixtureResult<GeneratedFixture> {
        let metadata = model.metadata();
        let type_name = metadata.qualified_name();
        let span = info_span!("fixture_pass", type_name = %type_name);
        let _guard = span.enter();

        // 1. Included fields
        let fields = self.included_fields(model);

        // 2. Providers for this type
        let directives = ProviderTable::compile(
            &model.description().providers,
            &self.catalog,
            metadata.package_name(),
        )?;
        let providers = self.defaults.layered(&directives);
        let mut pipeline = ValuePipeline::new(
            providers,
            metadata,
            &self.config.null_token,
            uuid_source(self.config.uuid_seed, type_name),
        );

        // 3. Constants
        let ctx = ConstantContext {
            registry: &self.registry,
            targets,
        };
        let constants = constants::assemble(model, &fields, &mut pipeline, &ctx)?;

        // 4. Creation methods
        let methods = creation::assemble(model, &fields, &constants, &self.config.null_token)?;

        // 5. Compose and publish
        let source = compose::compose(
            &self.catalog,
            model,
            &constants,
            &methods,
            self.config.emit_header,
        );
        let fixture_simple_name = metadata.fixture_simple_name();
        let fixture = GeneratedFixture {
            type_name: type_name.to_string(),
            fixture_name: metadata.fixture_qualified_name(),
            relative_path: render::relative_path(metadata.package_name(), &fixture_simple_name),
            constants,
            methods,
            source,
        };
        self.registry.publish(fixture.summary())?;

        debug!(
            fixture = %fixture.fixture_name,
            constants = fixture.constants.len(),
            methods = fixture.methods.len(),
            "Generated fixture"
        );
        Ok(fixture)
    }

    /// Annotated catalog types plus every requested type.
    fn targets(&self, requests: &[GenerationRequest]) -> BTreeSet<String> {
        let mut targets: BTreeSet<String> = self.catalog.fixture_targets().into_iter().collect();
        targets.extend(requests.iter().map(|r| r.type_name.clone()));
        targets
    }

    fn included_fields<'m>(&self, model: &'m TargetModel) -> Vec<&'m FieldMetadata> {
        model
            .fields()
            .iter()
            .filter(|f| self.config.include_transient || !f.is_transient())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixturegen_types::{FieldDescription, TypeDescription, TypeRef};

    fn ty(text: &str) -> TypeRef {
        text.parse().unwrap()
    }

    fn catalog() -> TypeCatalog {
        TypeCatalog::from_descriptions(vec![
            TypeDescription::class("com.acme", "Order")
                .as_fixture()
                .with_field(FieldDescription::new("orderId", ty("UUID"))),
            TypeDescription::class("com.acme", "Item")
                .as_fixture()
                .with_field(FieldDescription::new("order", ty("Order")))
                .with_field(FieldDescription::new("cache", ty("String")).as_transient()),
        ])
        .unwrap()
    }

    #[test]
    fn run_orders_passes_by_dependency() {
        let engine = FixtureEngine::with_config(catalog(), GenerationConfig::default().with_seed(7))
            .unwrap();
        let report = engine.run(&[
            GenerationRequest::new("com.acme.Item"),
            GenerationRequest::new("com.acme.Order"),
        ]);
        assert!(report.is_success(), "{report}");

        let item = report.outcome("com.acme.Item").unwrap().result.as_ref().unwrap();
        let order = item.constants.iter().find(|c| c.name == "ORDER").unwrap();
        assert_eq!(order.value, "OrderFixture.createOrder()");
        assert_eq!(engine.registry().len(), 2);
    }

    #[test]
    fn generate_without_upstream_fails() {
        let engine = FixtureEngine::new(catalog()).unwrap();
        assert!(matches!(
            engine.generate(&GenerationRequest::new("com.acme.Item")),
            Err(FixtureError::UnresolvedFixtureReference(_))
        ));
        engine.generate(&GenerationRequest::new("com.acme.Order")).unwrap();
        engine.generate(&GenerationRequest::new("com.acme.Item")).unwrap();
    }

    #[test]
    fn transient_fields_can_be_excluded() {
        let engine = FixtureEngine::with_config(
            catalog(),
            GenerationConfig::default().without_transient(),
        )
        .unwrap();
        let report = engine.run(&[
            GenerationRequest::new("com.acme.Order"),
            GenerationRequest::new("com.acme.Item"),
        ]);
        let item = report.outcome("com.acme.Item").unwrap().result.as_ref().unwrap();
        assert_eq!(item.constants.len(), 1);
        assert_eq!(item.methods[0].body, "new Item(ORDER)");
    }

    #[test]
    fn duplicate_requests_fail() {
        let engine = FixtureEngine::new(catalog()).unwrap();
        let report = engine.run(&[
            GenerationRequest::new("com.acme.Order"),
            GenerationRequest::new("com.acme.Order"),
            GenerationRequest::new("com.acme.Missing"),
        ]);
        assert_eq!(report.succeeded(), 1);
        assert!(matches!(
            report.outcomes[1].result,
            Err(FixtureError::DuplicateTarget(_))
        ));
        assert!(matches!(
            report.outcomes[2].result,
            Err(FixtureError::UnknownTypeReference(_))
        ));
    }

    #[test]
    fn blank_null_tokens_fail_construction() {
        for token in ["", "   "] {
            let config = GenerationConfig {
                null_token: token.to_string(),
                ..GenerationConfig::default()
            };
            assert!(matches!(
                FixtureEngine::with_config(catalog(), config),
                Err(FixtureError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn bad_default_providers_fail_construction() {
        let config = GenerationConfig::default().with_provider("string", "{ return 1; }");
        assert!(matches!(
            FixtureEngine::with_config(catalog(), config),
            Err(FixtureError::UnsupportedProviderBody(_))
        ));
    }
}
