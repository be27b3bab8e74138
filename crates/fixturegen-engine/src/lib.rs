//! Fixture generation engine.
//!
//! Turns a described type into the source text of a companion fixture:
//!
//! ```text
//! GenerationRequest
//!   → TargetModel            (fixturegen-types)
//!   → ValuePipeline          per field: custom providers, then built-ins
//!   → constants::assemble    names, values, cross-references
//!   → creation::assemble     constructor / builder factory methods
//!   → compose::compose       Java text
//!   → FixtureRegistry        summary published for later passes
//! ```
//!
//! [`FixtureEngine::run`] schedules a batch of requests by dependency level
//! and runs each level in parallel.

#![deny(unsafe_code)]

pub mod compose;
pub mod config;
pub mod constants;
pub mod creation;
pub mod engine;
pub mod provider;
pub mod registry;
pub mod render;
pub mod schedule;
pub mod shape;
pub mod types;

// Re-export primary types at crate root for ergonomic use.
pub use config::GenerationConfig;
pub use engine::FixtureEngine;
pub use provider::{ProviderTable, ValuePipeline};
pub use registry::FixtureRegistry;
pub use shape::ValueShape;
pub use types::{
    ConstantEntry, CreationKind, CreationMethodDescriptor, FixtureSummary, GeneratedFixture,
    RunOutcome, RunReport,
};

pub use fixturegen_types::{FixtureError, FixtureResult, GenerationRequest, TypeCatalog};
