//! Shared types for fixturegen.
//!
//! This crate holds the input contract (type descriptions and directives),
//! the parsed type-reference grammar, the type catalog of one run, the
//! generics-aware metadata model, the naming strategy and the error
//! taxonomy. No generation logic lives here.

#![deny(unsafe_code)]

pub mod catalog;
pub mod description;
pub mod error;
pub mod known;
pub mod metadata;
pub mod naming;
pub mod random;
pub mod type_ref;

// Re-export primary types at crate root for ergonomic use.
pub use catalog::TypeCatalog;
pub use description::{
    ConstantDirective, CreatorDirective, FieldDescription, GenerationRequest, TypeDescription,
    TypeKind, TypeParameter,
};
pub use error::{FixtureError, FixtureResult};
pub use known::ContainerKind;
pub use metadata::{FieldMetadata, GenericParameter, TargetModel, TypeMetadata, TypeShape};
pub use random::{uuid_source, RandomUuids, SeededUuids, UuidSource};
pub use type_ref::{PrimitiveKind, TypeRef, TypeRefParseError};
