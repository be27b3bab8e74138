//! Fixture generation error types.
//!
//! Every failure of a generation pass is one of these variants. They are
//! detected at the point of violation, never retried internally, and carry
//! a human-readable message for the driver.

use thiserror::Error;

/// Errors that can occur while generating a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixtureError {
    /// A field or directive name does not have the expected identifier shape.
    #[error("Invalid identifier format: {0}")]
    InvalidIdentifierFormat(String),

    /// A custom provider body is a statement block, not a single expression.
    #[error("Unsupported provider body: {0}")]
    UnsupportedProviderBody(String),

    /// A custom provider expression could not be parsed.
    #[error("Malformed provider expression: {0}")]
    MalformedProviderExpression(String),

    /// Declared generic parameters and supplied type arguments disagree.
    #[error("Generic arity mismatch for '{type_name}': declares {declared}, got {supplied}")]
    GenericArityMismatch {
        type_name: String,
        declared: usize,
        supplied: usize,
    },

    /// A request or directive names a type that cannot be found.
    #[error("Unknown type reference: {0}")]
    UnknownTypeReference(String),

    /// Two constants resolve to the same name with different values.
    #[error("Duplicate constant name '{name}': '{first}' conflicts with '{second}'")]
    DuplicateConstantName {
        name: String,
        first: String,
        second: String,
    },

    /// A directive cites a constant that was never assembled.
    #[error("Unknown constant reference: {0}")]
    UnknownConstantReference(String),

    /// A cross-reference targets a type that was not generated in this run.
    #[error("Unresolved fixture reference: {0}")]
    UnresolvedFixtureReference(String),

    /// Generation targets reference each other in a cycle.
    #[error("Cyclic fixture dependency: {}", .0.join(" -> "))]
    CyclicFixtureDependency(Vec<String>),

    /// Two creation methods resolve to the same method name.
    #[error("Duplicate creation method: {0}")]
    DuplicateCreationMethod(String),

    /// The same type was described or requested more than once.
    #[error("Duplicate target: {0}")]
    DuplicateTarget(String),

    /// Generation settings that no pass can honour.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for fixture generation operations.
pub type FixtureResult<T> = Result<T, FixtureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let e = FixtureError::InvalidIdentifierFormat("item_id".into());
        assert!(e.to_string().contains("item_id"));

        let e = FixtureError::GenericArityMismatch {
            type_name: "com.acme.Box".into(),
            declared: 1,
            supplied: 2,
        };
        assert_eq!(
            e.to_string(),
            "Generic arity mismatch for 'com.acme.Box': declares 1, got 2"
        );
    }

    #[test]
    fn cycle_message_lists_members() {
        let e = FixtureError::CyclicFixtureDependency(vec![
            "com.acme.A".into(),
            "com.acme.B".into(),
            "com.acme.A".into(),
        ]);
        assert_eq!(
            e.to_string(),
            "Cyclic fixture dependency: com.acme.A -> com.acme.B -> com.acme.A"
        );
    }

    #[test]
    fn error_is_std_error() {
        let e: Box<dyn std::error::Error> =
            Box::new(FixtureError::UnknownConstantReference("NAME".into()));
        assert!(e.to_string().contains("NAME"));
    }
}
