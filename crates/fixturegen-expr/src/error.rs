//! Provider expression errors.

use fixturegen_types::FixtureError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    /// The source is a statement block rather than a single expression.
    #[error("Unsupported provider body: {0}")]
    UnsupportedBody(String),

    /// The source does not parse, or names something that is not bound.
    #[error("Malformed provider expression: {0}")]
    Malformed(String),

    /// Evaluation failed (type mismatch, bad index, ...).
    #[error("Provider evaluation failed: {0}")]
    Evaluation(String),
}

pub type ExprResult<T> = Result<T, ExprError>;

impl From<ExprError> for FixtureError {
    fn from(err: ExprError) -> Self {
        match err {
            ExprError::UnsupportedBody(msg) => FixtureError::UnsupportedProviderBody(msg),
            ExprError::Malformed(msg) | ExprError::Evaluation(msg) => {
                FixtureError::MalformedProviderExpression(msg)
            }
        }
    }
}
