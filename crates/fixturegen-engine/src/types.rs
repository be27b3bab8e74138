//! Output types of a generation pass.

use serde::{Deserialize, Serialize};

use fixturegen_types::{FixtureError, FixtureResult, GenerationRequest};

// ── Constants ──────────────────────────────────────────────────────────

/// One `public static final` declaration of a fixture.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstantEntry {
    /// Constant identifier (`STRING_FIELD`).
    pub name: String,
    /// Rendered declared type (`String`, `java.util.List<Item>`).
    pub declared_type: String,
    /// Rendered value expression.
    pub value: String,
    /// Field declaration index, then directive index.
    pub source_order: (usize, usize),
    /// Field the constant was produced for.
    pub field_name: String,
}

// ── Creation methods ───────────────────────────────────────────────────

/// How a creation method builds its instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreationKind {
    Constructor,
    Builder,
}

impl std::fmt::Display for CreationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Constructor => write!(f, "constructor"),
            Self::Builder => write!(f, "builder"),
        }
    }
}

/// One generated factory method.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationMethodDescriptor {
    pub method_name: String,
    /// Rendered return type with concrete generic arguments.
    pub return_type: String,
    /// Single expression returned by the method.
    pub body: String,
    pub source_kind: CreationKind,
}

// ── Fixtures ───────────────────────────────────────────────────────────

/// The complete result of one generation pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedFixture {
    /// Qualified name of the target type.
    pub type_name: String,
    /// Qualified name of the fixture type.
    pub fixture_name: String,
    /// Output path relative to the source root (`com/acme/ItemFixture.java`).
    pub relative_path: String,
    /// Constants, sorted by name.
    pub constants: Vec<ConstantEntry>,
    /// Creation methods, in emission order.
    pub methods: Vec<CreationMethodDescriptor>,
    /// Rendered source text.
    pub source: String,
}

impl GeneratedFixture {
    /// Name of the method other fixtures call to obtain an instance.
    pub fn default_method(&self) -> Option<&str> {
        self.methods.first().map(|m| m.method_name.as_str())
    }

    /// The names published for cross-fixture references.
    pub fn summary(&self) -> FixtureSummary {
        FixtureSummary {
            type_name: self.type_name.clone(),
            fixture_name: self.fixture_name.clone(),
            constants: self.constants.iter().map(|c| c.name.clone()).collect(),
            default_method: self.default_method().unwrap_or_default().to_string(),
        }
    }
}

/// What downstream passes may reference of a completed fixture.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureSummary {
    pub type_name: String,
    pub fixture_name: String,
    /// Constant names, sorted.
    pub constants: Vec<String>,
    pub default_method: String,
}

impl FixtureSummary {
    /// Whether the fixture declares `constant`.
    pub fn has_constant(&self, constant: &str) -> bool {
        self.constants.binary_search_by(|c| c.as_str().cmp(constant)).is_ok()
    }
}

// ── Run report ─────────────────────────────────────────────────────────

/// Outcome of one request of a run.
#[derive(Debug)]
pub struct RunOutcome {
    pub request: GenerationRequest,
    pub result: FixtureResult<GeneratedFixture>,
}

/// Outcomes of a run, one per request, in request order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<RunOutcome>,
}

impl RunReport {
    /// Fixtures that generated successfully.
    pub fn fixtures(&self) -> impl Iterator<Item = &GeneratedFixture> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    /// Requests that failed, with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&GenerationRequest, &FixtureError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.request, e)))
    }

    /// Outcome for a type name (first occurrence).
    pub fn outcome(&self, type_name: &str) -> Option<&RunOutcome> {
        self.outcomes.iter().find(|o| o.request.type_name == type_name)
    }

    pub fn succeeded(&self) -> usize {
        self.fixtures().count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Whether every request succeeded.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RunReport(total={}, succeeded={}, failed={})",
            self.outcomes.len(),
            self.succeeded(),
            self.failed()
        )
    }
}
