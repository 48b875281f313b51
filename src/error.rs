//! Errors raised while loading a scenario.
//!
//! The engine itself never fails; only turning a file into an engine can.

use thiserror::Error;

pub type ScenarioResult<T> = Result<T, ScenarioError>;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("could not read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid scenario YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A two-body scenario needs a primary and a secondary
    #[error("expected exactly 2 bodies (primary, secondary), found {found}")]
    BodyCount { found: usize },

    #[error("body {body}: `{field}` needs 2 components, found {found}")]
    VectorLength {
        body: usize,
        field: &'static str,
        found: usize,
    },

    #[error("`{field}` must be finite and positive, got {value}")]
    InvalidValue { field: &'static str, value: f64 },
}
