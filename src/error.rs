use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunLensError {
    #[error("invalid run record: {0}")]
    InvalidRecord(#[from] ValidationError),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RunLensError>;

/// A single violated constraint, named after the offending field.
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

/// Every constraint a run record violated, collected in one pass so the
/// caller sees all problems at once instead of one per round trip.
#[derive(Debug)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let details: Vec<String> = self
            .violations
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect();
        write!(f, "{}", details.join("; "))
    }
}

impl std::error::Error for ValidationError {}
