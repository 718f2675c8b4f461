use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, Violation};

/// Metrics describing one completed execution of a test suite.
///
/// The identifying strings are opaque; only the numeric fields carry
/// constraints. Negative integers are already rejected by deserialization
/// into unsigned types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub release_cycle: String,
    pub platform: String,
    pub environment: String,
    pub device_id: String,
    pub test_suite: String,

    pub scenarios_total: u64,
    pub scenarios_failed: u64,
    pub duration_sec: u64,
    pub retries: u64,
    pub diff_size: u64,
    pub usage_cpu: f64,
    pub memory_mb: f64,
}

impl RunRecord {
    /// Checks every range constraint plus the cross-field invariant.
    ///
    /// Runs once after all fields are parsed, so the
    /// scenarios_failed/scenarios_total rule can see both values. All
    /// violations are reported together.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();

        if self.scenarios_total == 0 {
            violations.push(Violation {
                field: "scenarios_total",
                message: "must be greater than 0".to_string(),
            });
        }

        if self.duration_sec == 0 {
            violations.push(Violation {
                field: "duration_sec",
                message: "must be greater than 0".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.usage_cpu) {
            violations.push(Violation {
                field: "usage_cpu",
                message: "must be between 0.0 and 1.0".to_string(),
            });
        }

        if self.memory_mb <= 0.0 {
            violations.push(Violation {
                field: "memory_mb",
                message: "must be greater than 0".to_string(),
            });
        }

        if self.scenarios_failed > self.scenarios_total {
            violations.push(Violation {
                field: "scenarios_failed",
                message: "scenarios_failed cannot exceed scenarios_total".to_string(),
            });
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(violations))
        }
    }

    /// Fraction of scenarios that failed in this run.
    pub fn failure_rate(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let rate = self.scenarios_failed as f64 / self.scenarios_total.max(1) as f64;
        rate
    }
}

/// Urgency bucket derived from the flakiness probability and the raw
/// failure signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub p_flaky: f64,
    pub priority: Priority,
    pub recommendation: String,
}
