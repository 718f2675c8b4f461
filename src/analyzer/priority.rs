use crate::models::{Priority, RunRecord};

const P_HIGH: f64 = 0.7;
const P_MEDIUM: f64 = 0.4;
const FAILURE_RATE_HIGH: f64 = 0.2;

/// Maps the flakiness probability and raw failure signal to an urgency
/// bucket. Rules are checked in order; the first match wins.
///
/// A run escalates straight to high when a fifth of its scenarios failed
/// and it was retried, even if the probability alone would not reach the
/// high threshold.
pub fn classify(p_flaky: f64, run: &RunRecord) -> Priority {
    if p_flaky >= P_HIGH || (run.failure_rate() >= FAILURE_RATE_HIGH && run.retries > 0) {
        Priority::High
    } else if p_flaky >= P_MEDIUM {
        Priority::Medium
    } else {
        Priority::Low
    }
}
