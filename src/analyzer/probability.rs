use crate::models::RunRecord;

// Heuristic weights; the failure rate dominates on purpose. These are
// fixed design constants, not learned parameters.
const BIAS: f64 = -1.2;
const W_FAILURE_RATE: f64 = 3.0;
const W_RETRIES: f64 = 1.5;
const W_DIFF: f64 = 1.2;
const W_DURATION: f64 = 0.8;
const W_CPU: f64 = 0.5;
const W_MEMORY: f64 = 0.3;

const RETRY_CAP: f64 = 3.0;
const DIFF_CAP_LINES: f64 = 500.0;
const DURATION_CAP_HOURS: f64 = 2.0;
const MEMORY_CAP_MB: f64 = 2048.0;

const P_FLOOR: f64 = 0.001;
const P_CEILING: f64 = 0.999;

/// Estimates the probability that the run's failures come from flakiness
/// rather than a real defect.
///
/// Pure function over a validated record; the result always lands in
/// [0.001, 0.999] so callers never see an exact 0 or 1.
#[allow(clippy::cast_precision_loss)]
pub fn estimate(run: &RunRecord) -> f64 {
    let retry_factor = (run.retries as f64).min(RETRY_CAP) / RETRY_CAP;
    let diff_factor = (run.diff_size as f64).min(DIFF_CAP_LINES) / DIFF_CAP_LINES;
    let duration_hours = run.duration_sec as f64 / 3600.0;
    let duration_factor = duration_hours.min(DURATION_CAP_HOURS) / DURATION_CAP_HOURS;
    let cpu_factor = run.usage_cpu;
    let memory_factor = (run.memory_mb / MEMORY_CAP_MB).min(1.0);

    let z = BIAS
        + W_FAILURE_RATE * run.failure_rate()
        + W_RETRIES * retry_factor
        + W_DIFF * diff_factor
        + W_DURATION * duration_factor
        + W_CPU * cpu_factor
        + W_MEMORY * memory_factor;

    sigmoid(z).clamp(P_FLOOR, P_CEILING)
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
