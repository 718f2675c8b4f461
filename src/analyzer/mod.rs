mod probability;
mod priority;
mod recommendation;

use log::debug;

use crate::models::{AnalysisResult, RunRecord};

/// Scores a validated run: estimate the flakiness probability, classify
/// its priority, then compose the matching recommendation.
pub fn analyze_run(run: &RunRecord) -> AnalysisResult {
    let p_flaky = probability::estimate(run);
    let priority = priority::classify(p_flaky, run);
    let recommendation = recommendation::compose(priority, run);

    debug!(
        "Analyzed run: suite={} p_flaky={p_flaky:.3} priority={priority}",
        run.test_suite
    );

    AnalysisResult {
        p_flaky: round_to_hundredths(p_flaky),
        priority,
        recommendation,
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
