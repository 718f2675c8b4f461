use crate::models::{Priority, RunRecord};

const MAX_WORDS: usize = 40;
const LARGE_DIFF_LINES: u64 = 300;
const NOTABLE_FAILURE_RATE: f64 = 0.1;

/// Picks the canned advisory text for a scored run. The texts form a fixed
/// decision tree over priority, retries, diff size and failure rate; no
/// free-text generation happens here.
pub fn compose(priority: Priority, run: &RunRecord) -> String {
    let text = match priority {
        Priority::High => {
            if run.retries > 0 {
                "Investigate the intermittent scenarios, inspect the run logs and \
                 pin environment-dependent test data. Re-run the suite on two \
                 device types to confirm the flakiness."
            } else if run.diff_size > LARGE_DIFF_LINES {
                "The change was large. Split the suite into smaller groups, \
                 tighten the assertions and monitor the failing scenarios across \
                 consecutive runs."
            } else {
                "Prioritize analysis of the failed scenarios, enable detailed \
                 logging and run the suite repeatedly in parallel to confirm the \
                 flaky behavior."
            }
        }
        Priority::Medium => {
            if run.failure_rate() > NOTABLE_FAILURE_RATE {
                "Review external dependencies, timeouts and resource usage. Tag \
                 the suspicious tests and run a critical subset on every build."
            } else {
                "Monitor the failed scenarios across the upcoming releases, adding \
                 per-test stability metrics and alerts when the same case fails \
                 repeatedly."
            }
        }
        Priority::Low => {
            "Keep baseline monitoring of the suite and record a flakiness history \
             per scenario. No need to interrupt the release cycle, but watch for \
             recurring patterns."
        }
    };

    truncate_words(text, MAX_WORDS)
}

/// Hard word-count cap. Cuts mid-sentence when the text runs over; the cap
/// is on whitespace-separated words, not characters.
fn truncate_words(text: &str, limit: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();

    if words.len() <= limit {
        words.join(" ")
    } else {
        words[..limit].join(" ")
    }
}
