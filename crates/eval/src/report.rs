//! Aggregate evaluation metrics.

use serde::{Deserialize, Serialize};

/// Summary of one evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalReport {
    /// Share of cases whose escalation outcome matched the expectation.
    pub accuracy: f64,
    /// Share of cases answered without escalation.
    pub autonomy_rate: f64,
    /// Mean wall-clock latency per case.
    pub avg_latency_ms: f64,
}

/// Aggregate per-case outcomes into a report. Every metric is 0.0 when
/// its input is empty.
pub fn build_report(correct: &[bool], escalated: &[bool], latencies_ms: &[f64]) -> EvalReport {
    EvalReport {
        accuracy: mean_of(correct.iter().map(|c| if *c { 1.0 } else { 0.0 })),
        autonomy_rate: if escalated.is_empty() {
            0.0
        } else {
            1.0 - mean_of(escalated.iter().map(|e| if *e { 1.0 } else { 0.0 }))
        },
        avg_latency_ms: mean_of(latencies_ms.iter().copied()),
    }
}

fn mean_of(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 { 0.0 } else { sum / count as f64 }
}
