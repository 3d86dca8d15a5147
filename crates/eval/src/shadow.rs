//! Shadow comparison: the live pipeline against a baseline, query by
//! query.

use serde::{Deserialize, Serialize};

/// Escalation outcome of one query under both pipelines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShadowResult {
    pub query: String,
    pub live_escalated: bool,
    pub baseline_escalated: bool,
    pub agreed: bool,
}

/// Pair up live and baseline escalation traces. Output length is the
/// shortest of the three inputs.
pub fn compare(queries: &[String], live: &[bool], baseline: &[bool]) -> Vec<ShadowResult> {
    queries
        .iter()
        .zip(live.iter())
        .zip(baseline.iter())
        .map(|((query, live), baseline)| ShadowResult {
            query: query.clone(),
            live_escalated: *live,
            baseline_escalated: *baseline,
            agreed: live == baseline,
        })
        .collect()
}
