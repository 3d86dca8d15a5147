//! Synthetic evaluation cases with known escalation outcomes.

use serde::{Deserialize, Serialize};

/// One evaluation query and whether it should escalate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntheticCase {
    pub query: String,
    pub expected_escalation: bool,
}

impl SyntheticCase {
    pub fn new(query: impl Into<String>, expected_escalation: bool) -> Self {
        Self {
            query: query.into(),
            expected_escalation,
        }
    }
}

/// The shipped suite: two clean questions, two that must escalate.
pub fn cases() -> Vec<SyntheticCase> {
    vec![
        SyntheticCase::new("How do I reset my password?", false),
        SyntheticCase::new("I want a refund now", true),
        SyntheticCase::new("My account was hacked", true),
        SyntheticCase::new("Where can I download invoices?", false),
    ]
}

/// Mark each case correct when the observed escalation matches the
/// expectation. Extra observations are ignored; missing ones simply
/// truncate the output.
pub fn score_cases(cases: &[SyntheticCase], observed_escalations: &[bool]) -> Vec<bool> {
    cases
        .iter()
        .zip(observed_escalations.iter())
        .map(|(case, observed)| case.expected_escalation == *observed)
        .collect()
}
