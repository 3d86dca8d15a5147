//! Guardrail verdict types.
//!
//! A `GuardrailResult` is produced fresh for every message: the redacted
//! text plus the ordered set of violation kinds that fired. It is a policy
//! signal, not an error; unsafe input still flows through the pipeline and
//! surfaces as an escalation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A policy violation kind reported by the guardrail engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardrailReason {
    /// Personally identifiable information matched a detector pattern.
    PiiDetected,
    /// The message asks for an action the agent must not take autonomously.
    RestrictedAction,
}

impl GuardrailReason {
    /// Stable snake_case label, as used in logs and API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PiiDetected => "pii_detected",
            Self::RestrictedAction => "restricted_action",
        }
    }
}

impl fmt::Display for GuardrailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one guardrail evaluation.
///
/// Invariant: `safe` is true exactly when `reasons` is empty. `reasons` is
/// an insertion-ordered set; a kind appears at most once no matter how many
/// individual matches produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardrailResult {
    pub safe: bool,
    pub reasons: Vec<GuardrailReason>,
    pub redacted_text: String,
}

impl GuardrailResult {
    /// A clean verdict: no violations, text passes through unchanged.
    pub fn clean(text: impl Into<String>) -> Self {
        Self {
            safe: true,
            reasons: Vec::new(),
            redacted_text: text.into(),
        }
    }

    /// Record a violation kind, keeping the set duplicate-free.
    pub fn flag(&mut self, reason: GuardrailReason) {
        if !self.reasons.contains(&reason) {
            self.reasons.push(reason);
        }
        self.safe = false;
    }
}
