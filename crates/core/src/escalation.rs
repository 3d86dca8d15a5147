//! Escalation decision types.
//!
//! Escalation is normal control flow, not an error: the decision says
//! whether this turn hands off to a human and, if so, which rule fired.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a conversation is handed off to a human.
///
/// Variants are listed in rule-priority order; the evaluator checks them
/// top to bottom and the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationReason {
    /// The user explicitly asked for a human.
    UserRequestedHuman,
    /// The message carries frustration signals.
    UserFrustrated,
    /// The guardrail engine flagged the message.
    GuardrailTriggered,
    /// Answer confidence fell strictly below the configured threshold.
    LowConfidence,
    /// The session accumulated too many unresolved turns.
    TooManyTurns,
}

impl EscalationReason {
    /// Stable snake_case label, as used in logs and API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserRequestedHuman => "user_requested_human",
            Self::UserFrustrated => "user_frustrated",
            Self::GuardrailTriggered => "guardrail_triggered",
            Self::LowConfidence => "low_confidence",
            Self::TooManyTurns => "too_many_turns",
        }
    }
}

impl fmt::Display for EscalationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one escalation evaluation.
///
/// Invariant: `reason` is present exactly when `escalate` is true. The
/// constructors are the only intended way to build one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationDecision {
    pub escalate: bool,
    pub reason: Option<EscalationReason>,
}

impl EscalationDecision {
    /// Hand off to a human for the given reason.
    pub fn handoff(reason: EscalationReason) -> Self {
        Self {
            escalate: true,
            reason: Some(reason),
        }
    }

    /// Keep answering autonomously.
    pub fn autonomous() -> Self {
        Self {
            escalate: false,
            reason: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handoff_carries_its_reason() {
        let decision = EscalationDecision::handoff(EscalationReason::LowConfidence);
        assert!(decision.escalate);
        assert_eq!(decision.reason, Some(EscalationReason::LowConfidence));
    }

    #[test]
    fn autonomous_has_no_reason() {
        let decision = EscalationDecision::autonomous();
        assert!(!decision.escalate);
        assert!(decision.reason.is_none());
    }

    #[test]
    fn reasons_serialize_as_snake_case() {
        let json = serde_json::to_string(&EscalationReason::UserRequestedHuman).unwrap();
        assert_eq!(json, "\"user_requested_human\"");
        let json = serde_json::to_string(&EscalationReason::TooManyTurns).unwrap();
        assert_eq!(json, "\"too_many_turns\"");
    }
}
