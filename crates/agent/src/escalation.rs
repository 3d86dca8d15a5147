//! Escalation policy: decides when the agent hands off to a human.

use deskrail_config::EscalationConfig;
use deskrail_core::{EscalationDecision, EscalationReason, GuardrailReason};

/// Ordered rule chain that turns pipeline signals into a hand-off
/// decision. The rules run in a fixed priority order and the first
/// match wins:
///
/// 1. The user asked for a human
/// 2. The user sounds frustrated
/// 3. A guardrail fired
/// 4. Answer confidence is below the threshold
/// 5. Too many unresolved turns in a row
///
/// Stateless; the unresolved-turn counter lives in the orchestrator.
pub struct EscalationPolicy {
    confidence_threshold: f32,
    max_unresolved_turns: u32,
    human_phrases: Vec<String>,
    frustration_phrases: Vec<String>,
}

impl EscalationPolicy {
    /// Build a policy from configuration. Phrases are lower-cased once
    /// here so per-message matching stays allocation-light.
    pub fn from_config(config: &EscalationConfig) -> Self {
        Self {
            confidence_threshold: config.confidence_threshold,
            max_unresolved_turns: config.max_unresolved_turns,
            human_phrases: config
                .human_phrases
                .iter()
                .map(|p| p.to_lowercase())
                .collect(),
            frustration_phrases: config
                .frustration_phrases
                .iter()
                .map(|p| p.to_lowercase())
                .collect(),
        }
    }

    /// Evaluate the rule chain for one turn.
    ///
    /// Phrase matching runs against the raw user message, guardrail
    /// reasons come from the guardrail pass, and `unresolved_turns` is
    /// the count of consecutive escalated turns so far. Boundary
    /// behavior: confidence exactly at the threshold does not trigger,
    /// an unresolved-turn count at the maximum does.
    pub fn evaluate(
        &self,
        confidence: f32,
        guardrail_reasons: &[GuardrailReason],
        unresolved_turns: u32,
        user_message: &str,
    ) -> EscalationDecision {
        let message = user_message.to_lowercase();

        if self.human_phrases.iter().any(|p| message.contains(p.as_str())) {
            return EscalationDecision::handoff(EscalationReason::UserRequestedHuman);
        }

        if self
            .frustration_phrases
            .iter()
            .any(|p| message.contains(p.as_str()))
        {
            return EscalationDecision::handoff(EscalationReason::UserFrustrated);
        }

        if !guardrail_reasons.is_empty() {
            return EscalationDecision::handoff(EscalationReason::GuardrailTriggered);
        }

        if confidence < self.confidence_threshold {
            return EscalationDecision::handoff(EscalationReason::LowConfidence);
        }

        if unresolved_turns >= self.max_unresolved_turns {
            return EscalationDecision::handoff(EscalationReason::TooManyTurns);
        }

        EscalationDecision::autonomous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_policy() -> EscalationPolicy {
        EscalationPolicy::from_config(&EscalationConfig::default())
    }

    #[test]
    fn human_request_escalates() {
        let decision = default_policy().evaluate(0.9, &[], 0, "I want to talk to a human");
        assert!(decision.escalate);
        assert_eq!(decision.reason, Some(EscalationReason::UserRequestedHuman));
    }

    #[test]
    fn human_request_is_case_insensitive() {
        let decision = default_policy().evaluate(0.9, &[], 0, "GET ME A HUMAN");
        assert_eq!(decision.reason, Some(EscalationReason::UserRequestedHuman));
    }

    #[test]
    fn frustration_escalates() {
        let decision = default_policy().evaluate(0.9, &[], 0, "this is really frustrating");
        assert!(decision.escalate);
        assert_eq!(decision.reason, Some(EscalationReason::UserFrustrated));
    }

    #[test]
    fn human_request_outranks_frustration() {
        let decision =
            default_policy().evaluate(0.9, &[], 0, "this is frustrating, get me a human");
        assert_eq!(decision.reason, Some(EscalationReason::UserRequestedHuman));
    }

    #[test]
    fn guardrail_reasons_escalate() {
        let reasons = [GuardrailReason::RestrictedAction];
        let decision = default_policy().evaluate(0.9, &reasons, 0, "please process my order");
        assert!(decision.escalate);
        assert_eq!(decision.reason, Some(EscalationReason::GuardrailTriggered));
    }

    #[test]
    fn guardrail_outranks_low_confidence() {
        let reasons = [GuardrailReason::PiiDetected];
        let decision = default_policy().evaluate(0.1, &reasons, 0, "please process my order");
        assert_eq!(decision.reason, Some(EscalationReason::GuardrailTriggered));
    }

    #[test]
    fn low_confidence_escalates() {
        let decision = default_policy().evaluate(0.3, &[], 0, "what are your opening hours?");
        assert!(decision.escalate);
        assert_eq!(decision.reason, Some(EscalationReason::LowConfidence));
    }

    #[test]
    fn confidence_at_threshold_does_not_escalate() {
        // Default threshold is 0.55; the boundary itself passes.
        let decision = default_policy().evaluate(0.55, &[], 0, "what are your opening hours?");
        assert!(!decision.escalate);
        assert!(decision.reason.is_none());
    }

    #[test]
    fn too_many_turns_escalates_at_maximum() {
        // Default max is 3; the boundary itself triggers.
        let decision = default_policy().evaluate(0.9, &[], 3, "still not working");
        assert!(decision.escalate);
        assert_eq!(decision.reason, Some(EscalationReason::TooManyTurns));
    }

    #[test]
    fn below_turn_maximum_stays_autonomous() {
        let decision = default_policy().evaluate(0.9, &[], 2, "what are your opening hours?");
        assert!(!decision.escalate);
    }

    #[test]
    fn clean_confident_message_stays_autonomous() {
        let decision = default_policy().evaluate(0.9, &[], 0, "how do I change my plan?");
        assert!(!decision.escalate);
        assert!(decision.reason.is_none());
    }
}
