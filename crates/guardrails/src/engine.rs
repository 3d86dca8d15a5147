//! The guardrail engine: compiled policy applied to every message.
//!
//! Construction compiles the detector patterns; a pattern that does not
//! compile is rejected there and then, so `evaluate` can stay infallible.

use deskrail_config::GuardrailConfig;
use deskrail_core::{GuardrailError, GuardrailReason, GuardrailResult};
use regex_lite::Regex;
use tracing::debug;

/// One compiled PII detector.
#[derive(Debug)]
struct PiiDetector {
    name: String,
    regex: Regex,
}

/// Scans raw user input for PII and restricted-action requests.
///
/// Stateless after construction; share one instance across all sessions.
#[derive(Debug)]
pub struct GuardrailEngine {
    block_pii: bool,
    allow_sensitive_actions: bool,
    restricted_actions: Vec<String>,
    redaction_marker: String,
    detectors: Vec<PiiDetector>,
}

impl GuardrailEngine {
    /// Build an engine from configuration, compiling every detector.
    pub fn from_config(config: &GuardrailConfig) -> Result<Self, GuardrailError> {
        let mut detectors = Vec::with_capacity(config.pii_patterns.len());
        for spec in &config.pii_patterns {
            let regex =
                Regex::new(&spec.pattern).map_err(|e| GuardrailError::InvalidPattern {
                    name: spec.name.clone(),
                    reason: e.to_string(),
                })?;
            detectors.push(PiiDetector {
                name: spec.name.clone(),
                regex,
            });
        }

        Ok(Self {
            block_pii: config.block_pii,
            allow_sensitive_actions: config.allow_sensitive_actions,
            restricted_actions: config
                .restricted_actions
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
            redaction_marker: config.redaction_marker.clone(),
            detectors,
        })
    }

    /// Evaluate one message.
    ///
    /// PII redaction is cumulative across detectors: each detector scans
    /// the working copy left by the previous one and replaces every span
    /// it matches. The restricted-action scan always reads the *original*
    /// lower-cased text and flags at most once, stopping at the first
    /// matching keyword. Restricted actions never alter the text.
    pub fn evaluate(&self, text: &str) -> GuardrailResult {
        let mut result = GuardrailResult::clean(text);

        if self.block_pii {
            for detector in &self.detectors {
                if detector.regex.is_match(&result.redacted_text) {
                    result.flag(GuardrailReason::PiiDetected);
                    result.redacted_text = detector
                        .regex
                        .replace_all(&result.redacted_text, self.redaction_marker.as_str())
                        .into_owned();
                    debug!(detector = %detector.name, "PII detector matched");
                }
            }
        }

        if !self.allow_sensitive_actions {
            let lowered = text.to_lowercase();
            for keyword in &self.restricted_actions {
                if lowered.contains(keyword.as_str()) {
                    result.flag(GuardrailReason::RestrictedAction);
                    debug!(keyword = %keyword, "Restricted action matched");
                    break;
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskrail_config::PiiPatternConfig;

    fn engine() -> GuardrailEngine {
        GuardrailEngine::from_config(&GuardrailConfig::default()).unwrap()
    }

    #[test]
    fn clean_text_passes_through() {
        let result = engine().evaluate("How do I change my plan?");
        assert!(result.safe);
        assert!(result.reasons.is_empty());
        assert_eq!(result.redacted_text, "How do I change my plan?");
    }

    #[test]
    fn empty_input_is_safe() {
        let result = engine().evaluate("");
        assert!(result.safe);
        assert_eq!(result.redacted_text, "");
    }

    #[test]
    fn email_is_redacted_and_flagged() {
        let result = engine().evaluate("reach me at jane@example.com please");
        assert!(!result.safe);
        assert_eq!(result.reasons, vec![GuardrailReason::PiiDetected]);
        assert!(!result.redacted_text.contains("jane@example.com"));
        assert!(result.redacted_text.contains("[REDACTED]"));
    }

    #[test]
    fn two_emails_flag_pii_exactly_once() {
        let result = engine().evaluate("cc a@b.com and c@d.org on the reply");
        assert_eq!(result.reasons, vec![GuardrailReason::PiiDetected]);
        assert!(!result.redacted_text.contains("a@b.com"));
        assert!(!result.redacted_text.contains("c@d.org"));
        assert_eq!(result.redacted_text.matches("[REDACTED]").count(), 2);
    }

    #[test]
    fn phone_number_is_redacted() {
        let result = engine().evaluate("call 555-123-4567 tomorrow");
        assert!(!result.safe);
        assert!(!result.redacted_text.contains("555-123-4567"));
        assert!(result.redacted_text.contains("[REDACTED]"));
    }

    #[test]
    fn redaction_is_cumulative_across_detectors() {
        let result = engine().evaluate("email jane@example.com or call 555-123-4567");
        assert_eq!(result.reasons, vec![GuardrailReason::PiiDetected]);
        assert!(!result.redacted_text.contains("jane@example.com"));
        assert!(!result.redacted_text.contains("555-123-4567"));
        assert_eq!(result.redacted_text.matches("[REDACTED]").count(), 2);
    }

    #[test]
    fn restricted_action_flags_without_redacting() {
        let result = engine().evaluate("I want a refund now");
        assert!(!result.safe);
        assert_eq!(result.reasons, vec![GuardrailReason::RestrictedAction]);
        assert_eq!(result.redacted_text, "I want a refund now");
    }

    #[test]
    fn restricted_match_is_case_insensitive() {
        let result = engine().evaluate("REFUND please");
        assert_eq!(result.reasons, vec![GuardrailReason::RestrictedAction]);
    }

    #[test]
    fn multiple_restricted_keywords_flag_once() {
        let result = engine().evaluate("refund me or I file a chargeback");
        assert_eq!(result.reasons, vec![GuardrailReason::RestrictedAction]);
    }

    #[test]
    fn pii_and_restricted_keep_scan_order() {
        let result = engine().evaluate("send the refund to jane@example.com");
        assert_eq!(
            result.reasons,
            vec![
                GuardrailReason::PiiDetected,
                GuardrailReason::RestrictedAction
            ]
        );
        assert!(result.redacted_text.contains("refund"));
        assert!(!result.redacted_text.contains("jane@example.com"));
    }

    #[test]
    fn allow_sensitive_actions_disables_keyword_scan() {
        let config = GuardrailConfig {
            allow_sensitive_actions: true,
            ..GuardrailConfig::default()
        };
        let engine = GuardrailEngine::from_config(&config).unwrap();
        let result = engine.evaluate("I want a refund now");
        assert!(result.safe);
    }

    #[test]
    fn block_pii_false_leaves_text_intact() {
        let config = GuardrailConfig {
            block_pii: false,
            ..GuardrailConfig::default()
        };
        let engine = GuardrailEngine::from_config(&config).unwrap();
        let result = engine.evaluate("reach me at jane@example.com");
        assert!(result.safe);
        assert_eq!(result.redacted_text, "reach me at jane@example.com");
    }

    #[test]
    fn custom_redaction_marker_is_used() {
        let config = GuardrailConfig {
            redaction_marker: "<pii>".into(),
            ..GuardrailConfig::default()
        };
        let engine = GuardrailEngine::from_config(&config).unwrap();
        let result = engine.evaluate("mail jane@example.com");
        assert!(result.redacted_text.contains("<pii>"));
    }

    #[test]
    fn invalid_pattern_rejected_at_construction() {
        let config = GuardrailConfig {
            pii_patterns: vec![PiiPatternConfig {
                name: "broken".into(),
                pattern: "(".into(),
            }],
            ..GuardrailConfig::default()
        };
        let err = GuardrailEngine::from_config(&config).unwrap_err();
        assert!(matches!(err, GuardrailError::InvalidPattern { .. }));
        assert!(err.to_string().contains("broken"));
    }
}
