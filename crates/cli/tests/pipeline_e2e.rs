//! End-to-end tests for the deskrail support pipeline.
//!
//! These tests exercise the stack the way the binary wires it: a config
//! file on disk, a session registry built from it, and user messages
//! flowing through guardrails, memory, answer generation, and escalation.
//! Generation runs in degraded mode so the suite needs no live backend.

use deskrail_agent::{FALLBACK_ANSWER, HANDOFF_MESSAGE, SessionRegistry};
use deskrail_config::AppConfig;
use deskrail_core::{EscalationReason, SessionId};

// ── Fixtures ─────────────────────────────────────────────────────────────

/// Writes a degraded-mode config file and loads it back through the
/// parser, so the test covers the same path the binary takes.
///
/// The confidence threshold sits below the degraded-mode fallback (0.5)
/// so clean questions stay autonomous.
fn load_config(dir: &tempfile::TempDir, max_unresolved_turns: u32) -> AppConfig {
    let path = dir.path().join("deskrail.toml");
    let toml = format!(
        r#"
[generation]
backend = "none"

[retrieval]
backend = "in_memory"

[escalation]
confidence_threshold = 0.4
max_unresolved_turns = {max_unresolved_turns}
"#
    );
    std::fs::write(&path, toml).unwrap();
    AppConfig::load_from(&path).unwrap()
}

fn registry(dir: &tempfile::TempDir, max_unresolved_turns: u32) -> SessionRegistry {
    SessionRegistry::from_config(&load_config(dir, max_unresolved_turns)).unwrap()
}

// ── E2E scenarios ────────────────────────────────────────────────────────

#[tokio::test]
async fn refund_request_is_caught_and_handed_off() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(&dir, 3);

    let result = registry
        .handle(&SessionId::new(), "I want a refund now")
        .await
        .unwrap();

    assert!(result.escalated);
    assert_eq!(
        result.escalation_reason,
        Some(EscalationReason::GuardrailTriggered)
    );
    assert_eq!(result.response, HANDOFF_MESSAGE);
}

#[tokio::test]
async fn human_request_escalates_immediately() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(&dir, 3);

    let result = registry
        .handle(&SessionId::new(), "I need to talk to a human")
        .await
        .unwrap();

    assert!(result.escalated);
    assert_eq!(
        result.escalation_reason,
        Some(EscalationReason::UserRequestedHuman)
    );
}

#[tokio::test]
async fn clean_question_stays_autonomous() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(&dir, 3);

    let result = registry
        .handle(&SessionId::new(), "Where can I download invoices?")
        .await
        .unwrap();

    assert!(!result.escalated);
    assert_eq!(result.escalation_reason, None);
    assert_eq!(result.response, FALLBACK_ANSWER);
    assert_eq!(result.confidence, 0.5);
}

#[tokio::test]
async fn unresolved_turns_accumulate_to_handoff() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(&dir, 2);
    let session = SessionId::from("e2e-unresolved");

    // Two guardrail hand-offs in a row leave the counter at the limit.
    for _ in 0..2 {
        let result = registry
            .handle(&session, "I want a refund now")
            .await
            .unwrap();
        assert_eq!(
            result.escalation_reason,
            Some(EscalationReason::GuardrailTriggered)
        );
    }

    // A clean question would normally pass, but the session has burned
    // its unresolved budget.
    let result = registry
        .handle(&session, "Where can I download invoices?")
        .await
        .unwrap();

    assert!(result.escalated);
    assert_eq!(
        result.escalation_reason,
        Some(EscalationReason::TooManyTurns)
    );
    assert_eq!(result.response, HANDOFF_MESSAGE);
}

#[tokio::test]
async fn sessions_do_not_share_escalation_state() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(&dir, 2);
    let troubled = SessionId::from("e2e-troubled");
    let fresh = SessionId::from("e2e-fresh");

    for _ in 0..2 {
        registry
            .handle(&troubled, "I want a refund now")
            .await
            .unwrap();
    }

    // The troubled session is out of budget; the fresh one is not.
    let result = registry
        .handle(&troubled, "Where can I download invoices?")
        .await
        .unwrap();
    assert_eq!(
        result.escalation_reason,
        Some(EscalationReason::TooManyTurns)
    );

    let result = registry
        .handle(&fresh, "Where can I download invoices?")
        .await
        .unwrap();
    assert!(!result.escalated);
    assert_eq!(registry.len().await, 2);
}
