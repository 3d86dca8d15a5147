//! The support conversation orchestrator.

use std::sync::Arc;

use tracing::{debug, info};

use deskrail_core::{AgentResult, Result};
use deskrail_guardrails::GuardrailEngine;
use deskrail_memory::ConversationMemory;

use crate::escalation::EscalationPolicy;
use crate::rag::AnswerGenerator;

/// Fixed response sent when a conversation is handed off to a human.
pub const HANDOFF_MESSAGE: &str =
    "Your request needs a specialist. I will escalate this to a human agent.";

/// Placeholder written when the summary trigger fires. Real summary
/// content comes from an external summarization job.
const SUMMARY_PLACEHOLDER: &str = "Conversation summary pending.";

/// One support conversation: guardrails, answer generation, escalation
/// and memory wired together around a per-session unresolved-turn
/// counter.
///
/// Each instance owns exactly one conversation. Callers must serialize
/// `handle_message` calls per instance; the session registry does this
/// with a per-session mutex.
pub struct SupportAgent {
    guardrails: Arc<GuardrailEngine>,
    escalation: Arc<EscalationPolicy>,
    answers: Arc<dyn AnswerGenerator>,
    memory: ConversationMemory,
    unresolved_turns: u32,
}

impl SupportAgent {
    pub fn new(
        guardrails: Arc<GuardrailEngine>,
        escalation: Arc<EscalationPolicy>,
        answers: Arc<dyn AnswerGenerator>,
        memory: ConversationMemory,
    ) -> Self {
        Self {
            guardrails,
            escalation,
            answers,
            memory,
            unresolved_turns: 0,
        }
    }

    /// Process one user message and produce the final turn result.
    ///
    /// The pipeline runs strictly in order:
    /// 1. Guardrails evaluate the raw input and produce redacted text
    /// 2. The memory context is read (prior turns only)
    /// 3. An answer is generated from the **redacted** query
    /// 4. Escalation rules run against the **raw** input
    /// 5. The hand-off message or the answer becomes the response
    /// 6. The turn is recorded with the raw input
    /// 7. A summary placeholder is written if the trigger fires
    ///
    /// Memory and the unresolved-turn counter are only touched after
    /// steps 1-4 have all succeeded, so a failed collaborator call
    /// leaves the session exactly as it was.
    pub async fn handle_message(&mut self, user_input: &str) -> Result<AgentResult> {
        info!(
            turns = self.memory.len(),
            unresolved = self.unresolved_turns,
            "Handling support message"
        );

        // ── Guardrails ──
        let guardrail = self.guardrails.evaluate(user_input);

        // ── Memory context ──
        let context = self.memory.context();

        // ── Answer generation ──
        let (answer, confidence) = self
            .answers
            .generate_answer(&guardrail.redacted_text, &context)
            .await?;

        // ── Escalation ──
        let decision = self.escalation.evaluate(
            confidence,
            &guardrail.reasons,
            self.unresolved_turns,
            user_input,
        );

        let response = if decision.escalate {
            self.unresolved_turns += 1;
            info!(
                reason = decision.reason.map(|r| r.as_str()).unwrap_or("unknown"),
                unresolved = self.unresolved_turns,
                "Escalating to a human"
            );
            HANDOFF_MESSAGE.to_string()
        } else {
            self.unresolved_turns = 0;
            answer
        };

        // ── Memory write-back ──
        self.memory.add_turn(user_input, response.clone());
        if self.memory.should_summarize() {
            debug!("Summary trigger fired");
            self.memory.update_summary(SUMMARY_PLACEHOLDER);
        }

        Ok(AgentResult {
            response,
            escalated: decision.escalate,
            escalation_reason: decision.reason,
            confidence,
        })
    }

    /// Consecutive escalated turns so far.
    pub fn unresolved_turns(&self) -> u32 {
        self.unresolved_turns
    }

    /// Read access to the conversation memory.
    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }
}
