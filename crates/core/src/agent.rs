//! The externally observable outcome of one message.

use crate::escalation::EscalationReason;
use serde::{Deserialize, Serialize};

/// What one `handle_message` call produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResult {
    /// The text returned to the user: the generated answer, or the
    /// hand-off message when the turn escalated.
    pub response: String,

    /// Whether this turn was handed off to a human.
    pub escalated: bool,

    /// Which rule fired; populated exactly when `escalated` is true.
    pub escalation_reason: Option<EscalationReason>,

    /// Heuristic answer-reliability estimate in [0, 1].
    pub confidence: f32,
}
