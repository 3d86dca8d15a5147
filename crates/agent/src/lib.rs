//! The support agent pipeline, the heart of deskrail.
//!
//! One message flows through the pipeline as:
//!
//! 1. **Guardrails** scan the raw input, redact PII and flag restricted actions
//! 2. **Memory** supplies conversation context from prior turns
//! 3. **RAG** retrieves knowledge snippets and generates a grounded answer
//! 4. **Escalation** decides whether a human should take over
//! 5. The turn is recorded and the result returned
//!
//! [`SupportAgent`] runs this sequence for one conversation.
//! [`SessionRegistry`] maps session ids to agents and serializes
//! per-session access.

pub mod escalation;
pub mod rag;
pub mod registry;
pub mod support;

pub use escalation::EscalationPolicy;
pub use rag::{AnswerGenerator, RagPipeline, FALLBACK_ANSWER};
pub use registry::SessionRegistry;
pub use support::{SupportAgent, HANDOFF_MESSAGE};
