//! # Deskrail Core
//!
//! Domain types, traits, and error definitions for the deskrail support
//! agent. This crate has **zero framework dependencies**; it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The collaborator seams (retrieval, generation) are traits here.
//! Implementations live in their respective crates. This enables:
//! - Swapping backends via configuration
//! - Easy testing with stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod agent;
pub mod error;
pub mod escalation;
pub mod generation;
pub mod guardrail;
pub mod retrieval;
pub mod session;

// Re-export key types at crate root for ergonomics
pub use agent::AgentResult;
pub use error::{Error, GenerationError, GuardrailError, Result, RetrievalError};
pub use escalation::{EscalationDecision, EscalationReason};
pub use generation::Generator;
pub use guardrail::{GuardrailReason, GuardrailResult};
pub use retrieval::{RetrievedChunk, VectorStore};
pub use session::{SessionId, Turn};
