//! Content guardrails for deskrail.
//!
//! The engine scans raw user input before it reaches retrieval or
//! generation: PII spans are redacted out of the working text, and
//! restricted-action requests are flagged (never altered). Violations are
//! policy signals that feed the escalation rules, not errors.

pub mod engine;

pub use engine::GuardrailEngine;
