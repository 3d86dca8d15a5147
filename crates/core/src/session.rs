//! Session identity and turn primitives.
//!
//! A session is one user's ongoing conversation with the agent. Its state
//! (turn history, summary, unresolved-turn counter) lives with the
//! orchestrator; these are the value types that state is built from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a support session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Mint a fresh random session id.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One completed exchange: what the user said and what the agent replied.
///
/// Immutable once recorded; ordering in the history is chronological.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub user: String,
    pub assistant: String,
}

impl Turn {
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            assistant: assistant.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_are_unique() {
        let a = SessionId::new();
        let b = SessionId::new();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn session_id_from_str_round_trips() {
        let id = SessionId::from("desk-42");
        assert_eq!(id.to_string(), "desk-42");
    }

    #[test]
    fn turn_holds_both_sides() {
        let turn = Turn::new("hi", "hello, how can I help?");
        assert_eq!(turn.user, "hi");
        assert_eq!(turn.assistant, "hello, how can I help?");
    }
}
