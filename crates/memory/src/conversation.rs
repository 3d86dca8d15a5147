//! Bounded turn history with an optional rolling summary.
//!
//! One `ConversationMemory` belongs to one session and is mutated only by
//! that session's orchestrator, with no internal locking.

use deskrail_config::MemoryConfig;
use deskrail_core::Turn;

/// Per-session conversation state: the most recent `max_turns` turns plus
/// an optional summary of everything older.
#[derive(Debug, Clone)]
pub struct ConversationMemory {
    max_turns: usize,
    summary_trigger: usize,
    turns: Vec<Turn>,
    summary: String,
}

impl ConversationMemory {
    /// Create an empty memory.
    ///
    /// The stored turn count is capped at `max_turns`, so a
    /// `summary_trigger` above that cap never fires; configure
    /// `summary_trigger <= max_turns` for summaries to happen.
    pub fn new(max_turns: usize, summary_trigger: usize) -> Self {
        Self {
            max_turns,
            summary_trigger,
            turns: Vec::new(),
            summary: String::new(),
        }
    }

    pub fn from_config(config: &MemoryConfig) -> Self {
        Self::new(config.max_turns, config.summary_trigger)
    }

    /// Record a completed exchange, dropping the oldest turns beyond
    /// `max_turns`. Runs after every message, escalated or not.
    pub fn add_turn(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.turns.push(Turn::new(user, assistant));
        let excess = self.turns.len().saturating_sub(self.max_turns);
        if excess > 0 {
            self.turns.drain(..excess);
        }
    }

    /// Store the trimmed summary text verbatim. What the summary *says* is
    /// the caller's responsibility; this component only keeps it.
    pub fn update_summary(&mut self, text: &str) {
        self.summary = text.trim().to_string();
    }

    /// True once the stored turn count has reached `summary_trigger`.
    pub fn should_summarize(&self) -> bool {
        self.turns.len() >= self.summary_trigger
    }

    /// Render the memory for prompt assembly: the summary line (when one
    /// exists) followed by alternating `User:` / `Assistant:` lines in
    /// chronological order. Empty memory renders as the empty string.
    pub fn context(&self) -> String {
        let mut lines = Vec::with_capacity(self.turns.len() * 2 + 1);
        if !self.summary.is_empty() {
            lines.push(format!("Summary: {}", self.summary));
        }
        for turn in &self.turns {
            lines.push(format!("User: {}", turn.user));
            lines.push(format!("Assistant: {}", turn.assistant));
        }
        lines.join("\n")
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
