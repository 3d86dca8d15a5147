//! Conversation memory for deskrail.
//!
//! Session state only: the bounded turn history and its rolling summary.
//! Knowledge retrieval lives in `deskrail-retrieval`; this crate never
//! touches the knowledge base.

pub mod conversation;

pub use conversation::ConversationMemory;
