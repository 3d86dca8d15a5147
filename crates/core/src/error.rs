//! Error types for the deskrail domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error type; `Error` is the umbrella
//! the pipeline propagates to transports.

use thiserror::Error;

/// The top-level error type for all deskrail operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Retrieval errors ---
    #[error("Retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    // --- Generation errors ---
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    // --- Guardrail errors ---
    #[error("Guardrail error: {0}")]
    Guardrail(#[from] GuardrailError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum RetrievalError {
    #[error("Store backend error: {0}")]
    Backend(String),

    #[error("Embedding failed: {0}")]
    EmbeddingFailed(String),
}

#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Operation not supported: {0}")]
    NotSupported(String),
}

#[derive(Debug, Error)]
pub enum GuardrailError {
    #[error("Invalid detector pattern '{name}': {reason}")]
    InvalidPattern { name: String, reason: String },
}
