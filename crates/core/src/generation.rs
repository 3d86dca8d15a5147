//! Generation interface: the abstraction over LLM backends.
//!
//! A `Generator` turns an assembled prompt into answer text. Its absence is
//! a valid configuration: the pipeline then runs in degraded mode with a
//! fixed fallback answer, so this trait is always consumed through
//! `Option<Arc<dyn Generator>>`.

use crate::error::GenerationError;
use async_trait::async_trait;

/// The generation seam consumed by the answer pipeline.
///
/// `complete` is the only required capability. Embedding is optional; the
/// embedding-backed retrieval store needs it, plain completion does not.
#[async_trait]
pub trait Generator: Send + Sync + std::fmt::Debug {
    /// A short name for this backend (e.g. "ollama").
    fn name(&self) -> &str;

    /// Produce a completion for the assembled prompt.
    async fn complete(&self, prompt: &str) -> std::result::Result<String, GenerationError>;

    /// Embed the given texts, one vector per input, in input order.
    ///
    /// Default implementation reports the capability as unsupported.
    async fn embed(
        &self,
        _inputs: &[String],
    ) -> std::result::Result<Vec<Vec<f32>>, GenerationError> {
        Err(GenerationError::NotSupported(format!(
            "generator '{}' does not support embeddings",
            self.name()
        )))
    }

    /// Health check: can we reach the backend?
    async fn health_check(&self) -> std::result::Result<bool, GenerationError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct CompletionOnly;

    #[async_trait]
    impl Generator for CompletionOnly {
        fn name(&self) -> &str {
            "completion-only"
        }

        async fn complete(&self, _prompt: &str) -> std::result::Result<String, GenerationError> {
            Ok("ok".into())
        }
    }

    #[tokio::test]
    async fn embed_defaults_to_unsupported() {
        let backend = CompletionOnly;
        let err = backend.embed(&["hello".into()]).await.unwrap_err();
        assert!(matches!(err, GenerationError::NotSupported(_)));
        assert!(err.to_string().contains("completion-only"));
    }

    #[tokio::test]
    async fn health_check_defaults_to_ok() {
        let backend = CompletionOnly;
        assert!(backend.health_check().await.unwrap());
    }
}
