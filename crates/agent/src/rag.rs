//! Retrieval-augmented answer generation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use deskrail_config::RetrievalConfig;
use deskrail_core::{Generator, Result, RetrievedChunk, VectorStore};

/// Answer returned when no generation backend is configured.
pub const FALLBACK_ANSWER: &str =
    "Thanks for reaching out. I can help with that, but I need more details.";

/// Neutral confidence paired with the fallback answer.
const FALLBACK_CONFIDENCE: f32 = 0.5;

/// Confidence floor and per-chunk reward for generated answers.
const BASE_CONFIDENCE: f32 = 0.6;
const CONFIDENCE_PER_CHUNK: f32 = 0.1;
const MAX_CONFIDENCE: f32 = 0.9;

/// Turns a query plus conversation context into an answer with a
/// confidence estimate. The orchestrator depends on this trait rather
/// than [`RagPipeline`] directly so tests can force any confidence.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate_answer(&self, query: &str, context: &str) -> Result<(String, f32)>;
}

/// The production answer path: search the knowledge store, assemble a
/// grounded prompt, complete it with the generator.
///
/// When no generator is configured the pipeline still retrieves (so
/// ingestion problems surface early) but answers with a fixed fallback
/// at neutral confidence.
pub struct RagPipeline {
    store: Arc<dyn VectorStore>,
    generator: Option<Arc<dyn Generator>>,
    top_k: usize,
    min_score: f32,
}

impl RagPipeline {
    pub fn new(
        store: Arc<dyn VectorStore>,
        generator: Option<Arc<dyn Generator>>,
        top_k: usize,
        min_score: f32,
    ) -> Self {
        Self {
            store,
            generator,
            top_k,
            min_score,
        }
    }

    pub fn from_config(
        config: &RetrievalConfig,
        store: Arc<dyn VectorStore>,
        generator: Option<Arc<dyn Generator>>,
    ) -> Self {
        Self::new(store, generator, config.top_k, config.min_score)
    }

    /// Fetch up to `top_k` chunks and drop those below `min_score`.
    async fn retrieve(&self, query: &str) -> Result<Vec<RetrievedChunk>> {
        let mut chunks = self.store.search(query, self.top_k).await?;
        chunks.retain(|c| c.score >= self.min_score);
        Ok(chunks)
    }

    /// Assemble the generation prompt. Deterministic: same inputs,
    /// same prompt, byte for byte.
    fn build_prompt(query: &str, context: &str, chunks: &[RetrievedChunk]) -> String {
        let snippets = chunks
            .iter()
            .map(|c| format!("- {}", c.content))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "You are a customer support agent.\n\
             Conversation context:\n\
             {context}\n\
             Knowledge snippets:\n\
             {snippets}\n\
             User question: {query}\n\
             Respond with a helpful, concise answer.\n"
        )
    }

    /// Heuristic confidence: more supporting chunks means more
    /// confidence, capped below full certainty.
    fn confidence_for(chunks: &[RetrievedChunk]) -> f32 {
        (BASE_CONFIDENCE + CONFIDENCE_PER_CHUNK * chunks.len() as f32).min(MAX_CONFIDENCE)
    }
}

#[async_trait]
impl AnswerGenerator for RagPipeline {
    async fn generate_answer(&self, query: &str, context: &str) -> Result<(String, f32)> {
        let chunks = self.retrieve(query).await?;
        debug!(chunks = chunks.len(), "Retrieved knowledge chunks");

        let Some(generator) = &self.generator else {
            return Ok((FALLBACK_ANSWER.to_string(), FALLBACK_CONFIDENCE));
        };

        let prompt = Self::build_prompt(query, context, &chunks);
        let answer = generator.complete(&prompt).await?;
        let confidence = Self::confidence_for(&chunks);

        Ok((answer, confidence))
    }
}
