//! Retrieval interface: the abstraction over knowledge stores.
//!
//! A `VectorStore` knows how to ingest documents and return the snippets
//! most relevant to a query. The answer pipeline calls `search` without
//! knowing which backend is behind it.
//!
//! Implementations: in-memory keyword overlap, embedding-backed cosine
//! search.

use crate::error::RetrievalError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A retrieved snippet of knowledge-base content.
///
/// Produced fresh per retrieval call; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedChunk {
    /// The snippet text.
    pub content: String,

    /// Relevance score in [0, 1]; higher is more relevant.
    pub score: f32,
}

impl RetrievedChunk {
    pub fn new(content: impl Into<String>, score: f32) -> Self {
        Self {
            content: content.into(),
            score,
        }
    }
}

/// The retrieval seam consumed by the answer pipeline.
#[async_trait]
pub trait VectorStore: Send + Sync + std::fmt::Debug {
    /// A short name for this backend (e.g. "in_memory", "embedding").
    fn name(&self) -> &str;

    /// Ingest raw documents into the store.
    async fn add(&self, documents: Vec<String>) -> std::result::Result<(), RetrievalError>;

    /// Return up to `top_k` chunks ranked by relevance, best first.
    async fn search(
        &self,
        query: &str,
        top_k: usize,
    ) -> std::result::Result<Vec<RetrievedChunk>, RetrievalError>;

    /// Number of documents currently held by the store.
    async fn count(&self) -> std::result::Result<usize, RetrievalError>;
}
