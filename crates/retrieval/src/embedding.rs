//! Embedding-backed store. Documents are embedded once at ingest time
//! and ranked by cosine similarity at query time.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use deskrail_core::{Generator, RetrievalError, RetrievedChunk, VectorStore};

use crate::vector::cosine_similarity;

/// Semantic store that delegates embedding to a [`Generator`].
///
/// Similarity scores are clamped to [0.0, 1.0] so downstream
/// min-score filters behave the same as with the keyword store.
#[derive(Debug)]
pub struct EmbeddingStore {
    embedder: Arc<dyn Generator>,
    entries: Arc<RwLock<Vec<(String, Vec<f32>)>>>,
}

impl EmbeddingStore {
    pub fn new(embedder: Arc<dyn Generator>) -> Self {
        Self {
            embedder,
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl VectorStore for EmbeddingStore {
    fn name(&self) -> &str {
        "embedding"
    }

    async fn add(&self, documents: Vec<String>) -> Result<(), RetrievalError> {
        if documents.is_empty() {
            return Ok(());
        }

        let vectors = self
            .embedder
            .embed(&documents)
            .await
            .map_err(|e| RetrievalError::EmbeddingFailed(e.to_string()))?;

        if vectors.len() != documents.len() {
            return Err(RetrievalError::EmbeddingFailed(format!(
                "embedder returned {} vectors for {} documents",
                vectors.len(),
                documents.len()
            )));
        }

        let mut entries = self.entries.write().await;
        for (doc, vector) in documents.into_iter().zip(vectors) {
            entries.push((doc, vector));
        }

        debug!(total = entries.len(), "documents embedded");
        Ok(())
    }

    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedChunk>, RetrievalError> {
        let entries = self.entries.read().await;
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let query_vectors = self
            .embedder
            .embed(&[query.to_string()])
            .await
            .map_err(|e| RetrievalError::EmbeddingFailed(e.to_string()))?;
        let query_vector = query_vectors
            .into_iter()
            .next()
            .ok_or_else(|| RetrievalError::EmbeddingFailed("embedder returned no vector for query".to_string()))?;

        let mut results: Vec<RetrievedChunk> = entries
            .iter()
            .map(|(content, vector)| {
                let score = cosine_similarity(vector, &query_vector).max(0.0);
                RetrievedChunk::new(content.clone(), score)
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);

        Ok(results)
    }

    async fn count(&self) -> Result<usize, RetrievalError> {
        Ok(self.entries.read().await.len())
    }
}
