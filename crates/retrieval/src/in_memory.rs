//! In-memory keyword store. Zero external dependencies, suitable for
//! tests and air-gapped deployments.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use deskrail_core::{RetrievalError, RetrievedChunk, VectorStore};

/// Keyword-overlap store backed by a plain `Vec<String>`.
///
/// Scoring is term overlap between the query and the document,
/// normalized by the query term count, so scores stay in [0.0, 1.0].
/// Documents with no overlapping terms are never returned.
#[derive(Debug)]
pub struct InMemoryStore {
    documents: Arc<RwLock<Vec<String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorStore for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn add(&self, documents: Vec<String>) -> Result<(), RetrievalError> {
        let mut store = self.documents.write().await;
        store.extend(documents);
        Ok(())
    }

    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedChunk>, RetrievalError> {
        let query_lower = query.to_lowercase();
        let query_terms: HashSet<&str> = query_lower.split_whitespace().collect();

        let store = self.documents.read().await;
        let mut results: Vec<RetrievedChunk> = Vec::new();

        for doc in store.iter() {
            let doc_lower = doc.to_lowercase();
            let doc_terms: HashSet<&str> = doc_lower.split_whitespace().collect();
            let overlap = query_terms.intersection(&doc_terms).count();
            if overlap > 0 {
                let score = overlap as f32 / query_terms.len().max(1) as f32;
                results.push(RetrievedChunk::new(doc.clone(), score));
            }
        }

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);

        Ok(results)
    }

    async fn count(&self) -> Result<usize, RetrievalError> {
        Ok(self.documents.read().await.len())
    }
}
