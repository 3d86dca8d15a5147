//! Retrieval backends for deskrail.
//!
//! Two [`VectorStore`] implementations are provided:
//!
//! - [`InMemoryStore`]: keyword-overlap search with no external
//!   dependencies. Deterministic and fast, used for tests and as the
//!   fallback when no embedding model is available.
//! - [`EmbeddingStore`]: cosine-similarity search over vectors produced
//!   by a [`Generator`] with embedding support.
//!
//! [`build_store`] selects a backend from configuration.

pub mod embedding;
pub mod in_memory;
pub mod vector;

use std::sync::Arc;

use tracing::{info, warn};

use deskrail_config::RetrievalConfig;
use deskrail_core::{Error, Generator, Result, VectorStore};

pub use embedding::EmbeddingStore;
pub use in_memory::InMemoryStore;

/// Build the vector store selected by `config.backend`.
///
/// The embedding backend needs a generator to produce vectors. When
/// none is available (degraded mode) the keyword store is used instead
/// so ingestion and search keep working.
pub fn build_store(
    config: &RetrievalConfig,
    embedder: Option<Arc<dyn Generator>>,
) -> Result<Arc<dyn VectorStore>> {
    match config.backend.as_str() {
        "in_memory" => {
            info!(backend = "in_memory", "retrieval store ready");
            Ok(Arc::new(InMemoryStore::new()))
        }
        "embedding" => match embedder {
            Some(embedder) => {
                info!(backend = "embedding", "retrieval store ready");
                Ok(Arc::new(EmbeddingStore::new(embedder)))
            }
            None => {
                warn!("embedding retrieval configured without a generator, falling back to in-memory keyword search");
                Ok(Arc::new(InMemoryStore::new()))
            }
        },
        other => Err(Error::Config {
            message: format!("unknown retrieval backend: {other}"),
        }),
    }
}
