//! Generation backends for deskrail.
//!
//! A [`Generator`] produces answer text and embeddings. The only real
//! backend is Ollama; `backend = "none"` disables generation entirely
//! and puts the agent in degraded mode, where retrieval still runs but
//! answers come from a fixed fallback.

pub mod ollama;

use std::sync::Arc;

use tracing::info;

use deskrail_config::GenerationConfig;
use deskrail_core::{Error, Generator, Result};

pub use ollama::OllamaGenerator;

/// Build the generator selected by `config.backend`, or `None` when
/// generation is disabled.
pub fn build_generator(config: &GenerationConfig) -> Result<Option<Arc<dyn Generator>>> {
    match config.backend.as_str() {
        "ollama" => {
            info!(backend = "ollama", model = %config.model, "generation backend ready");
            Ok(Some(Arc::new(OllamaGenerator::from_config(config))))
        }
        "none" => {
            info!("generation disabled, agent runs in degraded mode");
            Ok(None)
        }
        other => Err(Error::Config {
            message: format!("unknown generation backend: {other}"),
        }),
    }
}
