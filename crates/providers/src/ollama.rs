//! Ollama generation backend.
//!
//! Talks to Ollama's native HTTP API:
//! - `POST /api/generate` for completions (non-streaming)
//! - `POST /api/embeddings` for embeddings (one prompt per request)
//! - `GET /api/tags` for health checks

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use deskrail_config::GenerationConfig;
use deskrail_core::{GenerationError, Generator};

/// Generator backed by a local or remote Ollama server.
#[derive(Debug)]
pub struct OllamaGenerator {
    base_url: String,
    model: String,
    embedding_model: String,
    client: reqwest::Client,
}

impl OllamaGenerator {
    /// Create a new Ollama generator.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        embedding_model: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            embedding_model: embedding_model.into(),
            client,
        }
    }

    /// Create a generator from the generation section of the app config.
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::new(&config.base_url, &config.model, &config.embedding_model)
    }
}

#[async_trait]
impl Generator for OllamaGenerator {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn complete(&self, prompt: &str) -> std::result::Result<String, GenerationError> {
        let url = format!("{}/api/generate", self.base_url);

        let body = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
        });

        debug!(model = %self.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Ollama returned error");
            return Err(GenerationError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: GenerateResponse =
            response
                .json()
                .await
                .map_err(|e| GenerationError::ApiError {
                    status_code: 200,
                    message: format!("Failed to parse response: {e}"),
                })?;

        Ok(api_response.response)
    }

    async fn embed(
        &self,
        inputs: &[String],
    ) -> std::result::Result<Vec<Vec<f32>>, GenerationError> {
        let url = format!("{}/api/embeddings", self.base_url);

        debug!(
            model = %self.embedding_model,
            count = inputs.len(),
            "Sending embedding requests"
        );

        // The native endpoint embeds one prompt per request.
        let mut embeddings = Vec::with_capacity(inputs.len());
        for input in inputs {
            let body = serde_json::json!({
                "model": self.embedding_model,
                "prompt": input,
            });

            let response = self
                .client
                .post(&url)
                .header("Content-Type", "application/json")
                .json(&body)
                .send()
                .await
                .map_err(|e| GenerationError::Network(e.to_string()))?;

            let status = response.status().as_u16();

            if status != 200 {
                let error_body = response.text().await.unwrap_or_default();
                warn!(status, body = %error_body, "Ollama embedding error");
                return Err(GenerationError::ApiError {
                    status_code: status,
                    message: error_body,
                });
            }

            let api_response: EmbeddingResponse =
                response
                    .json()
                    .await
                    .map_err(|e| GenerationError::ApiError {
                        status_code: 200,
                        message: format!("Failed to parse embedding response: {e}"),
                    })?;

            embeddings.push(api_response.embedding);
        }

        Ok(embeddings)
    }

    async fn health_check(&self) -> std::result::Result<bool, GenerationError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        Ok(response.status().is_success())
    }
}

// --- Ollama API types (internal) ---

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}
