//! Configuration loading, validation, and management for deskrail.
//!
//! Loads configuration from `deskrail.toml` in the working directory (or a
//! path given via `DESKRAIL_CONFIG`) with environment variable overrides.
//! Every load validates: out-of-range values are rejected here, at
//! construction time, so the pipeline never sees them.
//!
//! The guardrail/escalation phrase sets live here as defaulted data rather
//! than literals inside the engines, so deployments can swap them without
//! touching decision logic.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `deskrail.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP gateway settings
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Answer-generation backend settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Knowledge retrieval settings
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Guardrail policy settings
    #[serde(default)]
    pub guardrails: GuardrailConfig,

    /// Escalation rule settings
    #[serde(default)]
    pub escalation: EscalationConfig,

    /// Per-session conversation memory settings
    #[serde(default)]
    pub memory: MemoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Wall-clock budget for one /chat call, enforced by the gateway.
    #[serde(default = "default_latency_budget_ms")]
    pub latency_budget_ms: u64,

    /// Root directory for /ingest-path document collection.
    #[serde(default = "default_docs_dir")]
    pub docs_dir: String,
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    8000
}
fn default_latency_budget_ms() -> u64 {
    3000
}
fn default_docs_dir() -> String {
    "data/docs".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            latency_budget_ms: default_latency_budget_ms(),
            docs_dir: default_docs_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// "ollama" for a live backend, "none" for the degraded mode where the
    /// pipeline answers with a fixed fallback.
    #[serde(default = "default_generation_backend")]
    pub backend: String,

    #[serde(default = "default_ollama_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
}

fn default_generation_backend() -> String {
    "ollama".into()
}
fn default_ollama_url() -> String {
    "http://localhost:11434".into()
}
fn default_model() -> String {
    "llama3".into()
}
fn default_embedding_model() -> String {
    "nomic-embed-text".into()
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            backend: default_generation_backend(),
            base_url: default_ollama_url(),
            model: default_model(),
            embedding_model: default_embedding_model(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// "embedding" for cosine search over embeddings, "in_memory" for
    /// keyword overlap. Embedding without an embed-capable generator falls
    /// back to in_memory at build time.
    #[serde(default = "default_retrieval_backend")]
    pub backend: String,

    /// Candidate chunks fetched per query.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Chunks scoring below this are discarded before prompt assembly.
    #[serde(default = "default_min_score")]
    pub min_score: f32,
}

fn default_retrieval_backend() -> String {
    "embedding".into()
}
fn default_top_k() -> usize {
    4
}
fn default_min_score() -> f32 {
    0.15
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            backend: default_retrieval_backend(),
            top_k: default_top_k(),
            min_score: default_min_score(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardrailConfig {
    /// Redact PII spans before the text reaches retrieval/generation.
    #[serde(default = "default_true")]
    pub block_pii: bool,

    /// When false, restricted-action keywords flag the message.
    #[serde(default)]
    pub allow_sensitive_actions: bool,

    /// Keywords that mark an action the agent must not take autonomously.
    #[serde(default = "default_restricted_actions")]
    pub restricted_actions: Vec<String>,

    /// Named PII detector patterns, compiled by the guardrail engine.
    #[serde(default = "default_pii_patterns")]
    pub pii_patterns: Vec<PiiPatternConfig>,

    /// Replacement text for matched PII spans.
    #[serde(default = "default_redaction_marker")]
    pub redaction_marker: String,
}

/// One named PII detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PiiPatternConfig {
    pub name: String,
    pub pattern: String,
}

fn default_true() -> bool {
    true
}
fn default_restricted_actions() -> Vec<String> {
    vec![
        "refund".into(),
        "chargeback".into(),
        "legal threat".into(),
        "account takeover".into(),
    ]
}
fn default_pii_patterns() -> Vec<PiiPatternConfig> {
    vec![
        PiiPatternConfig {
            name: "email".into(),
            pattern: r"\b[\w\.-]+@[\w\.-]+\.\w+\b".into(),
        },
        PiiPatternConfig {
            name: "phone".into(),
            pattern: r"\b\d{3}[-.\s]?\d{3}[-.\s]?\d{4}\b".into(),
        },
    ]
}
fn default_redaction_marker() -> String {
    "[REDACTED]".into()
}

impl Default for GuardrailConfig {
    fn default() -> Self {
        Self {
            block_pii: true,
            allow_sensitive_actions: false,
            restricted_actions: default_restricted_actions(),
            pii_patterns: default_pii_patterns(),
            redaction_marker: default_redaction_marker(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscalationConfig {
    /// Confidence strictly below this escalates; the threshold itself does
    /// not.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,

    /// Unresolved-turn count at or above this escalates.
    #[serde(default = "default_max_unresolved_turns")]
    pub max_unresolved_turns: u32,

    /// Phrases that mean the user wants a human.
    #[serde(default = "default_human_phrases")]
    pub human_phrases: Vec<String>,

    /// Phrases that signal frustration.
    #[serde(default = "default_frustration_phrases")]
    pub frustration_phrases: Vec<String>,
}

fn default_confidence_threshold() -> f32 {
    0.55
}
fn default_max_unresolved_turns() -> u32 {
    3
}
fn default_human_phrases() -> Vec<String> {
    vec![
        "human".into(),
        "representative".into(),
        "agent".into(),
        "specialist".into(),
        "talk to a person".into(),
        "escalate".into(),
    ]
}
fn default_frustration_phrases() -> Vec<String> {
    vec![
        "frustrating".into(),
        "not helpful".into(),
        "upset".into(),
        "angry".into(),
    ]
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            max_unresolved_turns: default_max_unresolved_turns(),
            human_phrases: default_human_phrases(),
            frustration_phrases: default_frustration_phrases(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Turns kept per session; older ones are dropped.
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,

    /// Stored-turn count at which a summary refresh is requested. The
    /// stored count is capped at `max_turns`, so a trigger above that cap
    /// never fires; configure `summary_trigger <= max_turns` if you want
    /// summaries.
    #[serde(default = "default_summary_trigger")]
    pub summary_trigger: usize,
}

fn default_max_turns() -> usize {
    6
}
fn default_summary_trigger() -> usize {
    10
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
            summary_trigger: default_summary_trigger(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location.
    ///
    /// Resolution order: the path in `DESKRAIL_CONFIG` if set, otherwise
    /// `deskrail.toml` in the working directory, otherwise pure defaults.
    /// Scalar overrides applied after the file parse:
    /// - `DESKRAIL_HOST`, `DESKRAIL_PORT`
    /// - `DESKRAIL_GENERATION_BACKEND`, `DESKRAIL_OLLAMA_URL`, `DESKRAIL_MODEL`
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("DESKRAIL_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("deskrail.toml"));
        let mut config = Self::load_from(&path)?;

        if let Ok(host) = std::env::var("DESKRAIL_HOST") {
            config.gateway.host = host;
        }
        if let Ok(port) = std::env::var("DESKRAIL_PORT") {
            config.gateway.port = port.parse().map_err(|_| {
                ConfigError::ValidationError(format!("DESKRAIL_PORT is not a port number: {port}"))
            })?;
        }
        if let Ok(backend) = std::env::var("DESKRAIL_GENERATION_BACKEND") {
            config.generation.backend = backend;
        }
        if let Ok(url) = std::env::var("DESKRAIL_OLLAMA_URL") {
            config.generation.base_url = url;
        }
        if let Ok(model) = std::env::var("DESKRAIL_MODEL") {
            config.generation.model = model;
        }

        // Overrides can re-introduce invalid values
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.gateway.port == 0 {
            return Err(ConfigError::ValidationError(
                "gateway.port must be non-zero".into(),
            ));
        }
        if self.gateway.latency_budget_ms == 0 {
            return Err(ConfigError::ValidationError(
                "gateway.latency_budget_ms must be at least 1".into(),
            ));
        }

        match self.generation.backend.as_str() {
            "ollama" | "none" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "generation.backend must be \"ollama\" or \"none\", got \"{other}\""
                )));
            }
        }

        match self.retrieval.backend.as_str() {
            "in_memory" | "embedding" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "retrieval.backend must be \"in_memory\" or \"embedding\", got \"{other}\""
                )));
            }
        }
        if self.retrieval.top_k == 0 {
            return Err(ConfigError::ValidationError(
                "retrieval.top_k must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.retrieval.min_score) {
            return Err(ConfigError::ValidationError(
                "retrieval.min_score must be between 0.0 and 1.0".into(),
            ));
        }

        if self.guardrails.redaction_marker.is_empty() {
            return Err(ConfigError::ValidationError(
                "guardrails.redaction_marker must not be empty".into(),
            ));
        }

        if !(0.0..=1.0).contains(&self.escalation.confidence_threshold) {
            return Err(ConfigError::ValidationError(
                "escalation.confidence_threshold must be between 0.0 and 1.0".into(),
            ));
        }
        if self.escalation.max_unresolved_turns == 0 {
            return Err(ConfigError::ValidationError(
                "escalation.max_unresolved_turns must be at least 1".into(),
            ));
        }

        if self.memory.max_turns == 0 {
            return Err(ConfigError::ValidationError(
                "memory.max_turns must be at least 1".into(),
            ));
        }
        if self.memory.summary_trigger == 0 {
            return Err(ConfigError::ValidationError(
                "memory.summary_trigger must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Render the default configuration as a TOML string, suitable for
    /// seeding a new `deskrail.toml`.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            generation: GenerationConfig::default(),
            retrieval: RetrievalConfig::default(),
            guardrails: GuardrailConfig::default(),
            escalation: EscalationConfig::default(),
            memory: MemoryConfig::default(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
