//! Session registry: one orchestrator per session id.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use deskrail_config::{AppConfig, MemoryConfig};
use deskrail_core::{AgentResult, Result, SessionId, VectorStore};
use deskrail_guardrails::GuardrailEngine;
use deskrail_memory::ConversationMemory;
use deskrail_providers::build_generator;
use deskrail_retrieval::build_store;

use crate::escalation::EscalationPolicy;
use crate::rag::{AnswerGenerator, RagPipeline};
use crate::support::SupportAgent;

/// Default session capacity. The oldest session is evicted beyond it.
const MAX_SESSIONS: usize = 1000;

struct SessionEntry {
    agent: Arc<Mutex<SupportAgent>>,
    created_at: DateTime<Utc>,
}

/// Owns every live conversation and the components they share.
///
/// Guardrails, the escalation policy and the answer generator are built
/// once and shared read-only; each session gets its own memory and
/// unresolved-turn counter. A per-session mutex is held for the whole
/// `handle` call, so at most one message is in flight per session while
/// different sessions proceed in parallel.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, SessionEntry>>,
    guardrails: Arc<GuardrailEngine>,
    escalation: Arc<EscalationPolicy>,
    answers: Arc<dyn AnswerGenerator>,
    store: Arc<dyn VectorStore>,
    memory_config: MemoryConfig,
    capacity: usize,
}

impl SessionRegistry {
    /// Build a registry around explicit components.
    pub fn new(
        guardrails: Arc<GuardrailEngine>,
        escalation: Arc<EscalationPolicy>,
        answers: Arc<dyn AnswerGenerator>,
        store: Arc<dyn VectorStore>,
        memory_config: MemoryConfig,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            guardrails,
            escalation,
            answers,
            store,
            memory_config,
            capacity: MAX_SESSIONS,
        }
    }

    /// Build the registry and every shared component from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let guardrails = Arc::new(GuardrailEngine::from_config(&config.guardrails)?);
        let escalation = Arc::new(EscalationPolicy::from_config(&config.escalation));
        let generator = build_generator(&config.generation)?;
        let store = build_store(&config.retrieval, generator.clone())?;
        let answers: Arc<dyn AnswerGenerator> = Arc::new(RagPipeline::from_config(
            &config.retrieval,
            store.clone(),
            generator,
        ));

        Ok(Self::new(
            guardrails,
            escalation,
            answers,
            store,
            config.memory.clone(),
        ))
    }

    /// Override the session capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Route one message to its session, creating the session on first
    /// contact. The session mutex is held across the whole pipeline
    /// pass.
    pub async fn handle(&self, session_id: &SessionId, text: &str) -> Result<AgentResult> {
        let agent = self.get_or_create(session_id).await;
        let mut agent = agent.lock().await;
        agent.handle_message(text).await
    }

    /// The vector store shared with ingestion endpoints.
    pub fn store(&self) -> Arc<dyn VectorStore> {
        self.store.clone()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    pub async fn contains(&self, session_id: &SessionId) -> bool {
        self.sessions.read().await.contains_key(session_id.as_str())
    }

    async fn get_or_create(&self, session_id: &SessionId) -> Arc<Mutex<SupportAgent>> {
        {
            let sessions = self.sessions.read().await;
            if let Some(entry) = sessions.get(session_id.as_str()) {
                return entry.agent.clone();
            }
        }

        let mut sessions = self.sessions.write().await;
        // Re-check: another task may have created it between locks.
        if let Some(entry) = sessions.get(session_id.as_str()) {
            return entry.agent.clone();
        }

        if sessions.len() >= self.capacity {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.created_at)
                .map(|(id, _)| id.clone());
            if let Some(id) = oldest {
                warn!(session = %id, "Session capacity reached, evicting oldest");
                sessions.remove(&id);
            }
        }

        debug!(session = %session_id, "Creating session");
        let agent = Arc::new(Mutex::new(SupportAgent::new(
            self.guardrails.clone(),
            self.escalation.clone(),
            self.answers.clone(),
            ConversationMemory::from_config(&self.memory_config),
        )));
        sessions.insert(
            session_id.as_str().to_string(),
            SessionEntry {
                agent: agent.clone(),
                created_at: Utc::now(),
            },
        );

        agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskrail_core::EscalationReason;

    /// Degraded-mode config: no generator, keyword retrieval. The
    /// fallback answer carries confidence 0.5, so a 0.4 threshold keeps
    /// clean messages autonomous.
    fn test_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.generation.backend = "none".to_string();
        config.retrieval.backend = "in_memory".to_string();
        config.escalation.confidence_threshold = 0.4;
        config.escalation.max_unresolved_turns = 2;
        config
    }

    fn registry() -> SessionRegistry {
        SessionRegistry::from_config(&test_config()).unwrap()
    }

    #[tokio::test]
    async fn sessions_are_created_on_first_contact() {
        let registry = registry();
        assert!(registry.is_empty().await);

        let id = SessionId::from("alpha");
        registry.handle(&id, "how do I reset my password?").await.unwrap();

        assert_eq!(registry.len().await, 1);
        assert!(registry.contains(&id).await);
        assert!(!registry.contains(&SessionId::from("beta")).await);
    }

    #[tokio::test]
    async fn same_session_id_keeps_its_state() {
        let registry = registry();
        let id = SessionId::from("alpha");

        // Two hand-offs push the unresolved counter to the maximum.
        registry.handle(&id, "talk to a human").await.unwrap();
        registry.handle(&id, "human please").await.unwrap();

        // A clean message now trips the too-many-turns rule, proving
        // the counter survived across calls.
        let result = registry
            .handle(&id, "how do I reset my password?")
            .await
            .unwrap();
        assert!(result.escalated);
        assert_eq!(result.escalation_reason, Some(EscalationReason::TooManyTurns));
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn sessions_have_independent_counters() {
        let registry = registry();
        let alpha = SessionId::from("alpha");
        let beta = SessionId::from("beta");

        registry.handle(&alpha, "talk to a human").await.unwrap();
        registry.handle(&alpha, "human please").await.unwrap();

        // Beta is unaffected by alpha's unresolved turns.
        let result = registry
            .handle(&beta, "how do I reset my password?")
            .await
            .unwrap();
        assert!(!result.escalated);
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn capacity_evicts_the_oldest_session() {
        let registry = registry().with_capacity(2);

        for name in ["first", "second", "third"] {
            registry
                .handle(&SessionId::from(name), "how do I reset my password?")
                .await
                .unwrap();
            // Keep created-at timestamps strictly ordered.
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        assert_eq!(registry.len().await, 2);
        assert!(!registry.contains(&SessionId::from("first")).await);
        assert!(registry.contains(&SessionId::from("second")).await);
        assert!(registry.contains(&SessionId::from("third")).await);
    }
}
