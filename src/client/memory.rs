//! In-memory [`ConfigBackend`] for tests and offline demos.

use crate::client::{AgentConfigRecord, ConfigBackend};
use crate::error::ApiError;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Backend holding configurations in a map, with switchable failures.
#[derive(Default)]
pub struct MemoryBackend {
    configs: Mutex<HashMap<String, String>>,
    fail_updates: Mutex<bool>,
    calls: Mutex<Vec<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-seeded with one agent's configuration.
    pub fn with_config(agent_id: &str, raw_config: &str) -> Self {
        let backend = Self::new();
        backend
            .configs
            .lock()
            .insert(agent_id.to_string(), raw_config.to_string());
        backend
    }

    /// Stored text for an agent, if any.
    pub fn stored(&self, agent_id: &str) -> Option<String> {
        self.configs.lock().get(agent_id).cloned()
    }

    /// Make subsequent updates fail (simulates a network error on save).
    pub fn set_fail_updates(&self, fail: bool) {
        *self.fail_updates.lock() = fail;
    }

    /// Calls received so far, e.g. `GET a1`, `POST a1`, `PUT a1`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl ConfigBackend for MemoryBackend {
    async fn get_agent_config(&self, agent_id: &str) -> Result<AgentConfigRecord, ApiError> {
        self.record(format!("GET {}", agent_id));
        self.configs
            .lock()
            .get(agent_id)
            .map(|raw| AgentConfigRecord {
                agent_id: agent_id.to_string(),
                raw_config: raw.clone(),
                created_at: None,
                updated_at: None,
            })
            .ok_or_else(|| ApiError::NotFound(format!("No config for agent {}", agent_id)))
    }

    async fn create_agent_config(&self, agent_id: &str, raw_config: &str) -> Result<(), ApiError> {
        self.record(format!("POST {}", agent_id));
        self.configs
            .lock()
            .insert(agent_id.to_string(), raw_config.to_string());
        Ok(())
    }

    async fn update_agent_config(&self, agent_id: &str, raw_config: &str) -> Result<(), ApiError> {
        self.record(format!("PUT {}", agent_id));
        if *self.fail_updates.lock() {
            return Err(ApiError::RequestFailed(
                "Failed to update agent config".to_string(),
            ));
        }
        let mut configs = self.configs.lock();
        match configs.get_mut(agent_id) {
            Some(existing) => {
                *existing = raw_config.to_string();
                Ok(())
            }
            None => Err(ApiError::NotFound(format!("No config for agent {}", agent_id))),
        }
    }
}
