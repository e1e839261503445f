//! Agent Config Edit Session
//!
//! One editing pass over one agent's configuration: fetch (creating the initial
//! configuration when the agent has none), edit in memory, save by replacing the
//! stored text wholesale, and optionally write a download copy. Dropping the
//! session discards unsaved edits.

use crate::agent_config::{
    download_file_name, initial_config, parse, serialize, ConfigDocument, ConfigSection, EditPolicy,
    AGENT_SECTION,
};
use crate::client::{AgentConfigRecord, ConfigBackend};
use crate::error::{ApiError, EditError};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub struct EditSession<'a, B: ConfigBackend + ?Sized> {
    backend: &'a B,
    agent_id: String,
    agent_name: Option<String>,
    policy: EditPolicy,
    record: AgentConfigRecord,
    document: ConfigDocument,
    baseline: String,
}

impl<'a, B: ConfigBackend + ?Sized> EditSession<'a, B> {
    /// Open the stored configuration, creating the initial one if the agent has none.
    ///
    /// Authentication failures are returned as-is; any other fetch failure is
    /// treated as a missing configuration.
    pub async fn open(
        backend: &'a B,
        agent_id: &str,
        agent_name: Option<&str>,
        policy: EditPolicy,
    ) -> Result<Self, ApiError> {
        let record = match backend.get_agent_config(agent_id).await {
            Ok(record) => record,
            Err(ApiError::Unauthorized(msg)) => return Err(ApiError::Unauthorized(msg)),
            Err(err) => {
                info!(agent_id, error = %err, "No stored config; creating initial config");
                let name = agent_name.unwrap_or(agent_id);
                backend
                    .create_agent_config(agent_id, &initial_config(agent_id, name))
                    .await?;
                backend.get_agent_config(agent_id).await?
            }
        };
        Ok(Self::from_record(backend, agent_id, agent_name, policy, record))
    }

    /// Open the stored configuration without creating one.
    pub async fn fetch(
        backend: &'a B,
        agent_id: &str,
        agent_name: Option<&str>,
        policy: EditPolicy,
    ) -> Result<Self, ApiError> {
        let record = backend.get_agent_config(agent_id).await?;
        Ok(Self::from_record(backend, agent_id, agent_name, policy, record))
    }

    fn from_record(
        backend: &'a B,
        agent_id: &str,
        agent_name: Option<&str>,
        policy: EditPolicy,
        record: AgentConfigRecord,
    ) -> Self {
        let document = parse(&record.raw_config, &policy);
        let baseline = serialize(&document);
        Self {
            backend,
            agent_id: agent_id.to_string(),
            agent_name: agent_name.map(str::to_string),
            policy,
            record,
            document,
            baseline,
        }
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// Name given at open, else the `Agent-Name` field, else the agent id.
    pub fn agent_name(&self) -> &str {
        if let Some(name) = self.agent_name.as_deref() {
            return name;
        }
        self.document
            .find_section(AGENT_SECTION)
            .and_then(|s| s.field("Agent-Name"))
            .map(|f| f.value())
            .filter(|v| !v.is_empty())
            .unwrap_or(self.agent_id.as_str())
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    pub fn sections(&self) -> &[ConfigSection] {
        self.document.sections()
    }

    /// Metadata of the last fetched configuration.
    pub fn record(&self) -> &AgentConfigRecord {
        &self.record
    }

    /// Current text as it would be saved.
    pub fn rendered(&self) -> String {
        serialize(&self.document)
    }

    /// True when the in-memory document differs from the last fetched one.
    pub fn is_dirty(&self) -> bool {
        self.rendered() != self.baseline
    }

    pub fn rename_section(&mut self, index: usize, new_name: &str) -> Result<(), EditError> {
        self.document.rename_section(index, new_name)
    }

    pub fn set_field_value(
        &mut self,
        section_index: usize,
        field_index: usize,
        value: &str,
    ) -> Result<(), EditError> {
        self.document
            .set_field_value(section_index, field_index, value)
    }

    pub fn set_value(&mut self, section: &str, key: &str, value: &str) -> Result<(), EditError> {
        self.document.set_value(section, key, value)
    }

    pub fn rename(&mut self, from: &str, to: &str) -> Result<(), EditError> {
        self.document.rename(from, to)
    }

    /// Replace the stored configuration with the current document, then reload.
    ///
    /// On failure the in-memory edits are kept so the save can be retried.
    pub async fn save(&mut self) -> Result<(), ApiError> {
        let raw = self.rendered();
        if let Err(err) = self.backend.update_agent_config(&self.agent_id, &raw).await {
            warn!(agent_id = %self.agent_id, error = %err, "Save failed; edits kept");
            return Err(err);
        }
        self.baseline = raw;
        info!(agent_id = %self.agent_id, "Agent config saved");

        let record = self.backend.get_agent_config(&self.agent_id).await?;
        self.document = parse(&record.raw_config, &self.policy);
        self.baseline = serialize(&self.document);
        self.record = record;
        Ok(())
    }

    /// Write the current text to `<dir>/<agent-name>.ini` and return the path.
    pub fn download(&self, dir: &Path) -> Result<PathBuf, ApiError> {
        let path = dir.join(download_file_name(self.agent_name()));
        std::fs::write(&path, self.rendered()).map_err(|e| ApiError::file_access(&path, e))?;
        info!(path = %path.display(), "Agent config written");
        Ok(path)
    }
}
