//! NetProtect Backend Client
//!
//! REST calls the config editor depends on: fetching, creating, and replacing an
//! agent's configuration text, looking up an agent's token, and checking the
//! dashboard session. [`ConfigBackend`] is the seam the edit session talks to.

use crate::config::ApiConfig;
use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

mod memory;

pub use memory::MemoryBackend;

/// Stored configuration for one agent, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfigRecord {
    #[serde(alias = "agent_id")]
    pub agent_id: String,
    #[serde(alias = "raw_config")]
    pub raw_config: String,
    #[serde(default, alias = "created_at")]
    pub created_at: Option<String>,
    #[serde(default, alias = "updated_at")]
    pub updated_at: Option<String>,
}

/// Identity reported by the session check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub role: String,
}

/// Persistence authority for agent configuration text.
#[async_trait]
pub trait ConfigBackend: Send + Sync {
    /// Fetch the current configuration of an agent
    async fn get_agent_config(&self, agent_id: &str) -> Result<AgentConfigRecord, ApiError>;

    /// Store a configuration for an agent that has none
    async fn create_agent_config(&self, agent_id: &str, raw_config: &str) -> Result<(), ApiError>;

    /// Replace an agent's configuration wholesale
    async fn update_agent_config(&self, agent_id: &str, raw_config: &str) -> Result<(), ApiError>;
}

#[derive(Deserialize)]
struct AgentConfigEnvelope {
    agent_config_file: AgentConfigRecord,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

fn map_http_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::RequestFailed(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        ApiError::RequestFailed(format!("Connection error: {}", error))
    } else {
        ApiError::RequestFailed(format!("HTTP error: {}", error))
    }
}

/// Map a non-success status and its body text to an error.
fn status_error(status: StatusCode, what: &str, body: String) -> ApiError {
    let detail = if body.trim().is_empty() {
        format!("{} (status {})", what, status)
    } else {
        format!("{} (status {}): {}", what, status, body.trim())
    };
    match status.as_u16() {
        401 | 403 => ApiError::Unauthorized(detail),
        404 => ApiError::NotFound(detail),
        _ => ApiError::RequestFailed(detail),
    }
}

/// HTTP client for the NetProtect backend API.
pub struct BackendClient {
    client: Client,
    base: Url,
    base_url: String,
    session_cookie: Option<String>,
}

impl BackendClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::RequestFailed(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        let base = Url::parse(&base_url)
            .map_err(|e| ApiError::ConfigError(format!("Invalid base_url {}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::ConfigError(format!("Invalid base_url {}", base_url)));
        }

        Ok(Self {
            client,
            base,
            base_url,
            session_cookie: config.session_cookie.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL extended by `segments`, each percent-encoded as one path segment.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn with_session(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session_cookie {
            Some(cookie) => request.header(reqwest::header::COOKIE, cookie),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response, ApiError> {
        let response = self
            .with_session(request)
            .send()
            .await
            .map_err(map_http_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, what, "Backend request failed");
            return Err(status_error(status, what, body));
        }
        Ok(response)
    }

    /// Fetch the agent's authentication token.
    pub async fn get_agent_token(&self, agent_id: &str) -> Result<String, ApiError> {
        let url = self.url(&["agent", agent_id, "token"]);
        let response = self
            .send(self.client.get(url), "Failed to fetch agent token")
            .await?;
        let body: TokenResponse = response.json().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse token response: {}", e))
        })?;
        Ok(body.token)
    }

    /// Check the dashboard session. Any failure means there is no usable session.
    pub async fn check_auth(&self) -> Option<AuthUser> {
        let url = self.url(&["user", "check-auth"]);
        let response = match self.with_session(self.client.get(url)).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(error = %e, "Auth check request failed");
                return None;
            }
        };
        if !response.status().is_success() {
            debug!(status = %response.status(), "Auth check rejected");
            return None;
        }
        response.json::<AuthUser>().await.ok()
    }
}

#[async_trait]
impl ConfigBackend for BackendClient {
    async fn get_agent_config(&self, agent_id: &str) -> Result<AgentConfigRecord, ApiError> {
        let url = self.url(&["agent", agent_id, "config"]);
        let response = self
            .send(self.client.get(url), "Failed to fetch agent config")
            .await?;
        let envelope: AgentConfigEnvelope = response.json().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse agent config: {}", e))
        })?;
        debug!(agent_id, bytes = envelope.agent_config_file.raw_config.len(), "Fetched agent config");
        Ok(envelope.agent_config_file)
    }

    async fn create_agent_config(&self, agent_id: &str, raw_config: &str) -> Result<(), ApiError> {
        let url = self.url(&["agent", agent_id, "config"]);
        self.send(
            self.client.post(url).json(&json!({ "raw_config": raw_config })),
            "Failed to create agent config",
        )
        .await?;
        debug!(agent_id, "Created agent config");
        Ok(())
    }

    async fn update_agent_config(&self, agent_id: &str, raw_config: &str) -> Result<(), ApiError> {
        let url = self.url(&["agent", agent_id, "config"]);
        self.send(
            self.client.put(url).json(&json!({ "raw_config": raw_config })),
            "Failed to update agent config",
        )
        .await?;
        debug!(agent_id, "Updated agent config");
        Ok(())
    }
}
