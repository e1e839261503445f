//! Configuration System
//!
//! Layered settings for the NetProtect CLI: backend API location and session,
//! editor policy, and logging. Files are merged by [`ConfigLoader`] and
//! validated before use.

use crate::agent_config::EditPolicy;
use crate::agent_config::DEFAULT_DOMAIN_SECTION;
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Default backend base URL, including the API version prefix.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api/v1";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetProtectConfig {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Config editor settings
    #[serde(default)]
    pub editor: EditorConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL, e.g. http://localhost:5000/api/v1
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Session cookie sent with every request (the dashboard login cookie)
    #[serde(default)]
    pub session_cookie: Option<String>,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            session_cookie: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Config editor settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Header of the domain-credentials section whose name may be edited
    #[serde(default = "default_domain_section")]
    pub domain_section: String,
}

fn default_domain_section() -> String {
    DEFAULT_DOMAIN_SECTION.to_string()
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            domain_section: default_domain_section(),
        }
    }
}

impl EditorConfig {
    pub fn policy(&self) -> EditPolicy {
        EditPolicy::new(self.domain_section.clone())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Api(String),
    Editor(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Api(msg) => write!(f, "api: {}", msg),
            ValidationError::Editor(msg) => write!(f, "editor: {}", msg),
            ValidationError::Logging(msg) => write!(f, "logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ApiConfig {
    pub fn validate(&self) -> Result<(), String> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err("base_url cannot be empty".to_string());
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(format!("base_url must be an http(s) URL (got {})", url));
        }
        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err("timeouts must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl EditorConfig {
    pub fn validate(&self) -> Result<(), String> {
        let name = &self.domain_section;
        if !(name.starts_with('[') && name.ends_with(']') && name.len() > 2) {
            return Err(format!(
                "domain_section must be a bracketed header like [adlab.local] (got {})",
                name
            ));
        }
        Ok(())
    }
}

impl NetProtectConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.api.validate() {
            errors.push(ValidationError::Api(e));
        }
        if let Err(e) = self.editor.validate() {
            errors.push(ValidationError::Editor(e));
        }
        if !matches!(self.logging.format.as_str(), "json" | "text") {
            errors.push(ValidationError::Logging(format!(
                "format must be 'json' or 'text' (got {})",
                self.logging.format
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and fold all problems into a single error.
    pub fn ensure_valid(&self) -> Result<(), ApiError> {
        self.validate().map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                msgs.join("\n")
            ))
        })
    }

    /// Effective settings as TOML with the session cookie masked.
    pub fn to_display_toml(&self) -> Result<String, ApiError> {
        let mut shown = self.clone();
        if let Some(cookie) = shown.api.session_cookie.as_mut() {
            *cookie = mask_secret(cookie);
        }
        toml::to_string_pretty(&shown)
            .map_err(|e| ApiError::ConfigError(format!("Failed to render settings: {}", e)))
    }
}

fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}
