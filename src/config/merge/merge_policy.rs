//! Merge rules: defaults, override order, conflict handling.

use crate::config::DEFAULT_API_BASE_URL;
use crate::agent_config::DEFAULT_DOMAIN_SECTION;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Later sources override earlier ones: defaults, global file, workspace
/// files, then environment.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("api.base_url", DEFAULT_API_BASE_URL)?
        .set_default("api.connect_timeout_secs", 10)?
        .set_default("api.request_timeout_secs", 30)?
        .set_default("editor.domain_section", DEFAULT_DOMAIN_SECTION)
}
