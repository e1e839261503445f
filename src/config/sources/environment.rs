//! Environment source: NETPROTECT__SECTION__KEY variables and NETPROTECT_API_URL.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Variable kept for deployments configured like the web dashboard.
pub const LEGACY_API_URL_VAR: &str = "NETPROTECT_API_URL";

/// Add environment overrides, e.g. `NETPROTECT__API__BASE_URL`.
/// `NETPROTECT_API_URL` wins over everything when set.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .add_source(
            Environment::with_prefix("NETPROTECT")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option(
            "api.base_url",
            std::env::var(LEGACY_API_URL_VAR)
                .ok()
                .filter(|v| !v.trim().is_empty()),
        )
}
