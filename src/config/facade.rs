//! Config loader facade: the single entry point for building settings.

use crate::config::merge::merge_policy;
use crate::config::sources::{environment, global_file, workspace_file};
use crate::config::NetProtectConfig;
use crate::error::ApiError;
use config::File;
use std::path::Path;
use tracing::debug;

/// Loads and validates [`NetProtectConfig`].
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from defaults, the global file, workspace files, then environment.
    pub fn load(workspace_root: &Path) -> Result<NetProtectConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder)?;

        let config: NetProtectConfig = builder.build()?.try_deserialize()?;
        config.ensure_valid()?;
        debug!(base_url = %config.api.base_url, "Configuration loaded");
        Ok(config)
    }

    /// Load from one explicit file plus environment overrides.
    pub fn load_from_file(path: &Path) -> Result<NetProtectConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true));
        let builder = environment::add_to_builder(builder)?;

        let config: NetProtectConfig = builder.build()?.try_deserialize()?;
        config.ensure_valid()?;
        Ok(config)
    }
}
