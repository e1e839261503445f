//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::agent_config::{initial_config, parse, serialize, ConfigDocument, EditPolicy};
use crate::client::{AuthUser, BackendClient};
use crate::config::{ConfigLoader, NetProtectConfig};
use crate::error::ApiError;
use crate::session::EditSession;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use crate::cli::command_name;
use crate::cli::interactive::run_editor;
use crate::cli::parse::{AgentCommands, Commands, FileCommands};
use crate::cli::presentation::{format_auth_user, format_document, format_edit_summary};

/// Runtime context for CLI execution: loaded settings and the async runtime
/// used to drive backend calls.
pub struct RunContext {
    config: NetProtectConfig,
    runtime: Runtime,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        api_url: Option<String>,
    ) -> Result<Self, ApiError> {
        let mut config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        if let Some(url) = api_url {
            config.api.base_url = url;
            config.ensure_valid()?;
        }
        Self::from_config(config)
    }

    pub fn from_config(config: NetProtectConfig) -> Result<Self, ApiError> {
        let runtime = Runtime::new()
            .map_err(|e| ApiError::ConfigError(format!("Failed to start async runtime: {}", e)))?;
        Ok(Self { config, runtime })
    }

    pub fn config(&self) -> &NetProtectConfig {
        &self.config
    }

    fn policy(&self) -> EditPolicy {
        self.config.editor.policy()
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let name = command_name(command);
        let started = Instant::now();
        debug!(command = %name, "Command started");
        let result = self.execute_inner(command);
        info!(
            command = %name,
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::File { command } => self.handle_file_command(command),
            Commands::Agent { command } => self.handle_agent_command(command),
            Commands::Template {
                agent_id,
                agent_name,
            } => Ok(initial_config(agent_id, agent_name)),
            Commands::Whoami { format } => {
                let client = BackendClient::new(&self.config.api)?;
                let user = self.require_session(&client)?;
                format_auth_user(&user, client.base_url(), format)
            }
            Commands::Settings => self.config.to_display_toml(),
        }
    }

    fn handle_file_command(&self, command: &FileCommands) -> Result<String, ApiError> {
        let policy = self.policy();
        match command {
            FileCommands::Show { path, format } => {
                let document = read_document(path, &policy)?;
                format_document(&document, format)
            }
            FileCommands::Set {
                path,
                section,
                key,
                value,
                dry_run,
            } => {
                let mut document = read_document(path, &policy)?;
                document.set_value(section, key, value)?;
                finish_file_edit(path, &document, *dry_run, &format!("set {} {}", section, key))
            }
            FileCommands::Rename {
                path,
                from,
                to,
                dry_run,
            } => {
                let mut document = read_document(path, &policy)?;
                document.rename(from, to)?;
                finish_file_edit(path, &document, *dry_run, &format!("renamed {} to {}", from, to))
            }
            FileCommands::Fmt { path, check } => {
                let original = read_text(path)?;
                let normalized = serialize(&parse(&original, &policy));
                if normalized == original {
                    return Ok(format!("{} is already normalized", path.display()));
                }
                if *check {
                    return Err(ApiError::ConfigError(format!(
                        "{} is not normalized (run `netprotect file fmt`)",
                        path.display()
                    )));
                }
                write_text(path, &normalized)?;
                Ok(format!("Normalized {}", path.display()))
            }
        }
    }

    fn handle_agent_command(&self, command: &AgentCommands) -> Result<String, ApiError> {
        let client = BackendClient::new(&self.config.api)?;
        self.require_session(&client)?;
        let policy = self.policy();

        match command {
            AgentCommands::Show { agent_id, format } => self.runtime.block_on(async {
                let session = EditSession::fetch(&client, agent_id, None, policy).await?;
                format_document(session.document(), format)
            }),
            AgentCommands::Set {
                agent_id,
                section,
                key,
                value,
                name,
            } => self.runtime.block_on(async {
                let mut session =
                    EditSession::open(&client, agent_id, name.as_deref(), policy).await?;
                session.set_value(section, key, value)?;
                session.save().await?;
                Ok::<_, ApiError>(format_edit_summary(agent_id, &format!("set {} {}", section, key)))
            }),
            AgentCommands::Rename {
                agent_id,
                from,
                to,
                name,
            } => self.runtime.block_on(async {
                let mut session =
                    EditSession::open(&client, agent_id, name.as_deref(), policy).await?;
                session.rename(from, to)?;
                session.save().await?;
                Ok::<_, ApiError>(format_edit_summary(agent_id, &format!("renamed {} to {}", from, to)))
            }),
            AgentCommands::Download {
                agent_id,
                name,
                out,
            } => self.runtime.block_on(async {
                let session =
                    EditSession::open(&client, agent_id, name.as_deref(), policy).await?;
                let path = session.download(out)?;
                Ok::<_, ApiError>(format!("Wrote {}", path.display()))
            }),
            AgentCommands::Init { agent_id, name } => self.runtime.block_on(async {
                let session =
                    EditSession::open(&client, agent_id, name.as_deref(), policy).await?;
                Ok::<_, ApiError>(format!(
                    "Agent {} has a configuration with {} sections",
                    agent_id,
                    session.document().len()
                ))
            }),
            AgentCommands::Token { agent_id } => {
                self.runtime.block_on(client.get_agent_token(agent_id))
            }
            AgentCommands::Edit {
                agent_id,
                name,
                out,
            } => {
                let mut session = self.runtime.block_on(EditSession::open(
                    &client,
                    agent_id,
                    name.as_deref(),
                    policy,
                ))?;
                run_editor(&self.runtime, &mut session, out)
            }
        }
    }

    /// Session check, made once per command that talks to the backend.
    fn require_session(&self, client: &BackendClient) -> Result<AuthUser, ApiError> {
        self.runtime.block_on(client.check_auth()).ok_or_else(|| {
            ApiError::Unauthorized(format!("no active session for {}", client.base_url()))
        })
    }
}

fn read_text(path: &Path) -> Result<String, ApiError> {
    std::fs::read_to_string(path).map_err(|e| ApiError::file_access(path, e))
}

fn write_text(path: &Path, text: &str) -> Result<(), ApiError> {
    std::fs::write(path, text).map_err(|e| ApiError::file_access(path, e))
}

fn read_document(path: &Path, policy: &EditPolicy) -> Result<ConfigDocument, ApiError> {
    Ok(parse(&read_text(path)?, policy))
}

fn finish_file_edit(
    path: &Path,
    document: &ConfigDocument,
    dry_run: bool,
    action: &str,
) -> Result<String, ApiError> {
    let text = serialize(document);
    if dry_run {
        return Ok(text);
    }
    write_text(path, &text)?;
    Ok(format!("{}: {}", path.display(), action))
}
