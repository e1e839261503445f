//! CLI parse: clap types for NetProtect. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// NetProtect CLI - edit Active Directory scanner agent configurations
#[derive(Parser)]
#[command(name = "netprotect")]
#[command(about = "Edit NetProtect agent configurations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace directory searched for config/config.toml
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Backend API base URL (overrides settings)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Work on a local configuration file
    File {
        #[command(subcommand)]
        command: FileCommands,
    },
    /// Work on an agent's configuration stored in the backend
    Agent {
        #[command(subcommand)]
        command: AgentCommands,
    },
    /// Print the initial configuration for a new agent
    Template {
        /// Agent ID
        agent_id: String,
        /// Agent display name
        agent_name: String,
    },
    /// Check the dashboard session
    Whoami {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print effective settings
    Settings,
}

#[derive(Subcommand)]
pub enum FileCommands {
    /// Show sections and fields with their editability
    Show {
        /// Configuration file
        path: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Set one field value
    Set {
        /// Configuration file
        path: PathBuf,
        /// Section header, e.g. "[agent]"
        section: String,
        /// Field key
        key: String,
        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Print the result instead of writing the file
        #[arg(long)]
        dry_run: bool,
    },
    /// Rename a section
    Rename {
        /// Configuration file
        path: PathBuf,
        /// Current section header
        from: String,
        /// New section header
        to: String,
        /// Print the result instead of writing the file
        #[arg(long)]
        dry_run: bool,
    },
    /// Normalize spacing and drop malformed lines
    Fmt {
        /// Configuration file
        path: PathBuf,
        /// Fail if the file is not already normalized; do not write
        #[arg(long)]
        check: bool,
    },
}

#[derive(Subcommand)]
pub enum AgentCommands {
    /// Show an agent's stored configuration
    Show {
        /// Agent ID
        agent_id: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Set one field value and save
    Set {
        /// Agent ID
        agent_id: String,
        /// Section header, e.g. "[agent]"
        section: String,
        /// Field key
        key: String,
        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Agent name used if an initial configuration must be created
        #[arg(long)]
        name: Option<String>,
    },
    /// Rename a section and save
    Rename {
        /// Agent ID
        agent_id: String,
        /// Current section header
        from: String,
        /// New section header
        to: String,
        /// Agent name used if an initial configuration must be created
        #[arg(long)]
        name: Option<String>,
    },
    /// Write the configuration to <name>.ini
    Download {
        /// Agent ID
        agent_id: String,
        /// Agent name (defaults to the Agent-Name field)
        #[arg(long)]
        name: Option<String>,
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Create the initial configuration if the agent has none
    Init {
        /// Agent ID
        agent_id: String,
        /// Agent name written into the [agent] section
        #[arg(long)]
        name: Option<String>,
    },
    /// Print the agent's auth token
    Token {
        /// Agent ID
        agent_id: String,
    },
    /// Edit interactively
    Edit {
        /// Agent ID
        agent_id: String,
        /// Agent name used if an initial configuration must be created
        #[arg(long)]
        name: Option<String>,
        /// Directory for downloads made from the editor
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}
