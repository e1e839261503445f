//! CLI help and command-name contract for logging and routing.

use crate::cli::parse::{AgentCommands, Commands, FileCommands};

/// Command name string for log records (e.g. "file.show", "agent.set").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::File { command } => format!("file.{}", file_command_name(command)),
        Commands::Agent { command } => format!("agent.{}", agent_command_name(command)),
        Commands::Template { .. } => "template".to_string(),
        Commands::Whoami { .. } => "whoami".to_string(),
        Commands::Settings => "settings".to_string(),
    }
}

pub fn file_command_name(command: &FileCommands) -> &'static str {
    match command {
        FileCommands::Show { .. } => "show",
        FileCommands::Set { .. } => "set",
        FileCommands::Rename { .. } => "rename",
        FileCommands::Fmt { .. } => "fmt",
    }
}

pub fn agent_command_name(command: &AgentCommands) -> &'static str {
    match command {
        AgentCommands::Show { .. } => "show",
        AgentCommands::Set { .. } => "set",
        AgentCommands::Rename { .. } => "rename",
        AgentCommands::Download { .. } => "download",
        AgentCommands::Init { .. } => "init",
        AgentCommands::Token { .. } => "token",
        AgentCommands::Edit { .. } => "edit",
    }
}
