//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod help;
mod interactive;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{AgentCommands, Cli, Commands, FileCommands};
pub use presentation::{
    format_auth_user, format_document, format_document_json, format_document_text,
    format_edit_summary,
};
pub use route::RunContext;
