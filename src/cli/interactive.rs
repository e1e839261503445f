//! Interactive editor: the terminal counterpart of the dashboard config dialog.
//!
//! Rejected edits are shown as notices and the loop continues; a failed save
//! keeps the edits so it can be retried.

use crate::cli::presentation::format_document_text;
use crate::client::ConfigBackend;
use crate::error::ApiError;
use crate::session::EditSession;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use owo_colors::OwoColorize;
use std::path::Path;
use tokio::runtime::Runtime;

const ACTIONS: [&str; 6] = [
    "Edit field",
    "Rename section",
    "Show configuration",
    "Download",
    "Save changes",
    "Quit",
];

fn prompt_error(e: dialoguer::Error) -> ApiError {
    ApiError::Prompt(e.to_string())
}

fn notice(message: impl std::fmt::Display) {
    eprintln!("{}", message.to_string().yellow());
}

/// Run the editor loop until the user quits. Returns a closing summary.
pub fn run_editor<B: ConfigBackend + ?Sized>(
    runtime: &Runtime,
    session: &mut EditSession<'_, B>,
    download_dir: &Path,
) -> Result<String, ApiError> {
    let theme = ColorfulTheme::default();
    let mut saves = 0usize;
    println!("{}", format_document_text(session.document()));

    loop {
        let prompt = format!(
            "Configure {}{}",
            session.agent_name(),
            if session.is_dirty() { " (unsaved changes)" } else { "" }
        );
        let action = Select::with_theme(&theme)
            .with_prompt(prompt)
            .items(&ACTIONS)
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        match action {
            0 => edit_field(&theme, session)?,
            1 => rename_section(&theme, session)?,
            2 => println!("{}", format_document_text(session.document())),
            3 => match session.download(download_dir) {
                Ok(path) => println!("{} {}", "Downloaded to".green(), path.display()),
                Err(e) => notice(format!("Failed to download configuration: {}", e)),
            },
            4 => match runtime.block_on(session.save()) {
                Ok(()) => {
                    saves += 1;
                    println!("{}", "Configuration saved successfully".green());
                }
                Err(e) => notice(format!("Failed to save configuration: {}", e)),
            },
            _ => {
                if session.is_dirty() {
                    let discard = Confirm::with_theme(&theme)
                        .with_prompt("Discard unsaved changes?")
                        .default(false)
                        .interact()
                        .map_err(prompt_error)?;
                    if !discard {
                        continue;
                    }
                }
                return Ok(format!(
                    "Closed editor for agent {} ({} save{}).",
                    session.agent_id(),
                    saves,
                    if saves == 1 { "" } else { "s" }
                ));
            }
        }
    }
}

fn pick_section<B: ConfigBackend + ?Sized>(
    theme: &ColorfulTheme,
    session: &EditSession<'_, B>,
    prompt: &str,
) -> Result<Option<usize>, ApiError> {
    let names: Vec<&str> = session.sections().iter().map(|s| s.name()).collect();
    if names.is_empty() {
        notice("Configuration has no sections");
        return Ok(None);
    }
    Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&names)
        .default(0)
        .interact_opt()
        .map_err(prompt_error)
}

fn edit_field<B: ConfigBackend + ?Sized>(
    theme: &ColorfulTheme,
    session: &mut EditSession<'_, B>,
) -> Result<(), ApiError> {
    let Some(section_index) = pick_section(theme, session, "Section")? else {
        return Ok(());
    };
    let Some(section) = session.document().section(section_index) else {
        return Ok(());
    };
    if section.fields().is_empty() {
        notice(format!("{} has no fields", section.name()));
        return Ok(());
    }

    let labels: Vec<String> = section
        .fields()
        .iter()
        .map(|f| {
            let lock = if f.is_editable() { "" } else { "  [locked]" };
            format!("{} = {}{}", f.key(), f.value(), lock)
        })
        .collect();
    let Some(field_index) = Select::with_theme(theme)
        .with_prompt("Field")
        .items(&labels)
        .default(0)
        .interact_opt()
        .map_err(prompt_error)?
    else {
        return Ok(());
    };

    let current = section.fields()[field_index].value().to_string();
    let value: String = Input::with_theme(theme)
        .with_prompt("Value")
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;

    if let Err(e) = session.set_field_value(section_index, field_index, &value) {
        notice(e);
    }
    Ok(())
}

fn rename_section<B: ConfigBackend + ?Sized>(
    theme: &ColorfulTheme,
    session: &mut EditSession<'_, B>,
) -> Result<(), ApiError> {
    let Some(index) = pick_section(theme, session, "Section to rename")? else {
        return Ok(());
    };
    let current = session
        .document()
        .section(index)
        .map(|s| s.name().to_string())
        .unwrap_or_default();
    let new_name: String = Input::with_theme(theme)
        .with_prompt("New name")
        .with_initial_text(current)
        .interact_text()
        .map_err(prompt_error)?;

    if let Err(e) = session.rename_section(index, &new_name) {
        notice(e);
    }
    Ok(())
}
