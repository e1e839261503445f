//! Document presentation: sections as headed tables with editability markers.

use crate::agent_config::ConfigDocument;
use crate::error::ApiError;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format by name: "json" or anything else for text.
pub fn format_document(document: &ConfigDocument, format: &str) -> Result<String, ApiError> {
    if format == "json" {
        format_document_json(document)
    } else {
        Ok(format_document_text(document))
    }
}

pub fn format_document_json(document: &ConfigDocument) -> Result<String, ApiError> {
    serde_json::to_string_pretty(document)
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to render JSON: {}", e)))
}

/// One heading and one Key/Value/Editable table per section.
pub fn format_document_text(document: &ConfigDocument) -> String {
    if document.is_empty() {
        return "Configuration is empty.".to_string();
    }

    let mut blocks = Vec::with_capacity(document.len());
    for (index, section) in document.sections().iter().enumerate() {
        let mut heading = format!("{}. {}", index, section.name().bold());
        if section.is_query_section() {
            heading.push_str(&format!(" {}", "(query_*)".yellow()));
        } else if !section.is_section_name_editable() {
            heading.push_str(&format!(" {}", "(name locked)".dimmed()));
        }

        if section.fields().is_empty() {
            blocks.push(format!("{}\n  (no fields)", heading));
            continue;
        }

        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["#", "Key", "Value", "Editable"]);
        for (field_index, field) in section.fields().iter().enumerate() {
            let editable = if field.is_editable() { "yes" } else { "locked" };
            table.add_row(vec![
                field_index.to_string(),
                field.key().to_string(),
                field.value().to_string(),
                editable.to_string(),
            ]);
        }
        blocks.push(format!("{}\n{}", heading, table));
    }
    blocks.join("\n\n")
}
