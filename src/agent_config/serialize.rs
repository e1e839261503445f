//! Serialize a [`ConfigDocument`] back into configuration text.

use crate::agent_config::document::{ConfigDocument, ConfigSection};

/// Render sections in order, separated by a blank line.
///
/// Each section is its header line followed by one `key = value` line per
/// field. No trailing newline is emitted.
pub fn serialize(document: &ConfigDocument) -> String {
    document
        .sections()
        .iter()
        .map(render_section)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_section(section: &ConfigSection) -> String {
    let mut out = String::from(section.name());
    for field in section.fields() {
        out.push('\n');
        out.push_str(field.key());
        out.push_str(" = ");
        out.push_str(field.value());
    }
    out
}
