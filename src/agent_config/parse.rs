//! Parse configuration text into a [`ConfigDocument`].
//!
//! Parsing is lenient: lines before the first header, lines without `=`, and
//! lines with an empty key are dropped without error.

use crate::agent_config::document::{ConfigDocument, ConfigSection, EditPolicy};
use tracing::{debug, trace};

/// Parse raw configuration text.
///
/// A line whose trimmed content starts with `[` opens a new section named by
/// that trimmed line. Other non-blank lines split on the first `=` into a
/// trimmed key and value.
pub fn parse(text: &str, policy: &EditPolicy) -> ConfigDocument {
    let mut sections = Vec::new();
    let mut current: Option<ConfigSection> = None;
    let mut skipped = 0usize;

    for (line_no, line) in text.lines().enumerate() {
        let trimmed = line.trim();

        if trimmed.starts_with('[') {
            if let Some(section) = current.take() {
                sections.push(section);
            }
            current = Some(ConfigSection::new(trimmed, policy));
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }

        let Some(section) = current.as_mut() else {
            trace!(line = line_no + 1, "Skipping line outside of any section");
            skipped += 1;
            continue;
        };

        match trimmed.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                section.push_field(key.trim(), value.trim());
            }
            _ => {
                trace!(line = line_no + 1, section = section.name(), "Skipping malformed line");
                skipped += 1;
            }
        }
    }

    if let Some(section) = current {
        sections.push(section);
    }

    debug!(sections = sections.len(), skipped, "Parsed agent configuration");
    ConfigDocument::from_sections(sections)
}

impl std::str::FromStr for ConfigDocument {
    type Err = std::convert::Infallible;

    /// Parse under the default [`EditPolicy`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse(s, &EditPolicy::default()))
    }
}
