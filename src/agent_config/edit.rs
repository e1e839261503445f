//! In-memory edits under the editability policy.
//!
//! A rejected edit returns an [`EditError`] and leaves the document unchanged.
//! Applying the same edit twice yields the same document as applying it once.

use crate::agent_config::document::{ConfigDocument, AGENT_SECTION, QUERY_SECTION_PREFIX};
use crate::error::EditError;
use tracing::{debug, warn};

impl ConfigDocument {
    /// Rename the section at `index`.
    ///
    /// Only query sections and the domain-credentials section can be renamed,
    /// and a query section must keep the `[query_` prefix. The new name is
    /// trimmed, must remain a single bracketed header line, and may not be
    /// `[agent]` or the name of another section.
    pub fn rename_section(&mut self, index: usize, new_name: &str) -> Result<(), EditError> {
        let len = self.len();
        let new_name = new_name.trim();
        let taken = self
            .sections()
            .iter()
            .enumerate()
            .any(|(i, s)| i != index && s.name() == new_name);
        let section = self
            .sections_mut()
            .get_mut(index)
            .ok_or(EditError::SectionOutOfRange { index, len })?;

        let rejection = if !section.is_section_name_editable() {
            Some(EditError::SectionNameLocked(section.name().to_string()))
        } else if section.is_query_section() && !new_name.starts_with(QUERY_SECTION_PREFIX) {
            Some(EditError::QueryPrefixRequired(new_name.to_string()))
        } else if !new_name.starts_with('[') || new_name.contains(['\n', '\r']) {
            Some(EditError::InvalidSectionName(new_name.to_string()))
        } else if new_name == AGENT_SECTION {
            Some(EditError::ReservedSectionName(new_name.to_string()))
        } else if taken {
            Some(EditError::DuplicateSectionName(new_name.to_string()))
        } else {
            None
        };

        if let Some(err) = rejection {
            warn!(section = section.name(), new_name, error = %err, "Rename rejected");
            return Err(err);
        }

        debug!(from = section.name(), to = new_name, "Section renamed");
        section.set_name(new_name.to_string());
        Ok(())
    }

    /// Replace the value of one field. Keys and editability never change.
    ///
    /// The value is trimmed, as it would be when the saved text is read back.
    pub fn set_field_value(
        &mut self,
        section_index: usize,
        field_index: usize,
        new_value: &str,
    ) -> Result<(), EditError> {
        let new_value = new_value.trim();
        let len = self.len();
        let section = self
            .sections_mut()
            .get_mut(section_index)
            .ok_or(EditError::SectionOutOfRange {
                index: section_index,
                len,
            })?;
        let section_name = section.name().to_string();
        let fields = section.fields_mut();
        let field_count = fields.len();
        let field = fields
            .get_mut(field_index)
            .ok_or_else(|| EditError::FieldOutOfRange {
                section: section_name.clone(),
                index: field_index,
                len: field_count,
            })?;

        let rejection = if !field.is_editable() {
            Some(EditError::FieldLocked {
                section: section_name.clone(),
                key: field.key().to_string(),
            })
        } else if new_value.contains(['\n', '\r']) {
            Some(EditError::MultilineValue {
                section: section_name.clone(),
                key: field.key().to_string(),
            })
        } else {
            None
        };

        if let Some(err) = rejection {
            warn!(section = %section_name, key = field.key(), error = %err, "Edit rejected");
            return Err(err);
        }

        debug!(section = %section_name, key = field.key(), "Field updated");
        field.replace_value(new_value.to_string());
        Ok(())
    }

    /// Index of the first section named `name`.
    pub fn section_index(&self, name: &str) -> Result<usize, EditError> {
        self.sections()
            .iter()
            .position(|s| s.name() == name)
            .ok_or_else(|| EditError::SectionNotFound(name.to_string()))
    }

    /// Index of the first field keyed `key` in the section at `section_index`.
    pub fn field_index(&self, section_index: usize, key: &str) -> Result<usize, EditError> {
        let section = self.section(section_index).ok_or(EditError::SectionOutOfRange {
            index: section_index,
            len: self.len(),
        })?;
        section
            .fields()
            .iter()
            .position(|f| f.key() == key)
            .ok_or_else(|| EditError::FieldNotFound {
                section: section.name().to_string(),
                key: key.to_string(),
            })
    }

    /// Set a value addressed by section header and key.
    pub fn set_value(&mut self, section: &str, key: &str, value: &str) -> Result<(), EditError> {
        let section_index = self.section_index(section)?;
        let field_index = self.field_index(section_index, key)?;
        self.set_field_value(section_index, field_index, value)
    }

    /// Rename a section addressed by its current header.
    pub fn rename(&mut self, from: &str, to: &str) -> Result<(), EditError> {
        let index = self.section_index(from)?;
        self.rename_section(index, to)
    }
}
