//! Document model: sections, fields, and the editability policy they carry.

use serde::{Deserialize, Serialize};

/// Section holding the agent identity fields.
pub const AGENT_SECTION: &str = "[agent]";

/// The only field of [`AGENT_SECTION`] a user may change.
pub const AUTH_TOKEN_KEY: &str = "AUTH-Token";

/// Header prefix shared by directory-query sections.
pub const QUERY_SECTION_PREFIX: &str = "[query_";

/// Domain-credentials section of the initial configuration template.
pub const DEFAULT_DOMAIN_SECTION: &str = "[adlab.local]";

/// Rules deciding which section names and field values may be edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditPolicy {
    /// Header of the domain-credentials section, whose name stays editable.
    pub domain_section: String,
}

impl Default for EditPolicy {
    fn default() -> Self {
        Self {
            domain_section: DEFAULT_DOMAIN_SECTION.to_string(),
        }
    }
}

impl EditPolicy {
    pub fn new(domain_section: impl Into<String>) -> Self {
        Self {
            domain_section: domain_section.into(),
        }
    }

    /// Query sections are named `[query_...]`.
    pub fn is_query_section(name: &str) -> bool {
        name.starts_with(QUERY_SECTION_PREFIX)
    }

    /// Only query sections and the domain-credentials section may be renamed.
    pub fn is_section_name_editable(&self, name: &str) -> bool {
        Self::is_query_section(name) || name == self.domain_section
    }

    /// Everything outside `[agent]` is editable; inside it only the auth token is.
    pub fn is_field_editable(section_name: &str, key: &str) -> bool {
        section_name != AGENT_SECTION || key == AUTH_TOKEN_KEY
    }
}

/// A single `key = value` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigField {
    key: String,
    value: String,
    is_editable: bool,
}

impl ConfigField {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_editable(&self) -> bool {
        self.is_editable
    }

    pub(crate) fn replace_value(&mut self, value: String) {
        self.value = value;
    }
}

/// A bracketed header and the fields beneath it, in document order.
///
/// Editability flags are fixed when the section is created and survive renames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSection {
    name: String,
    is_section_name_editable: bool,
    is_query_section: bool,
    fields: Vec<ConfigField>,
}

impl ConfigSection {
    /// Create an empty section, deriving its flags from `name` under `policy`.
    ///
    /// `name` must be a trimmed, single-line header starting with `[`, as
    /// [`parse`](crate::agent_config::parse) produces. Other names do not
    /// survive serialization.
    pub fn new(name: impl Into<String>, policy: &EditPolicy) -> Self {
        let name = name.into();
        Self {
            is_section_name_editable: policy.is_section_name_editable(&name),
            is_query_section: EditPolicy::is_query_section(&name),
            name,
            fields: Vec::new(),
        }
    }

    /// Append a field; duplicate keys are kept as separate entries.
    ///
    /// `key` must be non-empty, trimmed, free of `=` and line breaks, and must
    /// not start with `[`. `value` must be trimmed and single-line. Anything
    /// else reads back differently after serialization.
    pub fn push_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let is_editable = EditPolicy::is_field_editable(&self.name, &key);
        self.fields.push(ConfigField {
            key,
            value: value.into(),
            is_editable,
        });
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_section_name_editable(&self) -> bool {
        self.is_section_name_editable
    }

    pub fn is_query_section(&self) -> bool {
        self.is_query_section
    }

    pub fn fields(&self) -> &[ConfigField] {
        &self.fields
    }

    /// First field with the given key.
    pub fn field(&self, key: &str) -> Option<&ConfigField> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn fields_mut(&mut self) -> &mut [ConfigField] {
        &mut self.fields
    }
}

/// Ordered sections of one agent configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigDocument {
    sections: Vec<ConfigSection>,
}

impl ConfigDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sections(sections: Vec<ConfigSection>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[ConfigSection] {
        &self.sections
    }

    pub fn section(&self, index: usize) -> Option<&ConfigSection> {
        self.sections.get(index)
    }

    /// First section with the given header, e.g. `[proxy]`.
    pub fn find_section(&self, name: &str) -> Option<&ConfigSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub(crate) fn sections_mut(&mut self) -> &mut [ConfigSection] {
        &mut self.sections
    }
}

impl std::fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::agent_config::serialize(self))
    }
}
