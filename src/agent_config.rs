//! Agent Configuration Documents
//!
//! Structured view over the INI-style configuration text that NetProtect agents
//! run with. Text is parsed into ordered sections and fields, edited in memory
//! under a fixed editability policy, and serialized back into the same format
//! for the backend and for file download.

pub mod document;
pub mod edit;
pub mod export;
pub mod parse;
pub mod serialize;
pub mod template;

pub use document::{
    ConfigDocument, ConfigField, ConfigSection, EditPolicy, AGENT_SECTION, AUTH_TOKEN_KEY,
    DEFAULT_DOMAIN_SECTION, QUERY_SECTION_PREFIX,
};
pub use export::download_file_name;
pub use parse::parse;
pub use serialize::serialize;
pub use template::initial_config;
