//! CLI presentation: text and json formatters per command family.

mod account;
mod document;

pub use account::{format_auth_user, format_edit_summary};
pub use document::{format_document, format_document_json, format_document_text};
