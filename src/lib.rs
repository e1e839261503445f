//! NetProtect: Agent Configuration Editing
//!
//! Parses, edits, and re-serializes the INI-like configuration files of
//! Active Directory scanning agents, enforcing which parts of a file an
//! operator may change, and syncs them with the NetProtect backend.

pub mod agent_config;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
