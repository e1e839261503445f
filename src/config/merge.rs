//! Merge rules for layered settings.

pub mod merge_policy;
