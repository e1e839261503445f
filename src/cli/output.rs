//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Unauthorized(_) => format!(
            "{}\nSign in to the dashboard and set api.session_cookie (or NETPROTECT__API__SESSION_COOKIE).",
            e
        ),
        ApiError::RequestFailed(_) => format!(
            "{}\nCheck api.base_url or pass --api-url; unsaved edits were not written.",
            e
        ),
        _ => e.to_string(),
    }
}
