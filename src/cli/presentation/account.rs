//! Session and edit-result presentation.

use crate::client::AuthUser;
use crate::error::ApiError;
use serde_json::json;

pub fn format_auth_user(user: &AuthUser, base_url: &str, format: &str) -> Result<String, ApiError> {
    if format == "json" {
        let out = json!({ "authenticated": true, "role": user.role, "api": base_url });
        return serde_json::to_string_pretty(&out)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to render JSON: {}", e)));
    }
    Ok(format!("Signed in to {} (role: {})", base_url, user.role))
}

/// One-line confirmation after a saved edit.
pub fn format_edit_summary(agent_id: &str, action: &str) -> String {
    format!("Agent {}: {}. Configuration saved.", agent_id, action)
}
