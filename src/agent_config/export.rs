//! Download artifact naming.

/// File name for a downloaded configuration, derived from the agent name.
///
/// Characters outside `[A-Za-z0-9._-]` become `_`. An empty name falls back
/// to `config.ini`.
pub fn download_file_name(agent_name: &str) -> String {
    let stem: String = agent_name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_matches('.');
    if stem.is_empty() {
        "config.ini".to_string()
    } else {
        format!("{}.ini", stem)
    }
}
