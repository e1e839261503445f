//! Integration tests for local file commands

use netprotect::cli::{Commands, FileCommands, RunContext};
use netprotect::config::NetProtectConfig;
use netprotect::error::{ApiError, EditError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::integration::test_utils::SAMPLE;

fn context() -> RunContext {
    RunContext::from_config(NetProtectConfig::default()).unwrap()
}

fn write_config(dir: &TempDir, text: &str) -> PathBuf {
    let path = dir.path().join("agent.ini");
    fs::write(&path, text).unwrap();
    path
}

fn set(path: &Path, section: &str, key: &str, value: &str, dry_run: bool) -> Commands {
    Commands::File {
        command: FileCommands::Set {
            path: path.to_path_buf(),
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            dry_run,
        },
    }
}

#[test]
fn test_file_set_writes_normalized_text() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[agent]\nAgent-ID=abc123\nAUTH-Token=REDACTED\n\n[proxy]\nproxy-url=None\n");

    let out = context()
        .execute(&set(&path, "[agent]", "AUTH-Token", "tok-7", false))
        .unwrap();
    assert!(out.contains("set [agent] AUTH-Token"));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[agent]\nAgent-ID = abc123\nAUTH-Token = tok-7\n\n[proxy]\nproxy-url = None"
    );
}

#[test]
fn test_file_set_locked_field_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let original = "[agent]\nAgent-ID=abc123\nAUTH-Token=REDACTED";
    let path = write_config(&dir, original);

    let err = context()
        .execute(&set(&path, "[agent]", "Agent-ID", "forged", false))
        .unwrap_err();
    assert!(matches!(err, ApiError::Edit(EditError::FieldLocked { .. })));
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn test_file_set_dry_run_prints_without_writing() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, SAMPLE);

    let out = context()
        .execute(&set(&path, "[proxy]", "proxy-url", "http://proxy:3128", true))
        .unwrap();
    assert!(out.ends_with("proxy-url = http://proxy:3128"));
    assert_eq!(fs::read_to_string(&path).unwrap(), SAMPLE);
}

#[test]
fn test_file_rename() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[query_get_all_users]\nfilter = (objectClass=user)");
    let ctx = context();

    let rename = |to: &str| Commands::File {
        command: FileCommands::Rename {
            path: path.clone(),
            from: "[query_get_all_users]".to_string(),
            to: to.to_string(),
            dry_run: false,
        },
    };

    let err = ctx.execute(&rename("new_name")).unwrap_err();
    assert!(matches!(err, ApiError::Edit(EditError::QueryPrefixRequired(_))));

    ctx.execute(&rename("[query_get_users_v2]")).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[query_get_users_v2]\nfilter = (objectClass=user)"
    );
}

#[test]
fn test_file_fmt_and_check() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[proxy]\nproxy-url=None\nnot a field\n");
    let ctx = context();
    let fmt = |check: bool| Commands::File {
        command: FileCommands::Fmt {
            path: path.clone(),
            check,
        },
    };

    assert!(ctx.execute(&fmt(true)).is_err());
    ctx.execute(&fmt(false)).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "[proxy]\nproxy-url = None");
    let out = ctx.execute(&fmt(true)).unwrap();
    assert!(out.contains("already normalized"));
}

#[test]
fn test_file_show_json() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, SAMPLE);

    let out = context()
        .execute(&Commands::File {
            command: FileCommands::Show {
                path,
                format: "json".to_string(),
            },
        })
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    let sections = json["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0]["name"], "[agent]");
    assert_eq!(sections[0]["fields"][1]["key"], "AUTH-Token");
    assert_eq!(sections[0]["fields"][1]["is_editable"], true);
    assert_eq!(sections[0]["fields"][0]["is_editable"], false);
}

#[test]
fn test_file_missing_is_file_access_error() {
    let dir = TempDir::new().unwrap();
    let err = context()
        .execute(&Commands::File {
            command: FileCommands::Show {
                path: dir.path().join("absent.ini"),
                format: "text".to_string(),
            },
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::FileAccess { .. }));
}

#[test]
fn test_template_command() {
    let out = context()
        .execute(&Commands::Template {
            agent_id: "a-1".to_string(),
            agent_name: "lab".to_string(),
        })
        .unwrap();
    assert!(out.starts_with("[agent]\nAgent-ID = a-1\nAgent-Name = lab\nAUTH-Token = REDACTED"));
}
