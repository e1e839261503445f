//! Property-based tests for parse/serialize round trips and edit invariants

use netprotect::agent_config::{parse, serialize, ConfigDocument, ConfigSection, EditPolicy};
use proptest::prelude::*;

fn section_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9.-]{0,12}".prop_map(|s| format!("[{}]", s)),
        "[a-z][a-z0-9_]{0,12}".prop_map(|s| format!("[query_{}]", s)),
        Just("[agent]".to_string()),
        Just("[adlab.local]".to_string()),
    ]
}

fn field() -> impl Strategy<Value = (String, String)> {
    (
        "[A-Za-z][A-Za-z0-9_-]{0,10}",
        "[A-Za-z0-9=(),*:$\\\\._ -]{0,24}".prop_map(|v| v.trim().to_string()),
    )
}

fn document() -> impl Strategy<Value = ConfigDocument> {
    let policy = EditPolicy::default();
    prop::collection::vec(
        (section_name(), prop::collection::vec(field(), 0..6)),
        0..6,
    )
    .prop_map(move |sections| {
        ConfigDocument::from_sections(
            sections
                .into_iter()
                .map(|(name, fields)| {
                    let mut section = ConfigSection::new(name, &policy);
                    for (key, value) in fields {
                        section.push_field(key, value);
                    }
                    section
                })
                .collect(),
        )
    })
}

/// Serializing a document and reading it back yields the same document
#[test]
fn test_serialize_then_parse_reproduces_document() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&document(), |doc| {
            let reparsed = parse(&serialize(&doc), &EditPolicy::default());
            prop_assert_eq!(reparsed, doc);
            Ok(())
        })
        .unwrap();
}

/// Parsing arbitrary text, serializing, and parsing again is stable
#[test]
fn test_parse_serialize_is_idempotent() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let line = prop_oneof![
        "\\[[a-z_.]{1,10}\\]",
        "[ A-Za-z0-9=_-]{0,20}",
        Just(String::new()),
        Just("  [agent]  ".to_string()),
    ];

    runner
        .run(&prop::collection::vec(line, 0..20), |lines| {
            let text = lines.join("\n");
            let once = parse(&text, &EditPolicy::default());
            let rendered = serialize(&once);
            let twice = parse(&rendered, &EditPolicy::default());
            prop_assert_eq!(&twice, &once);
            prop_assert_eq!(serialize(&twice), rendered);
            Ok(())
        })
        .unwrap();
}

/// A rejected edit never changes the serialized text
#[test]
fn test_rejected_edits_leave_document_unchanged() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(document(), 0usize..8, 0usize..8, "[ -~]{0,16}"),
            |(mut doc, si, fi, value)| {
                let before = serialize(&doc);
                let edited = doc.set_field_value(si, fi, &value).is_ok();
                let renamed = doc.rename_section(si, &value).is_ok();
                if !edited && !renamed {
                    prop_assert_eq!(serialize(&doc), before);
                }
                Ok(())
            },
        )
        .unwrap();
}

/// Fields of the agent section other than the token are never writable
#[test]
fn test_agent_fields_locked_except_token() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&("[A-Za-z][A-Za-z0-9-]{0,12}", "[a-z0-9]{1,8}"), |(key, value)| {
            let mut doc = parse(&format!("[agent]\n{} = x", key), &EditPolicy::default());
            let result = doc.set_field_value(0, 0, &value);
            prop_assert_eq!(result.is_ok(), key == "AUTH-Token");
            Ok(())
        })
        .unwrap();
}

/// Names, keys, values, and field locks: what the saved text carries
fn content(doc: &ConfigDocument) -> Vec<(String, Vec<(String, String, bool)>)> {
    doc.sections()
        .iter()
        .map(|s| {
            let fields = s
                .fields()
                .iter()
                .map(|f| (f.key().to_string(), f.value().to_string(), f.is_editable()))
                .collect();
            (s.name().to_string(), fields)
        })
        .collect()
}

fn edit_input() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ -~]{0,24}",
        "[ \t]{0,3}[ -~]{0,16}[ \t\r\n]{0,3}",
        "[ ]{0,2}\\[query_[a-z0-9_ ]{0,10}\\][ ]{0,2}",
        Just("[agent]".to_string()),
        Just("[adlab.local]".to_string()),
    ]
}

/// Every accepted value edit survives a save and reload unchanged
#[test]
fn test_accepted_value_edits_survive_reload() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(document(), 0usize..6, 0usize..6, edit_input()),
            |(mut doc, si, fi, value)| {
                if doc.set_field_value(si, fi, &value).is_ok() {
                    let reparsed = parse(&serialize(&doc), &EditPolicy::default());
                    prop_assert_eq!(reparsed, doc);
                }
                Ok(())
            },
        )
        .unwrap();
}

/// Every accepted rename survives a save and reload with the same names,
/// fields, and field locks, and leaves section names unique
#[test]
fn test_accepted_renames_survive_reload() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(document(), 0usize..6, edit_input()),
            |(mut doc, si, name)| {
                let names_before: Vec<String> =
                    doc.sections().iter().map(|s| s.name().to_string()).collect();
                if doc.rename_section(si, &name).is_ok() {
                    let reparsed = parse(&serialize(&doc), &EditPolicy::default());
                    prop_assert_eq!(content(&reparsed), content(&doc));

                    let renamed = doc.sections()[si].name();
                    let clashes = names_before
                        .iter()
                        .enumerate()
                        .filter(|(i, n)| *i != si && n.as_str() == renamed)
                        .count();
                    prop_assert_eq!(clashes, 0);
                    prop_assert_ne!(renamed, "[agent]");
                }
                Ok(())
            },
        )
        .unwrap();
}
