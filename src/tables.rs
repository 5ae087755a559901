//! Semantic tables for `.info.json` and `.auth.json`, built from `SemEntry`
//! rows over the `semtab` walker. These are the concrete tables `jvalidate`
//! drives; `semtab` itself is table-agnostic.

use crate::domain::{
    test_author_handle, test_author_number, test_email, test_github, test_location_code, test_mastodon,
    test_submit_slot, test_url, valid_contest_id, MAX_AUTHORS,
};
use crate::semtab::{NodeKind, SemEntry, SemTable};
use serde_json::Value;

/// Upper bound for per-author `SemEntry` counts: each of these member/value
/// pairs is matched once per author in the `authors` array, not once per
/// document, so its max must scale with the author count rather than be
/// pinned to 1 (a 2+ author submission — the normal co-author case — would
/// otherwise overflow every per-author entry's max on the second author).
const MAX_AUTHOR_COUNT: u32 = MAX_AUTHORS as u32;

fn val_contest_id(node: &Value, _depth: u32, _entry: &SemEntry) -> Result<(), String> {
    let s = node.as_str().ok_or("contest_id must be a string")?;
    if valid_contest_id(s) {
        Ok(())
    } else {
        Err(format!("invalid contest_id: {s:?}"))
    }
}

fn val_email(node: &Value, _depth: u32, _entry: &SemEntry) -> Result<(), String> {
    let s = node.as_str().ok_or("email must be a string or null")?;
    if test_email(s) {
        Ok(())
    } else {
        Err(format!("invalid email: {s:?}"))
    }
}

fn val_url(node: &Value, _depth: u32, _entry: &SemEntry) -> Result<(), String> {
    let s = node.as_str().ok_or("url must be a string or null")?;
    if test_url(s) {
        Ok(())
    } else {
        Err(format!("invalid url: {s:?}"))
    }
}

fn val_mastodon(node: &Value, _depth: u32, _entry: &SemEntry) -> Result<(), String> {
    let s = node.as_str().ok_or("mastodon must be a string or null")?;
    if test_mastodon(s) {
        Ok(())
    } else {
        Err(format!("invalid mastodon handle: {s:?}"))
    }
}

fn val_github(node: &Value, _depth: u32, _entry: &SemEntry) -> Result<(), String> {
    let s = node.as_str().ok_or("github must be a string or null")?;
    if test_github(s) {
        Ok(())
    } else {
        Err(format!("invalid github handle: {s:?}"))
    }
}

fn val_location_code(node: &Value, _depth: u32, _entry: &SemEntry) -> Result<(), String> {
    let s = node.as_str().ok_or("location_code must be a string")?;
    if test_location_code(s) {
        Ok(())
    } else {
        Err(format!("invalid location_code: {s:?}"))
    }
}

fn val_author_handle(node: &Value, _depth: u32, _entry: &SemEntry) -> Result<(), String> {
    let s = node.as_str().ok_or("author_handle must be a string")?;
    if test_author_handle(s) {
        Ok(())
    } else {
        Err(format!("invalid author_handle: {s:?}"))
    }
}

fn val_author_number(node: &Value, _depth: u32, _entry: &SemEntry) -> Result<(), String> {
    let n = node.as_i64().ok_or("author_number must be an integer")?;
    if test_author_number(n) {
        Ok(())
    } else {
        Err(format!("author_number out of range: {n}"))
    }
}

fn val_submit_slot(node: &Value, _depth: u32, _entry: &SemEntry) -> Result<(), String> {
    let n = node.as_i64().ok_or("submit_slot must be an integer")?;
    if test_submit_slot(n) {
        Ok(())
    } else {
        Err(format!("submit_slot out of range: {n}"))
    }
}

/// `.auth.json`: `{ "contest_id": <uuid|"test">, "authors": [ {author...} ] }`.
/// Depth accounting follows `semtab`'s doc comment: the root object is depth
/// 0; its members are depth 1; an array member's elements are depth 2; an
/// object element's own members are depth 3.
pub fn auth_json_table() -> SemTable {
    SemTable::new(vec![
        SemEntry::new(0, NodeKind::Object, None, 1, Some(1), None),
        SemEntry::new(1, NodeKind::Member, Some("contest_id"), 1, Some(1), None),
        SemEntry::new(2, NodeKind::String, None, 1, Some(1), Some(val_contest_id)),
        SemEntry::new(1, NodeKind::Member, Some("authors"), 1, Some(1), None),
        SemEntry::new(2, NodeKind::Array, None, 1, Some(1), None),
        SemEntry::new(3, NodeKind::Object, None, 0, None, None),
        SemEntry::new(4, NodeKind::Member, Some("name"), 1, Some(MAX_AUTHOR_COUNT), None),
        SemEntry::new(5, NodeKind::String, None, 1, Some(MAX_AUTHOR_COUNT), None),
        SemEntry::new(4, NodeKind::Member, Some("location_code"), 1, Some(MAX_AUTHOR_COUNT), None),
        SemEntry::new(5, NodeKind::String, None, 1, Some(MAX_AUTHOR_COUNT), Some(val_location_code)),
        SemEntry::new(4, NodeKind::Member, Some("email"), 1, Some(MAX_AUTHOR_COUNT), None),
        SemEntry::new(5, NodeKind::String, None, 1, Some(MAX_AUTHOR_COUNT), Some(val_email)),
        SemEntry::new(5, NodeKind::Null, None, 0, Some(MAX_AUTHOR_COUNT), None),
        SemEntry::new(4, NodeKind::Member, Some("url"), 1, Some(MAX_AUTHOR_COUNT), None),
        SemEntry::new(5, NodeKind::String, None, 1, Some(MAX_AUTHOR_COUNT), Some(val_url)),
        SemEntry::new(4, NodeKind::Member, Some("alt_url"), 1, Some(MAX_AUTHOR_COUNT), None),
        SemEntry::new(4, NodeKind::Member, Some("mastodon"), 1, Some(MAX_AUTHOR_COUNT), None),
        SemEntry::new(5, NodeKind::String, None, 1, Some(MAX_AUTHOR_COUNT), Some(val_mastodon)),
        SemEntry::new(4, NodeKind::Member, Some("github"), 1, Some(MAX_AUTHOR_COUNT), None),
        SemEntry::new(5, NodeKind::String, None, 1, Some(MAX_AUTHOR_COUNT), Some(val_github)),
        SemEntry::new(4, NodeKind::Member, Some("affiliation"), 1, Some(MAX_AUTHOR_COUNT), None),
        SemEntry::new(4, NodeKind::Member, Some("past_winning_author"), 1, Some(MAX_AUTHOR_COUNT), None),
        SemEntry::new(5, NodeKind::Bool, None, 1, Some(MAX_AUTHOR_COUNT), None),
        SemEntry::new(4, NodeKind::Member, Some("default_handle"), 1, Some(MAX_AUTHOR_COUNT), None),
        SemEntry::new(4, NodeKind::Member, Some("author_handle"), 1, Some(MAX_AUTHOR_COUNT), None),
        SemEntry::new(5, NodeKind::String, None, 1, Some(MAX_AUTHOR_COUNT), Some(val_author_handle)),
        SemEntry::new(4, NodeKind::Member, Some("author_number"), 1, Some(MAX_AUTHOR_COUNT), None),
        SemEntry::new(5, NodeKind::Number, None, 1, Some(MAX_AUTHOR_COUNT), Some(val_author_number)),
    ])
}

/// `.info.json`: `{ "contest_id", "submit_slot", "manifest": [ {slot: filename} ] }`.
///
/// Each manifest array element is a single-member object whose member name
/// is one of ten slot keys (`info_JSON`, `auth_JSON`, `c_src`, `Makefile`,
/// `remarks`, `c_alt_src`, `try_sh`, `try_alt_sh`, `extra_file`,
/// `shell_script` — spec §4.5), so the table matches any member name at
/// that depth (`None`); `loaders::load_manifest` does the slot-specific
/// cardinality and filename checks the flat table can't express.
pub fn info_json_table() -> SemTable {
    SemTable::new(vec![
        SemEntry::new(0, NodeKind::Object, None, 1, Some(1), None),
        SemEntry::new(1, NodeKind::Member, Some("contest_id"), 1, Some(1), None),
        SemEntry::new(2, NodeKind::String, None, 1, Some(1), Some(val_contest_id)),
        SemEntry::new(1, NodeKind::Member, Some("submit_slot"), 1, Some(1), None),
        SemEntry::new(2, NodeKind::Number, None, 1, Some(1), Some(val_submit_slot)),
        SemEntry::new(1, NodeKind::Member, Some("manifest"), 1, Some(1), None),
        SemEntry::new(2, NodeKind::Array, None, 1, Some(1), None),
        SemEntry::new(3, NodeKind::Object, None, 0, None, None),
        SemEntry::new(4, NodeKind::Member, None, 1, None, None),
        SemEntry::new(5, NodeKind::String, None, 1, None, None),
    ])
}
