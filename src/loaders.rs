//! Entry object loaders: turn a validated `.auth.json` authors array and
//! `.info.json` manifest array into typed records, enforcing closed key
//! sets, cross-field uniqueness, and filename policy.
//!
//! Grounded in `object2author`/`object2manifest` (`soup/entry_util.c`).

use crate::canon::{canon_path, PathSanity};
use crate::domain::{
    is_executable_filename, is_mandatory_filename, test_alt_url, test_author_handle, test_author_number, test_email,
    test_github, test_location_code, test_mastodon, test_url, MAX_EXTRA_FILE_COUNT,
};
use crate::json_node::ValidationError;
use serde_json::Value;

const AUTHOR_KEYS: &[&str] = &[
    "name",
    "location_code",
    "email",
    "url",
    "alt_url",
    "mastodon",
    "github",
    "affiliation",
    "past_winning_author",
    "default_handle",
    "author_handle",
    "author_number",
];

/// One loaded `.auth.json` author record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub location_code: String,
    pub email: String,
    pub url: String,
    pub alt_url: String,
    pub mastodon: String,
    pub github: String,
    pub affiliation: String,
    pub author_handle: String,
    pub past_winning_author: bool,
    pub default_handle: bool,
    pub author_num: i32,
}

/// One loaded `.info.json` manifest.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Manifest {
    pub extra: Vec<String>,
    pub shell: Vec<String>,
    pub count_extra_file: i64,
    pub count_shell_script: i64,
}

fn err(v: &mut Vec<ValidationError>, depth: u32, msg: impl Into<String>) {
    v.push(ValidationError::new(depth, -1, msg));
}

fn str_field(obj: &serde_json::Map<String, Value>, key: &str, errs: &mut Vec<ValidationError>) -> Option<String> {
    match obj.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Null) => Some(String::new()),
        Some(_) => {
            err(errs, 1, format!("{key} is not a string or null"));
            None
        }
        None => {
            err(errs, 1, format!("missing required key: {key}"));
            None
        }
    }
}

fn bool_field(obj: &serde_json::Map<String, Value>, key: &str, errs: &mut Vec<ValidationError>) -> Option<bool> {
    match obj.get(key) {
        Some(Value::Bool(b)) => Some(*b),
        Some(_) => {
            err(errs, 1, format!("{key} is not a JSON bool"));
            None
        }
        None => {
            err(errs, 1, format!("missing required key: {key}"));
            None
        }
    }
}

fn int_field(obj: &serde_json::Map<String, Value>, key: &str, errs: &mut Vec<ValidationError>) -> Option<i64> {
    match obj.get(key) {
        Some(v) => match v.as_i64() {
            Some(n) => Some(n),
            None => {
                err(errs, 1, format!("{key} is not an integer"));
                None
            }
        },
        None => {
            err(errs, 1, format!("missing required key: {key}"));
            None
        }
    }
}

/// Load a single `.auth.json` author object: closed key set, unknown/missing
/// key checks, null-legal fields collapsed to `""`.
pub fn load_author(obj: &Value) -> Result<Author, Vec<ValidationError>> {
    let mut errs = Vec::new();
    let map = match obj.as_object() {
        Some(m) => m,
        None => {
            err(&mut errs, 0, "author entry is not a JSON object");
            return Err(errs);
        }
    };

    for key in map.keys() {
        if !AUTHOR_KEYS.contains(&key.as_str()) {
            err(&mut errs, 1, format!("unknown author key: {key}"));
        }
    }

    let name = str_field(map, "name", &mut errs);
    let location_code = str_field(map, "location_code", &mut errs);
    let email = str_field(map, "email", &mut errs);
    let url = str_field(map, "url", &mut errs);
    let alt_url = str_field(map, "alt_url", &mut errs);
    let mastodon = str_field(map, "mastodon", &mut errs);
    let github = str_field(map, "github", &mut errs);
    let affiliation = str_field(map, "affiliation", &mut errs);
    let author_handle = str_field(map, "author_handle", &mut errs);
    let past_winning_author = bool_field(map, "past_winning_author", &mut errs);
    let default_handle = bool_field(map, "default_handle", &mut errs);
    let author_num = int_field(map, "author_number", &mut errs);

    if let Some(code) = &location_code {
        if !test_location_code(code) {
            err(&mut errs, 1, format!("invalid location_code: {code:?}"));
        }
    }
    if let Some(e) = &email {
        if !test_email(e) {
            err(&mut errs, 1, format!("invalid email: {e:?}"));
        }
    }
    if let Some(u) = &url {
        if !test_url(u) {
            err(&mut errs, 1, format!("invalid url: {u:?}"));
        }
    }
    if let Some(u) = &alt_url {
        if !test_alt_url(u) {
            err(&mut errs, 1, format!("invalid alt_url: {u:?}"));
        }
    }
    if let Some(m) = &mastodon {
        if !test_mastodon(m) {
            err(&mut errs, 1, format!("invalid mastodon handle: {m:?}"));
        }
    }
    if let Some(g) = &github {
        if !test_github(g) {
            err(&mut errs, 1, format!("invalid github handle: {g:?}"));
        }
    }
    if let Some(h) = &author_handle {
        if !test_author_handle(h) {
            err(&mut errs, 1, format!("invalid author_handle: {h:?}"));
        }
    }
    if let Some(n) = author_num {
        if !test_author_number(n) {
            err(&mut errs, 1, format!("author_number out of range: {n}"));
        }
    }

    if !errs.is_empty() {
        return Err(errs);
    }

    Ok(Author {
        name: name.unwrap(),
        location_code: location_code.unwrap(),
        email: email.unwrap(),
        url: url.unwrap(),
        alt_url: alt_url.unwrap(),
        mastodon: mastodon.unwrap(),
        github: github.unwrap(),
        affiliation: affiliation.unwrap(),
        author_handle: author_handle.unwrap(),
        past_winning_author: past_winning_author.unwrap(),
        default_handle: default_handle.unwrap(),
        author_num: author_num.unwrap() as i32,
    })
}

/// Load the `.auth.json` authors array, then check cross-field uniqueness
/// (`author_number`, `name`, `author_handle`) by an O(n²) pairwise scan
/// reporting the lower-index member of each colliding pair first.
pub fn load_authors(arr: &Value) -> Result<Vec<Author>, Vec<ValidationError>> {
    let mut errs = Vec::new();
    let elements = match arr.as_array() {
        Some(e) => e,
        None => {
            err(&mut errs, 0, "authors is not a JSON array");
            return Err(errs);
        }
    };

    let mut authors = Vec::with_capacity(elements.len());
    for (i, elem) in elements.iter().enumerate() {
        match load_author(elem) {
            Ok(a) => authors.push(a),
            Err(mut sub_errs) => {
                for e in &mut sub_errs {
                    e.depth = i as u32;
                }
                errs.append(&mut sub_errs);
            }
        }
    }

    if !errs.is_empty() {
        return Err(errs);
    }

    for i in 0..authors.len() {
        for j in (i + 1)..authors.len() {
            if authors[i].author_num == authors[j].author_num {
                err(&mut errs, i as u32, format!("duplicate author_number {} at indices {i} and {j}", authors[i].author_num));
            }
            if authors[i].name == authors[j].name {
                err(&mut errs, i as u32, format!("duplicate author name {:?} at indices {i} and {j}", authors[i].name));
            }
            if authors[i].author_handle == authors[j].author_handle {
                err(&mut errs, i as u32, format!("duplicate author_handle {:?} at indices {i} and {j}", authors[i].author_handle));
            }
        }
    }

    if !authors.is_empty() {
        let count = authors.len() as i32;
        for (i, a) in authors.iter().enumerate() {
            if a.author_num < 0 || a.author_num >= count {
                err(&mut errs, i as u32, format!("author_number {} out of range [0, {count})", a.author_num));
            }
        }
    }

    if errs.is_empty() {
        Ok(authors)
    } else {
        Err(errs)
    }
}

/// The five mandatory slot keys paired with the exact filename each one must
/// carry, in manifest declaration order (spec §4.5).
const MANDATORY_SLOTS: [(&str, &str); 5] = [
    ("info_JSON", ".info.json"),
    ("auth_JSON", ".auth.json"),
    ("c_src", "prog.c"),
    ("Makefile", "Makefile"),
    ("remarks", "remarks.md"),
];
/// The three optional-unique slot keys, at most one of each, paired with
/// their prescribed filename.
const OPTIONAL_SLOTS: [(&str, &str); 3] = [
    ("c_alt_src", "prog.alt.c"),
    ("try_sh", "try.sh"),
    ("try_alt_sh", "try.alt.sh"),
];
const ALL_SLOT_KEYS: [&str; 10] = [
    "info_JSON",
    "auth_JSON",
    "c_src",
    "Makefile",
    "remarks",
    "c_alt_src",
    "try_sh",
    "try_alt_sh",
    "extra_file",
    "shell_script",
];
const MAX_NAME_LEN_FOR_CANON: usize = crate::domain::MAX_NAME_LEN;

/// Load the `.info.json` manifest array: a flat array of single-member
/// objects, each member's name naming a slot and its value the declared
/// filename (spec §4.5). Five mandatory slots exactly once with the exact
/// prescribed filename; three optional-unique slots at most once with their
/// prescribed filename; `extra_file`/`shell_script` accumulate into their
/// own lists, each filename checked against `canon_path` safety and the
/// mandatory/executable filename predicates.
pub fn load_manifest(arr: &Value) -> Result<Manifest, Vec<ValidationError>> {
    let mut errs = Vec::new();
    let elements = match arr.as_array() {
        Some(e) => e,
        None => {
            err(&mut errs, 0, "manifest is not a JSON array");
            return Err(errs);
        }
    };

    let mut mandatory_count: std::collections::HashMap<&str, u32> = std::collections::HashMap::new();
    let mut optional_count: std::collections::HashMap<&str, u32> = std::collections::HashMap::new();
    let mut manifest = Manifest::default();
    let mut seen_names: std::collections::HashSet<String> = std::collections::HashSet::new();

    for (i, elem) in elements.iter().enumerate() {
        let obj = match elem.as_object() {
            Some(o) => o,
            None => {
                err(&mut errs, i as u32, "manifest entry is not a JSON object");
                continue;
            }
        };
        if obj.len() != 1 {
            err(&mut errs, i as u32, format!("manifest entry must have exactly one member, found {}", obj.len()));
            continue;
        }
        let (key, value) = obj.iter().next().expect("checked len == 1 above");
        let Some(name) = value.as_str() else {
            err(&mut errs, i as u32, format!("manifest entry {key:?} value is not a string"));
            continue;
        };
        if !ALL_SLOT_KEYS.contains(&key.as_str()) {
            err(&mut errs, i as u32, format!("unknown manifest slot: {key}"));
            continue;
        }

        let canon = canon_path(name, 0, MAX_NAME_LEN_FOR_CANON, 0, true, true, true);
        if canon.sanity != PathSanity::Ok {
            err(&mut errs, i as u32, format!("filename {name:?} failed path safety: {}", canon.sanity));
            continue;
        }

        match key.as_str() {
            "extra_file" => {
                if !seen_names.insert(name.to_string()) {
                    err(&mut errs, i as u32, format!("duplicate filename in manifest: {name:?}"));
                    continue;
                }
                if is_mandatory_filename(name) {
                    err(&mut errs, i as u32, format!("extra_file filename {name:?} matches a mandatory filename"));
                } else if name.len() > 3 && name.ends_with(".sh") {
                    err(&mut errs, i as u32, "extra_file filename ends in .sh".to_string());
                } else if is_executable_filename(name) {
                    err(&mut errs, i as u32, format!("extra_file filename {name:?} matches an executable filename"));
                } else {
                    manifest.extra.push(name.to_string());
                    manifest.count_extra_file += 1;
                }
            }
            "shell_script" => {
                if !seen_names.insert(name.to_string()) {
                    err(&mut errs, i as u32, format!("duplicate filename in manifest: {name:?}"));
                    continue;
                }
                if is_mandatory_filename(name) {
                    err(&mut errs, i as u32, format!("shell_script filename {name:?} matches a mandatory filename"));
                } else if !is_executable_filename(name) {
                    err(&mut errs, i as u32, format!("shell_script filename {name:?} is not an executable-named file"));
                } else {
                    manifest.shell.push(name.to_string());
                    manifest.count_shell_script += 1;
                }
            }
            slot_key if MANDATORY_SLOTS.iter().any(|(k, _)| *k == slot_key) => {
                let (_, prescribed) = MANDATORY_SLOTS.iter().find(|(k, _)| *k == slot_key).unwrap();
                *mandatory_count.entry(slot_key).or_insert(0) += 1;
                if name != *prescribed {
                    err(&mut errs, i as u32, format!("{slot_key} must be named {prescribed:?}, found {name:?}"));
                } else {
                    seen_names.insert(name.to_string());
                }
            }
            slot_key => {
                let (_, prescribed) = OPTIONAL_SLOTS.iter().find(|(k, _)| *k == slot_key).unwrap();
                *optional_count.entry(slot_key).or_insert(0) += 1;
                if name != *prescribed {
                    err(&mut errs, i as u32, format!("{slot_key} must be named {prescribed:?}, found {name:?}"));
                } else {
                    seen_names.insert(name.to_string());
                }
            }
        }
    }

    for (slot, _) in MANDATORY_SLOTS {
        let count = mandatory_count.get(slot).copied().unwrap_or(0);
        if count != 1 {
            err(&mut errs, 0, format!("expected 1 valid {slot}, found: {count}"));
        }
    }
    for (slot, _) in OPTIONAL_SLOTS {
        let count = optional_count.get(slot).copied().unwrap_or(0);
        if count > 1 {
            err(&mut errs, 0, format!("expected at most 1 valid {slot}, found: {count}"));
        }
    }

    if manifest.extra.len() + manifest.shell.len() > MAX_EXTRA_FILE_COUNT {
        err(&mut errs, 0, format!(
            "extra_file + shell_script count {} exceeds MAX_EXTRA_FILE_COUNT {MAX_EXTRA_FILE_COUNT}",
            manifest.extra.len() + manifest.shell.len()
        ));
    }

    if errs.is_empty() {
        Ok(manifest)
    } else {
        Err(errs)
    }
}
