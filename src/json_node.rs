//! JSON node guard: typed, error-accumulating accessors over a `serde_json::Value`
//! tree node.
//!
//! The crate takes a `serde_json::Value` as its external "JSON parse tree"
//! (spec Non-goal: writing a JSON parser). A `Value` is always fully decoded
//! once parsed, so `node_valid_converted` degenerates to a shape/nullness
//! check rather than inspecting a separate "converted" flag.

use serde_json::{Map, Value};

/// One structural or value-level validation failure, in the shape the
/// semantic walker and the loaders accumulate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub depth: u32,
    pub sem_index: i32,
    pub diagnostic: String,
}

impl ValidationError {
    pub fn new(depth: u32, sem_index: i32, diagnostic: impl Into<String>) -> Self {
        ValidationError {
            depth,
            sem_index,
            diagnostic: diagnostic.into(),
        }
    }
}

/// A JSON object member's value when JSON `null` legally denotes "withheld".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrOrWithheld {
    Withheld,
    Str(String),
}

impl StrOrWithheld {
    /// Collapse to the stored/owned-string convention used throughout this
    /// crate: withheld fields are represented as the empty string.
    pub fn into_owned_or_empty(self) -> String {
        match self {
            StrOrWithheld::Withheld => String::new(),
            StrOrWithheld::Str(s) => s,
        }
    }
}

fn push_err(sink: Option<&mut Vec<ValidationError>>, depth: u32, sem_index: i32, msg: impl Into<String>) {
    if let Some(v) = sink {
        v.push(ValidationError::new(depth, sem_index, msg));
    }
}

/// Assert that `node` is non-null and shaped like a fully converted scalar
/// or container for the node kind a semantic-table entry expects.
pub fn node_valid_converted(
    node: &Value,
    depth: u32,
    sem_index: i32,
    val_err: Option<&mut Vec<ValidationError>>,
) -> bool {
    if node.is_null() {
        push_err(val_err, depth, sem_index, "node is JSON null, expected a converted value");
        return false;
    }
    true
}

/// Linear scan of an object's members by decoded name.
pub fn object_find_name<'a>(object: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    object.iter().find(|(k, _)| k.as_str() == name).map(|(_, v)| v)
}

/// The member named `name` on `object`, as a borrowed value node.
pub fn member_value<'a>(
    object: &'a Map<String, Value>,
    name: &str,
    depth: u32,
    sem_index: i32,
    val_err: Option<&mut Vec<ValidationError>>,
) -> Option<&'a Value> {
    match object_find_name(object, name) {
        Some(v) => Some(v),
        None => {
            push_err(val_err, depth, sem_index, format!("missing member: {name}"));
            None
        }
    }
}

pub fn member_value_decoded_str(
    object: &Map<String, Value>,
    name: &str,
    depth: u32,
    sem_index: i32,
    mut val_err: Option<&mut Vec<ValidationError>>,
) -> Option<String> {
    let v = member_value(object, name, depth, sem_index, val_err.as_deref_mut())?;
    match v.as_str() {
        Some(s) => Some(s.to_string()),
        None => {
            push_err(val_err, depth, sem_index, format!("member {name} is not a JSON string"));
            None
        }
    }
}

pub fn member_value_bool(
    object: &Map<String, Value>,
    name: &str,
    depth: u32,
    sem_index: i32,
    mut val_err: Option<&mut Vec<ValidationError>>,
) -> Option<bool> {
    let v = member_value(object, name, depth, sem_index, val_err.as_deref_mut())?;
    match v.as_bool() {
        Some(b) => Some(b),
        None => {
            push_err(val_err, depth, sem_index, format!("member {name} is not a JSON bool"));
            None
        }
    }
}

pub fn member_value_int(
    object: &Map<String, Value>,
    name: &str,
    depth: u32,
    sem_index: i32,
    mut val_err: Option<&mut Vec<ValidationError>>,
) -> Option<i64> {
    let v = member_value(object, name, depth, sem_index, val_err.as_deref_mut())?;
    match v.as_i64() {
        Some(n) => Some(n),
        None => {
            push_err(val_err, depth, sem_index, format!("member {name} does not fit in an i64"));
            None
        }
    }
}

pub fn member_value_size_t(
    object: &Map<String, Value>,
    name: &str,
    depth: u32,
    sem_index: i32,
    mut val_err: Option<&mut Vec<ValidationError>>,
) -> Option<u64> {
    let v = member_value(object, name, depth, sem_index, val_err.as_deref_mut())?;
    match v.as_u64() {
        Some(n) => Some(n),
        None => {
            push_err(val_err, depth, sem_index, format!("member {name} does not fit in a size_t"));
            None
        }
    }
}

pub fn member_value_time_t(
    object: &Map<String, Value>,
    name: &str,
    depth: u32,
    sem_index: i32,
    val_err: Option<&mut Vec<ValidationError>>,
) -> Option<i64> {
    // time_t is a signed epoch-seconds count in this crate's domain (see domain::test_formed_timestamp)
    member_value_int(object, name, depth, sem_index, val_err)
}

/// A member whose JSON value may legally be `null` (meaning "withheld").
pub fn member_value_str_or_null(
    object: &Map<String, Value>,
    name: &str,
    depth: u32,
    sem_index: i32,
    mut val_err: Option<&mut Vec<ValidationError>>,
) -> Option<StrOrWithheld> {
    let v = member_value(object, name, depth, sem_index, val_err.as_deref_mut())?;
    if v.is_null() {
        return Some(StrOrWithheld::Withheld);
    }
    match v.as_str() {
        Some(s) => Some(StrOrWithheld::Str(s.to_string())),
        None => {
            push_err(val_err, depth, sem_index, format!("member {name} is neither a string nor null"));
            None
        }
    }
}
