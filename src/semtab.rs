//! Semantic walker: walks a JSON tree against a flat, ordered semantic table,
//! accumulating count errors and validation errors.
//!
//! Depth accounting: the root node is depth 0. Visiting an object descends
//! one level to reach each of its members (a synthetic `Member` node,
//! carrying the decoded member name) and one level further to reach that
//! member's value. Visiting an array descends one level to reach each
//! element. This mirrors the parse tree's `Object -> Member{name, value} ->
//! value` chain from the original JSON semantic table (spec §3), expressed
//! over `serde_json::Value` instead of a bespoke parse tree.

use crate::json_node::ValidationError;
use serde_json::Value;

/// The kind of node a semantic-table entry matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Object,
    Array,
    Member,
    String,
    Number,
    Bool,
    Null,
}

impl NodeKind {
    fn of(value: &Value) -> NodeKind {
        match value {
            Value::Object(_) => NodeKind::Object,
            Value::Array(_) => NodeKind::Array,
            Value::String(_) => NodeKind::String,
            Value::Number(_) => NodeKind::Number,
            Value::Bool(_) => NodeKind::Bool,
            Value::Null => NodeKind::Null,
        }
    }
}

/// A validator invoked when a table entry matches a node. Returning `Err`
/// records a validation error; the `String` is the diagnostic.
pub type SemValidator = fn(&Value, u32, &SemEntry) -> Result<(), String>;

/// One row of the semantic table.
#[derive(Clone)]
pub struct SemEntry {
    pub depth: u32,
    pub kind: NodeKind,
    /// `None` matches any member name at this depth/kind; for non-`Member`
    /// kinds this is always `None`.
    pub name: Option<&'static str>,
    pub min: u32,
    pub max: Option<u32>,
    pub validator: Option<SemValidator>,
    /// assigned by `SemTable::new`/`check`, in declaration order
    pub sem_index: i32,
    count: u32,
}

impl SemEntry {
    pub fn new(
        depth: u32,
        kind: NodeKind,
        name: Option<&'static str>,
        min: u32,
        max: Option<u32>,
        validator: Option<SemValidator>,
    ) -> Self {
        SemEntry {
            depth,
            kind,
            name,
            min,
            max,
            validator,
            sem_index: -1,
            count: 0,
        }
    }

    fn matches(&self, depth: u32, kind: NodeKind, member_name: Option<&str>) -> bool {
        if self.depth != depth || self.kind != kind {
            return false;
        }
        match (self.kind, self.name) {
            (NodeKind::Member, Some(want)) => member_name == Some(want),
            (NodeKind::Member, None) => true,
            _ => true,
        }
    }
}

/// The declaration-ordered, priority-scanned table itself.
#[derive(Clone)]
pub struct SemTable {
    entries: Vec<SemEntry>,
}

impl SemTable {
    pub fn new(entries: Vec<SemEntry>) -> Self {
        SemTable { entries }
    }

    fn zero_and_index(&mut self) {
        for (i, e) in self.entries.iter_mut().enumerate() {
            e.count = 0;
            e.sem_index = i as i32;
        }
    }

    fn find(&mut self, depth: u32, kind: NodeKind, member_name: Option<&str>) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.matches(depth, kind, member_name))
    }
}

/// One too-few/too-many/unknown-node violation of the table's cardinality bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountError {
    pub depth: u32,
    pub sem_index: i32,
    pub kind: CountErrorKind,
    pub diagnostic: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountErrorKind {
    BadMin,
    BadMax,
    UnknownNode,
}

/// Walk `tree` against `table`, returning the accumulated count and
/// validation errors in discovery order.
///
/// Zeroes every entry's runtime count and assigns stable `sem_index` values
/// at the start of every call (spec §9: mandatory, not optional — a caller
/// relying on pre-populated counts across calls is out of scope).
pub fn check(tree: &Value, table: &mut SemTable, max_depth: u32) -> (Vec<CountError>, Vec<ValidationError>) {
    table.zero_and_index();
    let mut count_errors = Vec::new();
    let mut val_errors = Vec::new();
    walk(tree, 0, None, table, max_depth, &mut count_errors, &mut val_errors);

    for entry in &table.entries {
        if entry.count < entry.min {
            count_errors.push(CountError {
                depth: entry.depth,
                sem_index: entry.sem_index,
                kind: CountErrorKind::BadMin,
                diagnostic: format!(
                    "expected {} valid {}, found: {}",
                    entry.min,
                    entry.name.unwrap_or("node"),
                    entry.count
                ),
            });
        }
        if let Some(max) = entry.max {
            if entry.count > max {
                count_errors.push(CountError {
                    depth: entry.depth,
                    sem_index: entry.sem_index,
                    kind: CountErrorKind::BadMax,
                    diagnostic: format!(
                        "expected at most {} valid {}, found: {}",
                        max,
                        entry.name.unwrap_or("node"),
                        entry.count
                    ),
                });
            }
        }
    }

    (count_errors, val_errors)
}

#[allow(clippy::too_many_arguments)]
fn walk(
    node: &Value,
    depth: u32,
    member_name: Option<&str>,
    table: &mut SemTable,
    max_depth: u32,
    count_errors: &mut Vec<CountError>,
    val_errors: &mut Vec<ValidationError>,
) {
    if max_depth > 0 && depth > max_depth {
        return;
    }

    let kind = if member_name.is_some() { NodeKind::Member } else { NodeKind::of(node) };
    match table.find(depth, kind, member_name) {
        Some(idx) => {
            table.entries[idx].count += 1;
            let sem_index = table.entries[idx].sem_index;
            if let Some(validator) = table.entries[idx].validator {
                let entry_clone = table.entries[idx].clone();
                if let Err(diagnostic) = validator(node, depth, &entry_clone) {
                    val_errors.push(ValidationError::new(depth, sem_index, diagnostic));
                }
            }
        }
        None => {
            let diagnostic = match member_name {
                Some(name) => format!("unknown node at depth {depth}: member \"{name}\""),
                None => format!("unknown node at depth {depth}: {kind:?}"),
            };
            count_errors.push(CountError {
                depth,
                sem_index: -1,
                kind: CountErrorKind::UnknownNode,
                diagnostic,
            });
        }
    }

    // a member node's own value sits one level deeper, matched by its own
    // kind rather than by member name
    if member_name.is_some() {
        walk(node, depth + 1, None, table, max_depth, count_errors, val_errors);
        return;
    }

    match node {
        Value::Object(map) => {
            for (name, value) in map {
                walk(value, depth + 1, Some(name.as_str()), table, max_depth, count_errors, val_errors);
            }
        }
        Value::Array(elements) => {
            for element in elements {
                walk(element, depth + 1, None, table, max_depth, count_errors, val_errors);
            }
        }
        _ => {}
    }
}
