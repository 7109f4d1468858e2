//! # Requirement Walkers
//!
//! Pure recursive checks of a parsed request tree against a canonical
//! schema. No state, no recording — the [`crate::Arguments`] lifecycle owns
//! both and calls in here.
//!
//! A non-object value where the schema expects a level is treated as "keys
//! not present", never as a crash: requests are hostile input and shape
//! surprises are ordinary validation failures.

use serde_json::Value;

use wicket_schema::{FlatKey, KeyPath, Schema, SchemaNode};

/// Does `value` carry every field `schema` requires?
///
/// Empty schemas are vacuously satisfied, whatever the value. A nested
/// schema level additionally requires the child value to be a JSON object.
pub(crate) fn satisfies(value: &Value, schema: &Schema) -> bool {
    if schema.is_empty() {
        return true;
    }
    let Some(entries) = value.as_object() else {
        return false;
    };
    schema.iter().all(|(key, node)| match node {
        SchemaNode::Leaf => entries.contains_key(key),
        SchemaNode::Object(sub) => entries
            .get(key)
            .is_some_and(|child| child.is_object() && satisfies(child, sub)),
    })
}

/// Location of the first key in `value` that `schema` does not account for,
/// walking depth first in map order. Keys under a leaf are unconstrained;
/// the walk does not descend past them.
pub(crate) fn first_unexpected(
    value: &Value,
    schema: &Schema,
    at: &KeyPath,
) -> Option<KeyPath> {
    let entries = value.as_object()?;
    for (key, child) in entries {
        match schema.get(key) {
            None => return Some(at.child(key.as_str())),
            Some(SchemaNode::Leaf) => {}
            Some(SchemaNode::Object(sub)) => {
                if let Some(found) = first_unexpected(child, sub, &at.child(key.as_str())) {
                    return Some(found);
                }
            }
        }
    }
    None
}

/// Report of the fields actually present in `value`, in map order,
/// descending into object values.
pub(crate) fn present_keys(value: &Value) -> Vec<FlatKey> {
    match value.as_object() {
        None => Vec::new(),
        Some(entries) => entries
            .iter()
            .map(|(key, child)| {
                if child.is_object() {
                    FlatKey::Group(key.clone(), present_keys(child))
                } else {
                    FlatKey::Name(key.clone())
                }
            })
            .collect(),
    }
}
