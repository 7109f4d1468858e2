//! # Canonical Schema Trees
//!
//! The normal form every requirement declaration reduces to. A [`Schema`] is
//! an insertion-ordered map from field name to [`SchemaNode`]; a node is a
//! leaf (field must exist, value unconstrained) or a nested object level.
//!
//! ## Design
//!
//! - **Insertion order is preserved.** `serde_json::Map` sorts its keys, so
//!   the tree is backed by `IndexMap` instead: [`Schema::flatten`] must list
//!   fields in declaration order because that order appears verbatim in
//!   client-visible error payloads.
//! - **Merge never invents shapes.** Two leaves merge to a leaf and two
//!   object levels merge recursively; a leaf meeting an object is a
//!   declaration bug, reported with the exact [`KeyPath`] of the collision.
//! - **Trees are finite and owned.** Nodes own their children outright, so
//!   every tree is acyclic by construction.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::SchemaError;
use crate::flat::FlatKey;
use crate::path::KeyPath;

/// One object level of a canonical schema tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema(IndexMap<String, SchemaNode>);

/// Shape constraint for one declared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    /// The field must exist; its value is unconstrained.
    Leaf,
    /// The field must be a JSON object satisfying the nested level.
    Object(Schema),
}

impl Schema {
    /// An empty level (matches any value vacuously).
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Insert or replace one field constraint.
    ///
    /// Re-inserting an existing key replaces its node but keeps the key's
    /// original position, mirroring insertion-ordered map semantics: the
    /// last declaration of a field wins, where it was first declared.
    pub fn insert(&mut self, key: impl Into<String>, node: SchemaNode) -> Option<SchemaNode> {
        self.0.insert(key.into(), node)
    }

    /// The constraint declared for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&SchemaNode> {
        self.0.get(key)
    }

    /// Whether `key` is declared at this level.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Declared fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.0.iter().map(|(key, node)| (key.as_str(), node))
    }

    /// Declared field names in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Deep union of two levels.
    ///
    /// Keys keep left-operand-first order; keys present on both sides merge
    /// node-wise (leaf + leaf stays a leaf, object + object recurses).
    ///
    /// # Errors
    ///
    /// [`SchemaError::ConflictingSchemaShapes`] when the same key is a leaf
    /// on one side and an object on the other, at any depth. The error
    /// carries the path of the first colliding key.
    pub fn merge(&self, other: &Schema) -> Result<Schema, SchemaError> {
        self.merge_at(other, &KeyPath::root())
    }

    fn merge_at(&self, other: &Schema, at: &KeyPath) -> Result<Schema, SchemaError> {
        let mut merged = self.0.clone();
        for (key, theirs) in &other.0 {
            let node = match merged.get(key) {
                None => theirs.clone(),
                Some(ours) => merge_nodes(ours, theirs, &at.child(key.as_str()))?,
            };
            merged.insert(key.clone(), node);
        }
        Ok(Schema(merged))
    }

    /// Declaration-order key report for this level and everything below it.
    pub fn flatten(&self) -> Vec<FlatKey> {
        self.0
            .iter()
            .map(|(key, node)| match node {
                SchemaNode::Leaf => FlatKey::Name(key.clone()),
                SchemaNode::Object(sub) => FlatKey::Group(key.clone(), sub.flatten()),
            })
            .collect()
    }
}

fn merge_nodes(
    ours: &SchemaNode,
    theirs: &SchemaNode,
    at: &KeyPath,
) -> Result<SchemaNode, SchemaError> {
    match (ours, theirs) {
        (SchemaNode::Leaf, SchemaNode::Leaf) => Ok(SchemaNode::Leaf),
        (SchemaNode::Object(a), SchemaNode::Object(b)) => {
            Ok(SchemaNode::Object(a.merge_at(b, at)?))
        }
        _ => Err(SchemaError::ConflictingSchemaShapes { at: at.clone() }),
    }
}

impl FromIterator<(String, SchemaNode)> for Schema {
    fn from_iter<I: IntoIterator<Item = (String, SchemaNode)>>(entries: I) -> Self {
        Self(entries.into_iter().collect())
    }
}

impl IntoIterator for Schema {
    type Item = (String, SchemaNode);
    type IntoIter = indexmap::map::IntoIter<String, SchemaNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Serializes to the canonical JSON form: leaves as `null`, nested levels as
/// objects. `{"user": {"id": null}}` round-trips back through declaration
/// conversion into an equal schema.
impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, node) in &self.0 {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SchemaNode::Leaf => serializer.serialize_unit(),
            SchemaNode::Object(sub) => sub.serialize(serializer),
        }
    }
}
