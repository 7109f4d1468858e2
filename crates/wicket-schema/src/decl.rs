//! # Requirement Declarations
//!
//! The flexible input shapes handlers use to declare fields, and their
//! normalization into the canonical tree. Declarations arrive either as
//! typed [`RequirementDecl`] values or as loose JSON (`"name"`,
//! `["a", "b"]`, `{"user": ["id", "name"]}`) via `TryFrom`.
//!
//! ## Design
//!
//! The union is closed: conversion from JSON is the only place an
//! unsupported shape can appear, and it is rejected there with
//! [`SchemaError::UnsupportedDeclarationKind`]. Once a `RequirementDecl`
//! exists, [`RequirementDecl::normalize`] cannot fail — there is no runtime
//! type inspection downstream of the conversion boundary.

use serde_json::Value;

use crate::error::SchemaError;
use crate::node::{Schema, SchemaNode};

/// A field-requirement declaration in one of its three accepted shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementDecl {
    /// A single leaf field name.
    Name(String),
    /// Several declarations contributing to the same level.
    Sequence(Vec<RequirementDecl>),
    /// Explicit name-to-shape entries; `None` declares a leaf.
    Mapping(Vec<(String, Option<RequirementDecl>)>),
}

impl RequirementDecl {
    /// A leaf declaration for one field.
    pub fn name(name: impl Into<String>) -> Self {
        RequirementDecl::Name(name.into())
    }

    /// A declaration combining several others at the same level.
    pub fn sequence(items: impl IntoIterator<Item = RequirementDecl>) -> Self {
        RequirementDecl::Sequence(items.into_iter().collect())
    }

    /// An explicit mapping declaration.
    pub fn mapping<K: Into<String>>(
        entries: impl IntoIterator<Item = (K, Option<RequirementDecl>)>,
    ) -> Self {
        RequirementDecl::Mapping(
            entries
                .into_iter()
                .map(|(key, shape)| (key.into(), shape))
                .collect(),
        )
    }

    /// Reduce this declaration to its canonical tree.
    ///
    /// - `Name(n)` becomes the single-leaf level `{n}`.
    /// - `Sequence` normalizes each element and unions them in order. A key
    ///   declared twice keeps its first position and its last shape
    ///   (insertion-ordered map semantics).
    /// - `Mapping` maps each entry: `None` to a leaf, a nested declaration
    ///   to an object level built by recursing.
    pub fn normalize(&self) -> Schema {
        match self {
            RequirementDecl::Name(name) => {
                let mut schema = Schema::new();
                schema.insert(name.clone(), SchemaNode::Leaf);
                schema
            }
            RequirementDecl::Sequence(items) => {
                let mut merged = Schema::new();
                for item in items {
                    for (key, node) in item.normalize() {
                        merged.insert(key, node);
                    }
                }
                merged
            }
            RequirementDecl::Mapping(entries) => {
                let mut schema = Schema::new();
                for (key, shape) in entries {
                    let node = match shape {
                        None => SchemaNode::Leaf,
                        Some(decl) => SchemaNode::Object(decl.normalize()),
                    };
                    schema.insert(key.clone(), node);
                }
                schema
            }
        }
    }
}

/// Conversion into a requirement declaration.
///
/// The single bound declaration sites use, so `"token"`, `vec`-style JSON
/// arrays, and typed [`RequirementDecl`] values are all accepted by the same
/// signature. Fallible because loose JSON can carry shapes that cannot name
/// fields.
pub trait IntoDecl {
    /// # Errors
    ///
    /// [`SchemaError::UnsupportedDeclarationKind`] for JSON shapes that
    /// cannot declare fields. Infallible for typed declarations and plain
    /// names.
    fn into_decl(self) -> Result<RequirementDecl, SchemaError>;
}

impl IntoDecl for RequirementDecl {
    fn into_decl(self) -> Result<RequirementDecl, SchemaError> {
        Ok(self)
    }
}

impl IntoDecl for &str {
    fn into_decl(self) -> Result<RequirementDecl, SchemaError> {
        Ok(RequirementDecl::Name(self.to_string()))
    }
}

impl IntoDecl for String {
    fn into_decl(self) -> Result<RequirementDecl, SchemaError> {
        Ok(RequirementDecl::Name(self))
    }
}

impl IntoDecl for Value {
    fn into_decl(self) -> Result<RequirementDecl, SchemaError> {
        RequirementDecl::try_from(&self)
    }
}

impl IntoDecl for &Value {
    fn into_decl(self) -> Result<RequirementDecl, SchemaError> {
        RequirementDecl::try_from(self)
    }
}

impl From<&str> for RequirementDecl {
    fn from(name: &str) -> Self {
        RequirementDecl::Name(name.to_string())
    }
}

impl From<String> for RequirementDecl {
    fn from(name: String) -> Self {
        RequirementDecl::Name(name)
    }
}

impl TryFrom<&Value> for RequirementDecl {
    type Error = SchemaError;

    /// Accepts a string, an array of declarations, or an object whose values
    /// are `null` or nested declarations.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnsupportedDeclarationKind`] for numbers, booleans,
    /// `null` outside an object value position, and any of those nested
    /// inside an otherwise valid declaration.
    fn try_from(value: &Value) -> Result<Self, SchemaError> {
        match value {
            Value::String(name) => Ok(RequirementDecl::Name(name.clone())),
            Value::Array(items) => {
                let items = items
                    .iter()
                    .map(RequirementDecl::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(RequirementDecl::Sequence(items))
            }
            Value::Object(entries) => {
                let mut mapped = Vec::with_capacity(entries.len());
                for (key, shape) in entries {
                    let shape = match shape {
                        Value::Null => None,
                        nested => Some(RequirementDecl::try_from(nested)?),
                    };
                    mapped.push((key.clone(), shape));
                }
                Ok(RequirementDecl::Mapping(mapped))
            }
            other => Err(SchemaError::UnsupportedDeclarationKind {
                found: json_kind(other),
            }),
        }
    }
}

impl TryFrom<Value> for RequirementDecl {
    type Error = SchemaError;

    fn try_from(value: Value) -> Result<Self, SchemaError> {
        RequirementDecl::try_from(&value)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
