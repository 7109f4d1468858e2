//! # Nested Views — Scoped Access Below the Top Level
//!
//! A [`NestedArgs`] borrows one subtree of the request together with the
//! sub-schema declared for it, and applies the declared-fields-only rule
//! locally. The outer lifecycle already ran the availability and
//! requirement checks, so nested levels impose no fresh precondition —
//! only scope.
//!
//! A leaf declaration carries no sub-schema; its view is unconstrained and
//! reads pass straight through to the data.

use serde_json::Value;

use wicket_schema::{KeyPath, Schema, SchemaNode};

use crate::error::AccessError;

/// Borrowed view of one declared subtree of the request.
#[derive(Debug, Clone)]
pub struct NestedArgs<'a> {
    value: &'a Value,
    /// Declared sub-schema; `None` for a leaf declaration.
    schema: Option<&'a Schema>,
    at: KeyPath,
}

impl<'a> NestedArgs<'a> {
    pub(crate) fn new(value: &'a Value, schema: Option<&'a Schema>, at: KeyPath) -> Self {
        Self { value, schema, at }
    }

    /// Read one field of this subtree.
    ///
    /// # Errors
    ///
    /// [`AccessError::UndeclaredFieldAccess`] when this level has a
    /// sub-schema that does not list `field`;
    /// [`AccessError::FieldNotPresent`] when the data lacks it.
    pub fn get(&self, field: &str) -> Result<&'a Value, AccessError> {
        let at = self.at.child(field);
        if let Some(schema) = self.schema {
            if !schema.contains_key(field) {
                let err = AccessError::UndeclaredFieldAccess { at };
                tracing::error!(error = %err, "undeclared nested field read");
                return Err(err);
            }
        }
        self.value
            .get(field)
            .ok_or(AccessError::FieldNotPresent { at })
    }

    /// Descend one level further, carrying the sub-schema at `field` (or
    /// none past a leaf).
    ///
    /// # Errors
    ///
    /// As for [`NestedArgs::get`].
    pub fn nested(&self, field: &str) -> Result<NestedArgs<'a>, AccessError> {
        let at = self.at.child(field);
        let schema = match self.schema {
            None => None,
            Some(schema) => match schema.get(field) {
                None => {
                    let err = AccessError::UndeclaredFieldAccess { at };
                    tracing::error!(error = %err, "undeclared nested field read");
                    return Err(err);
                }
                Some(SchemaNode::Leaf) => None,
                Some(SchemaNode::Object(sub)) => Some(sub),
            },
        };
        let value = self
            .value
            .get(field)
            .ok_or_else(|| AccessError::FieldNotPresent { at: at.clone() })?;
        Ok(NestedArgs::new(value, schema, at))
    }

    /// Whether `field` is declared at this level. Schema membership, not
    /// data membership; a leaf view declares nothing.
    pub fn contains(&self, field: &str) -> bool {
        self.schema.is_some_and(|schema| schema.contains_key(field))
    }

    /// Whether every field declared at this level is present in the data.
    ///
    /// Presence is checked one level deep; nested shapes were already the
    /// requirement check's job. A non-object value carries no fields.
    ///
    /// # Errors
    ///
    /// With `strict`, [`AccessError::NoSchemaAtThisLevel`] when this is a
    /// leaf view — asking "is everything here?" with nothing declared is a
    /// handler bug. Without `strict` a leaf view reports `true`.
    pub fn contains_all(&self, strict: bool) -> Result<bool, AccessError> {
        let Some(schema) = self.schema else {
            if strict {
                let err = AccessError::NoSchemaAtThisLevel {
                    at: self.at.clone(),
                };
                tracing::error!(error = %err, "exhaustiveness check without a schema");
                return Err(err);
            }
            return Ok(true);
        };
        let Some(entries) = self.value.as_object() else {
            return Ok(false);
        };
        Ok(schema.keys().all(|key| entries.contains_key(key)))
    }

    /// The raw subtree value.
    pub fn raw(&self) -> &'a Value {
        self.value
    }

    /// Where this view sits in the request.
    pub fn path(&self) -> &KeyPath {
        &self.at
    }
}
