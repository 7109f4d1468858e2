//! # Schema Errors — Declaration-Time Failures
//!
//! Both variants signal a mistake in the declaring handler, not in the
//! request being validated. They surface when a schema is declared or
//! combined, abort handling, and are never encoded into a client response.

use thiserror::Error;

use crate::path::KeyPath;

/// A malformed or self-contradictory requirement declaration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The declaration contained a JSON value that cannot name a field.
    #[error("unsupported requirement declaration: {found} cannot name a request field")]
    UnsupportedDeclarationKind {
        /// JSON type name of the offending value (`"number"`, `"boolean"`, ...).
        found: &'static str,
    },

    /// The same key was declared both as a plain value and as a nested object.
    #[error("conflicting shapes declared at {at}: a field cannot be both a plain value and a nested object")]
    ConflictingSchemaShapes {
        /// Location of the doubly-declared key.
        at: KeyPath,
    },
}
