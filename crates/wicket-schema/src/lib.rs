//! # wicket-schema — Requirement Declarations and Canonical Schema Trees
//!
//! Handlers declare which request fields they require and which they accept
//! in whatever shape is most convenient: a bare field name, a list of names,
//! or a mapping that nests further declarations. This crate normalizes every
//! such declaration into one canonical tree form, and provides the two tree
//! operations the validation layer is built on: deep merge and
//! declaration-order key flattening.
//!
//! ## Canonical form
//!
//! A schema level is an insertion-ordered map from field name to node, where
//! a node is either [`SchemaNode::Leaf`] ("the field must exist, any value")
//! or [`SchemaNode::Object`] ("the field must be a JSON object satisfying the
//! nested level"). [`Schema`] is the map level; every normalization result is
//! a `Schema`.
//!
//! ## Design
//!
//! - **Declarations are a closed union.** [`RequirementDecl`] has exactly
//!   three variants; anything else (a number, a boolean) is rejected with
//!   [`SchemaError::UnsupportedDeclarationKind`] when converting from JSON,
//!   before a declaration value exists. Normalization itself is total.
//! - **Shape conflicts are construction-time failures.** Merging a leaf with
//!   an object at the same key is a bug in the declaring handler, reported as
//!   [`SchemaError::ConflictingSchemaShapes`] with the offending
//!   [`KeyPath`] — never silently resolved.
//! - **Order is part of the contract.** Flattened key reports follow the
//!   insertion order of the canonical map, so error payloads list fields in
//!   the order they were declared.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `wicket-*` crates (leaf of the DAG).
//! - No `unsafe` code, no `panic!()` or `.unwrap()` outside tests.

pub mod decl;
pub mod error;
pub mod flat;
pub mod node;
pub mod path;

pub use decl::{IntoDecl, RequirementDecl};
pub use error::SchemaError;
pub use flat::FlatKey;
pub use node::{Schema, SchemaNode};
pub use path::KeyPath;
