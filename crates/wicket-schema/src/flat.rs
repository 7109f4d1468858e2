//! # Flattened Key Reports
//!
//! [`FlatKey`] is the wire shape of "which fields" lists in error payloads:
//! a plain name serializes as a JSON string, a field with children as the
//! two-element array `[name, [children...]]`. Both the expected-fields list
//! (from a schema) and the actually-present list (from a request body) use
//! this one type, so the two halves of a missing-arguments payload always
//! read the same way.

use serde::ser::{Serialize, SerializeTuple, Serializer};

/// One entry of a flattened key report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlatKey {
    /// A field with no reported children.
    Name(String),
    /// A field together with its children, themselves flattened.
    Group(String, Vec<FlatKey>),
}

impl FlatKey {
    /// The field name, for either variant.
    pub fn name(&self) -> &str {
        match self {
            FlatKey::Name(name) | FlatKey::Group(name, _) => name,
        }
    }
}

impl Serialize for FlatKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FlatKey::Name(name) => serializer.serialize_str(name),
            FlatKey::Group(name, children) => {
                let mut pair = serializer.serialize_tuple(2)?;
                pair.serialize_element(name)?;
                pair.serialize_element(children)?;
                pair.end()
            }
        }
    }
}
