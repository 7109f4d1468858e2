//! # Key Paths — Locating a Field Within the Request Tree
//!
//! A [`KeyPath`] is the sequence of object keys leading from the request
//! root to one field. It renders as `REQUEST -> "outer" -> "inner"` — the
//! format used verbatim inside error payloads — and serializes as that
//! rendered string, so changing the wire format is a one-impl change here.

use std::fmt;

use serde::{Serialize, Serializer};

/// Path from the request root to a field, one segment per object key.
///
/// The empty path denotes the request root itself and displays as `REQUEST`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// The request root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// A new path extended by one segment, leaving `self` untouched.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// True for the request root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The final segment, if any.
    pub fn leaf(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// All segments from root to leaf.
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("REQUEST")?;
        for segment in &self.0 {
            write!(f, " -> \"{segment}\"")?;
        }
        Ok(())
    }
}

impl Serialize for KeyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<&str> for KeyPath {
    fn from(segment: &str) -> Self {
        Self(vec![segment.to_string()])
    }
}
