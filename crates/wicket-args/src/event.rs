//! # Request Events
//!
//! The slice of a serverless HTTP event this layer consumes: the raw body
//! text. Hosts attach many more fields (headers, path parameters, request
//! context); deserialization ignores everything it does not know.

use serde::Deserialize;

/// Incoming request event.
///
/// `body` is `None` when the host attached no body or an explicit `null`;
/// parsing treats both the same as unparseable input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestEvent {
    /// Raw request body text, exactly as transmitted.
    #[serde(default)]
    pub body: Option<String>,
}

impl RequestEvent {
    /// Event carrying `body` as its body text.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
        }
    }

    /// Event with no body at all.
    pub fn empty() -> Self {
        Self { body: None }
    }
}
