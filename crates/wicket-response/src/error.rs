//! # Client-Facing Error Taxonomy
//!
//! Every way a request can be rejected, as a closed enum. Each variant
//! carries the structured fields its payload is built from; status code,
//! envelope message, and reason strings live here and nowhere else.
//!
//! These are ordinary values returned to clients as normal responses —
//! recoverable by sending a corrected request. Programmer-misuse failures
//! (malformed schema declarations, reads before validation) are separate
//! types in their owning crates and never pass through here.

use serde_json::{json, Value};
use thiserror::Error;

use wicket_schema::{FlatKey, KeyPath};

/// A rejected request, ready to be rendered into a response envelope.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// The request body was absent or not valid JSON.
    #[error("unable to parse JSON request: {detail}")]
    ParseFailure {
        /// Body text exactly as received, before newline stripping.
        raw: Option<String>,
        /// Parser diagnostic.
        detail: String,
    },

    /// One or more required fields were absent from the request.
    #[error("missing required arguments")]
    MissingArguments {
        /// Declaration-order report of every required field.
        expects: Vec<FlatKey>,
        /// Report of the fields actually present in the request.
        got: Vec<FlatKey>,
    },

    /// The request carried a field no declaration accounts for.
    #[error("unexpected argument at {at}")]
    UnexpectedArgument {
        /// Location of the offending key.
        at: KeyPath,
    },

    /// Free-form client error.
    #[error("bad request: {reason}")]
    BadRequest { reason: String, data: Value },

    /// A referenced entity does not exist.
    #[error("not found: {reason}")]
    NotFound {
        reason: String,
        /// The value that was looked up.
        value: Value,
        /// Where the lookup happened.
        at: String,
    },

    /// Missing or invalid credentials.
    #[error("unauthorised: {reason}")]
    Unauthorised { reason: String, data: Value },

    /// Valid credentials, insufficient rights.
    #[error("forbidden: {reason}")]
    Forbidden { reason: String, data: Value },

    /// Failure on our side.
    #[error("internal server error: {reason}")]
    Internal { reason: String, data: Value },
}

impl GatewayError {
    /// Free-form 400.
    pub fn bad_request(reason: impl Into<String>, data: Value) -> Self {
        GatewayError::BadRequest {
            reason: reason.into(),
            data,
        }
    }

    /// 404 for a failed lookup of `value` in `at`.
    pub fn not_found(reason: impl Into<String>, value: Value, at: impl Into<String>) -> Self {
        GatewayError::NotFound {
            reason: reason.into(),
            value,
            at: at.into(),
        }
    }

    /// 401.
    pub fn unauthorised(reason: impl Into<String>, data: Value) -> Self {
        GatewayError::Unauthorised {
            reason: reason.into(),
            data,
        }
    }

    /// 403.
    pub fn forbidden(reason: impl Into<String>, data: Value) -> Self {
        GatewayError::Forbidden {
            reason: reason.into(),
            data,
        }
    }

    /// 500.
    pub fn internal(reason: impl Into<String>, data: Value) -> Self {
        GatewayError::Internal {
            reason: reason.into(),
            data,
        }
    }

    /// HTTP status code this error renders with.
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::ParseFailure { .. }
            | GatewayError::MissingArguments { .. }
            | GatewayError::UnexpectedArgument { .. }
            | GatewayError::BadRequest { .. } => 400,
            GatewayError::Unauthorised { .. } => 401,
            GatewayError::Forbidden { .. } => 403,
            GatewayError::NotFound { .. } => 404,
            GatewayError::Internal { .. } => 500,
        }
    }

    /// Envelope `message` field this error renders with.
    pub fn message(&self) -> &'static str {
        match self {
            GatewayError::ParseFailure { .. }
            | GatewayError::MissingArguments { .. }
            | GatewayError::UnexpectedArgument { .. }
            | GatewayError::BadRequest { .. } => "Bad Request",
            GatewayError::Unauthorised { .. } => "Unauthorised",
            GatewayError::Forbidden { .. } => "Forbidden",
            GatewayError::NotFound { .. } => "Not Found",
            GatewayError::Internal { .. } => "Internal Server Error",
        }
    }

    /// The `{reason, data}` value placed in the envelope's `data` field.
    pub fn payload(&self) -> Value {
        match self {
            GatewayError::ParseFailure { raw, detail } => json!({
                "reason": "Unable to parse JSON request.",
                "data": {"rawData": raw, "error": detail},
            }),
            GatewayError::MissingArguments { expects, got } => json!({
                "reason": "Missing Arguments",
                "data": {"expects": expects, "got": got},
            }),
            GatewayError::UnexpectedArgument { at } => json!({
                "reason": "Unexpected Argument Received",
                "data": {"at": at},
            }),
            GatewayError::NotFound { reason, value, at } => json!({
                "reason": reason,
                "data": {"value": value, "at": at},
            }),
            GatewayError::BadRequest { reason, data }
            | GatewayError::Unauthorised { reason, data }
            | GatewayError::Forbidden { reason, data }
            | GatewayError::Internal { reason, data } => json!({
                "reason": reason,
                "data": data,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_errors() -> Vec<GatewayError> {
        vec![
            GatewayError::ParseFailure {
                raw: Some("{broken".to_string()),
                detail: "expected value at line 1 column 2".to_string(),
            },
            GatewayError::MissingArguments {
                expects: vec![FlatKey::Name("token".to_string())],
                got: vec![],
            },
            GatewayError::UnexpectedArgument {
                at: KeyPath::root().child("b"),
            },
            GatewayError::bad_request("no", json!({})),
            GatewayError::unauthorised("token expired", json!({})),
            GatewayError::forbidden("admin only", json!({})),
            GatewayError::not_found("no such user", json!("u-1"), "users"),
            GatewayError::internal("backend failure", json!({})),
        ]
    }

    #[test]
    fn test_status_codes() {
        let codes: Vec<u16> = sample_errors().iter().map(GatewayError::status_code).collect();
        assert_eq!(codes, [400, 400, 400, 400, 401, 403, 404, 500]);
    }

    #[test]
    fn test_messages() {
        let messages: Vec<&str> = sample_errors().iter().map(GatewayError::message).collect();
        assert_eq!(
            messages,
            [
                "Bad Request",
                "Bad Request",
                "Bad Request",
                "Bad Request",
                "Unauthorised",
                "Forbidden",
                "Not Found",
                "Internal Server Error",
            ]
        );
    }

    #[test]
    fn test_parse_failure_payload() {
        let err = GatewayError::ParseFailure {
            raw: Some("{\"user\": ".to_string()),
            detail: "EOF while parsing an object".to_string(),
        };
        assert_eq!(
            err.payload(),
            json!({
                "reason": "Unable to parse JSON request.",
                "data": {
                    "rawData": "{\"user\": ",
                    "error": "EOF while parsing an object",
                },
            })
        );
    }

    #[test]
    fn test_parse_failure_without_body_has_null_raw() {
        let err = GatewayError::ParseFailure {
            raw: None,
            detail: "request event carried no body".to_string(),
        };
        assert_eq!(err.payload()["data"]["rawData"], Value::Null);
    }

    #[test]
    fn test_missing_arguments_payload_shape() {
        let err = GatewayError::MissingArguments {
            expects: vec![FlatKey::Group(
                "user".to_string(),
                vec![
                    FlatKey::Name("id".to_string()),
                    FlatKey::Name("name".to_string()),
                ],
            )],
            got: vec![FlatKey::Group(
                "user".to_string(),
                vec![FlatKey::Name("id".to_string())],
            )],
        };
        assert_eq!(
            err.payload(),
            json!({
                "reason": "Missing Arguments",
                "data": {
                    "expects": [["user", ["id", "name"]]],
                    "got": [["user", ["id"]]],
                },
            })
        );
    }

    #[test]
    fn test_unexpected_argument_payload_carries_the_path() {
        let err = GatewayError::UnexpectedArgument {
            at: KeyPath::root().child("b"),
        };
        assert_eq!(
            err.payload(),
            json!({
                "reason": "Unexpected Argument Received",
                "data": {"at": "REQUEST -> \"b\""},
            })
        );
    }

    #[test]
    fn test_not_found_payload_nests_value_and_at() {
        let err = GatewayError::not_found("no such session", json!("s-9"), "sessions");
        assert_eq!(
            err.payload(),
            json!({
                "reason": "no such session",
                "data": {"value": "s-9", "at": "sessions"},
            })
        );
    }
}
