//! # Response Envelopes
//!
//! The `{statusCode, body, headers}` value handed back to the serverless
//! host, and the builders that produce it. `body` is JSON text of
//! `{"message": ..., "data": ...}`; `headers` is one of the two fixed CORS
//! sets or absent entirely.
//!
//! Building a response cannot fail. An unserializable success payload
//! degrades to the 500 envelope, because the host must always receive a
//! well-formed response value — an `Err` here would surface to clients as
//! an opaque host-level failure instead of a structured one.

use serde::Serialize;
use serde_json::{json, Value};

use crate::decimal::encode_decimals;
use crate::error::GatewayError;

/// Response value in the shape the serverless host consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// JSON text of `{"message": ..., "data": ...}`.
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<CorsHeaders>,
}

/// One of the two fixed CORS header sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CorsHeaders {
    #[serde(
        rename = "Access-Control-Allow-Headers",
        skip_serializing_if = "Option::is_none"
    )]
    pub allow_headers: Option<&'static str>,
    #[serde(rename = "Access-Control-Allow-Origin")]
    pub allow_origin: &'static str,
    #[serde(rename = "Access-Control-Allow-Methods")]
    pub allow_methods: &'static str,
    #[serde(
        rename = "Access-Control-Allow-Credentials",
        skip_serializing_if = "Option::is_none"
    )]
    pub allow_credentials: Option<bool>,
}

impl CorsHeaders {
    /// Set attached to ordinary responses: any origin, any method,
    /// credentials allowed.
    pub fn standard() -> Self {
        Self {
            allow_headers: None,
            allow_origin: "*",
            allow_methods: "*",
            allow_credentials: Some(true),
        }
    }

    /// Set for preflight answers: adds the allowed request headers, drops
    /// the credentials flag.
    pub fn preflight() -> Self {
        Self {
            allow_headers: Some("Content-Type,authorisation"),
            allow_origin: "*",
            allow_methods: "*",
            allow_credentials: None,
        }
    }
}

impl GatewayResponse {
    /// 200 envelope wrapping `data`.
    ///
    /// A payload that fails to serialize produces the 500 envelope instead;
    /// see the module docs.
    pub fn success(data: &impl Serialize, allow_cors: bool) -> GatewayResponse {
        match serde_json::to_value(data) {
            Ok(payload) => Self::build(200, "Success", payload, allow_cors),
            Err(err) => {
                tracing::error!(error = %err, "success payload failed to serialize");
                Self::error(
                    &GatewayError::internal("Unable to serialise response data.", json!({})),
                    allow_cors,
                )
            }
        }
    }

    /// Envelope for a rejected request, using the error's own status code,
    /// message, and payload.
    pub fn error(error: &GatewayError, allow_cors: bool) -> GatewayResponse {
        Self::build(
            error.status_code(),
            error.message(),
            error.payload(),
            allow_cors,
        )
    }

    /// Swap in the preflight CORS header set.
    pub fn with_preflight_headers(mut self) -> Self {
        self.headers = Some(CorsHeaders::preflight());
        self
    }

    fn build(status_code: u16, message: &str, data: Value, allow_cors: bool) -> GatewayResponse {
        let body = json!({
            "message": message,
            "data": encode_decimals(data),
        });

        let response = GatewayResponse {
            status_code,
            // Display for Value is compact JSON and cannot fail.
            body: body.to_string(),
            headers: allow_cors.then(CorsHeaders::standard),
        };

        if status_code >= 500 {
            tracing::error!(status = status_code, body = %response.body, "built response");
        } else if status_code >= 400 {
            tracing::warn!(status = status_code, body = %response.body, "built response");
        } else {
            tracing::debug!(status = status_code, body = %response.body, "built response");
        }
        response
    }
}

/// Render a handler outcome into its envelope.
pub fn respond(outcome: Result<Value, GatewayError>, allow_cors: bool) -> GatewayResponse {
    match outcome {
        Ok(data) => GatewayResponse::success(&data, allow_cors),
        Err(error) => GatewayResponse::error(&error, allow_cors),
    }
}
