//! # wicket-response — Proxy-Integration Response Envelopes
//!
//! Builds the `{statusCode, body, headers}` values a serverless HTTP host
//! expects back from a handler. The `body` field is itself JSON text of the
//! form `{"message": ..., "data": ...}`, so clients always see a uniform
//! envelope regardless of outcome.
//!
//! ## Outcomes
//!
//! A handler outcome is either a success payload or one of the
//! [`GatewayError`] variants. Every variant knows its HTTP status code, its
//! envelope message, and its structured `{reason, data}` payload — there is
//! no free-form status/message pairing to get wrong at call sites.
//!
//! ## Design
//!
//! - **Response building never fails.** A payload that cannot be serialized
//!   degrades to the 500 envelope instead of propagating an error; the
//!   serverless host must always receive a well-formed response value.
//! - **Decimal-safe bodies.** Before serialization every JSON number in the
//!   payload that is not exactly an `i64`/`u64` is re-emitted as a string of
//!   its literal, preserving high-precision decimals end-to-end (see
//!   [`encode_decimals`]).
//! - **Two fixed CORS header sets.** [`CorsHeaders::standard`] for ordinary
//!   responses and [`CorsHeaders::preflight`] for preflight answers; no
//!   per-call header assembly.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code, no `panic!()` or `.unwrap()` outside tests.
//! - Emits `tracing` events for every built response; never installs a
//!   subscriber.

pub mod decimal;
pub mod envelope;
pub mod error;

pub use decimal::encode_decimals;
pub use envelope::{respond, CorsHeaders, GatewayResponse};
pub use error::GatewayError;
