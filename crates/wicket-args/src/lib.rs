//! # wicket-args — Request Arguments, Validated Before Read
//!
//! The request-side half of Wicket. An [`Arguments`] value owns one
//! request's lifecycle: parse the body, declare required and optional
//! fields, run the checks, then read — in that order, enforced.
//!
//! ```no_run
//! use serde_json::json;
//! use wicket_args::{Arguments, RequestEvent};
//! use wicket_response::{respond, GatewayError, GatewayResponse};
//!
//! fn misconfigured() -> GatewayResponse {
//!     GatewayResponse::error(
//!         &GatewayError::internal("Misconfigured handler.", json!({})),
//!         true,
//!     )
//! }
//!
//! fn handler(event: &RequestEvent) -> GatewayResponse {
//!     let mut args = Arguments::new(event);
//!     if args.require(json!(["token", {"user": ["id"]}])).is_err() {
//!         return misconfigured();
//!     }
//!     if args.should_error() {
//!         return args.error_response(true).unwrap_or_else(misconfigured);
//!     }
//!     let user_id = match args.nested("user").and_then(|user| user.get("id").cloned()) {
//!         Ok(id) => id,
//!         Err(_) => return misconfigured(),
//!     };
//!     respond(Ok(json!({"user": user_id})), true)
//! }
//! ```
//!
//! ## Two failure planes
//!
//! - **The request is wrong** — unparseable body, missing required fields,
//!   unexpected fields. Recorded on the [`Arguments`] value (first failure
//!   wins) and rendered as an ordinary client response.
//! - **The handler is wrong** — reads before checks, reads of undeclared
//!   fields, malformed declarations. Surfaced as [`AccessError`] /
//!   `SchemaError` results that abort handling and never reach the client.
//!
//! ## Crate Policy
//!
//! - One `Arguments` per request; the lifecycle state only moves forward.
//! - No `unsafe` code, no `panic!()` or `.unwrap()` outside tests.
//! - Emits `tracing` events; never installs a subscriber.

pub mod arguments;
mod check;
pub mod error;
pub mod event;
pub mod nested;
pub mod state;

pub use arguments::Arguments;
pub use error::AccessError;
pub use event::RequestEvent;
pub use nested::NestedArgs;
pub use state::AccessPhase;
