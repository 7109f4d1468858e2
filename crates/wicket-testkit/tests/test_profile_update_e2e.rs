//! # End-to-End Handler Scenario: a Profile Update Endpoint
//!
//! One realistic handler driven exclusively through its public surface: a
//! `RequestEvent` in, a `GatewayResponse` out. The endpoint updates a user
//! profile — it requires `token` plus `user.id` and `user.name`, accepts an
//! optional `user.nickname`, and checks the token before touching anything.
//!
//! The narrative test walks the lifecycle act by act; the focused tests pin
//! the rejection ordering and the read guards that protect the handler from
//! its own bugs.

use serde_json::{json, Value};

use wicket_args::{AccessError, Arguments, RequestEvent};
use wicket_response::{respond, GatewayError, GatewayResponse};
use wicket_schema::SchemaError;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Install an env-filter subscriber once; later calls are no-ops, so every
/// test can ask for it without coordination.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Event whose body is `body` serialized as JSON text.
fn event(body: &Value) -> RequestEvent {
    RequestEvent::new(body.to_string())
}

/// Parse a response's body text back into JSON.
fn body_json(response: &GatewayResponse) -> Value {
    serde_json::from_str(&response.body).expect("response body should be valid JSON")
}

/// The one token the fake session store recognises.
const ACCEPTED_TOKEN: &str = "session-7d0f";

// ---------------------------------------------------------------------------
// The handler under test
// ---------------------------------------------------------------------------

/// Validate a profile-update request and echo the accepted fields back.
fn update_profile(event: &RequestEvent) -> GatewayResponse {
    let mut args = Arguments::new(event).enforce_unexpected(true);

    if let Err(err) = declare_profile_fields(&mut args) {
        return GatewayResponse::error(&GatewayError::internal(err.to_string(), json!({})), true);
    }

    if args.should_error() {
        let unrecorded = GatewayError::internal("rejected without a recorded failure", json!({}));
        return args
            .error_response(true)
            .unwrap_or_else(|| GatewayResponse::error(&unrecorded, true));
    }

    respond(apply_update(&args), true)
}

fn declare_profile_fields(args: &mut Arguments) -> Result<(), SchemaError> {
    args.require(json!(["token", {"user": ["id", "name"]}]))?;
    args.optional(json!({"user": ["nickname"]}))
}

fn apply_update(args: &Arguments) -> Result<Value, GatewayError> {
    let token = read(args.get("token"))?;
    if token.as_str() != Some(ACCEPTED_TOKEN) {
        return Err(GatewayError::unauthorised(
            "unrecognised session token",
            json!({}),
        ));
    }

    let user = read(args.nested("user"))?;
    let nickname = match user.get("nickname") {
        Ok(value) => value.clone(),
        Err(AccessError::FieldNotPresent { .. }) => Value::Null,
        Err(err) => return Err(access_bug(err)),
    };

    Ok(json!({
        "updated": {
            "id": read(user.get("id"))?.clone(),
            "name": read(user.get("name"))?.clone(),
            "nickname": nickname,
        },
    }))
}

/// Access failures are handler bugs, not client errors; they surface as the
/// 500 envelope rather than leaking guard internals into the taxonomy.
fn access_bug(err: AccessError) -> GatewayError {
    GatewayError::internal(err.to_string(), json!({}))
}

fn read<T>(result: Result<T, AccessError>) -> Result<T, GatewayError> {
    result.map_err(access_bug)
}

// ---------------------------------------------------------------------------
// The Scenario
// ---------------------------------------------------------------------------

#[test]
fn scenario_profile_update_request_lifecycle() {
    init_tracing();

    // =====================================================================
    // Act 1: A well-formed request round-trips
    // Everything declared, everything present, the token checks out.
    // =====================================================================

    let response = update_profile(&event(&json!({
        "token": ACCEPTED_TOKEN,
        "user": {"id": 7, "name": "Basira", "nickname": "bb"},
    })));

    assert_eq!(response.status_code, 200, "Act 1: a valid request must succeed");
    assert_eq!(
        body_json(&response),
        json!({
            "message": "Success",
            "data": {"updated": {"id": 7, "name": "Basira", "nickname": "bb"}},
        })
    );
    let headers = serde_json::to_value(response.headers.expect("Act 1: CORS headers")).unwrap();
    assert_eq!(headers["Access-Control-Allow-Origin"], json!("*"));
    eprintln!("  \u{2713} Act 1: valid request accepted");

    // =====================================================================
    // Act 2: The optional field may be absent
    // `user.nickname` is declared optional; leaving it out is not an error,
    // and the handler substitutes null.
    // =====================================================================

    let response = update_profile(&event(&json!({
        "token": ACCEPTED_TOKEN,
        "user": {"id": 7, "name": "Basira"},
    })));

    assert_eq!(response.status_code, 200, "Act 2: optional fields may be omitted");
    assert_eq!(
        body_json(&response)["data"]["updated"]["nickname"],
        Value::Null
    );
    eprintln!("  \u{2713} Act 2: optional field omitted without complaint");

    // =====================================================================
    // Act 3: A stale token is refused
    // Validation passes — the rejection comes from the handler's own
    // domain logic, rendered through the same envelope taxonomy.
    // =====================================================================

    let response = update_profile(&event(&json!({
        "token": "session-dead",
        "user": {"id": 7, "name": "Basira"},
    })));

    assert_eq!(response.status_code, 401, "Act 3: stale tokens must be refused");
    assert_eq!(
        body_json(&response),
        json!({
            "message": "Unauthorised",
            "data": {"reason": "unrecognised session token", "data": {}},
        })
    );
    eprintln!("  \u{2713} Act 3: stale token refused with 401");

    // =====================================================================
    // Act 4: A malformed body never reaches the handler logic
    // The parse failure is recorded at construction and reported with the
    // raw body echoed back for client-side debugging.
    // =====================================================================

    let raw = r#"{"token": "session-7d0f", "user": {"#;
    let response = update_profile(&RequestEvent::new(raw));

    assert_eq!(response.status_code, 400, "Act 4: malformed JSON must be rejected");
    let body = body_json(&response);
    assert_eq!(body["message"], json!("Bad Request"));
    assert_eq!(body["data"]["reason"], json!("Unable to parse JSON request."));
    assert_eq!(body["data"]["data"]["rawData"], json!(raw));
    assert!(
        body["data"]["data"]["error"].is_string(),
        "Act 4: the parser diagnostic must be included"
    );
    eprintln!("  \u{2713} Act 4: malformed body rejected with the raw text echoed");

    // =====================================================================
    // Act 5: A missing nested field is reported precisely
    // The report pairs what was declared against what actually arrived,
    // both in the nested flat-key form.
    // =====================================================================

    let response = update_profile(&event(&json!({
        "token": ACCEPTED_TOKEN,
        "user": {"id": 7},
    })));

    assert_eq!(response.status_code, 400, "Act 5: missing fields must be rejected");
    assert_eq!(
        body_json(&response)["data"],
        json!({
            "reason": "Missing Arguments",
            "data": {
                "expects": ["token", ["user", ["id", "name"]]],
                "got": ["token", ["user", ["id"]]],
            },
        })
    );
    eprintln!("  \u{2713} Act 5: missing nested field reported with expects/got");

    // =====================================================================
    // Act 6: An unexpected key is pinpointed
    // The handler enforces its declarations strictly; a stray top-level
    // field is located by its full path from the request root.
    // =====================================================================

    let response = update_profile(&event(&json!({
        "token": ACCEPTED_TOKEN,
        "user": {"id": 7, "name": "Basira"},
        "role": "admin",
    })));

    assert_eq!(response.status_code, 400, "Act 6: stray fields must be rejected");
    assert_eq!(
        body_json(&response)["data"],
        json!({
            "reason": "Unexpected Argument Received",
            "data": {"at": "REQUEST -> \"role\""},
        })
    );
    eprintln!("  \u{2713} Act 6: unexpected key pinpointed by path");
}

// ---------------------------------------------------------------------------
// Rejection ordering
// ---------------------------------------------------------------------------

#[test]
fn test_absent_body_reports_null_raw_data() {
    init_tracing();
    let response = update_profile(&RequestEvent::empty());

    assert_eq!(response.status_code, 400);
    let body = body_json(&response);
    assert_eq!(body["data"]["reason"], json!("Unable to parse JSON request."));
    assert_eq!(body["data"]["data"]["rawData"], Value::Null);
}

#[test]
fn test_parse_failure_outranks_missing_arguments() {
    init_tracing();
    // The body is malformed AND would be missing every required field;
    // the client hears about the parse failure only.
    let response = update_profile(&RequestEvent::new("not json at all"));

    assert_eq!(body_json(&response)["data"]["reason"], json!("Unable to parse JSON request."));
}

#[test]
fn test_missing_arguments_outrank_unexpected_keys() {
    init_tracing();
    // `user` is absent and `role` is unexpected; the missing-arguments
    // check runs first and its report is the one kept.
    let response = update_profile(&event(&json!({
        "token": ACCEPTED_TOKEN,
        "role": "admin",
    })));

    assert_eq!(body_json(&response)["data"]["reason"], json!("Missing Arguments"));
}

#[test]
fn test_nested_unexpected_key_reports_its_full_path() {
    init_tracing();
    let response = update_profile(&event(&json!({
        "token": ACCEPTED_TOKEN,
        "user": {"id": 7, "name": "Basira", "role": "admin"},
    })));

    assert_eq!(
        body_json(&response)["data"]["data"]["at"],
        json!("REQUEST -> \"user\" -> \"role\"")
    );
}

#[test]
fn test_every_rejection_still_carries_cors_headers() {
    init_tracing();
    let response = update_profile(&RequestEvent::new("not json"));

    let headers = serde_json::to_value(response.headers.expect("CORS headers")).unwrap();
    assert_eq!(headers["Access-Control-Allow-Origin"], json!("*"));
    assert_eq!(headers["Access-Control-Allow-Credentials"], json!(true));
}

// ---------------------------------------------------------------------------
// Read guards
// ---------------------------------------------------------------------------

#[test]
fn test_reading_before_the_checks_is_refused() {
    init_tracing();
    let mut args = Arguments::new(&event(&json!({"token": "t"})));
    args.require("token").unwrap();

    assert!(matches!(
        args.get("token"),
        Err(AccessError::PreconditionViolation { .. })
    ));

    // The same read succeeds once the checks have run.
    assert!(!args.should_error());
    assert_eq!(args.get("token").unwrap(), &json!("t"));
}

#[test]
fn test_undeclared_reads_are_refused_after_the_checks() {
    init_tracing();
    let mut args = Arguments::new(&event(&json!({"token": "t", "debug": true})));
    args.require("token").unwrap();
    assert!(!args.should_error());

    assert!(matches!(
        args.get("debug"),
        Err(AccessError::UndeclaredFieldAccess { .. })
    ));
}
