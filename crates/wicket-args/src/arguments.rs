//! # Arguments — One Request's Validation Lifecycle
//!
//! Owns everything about a single request: the parsed body tree, the
//! declared required and optional schemas, the first validation failure,
//! and the access state that gates field reads.
//!
//! ## Lifecycle
//!
//! 1. Construct from the incoming [`RequestEvent`] — the body is parsed
//!    here, and a parse failure is recorded immediately.
//! 2. Declare fields with [`Arguments::require`] and
//!    [`Arguments::optional`].
//! 3. Run the checks, usually via [`Arguments::should_error`]; on `true`,
//!    return [`Arguments::error_response`] to the client.
//! 4. Read fields with [`Arguments::get`] / [`Arguments::nested`].
//!
//! ## First failure wins
//!
//! At most one validation failure is recorded per request. Later checks
//! still run — their state side effects are part of the lifecycle — but
//! they never overwrite the recorded failure, so the client always sees the
//! first thing that went wrong.
//!
//! ## Reads are gated
//!
//! Once requirements are declared, every read is refused until both checks
//! have run; in strict mode reads of undeclared fields are refused always.
//! Those refusals are [`AccessError`]s — handler bugs, distinct from the
//! client-facing failures above.

use serde_json::Value;

use wicket_schema::{IntoDecl, KeyPath, Schema, SchemaError, SchemaNode};
use wicket_response::{GatewayError, GatewayResponse};

use crate::check::{first_unexpected, present_keys, satisfies};
use crate::error::AccessError;
use crate::event::RequestEvent;
use crate::nested::NestedArgs;
use crate::state::{AccessPhase, AccessState};

/// Validation lifecycle of one request.
#[derive(Debug)]
pub struct Arguments {
    tree: Option<Value>,
    required: Schema,
    optional: Schema,
    /// Union of `required` and `optional`, refreshed on every declaration
    /// so read-time lookups never merge.
    combined: Schema,
    error: Option<GatewayError>,
    state: AccessState,
    strict_access: bool,
    enforce_unexpected: bool,
}

impl Arguments {
    /// Parse `event`'s body and begin a lifecycle with strict access on and
    /// unexpected-key enforcement off.
    pub fn new(event: &RequestEvent) -> Self {
        Self::with_strictness(event, true)
    }

    /// Like [`Arguments::new`] but without the declared-fields-only read
    /// rule. For handlers that genuinely need free-form bodies.
    pub fn lenient(event: &RequestEvent) -> Self {
        Self::with_strictness(event, false)
    }

    /// Toggle rejection of request fields no declaration accounts for.
    pub fn enforce_unexpected(mut self, enabled: bool) -> Self {
        self.enforce_unexpected = enabled;
        self
    }

    fn with_strictness(event: &RequestEvent, strict_access: bool) -> Self {
        let (tree, error) = match parse_body(event) {
            Ok(tree) => (Some(tree), None),
            Err(parse_error) => (None, Some(parse_error)),
        };
        Self {
            tree,
            required: Schema::new(),
            optional: Schema::new(),
            combined: Schema::new(),
            error,
            state: AccessState::new(),
            strict_access,
            enforce_unexpected: false,
        }
    }

    // ── declarations ────────────────────────────────────────────────

    /// Declare the required fields, replacing any earlier requirement.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnsupportedDeclarationKind`] for declarations that
    /// cannot name fields, and [`SchemaError::ConflictingSchemaShapes`] when
    /// the new requirement disagrees with the optional schema about a
    /// field's shape. Both mean the handler itself is wrong; abort instead
    /// of answering the client.
    pub fn require(&mut self, decl: impl IntoDecl) -> Result<(), SchemaError> {
        let required = decl.into_decl()?.normalize();
        let combined = required.merge(&self.optional)?;
        self.required = required;
        self.combined = combined;
        self.state.note_requirements_declared();
        Ok(())
    }

    /// Declare the optional fields, replacing any earlier declaration.
    /// Accepts the same shapes as [`Arguments::require`].
    ///
    /// # Errors
    ///
    /// As for [`Arguments::require`].
    pub fn optional(&mut self, decl: impl IntoDecl) -> Result<(), SchemaError> {
        let optional = decl.into_decl()?.normalize();
        let combined = self.required.merge(&optional)?;
        self.optional = optional;
        self.combined = combined;
        Ok(())
    }

    // ── checks ──────────────────────────────────────────────────────

    /// Whether a request tree exists at all. Marks availability as checked.
    pub fn available(&mut self) -> bool {
        self.state.note_available_checked();
        self.tree.is_some()
    }

    /// Whether every required field is present with the declared shape.
    /// Marks requirements as checked; on failure records the
    /// missing-arguments error unless an earlier failure was recorded.
    pub fn contains_requirements(&mut self) -> bool {
        self.state.note_requirements_checked();
        let satisfied = match &self.tree {
            Some(tree) => satisfies(tree, &self.required),
            None => false,
        };
        if !satisfied {
            let got = self.tree.as_ref().map(present_keys).unwrap_or_default();
            self.record_error(GatewayError::MissingArguments {
                expects: self.required.flatten(),
                got,
            });
        }
        satisfied
    }

    /// Whether the request carries a field no declaration accounts for.
    /// On the first hit records the unexpected-argument error unless an
    /// earlier failure was recorded. An unavailable tree has no keys and
    /// reports `false`.
    pub fn contains_unexpected(&mut self) -> bool {
        let Some(tree) = &self.tree else {
            return false;
        };
        let found = first_unexpected(tree, &self.combined, &KeyPath::root());
        match found {
            Some(at) => {
                self.record_error(GatewayError::UnexpectedArgument { at });
                true
            }
            None => false,
        }
    }

    /// Run the full check sequence and report whether the request must be
    /// rejected.
    ///
    /// All applicable checks run even after one has already failed, so
    /// their state side effects happen exactly as if called individually;
    /// only the first failure is recorded. The unexpected-key walk runs
    /// only when enforcement is enabled.
    pub fn should_error(&mut self) -> bool {
        let unavailable = !self.available();
        let missing = !self.contains_requirements();
        let unexpected = self.enforce_unexpected && self.contains_unexpected();
        unavailable || missing || unexpected
    }

    /// The first recorded validation failure, if any.
    pub fn error(&self) -> Option<&GatewayError> {
        self.error.as_ref()
    }

    /// The recorded failure rendered as a response envelope.
    pub fn error_response(&self, allow_cors: bool) -> Option<GatewayResponse> {
        self.error
            .as_ref()
            .map(|error| GatewayResponse::error(error, allow_cors))
    }

    // ── reads ───────────────────────────────────────────────────────

    /// Read one top-level field.
    ///
    /// # Errors
    ///
    /// [`AccessError::UndeclaredFieldAccess`] in strict mode for a field in
    /// neither schema, whatever the check progress;
    /// [`AccessError::PreconditionViolation`] when requirements were
    /// declared but the checks have not all run;
    /// [`AccessError::BodyUnavailable`] when no tree was parsed;
    /// [`AccessError::FieldNotPresent`] when the request simply lacks the
    /// field.
    pub fn get(&self, field: &str) -> Result<&Value, AccessError> {
        let at = KeyPath::root().child(field);
        self.ensure_readable(field, &at)?;
        let tree = self
            .tree
            .as_ref()
            .ok_or_else(|| AccessError::BodyUnavailable { at: at.clone() })?;
        tree.get(field).ok_or(AccessError::FieldNotPresent { at })
    }

    /// Read one top-level field as a scoped view for nested access.
    ///
    /// The view enforces the declared sub-schema at `field`; a leaf
    /// declaration yields an unconstrained view.
    ///
    /// # Errors
    ///
    /// As for [`Arguments::get`].
    pub fn nested(&self, field: &str) -> Result<NestedArgs<'_>, AccessError> {
        let at = KeyPath::root().child(field);
        self.ensure_readable(field, &at)?;
        let tree = self
            .tree
            .as_ref()
            .ok_or_else(|| AccessError::BodyUnavailable { at: at.clone() })?;
        let value = tree
            .get(field)
            .ok_or_else(|| AccessError::FieldNotPresent { at: at.clone() })?;
        let schema = match self.combined.get(field) {
            Some(SchemaNode::Object(sub)) => Some(sub),
            Some(SchemaNode::Leaf) | None => None,
        };
        Ok(NestedArgs::new(value, schema, at))
    }

    fn ensure_readable(&self, field: &str, at: &KeyPath) -> Result<(), AccessError> {
        if !self.strict_access {
            return Ok(());
        }
        // Membership outranks the precondition gate: an undeclared field is
        // refused as undeclared whatever the check progress.
        if !self.combined.contains_key(field) {
            let err = AccessError::UndeclaredFieldAccess { at: at.clone() };
            tracing::error!(error = %err, "undeclared field read");
            return Err(err);
        }
        if !self.state.reads_permitted() {
            let err = AccessError::PreconditionViolation {
                at: at.clone(),
                phase: self.state.phase(),
            };
            tracing::error!(error = %err, "field read before validation");
            return Err(err);
        }
        Ok(())
    }

    // ── plain accessors ─────────────────────────────────────────────

    /// Whether every name in `fields` is a top-level key of the tree.
    /// Data membership, not schema membership; no tree means `false`.
    pub fn contains(&self, fields: &[&str]) -> bool {
        match &self.tree {
            Some(Value::Object(entries)) => {
                fields.iter().all(|field| entries.contains_key(*field))
            }
            _ => false,
        }
    }

    /// Top-level keys of the tree, in map order.
    pub fn keys(&self) -> Vec<&str> {
        match &self.tree {
            Some(Value::Object(entries)) => entries.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// The parsed tree, bypassing the read guard. `None` when parsing
    /// failed.
    pub fn raw(&self) -> Option<&Value> {
        self.tree.as_ref()
    }

    /// The declared required schema.
    pub fn requirements(&self) -> &Schema {
        &self.required
    }

    /// The declared optional schema.
    pub fn optionals(&self) -> &Schema {
        &self.optional
    }

    /// How far the validation checks have progressed.
    pub fn phase(&self) -> AccessPhase {
        self.state.phase()
    }

    fn record_error(&mut self, error: GatewayError) {
        if self.error.is_none() {
            tracing::debug!(error = %error, "recorded validation failure");
            self.error = Some(error);
        }
    }
}

fn parse_body(event: &RequestEvent) -> Result<Value, GatewayError> {
    let Some(raw) = event.body.as_deref() else {
        tracing::warn!("request event carried no body");
        return Err(GatewayError::ParseFailure {
            raw: None,
            detail: "request event carried no body".to_string(),
        });
    };
    // Stray newlines from request-signing middlewares break the parse;
    // strip them first. The recorded raw body stays untouched.
    let cleaned = raw.replace('\n', "");
    serde_json::from_str(&cleaned).map_err(|err| {
        tracing::warn!(error = %err, "request body failed to parse");
        GatewayError::ParseFailure {
            raw: Some(raw.to_string()),
            detail: err.to_string(),
        }
    })
}
