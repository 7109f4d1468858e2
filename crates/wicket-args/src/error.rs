//! # Access Errors — Field Reads the Handler Was Not Entitled To
//!
//! Every variant here is a bug in the calling handler, not in the request:
//! reading before the validation checks ran, reading a field no declaration
//! covers, or probing a level that has no nested schema. They abort
//! handling and are never rendered into a client response — the fix is a
//! code change, not a corrected request.

use thiserror::Error;

use wicket_schema::KeyPath;

use crate::state::AccessPhase;

/// Rejected field access.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// A field was read before the validation checks ran.
    #[error("trying to access {at} before the validation checks have run (request is {phase})")]
    PreconditionViolation {
        /// The field the handler tried to read.
        at: KeyPath,
        /// How far the checks had progressed.
        phase: AccessPhase,
    },

    /// A field was read that no declaration covers.
    #[error("trying to access {at} which is not required nor optional")]
    UndeclaredFieldAccess { at: KeyPath },

    /// A declared field was read but the request does not carry it.
    #[error("{at} is not present in this request")]
    FieldNotPresent { at: KeyPath },

    /// A read was attempted although no request tree exists.
    #[error("no request tree available when reading {at}")]
    BodyUnavailable { at: KeyPath },

    /// A strict exhaustiveness check ran at a level without a nested schema.
    #[error("no nested schema declared at {at}")]
    NoSchemaAtThisLevel { at: KeyPath },
}
