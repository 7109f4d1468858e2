//! # Decimal-Safe Payload Encoding
//!
//! JSON numbers that are not integers lose precision the moment they pass
//! through a binary float. Response payloads therefore re-emit every number
//! that is not exactly an `i64`/`u64` as a JSON string of its literal, and
//! this crate's `serde_json` carries the `arbitrary_precision` feature so
//! the literal is the one that entered the system, digit for digit.
//!
//! Clients receive `"19.99"` instead of a possibly-rounded `19.99` and
//! decide their own numeric representation.

use serde_json::Value;

/// Rewrite `value` so every non-integer number becomes a string of its
/// literal. Integers, bools, strings, and nulls pass through unchanged;
/// arrays and objects are rewritten element-wise.
pub fn encode_decimals(value: Value) -> Value {
    match value {
        Value::Number(n) if n.as_i64().is_none() && n.as_u64().is_none() => {
            Value::String(n.to_string())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(encode_decimals).collect()),
        Value::Object(entries) => Value::Object(
            entries
                .into_iter()
                .map(|(key, nested)| (key, encode_decimals(nested)))
                .collect(),
        ),
        other => other,
    }
}
