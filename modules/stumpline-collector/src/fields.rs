//! Field resolution over raw provider records.
//!
//! The search actor has returned records under more than one schema: the
//! timestamp, body, and id each appear under one of two key names depending
//! on the actor version that produced the dataset. Each logical field carries
//! an ordered list of candidate keys; the first key present on the record
//! wins. A record missing every candidate resolves to nothing, never an
//! error.

use serde_json::Value;

/// Candidate keys for the record timestamp, in preference order.
pub const TIMESTAMP_KEYS: &[&str] = &["created_at", "createdAt"];

/// Candidate keys for the tweet body.
pub const TEXT_KEYS: &[&str] = &["full_text", "text"];

/// Candidate keys for the tweet identifier.
pub const ID_KEYS: &[&str] = &["id_str", "id"];

/// Resolve a logical field to a string, trying candidate keys in order.
///
/// Numeric values are stringified, which covers actor versions that ship
/// numeric ids. Null and non-scalar values count as absent.
pub fn resolve_str(record: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        match record.get(key) {
            Some(Value::String(s)) => return Some(s.clone()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => continue,
        }
    }
    None
}
