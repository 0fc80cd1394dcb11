//! Payload fingerprinting and file checksums.
//!
//! One canonical checksum format (`sha256:<hex>`) is used everywhere: for
//! transmitted payloads (change detection), for tracked files (integrity
//! monitoring), and in the persisted state map.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

/// Fingerprint the exact payload that would be transmitted.
///
/// The payload is serialized to canonical JSON (object keys sorted
/// recursively, no insignificant whitespace) before hashing, so the result is
/// independent of map iteration order. Two identical resolved payloads yield
/// identical fingerprints; any change in title, body, status, resolved term
/// set, or metadata changes the fingerprint.
///
/// # Errors
///
/// Returns an error if the payload cannot be represented as JSON.
pub fn fingerprint<T: Serialize>(payload: &T) -> crate::Result<String> {
    let value = serde_json::to_value(payload)?;
    let mut canonical = String::new();
    write_canonical(&value, &mut canonical);
    Ok(content_checksum(&canonical))
}

/// Compute the checksum of string content in the canonical format.
pub fn content_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Compute the checksum of a file's contents in the canonical format.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn file_checksum(path: &Path) -> std::io::Result<String> {
    let content = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(format!("{}{:x}", PREFIX, hasher.finalize()))
}

/// Write `value` as JSON with object keys sorted at every level.
fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String((*key).clone()).to_string());
                out.push(':');
                write_canonical(&map[key.as_str()], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        leaf => out.push_str(&leaf.to_string()),
    }
}
