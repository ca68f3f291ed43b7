//! Shared object key generation for store backends.
//!
//! Key format: `{unix_millis}-{sanitized_name}`.

use chrono::Utc;

use crate::traits::{StoreError, StoreResult};

/// Replace every character outside `[A-Za-z0-9.-]` with `_`.
pub fn sanitize_object_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Generate an object key from the upload's original name and a timestamp.
pub fn generate_object_key(original_name: &str, timestamp_millis: i64) -> String {
    format!("{}-{}", timestamp_millis, sanitize_object_name(original_name))
}

/// Generate an object key stamped with the current time.
pub fn new_object_key(original_name: &str) -> String {
    generate_object_key(original_name, Utc::now().timestamp_millis())
}

/// Public URL of an object: `{base_url}/{bucket}/{key}`.
pub fn object_url(base_url: &str, bucket: &str, key: &str) -> String {
    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        bucket,
        urlencoding::encode(key)
    )
}

/// Reject keys that could escape the bucket.
pub fn validate_object_key(key: &str) -> StoreResult<()> {
    if key.is_empty() || key == "." || key == ".." || key.contains('/') || key.contains('\\') {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}
