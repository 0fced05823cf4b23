//! Shared utility functions used across multiple modules.

use std::sync::atomic::{AtomicI64, Ordering};

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Check if a string starts with `http://` or `https://`.
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Normalize a user-entered URL: trim and default the scheme to `https://`.
///
/// Returns an empty string when the input is blank.
#[must_use]
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || is_http_url(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Truncate text to at most 180 characters for error messages.
pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}

/// Current Unix timestamp in milliseconds.
pub fn unix_timestamp_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

static LAST_LOCAL_ID_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Generate a local-synthetic record id: `{prefix}{epoch millis}`.
///
/// Two calls in the same millisecond still produce distinct ids; the
/// timestamp component is bumped past the last one handed out.
#[must_use]
pub fn local_id(prefix: &str) -> String {
    let now = unix_timestamp_millis();
    let mut candidate = now;
    loop {
        let last = LAST_LOCAL_ID_MILLIS.load(Ordering::Relaxed);
        if candidate <= last {
            candidate = last + 1;
        }
        if LAST_LOCAL_ID_MILLIS
            .compare_exchange_weak(last, candidate, Ordering::Relaxed, Ordering::Relaxed)
            .is_ok()
        {
            return format!("{prefix}{candidate}");
        }
    }
}
