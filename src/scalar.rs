//! The scalar-literal check.
//!
//! Deciding whether a bare token such as `true`, `-0.5e3` or `0123` is a
//! JSON scalar is delegated to `serde_json`. Nothing is materialized: the
//! text is deserialized into `IgnoredAny`, which walks the grammar without
//! range-checking numbers, so `1e400` is accepted like any other exponent.

use serde::de::IgnoredAny;

/// Returns `true` if `text` is, in its entirety, a JSON scalar literal.
///
/// Objects and arrays are not scalars and are rejected even when the text
/// is otherwise valid JSON.
pub fn is_scalar_literal(text: &str) -> bool {
    let trimmed = text.trim_start();
    if trimmed.starts_with(['{', '[']) {
        return false;
    }
    serde_json::from_str::<IgnoredAny>(text).is_ok()
}
