//! System-request classification.
//!
//! Background jobs, schedulers, and other programmatic clients mark their
//! traffic with a header so downstream layers can treat it differently from
//! interactive traffic (quieter logging, separate throttling buckets —
//! their concern, not ours). This module only answers the question: was
//! this request marked as system traffic?

use http::HeaderMap;

/// The current marker header. `x-system-request: true` flags the request
/// as programmatic.
pub const SYSTEM_REQUEST_HEADER: &str = "x-system-request";

/// The marker header older clients send. Honored for backward
/// compatibility until those clients are gone.
pub const LEGACY_SYSTEM_REQUEST_HEADER: &str = "x-system-api";

/// True iff either marker header carries the exact string `"true"`.
///
/// Any other value — including `"false"`, `"TRUE"`, or an empty string —
/// leaves the request classified as interactive. Header *names* are
/// case-insensitive as usual; the *value* comparison is exact.
pub(crate) fn is_system_request(headers: &HeaderMap) -> bool {
    marker_is_true(headers, SYSTEM_REQUEST_HEADER)
        || marker_is_true(headers, LEGACY_SYSTEM_REQUEST_HEADER)
}

fn marker_is_true(headers: &HeaderMap, name: &str) -> bool {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == "true")
}
