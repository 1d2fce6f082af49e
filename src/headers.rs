//! Header exposure policy.
//!
//! Handlers receive a copy of the request headers, never the transport's
//! live map. On a secured route (the default) the `authorization` header is
//! withheld from that copy — credentials are the authentication layer's
//! business, and a handler that never sees them cannot leak them into logs
//! or responses. A route that genuinely needs the raw credential opts out
//! via [`Binder::secured(false)`](crate::Binder::secured).

use http::HeaderMap;
use http::header::AUTHORIZATION;

/// Produces the facade's header view: a shallow copy of every entry, minus
/// the sensitive ones when `secured`.
pub(crate) fn filter(raw: &HeaderMap, secured: bool) -> HeaderMap {
    let mut headers = raw.clone();
    if secured {
        headers.remove(AUTHORIZATION);
    }
    headers
}
