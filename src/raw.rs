//! The raw request as handed over by the transport layer.
//!
//! Everything in this module is *untrusted input*. The transport adapter
//! (whatever terminated the connection and matched the route) builds a
//! [`RawRequest`] and hands it to [`Binder::bind`](crate::Binder::bind) —
//! from that point on only the typed, validated [`Request`](crate::Request)
//! is visible to application code. The raw structure is consumed by the
//! bind; nothing keeps a reference back into it.

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use crate::method::Method;

// ── RawPayload ────────────────────────────────────────────────────────────────

/// An unvalidated facet payload (path params, query, or body).
///
/// The transport hands each facet over in one of two shapes: structured data
/// (route params, a parsed query string, a decoded JSON body) or an opaque
/// binary body it did not interpret. Validators decide which shape they
/// accept; without a validator the payload passes through to the handler
/// as-is.
#[derive(Clone, Debug, PartialEq)]
pub enum RawPayload {
    /// Structured data, e.g. `{"id": "42"}` route params.
    Json(Value),
    /// An opaque binary body the transport did not decode.
    Bytes(Bytes),
}

impl RawPayload {
    /// Returns the structured form, if this payload is one.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Bytes(_) => None,
        }
    }

    /// Returns the binary form, if this payload is one.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Json(_) => None,
            Self::Bytes(bytes) => Some(bytes),
        }
    }
}

impl Default for RawPayload {
    /// An absent facet: structured `null`.
    fn default() -> Self {
        Self::Json(Value::Null)
    }
}

// ── Upstream context ──────────────────────────────────────────────────────────

/// Identity assigned by infrastructure that ran before this layer.
///
/// A reverse proxy or an earlier middleware hop may have already stamped the
/// request with an id and/or a uuid. Both fields are optional and
/// independent — one being present says nothing about the other.
#[derive(Clone, Debug, Default)]
pub(crate) struct UpstreamContext {
    pub(crate) request_id: Option<String>,
    pub(crate) request_uuid: Option<String>,
}

// ── Route metadata ────────────────────────────────────────────────────────────

/// The matched route's declared metadata, as the dispatcher recorded it.
///
/// `auth` stays a loose JSON value at this boundary on purpose: it is
/// exactly the shape the routing layer hands over, and the normalizer in
/// this crate is the one place that interprets it. Downstream code only
/// ever sees the canonical [`AuthRequirement`](crate::AuthRequirement).
#[derive(Clone, Debug)]
pub(crate) struct RawRoute {
    pub(crate) path: String,
    pub(crate) method: Method,
    pub(crate) auth: Option<Value>,
}

// ── RawRequest ────────────────────────────────────────────────────────────────

/// A transport-level request, before binding.
///
/// Built by the transport adapter via [`RawRequest::builder`]. The defaults
/// describe the simplest possible request: `GET /`, no headers, no upstream
/// identity, no auth declaration, absent facets.
///
/// # Example
///
/// ```rust
/// use intake::{Method, RawRequest};
/// use serde_json::json;
///
/// let raw = RawRequest::builder()
///     .method(Method::Post)
///     .path("/users")
///     .header("content-type", "application/json")
///     .body_bytes(&br#"{"name":"alice"}"#[..])
///     .params(json!({}))
///     .build();
/// ```
#[derive(Clone, Debug)]
pub struct RawRequest {
    pub(crate) headers: HeaderMap,
    pub(crate) context: UpstreamContext,
    pub(crate) route: RawRoute,
    pub(crate) params: RawPayload,
    pub(crate) query: RawPayload,
    pub(crate) body: RawPayload,
}

impl RawRequest {
    /// Starts building a raw request. See [`RawRequestBuilder`].
    pub fn builder() -> RawRequestBuilder {
        RawRequestBuilder {
            headers: HeaderMap::new(),
            context: UpstreamContext::default(),
            path: "/".to_owned(),
            method: Method::Get,
            auth: None,
            params: RawPayload::default(),
            query: RawPayload::default(),
            body: RawPayload::default(),
        }
    }
}

// ── RawRequestBuilder ─────────────────────────────────────────────────────────

/// Fluent builder for [`RawRequest`].
///
/// Obtain via [`RawRequest::builder()`]. Every setter has a sensible
/// default, so a transport only states what it actually knows.
pub struct RawRequestBuilder {
    headers: HeaderMap,
    context: UpstreamContext,
    path: String,
    method: Method,
    auth: Option<Value>,
    params: RawPayload,
    query: RawPayload,
    body: RawPayload,
}

impl RawRequestBuilder {
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// The matched route path, e.g. `/users/{id}`.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Appends a header entry. Call repeatedly for multi-value headers.
    ///
    /// # Panics
    ///
    /// Panics if `name` or `value` is not a valid HTTP header token. The
    /// transport already parsed these off the wire, so an invalid one here
    /// is a programming error, not bad input.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        let name: HeaderName = name.parse().expect("invalid header name");
        let value: HeaderValue = value.parse().expect("invalid header value");
        self.headers.append(name, value);
        self
    }

    /// Replaces the whole header map, when the transport already has one.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Pre-assigned request id from an upstream hop, used verbatim.
    pub fn request_id(mut self, id: impl Into<String>) -> Self {
        self.context.request_id = Some(id.into());
        self
    }

    /// Pre-assigned request uuid from an upstream hop, used verbatim.
    pub fn request_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.context.request_uuid = Some(uuid.into());
        self
    }

    /// The route's raw authentication declaration, exactly as the routing
    /// layer recorded it. Absent means authentication is required.
    pub fn auth(mut self, auth: Value) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Structured path parameters extracted by the route matcher.
    pub fn params(mut self, params: Value) -> Self {
        self.params = RawPayload::Json(params);
        self
    }

    /// Structured query arguments parsed from the query string.
    pub fn query(mut self, query: Value) -> Self {
        self.query = RawPayload::Json(query);
        self
    }

    /// A structured (decoded) request body.
    pub fn body_json(mut self, body: Value) -> Self {
        self.body = RawPayload::Json(body);
        self
    }

    /// An opaque binary request body.
    pub fn body_bytes(mut self, body: impl Into<Bytes>) -> Self {
        self.body = RawPayload::Bytes(body.into());
        self
    }

    pub fn build(self) -> RawRequest {
        RawRequest {
            headers: self.headers,
            context: self.context,
            route: RawRoute { path: self.path, method: self.method, auth: self.auth },
            params: self.params,
            query: self.query,
            body: self.body,
        }
    }
}
