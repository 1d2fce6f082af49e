//! # intake
//!
//! A typed, validated request boundary for Rust HTTP services.
//! Raw transport requests in, immutable typed requests out.
//! Nothing more. Nothing less.
//!
//! ## The contract
//!
//! The transport owns sockets, TLS, parsing, and route matching. The
//! dispatcher owns responses, authentication *execution*, and error
//! rendering. intake owns the seam between them: the moment a matched raw
//! request becomes the object a route handler is allowed to see.
//!
//! What the transport / dispatcher already owns — intake intentionally
//! ignores:
//!
//! - **Connection handling** — accept loops, TLS, timeouts
//! - **Route matching** — the raw request arrives already matched
//! - **Authentication decisions** — intake normalizes what a route
//!   *demands*, never checks credentials
//! - **Response rendering** — a [`BindError`] says *what* went wrong;
//!   turning it into a status code is the dispatcher's job
//!
//! What's left for intake — the part that otherwise gets reimplemented,
//! slightly differently, in every handler:
//!
//! - **Identity** — a stable per-request id and uuid, upstream-supplied or
//!   freshly generated
//! - **Header policy** — handlers get an immutable copy of the headers,
//!   with credentials withheld unless the route opts out
//! - **Auth normalization** — the route's loose auth declaration collapses
//!   to [`AuthRequirement`], or the route refuses to bind
//! - **System-request classification** — programmatic traffic is flagged
//!   for downstream policy
//! - **Facet validation** — params, query, and body are each checked by a
//!   declarative schema or a custom function, yielding typed values or a
//!   precise client error
//!
//! ## Quick start
//!
//! ```rust
//! use intake::{RawRequest, Request, RouteValidation, bytes, schema};
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Deserialize)]
//! struct UserParams { id: String }
//!
//! #[derive(Deserialize)]
//! struct Pagination { page: u32 }
//!
//! // Built by your transport adapter, one per incoming request:
//! let raw = RawRequest::builder()
//!     .path("/users/{id}/avatar")
//!     .params(json!({ "id": "42" }))
//!     .query(json!({ "page": 1 }))
//!     .body_bytes(&b"\x89PNG..."[..])
//!     .build();
//!
//! // Declared once per route:
//! let validation = RouteValidation::none()
//!     .params(schema::<UserParams>())
//!     .query(schema::<Pagination>())
//!     .body(bytes());
//!
//! let req = Request::from_raw_validated(raw, validation)?;
//!
//! assert_eq!(req.params().id, "42");
//! assert_eq!(req.query().page, 1);
//! assert!(req.body().starts_with(b"\x89PNG"));
//! assert_eq!(req.uuid().len(), 36);
//! # Ok::<(), intake::BindError>(())
//! ```

mod auth;
mod error;
mod headers;
mod identity;
mod method;
mod raw;
mod request;
mod system;
mod validate;

pub use auth::AuthRequirement;
pub use error::BindError;
pub use identity::{IdGenerator, RandomIds, RequestIdentity};
pub use method::Method;
pub use raw::{RawPayload, RawRequest, RawRequestBuilder};
pub use request::{Binder, Request, RouteInfo};
pub use system::{LEGACY_SYSTEM_REQUEST_HEADER, SYSTEM_REQUEST_HEADER};
pub use validate::{
    BytesRule, Facet, RouteValidation, SchemaRule, Validate, ValidationOutcome, bytes, schema,
};
