//! The bound request facade and its construction entry point.
//!
//! # What binding does
//!
//! [`Binder::bind`] turns one [`RawRequest`] into one [`Request`], in a
//! fixed order:
//!
//! 1. **Identity** — resolve id and uuid (upstream-supplied or generated).
//!    Cannot fail.
//! 2. **Auth requirement** — normalize the route's declaration into the
//!    canonical [`AuthRequirement`]. An unrecognized declaration aborts the
//!    bind with a configuration error.
//! 3. **Headers** — take the policy-filtered copy of the header map.
//! 4. **Classification** — read the system-request markers.
//! 5. **Facets** — run params, query, and body validation. All three run;
//!    the first rejection in that order aborts the bind with a
//!    client-input error.
//!
//! Binding is synchronous and all-or-nothing: there is no partially-bound
//! request, and nothing is shared between the facades of different
//! requests. The result is immutable by construction — every field is
//! private, every accessor borrows.

use http::HeaderMap;
use tracing::{debug, error};

use crate::auth::{self, AuthRequirement};
use crate::error::BindError;
use crate::headers;
use crate::identity::{IdGenerator, RandomIds, RequestIdentity};
use crate::method::Method;
use crate::raw::{RawPayload, RawRequest};
use crate::system;
use crate::validate::{Facet, RouteValidation};

// ── RouteInfo ─────────────────────────────────────────────────────────────────

/// The matched route, as the facade exposes it: path, method, and the
/// canonical authentication requirement.
#[derive(Clone, Debug)]
pub struct RouteInfo {
    path: String,
    method: Method,
    auth_required: AuthRequirement,
}

impl RouteInfo {
    /// The matched route path, e.g. `/users/{id}`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// The canonical authentication requirement. Always one of the three
    /// recognized values — a route declaring anything else never binds.
    pub fn auth_required(&self) -> AuthRequirement {
        self.auth_required
    }
}

// ── Request ───────────────────────────────────────────────────────────────────

/// A bound request: the immutable, validated view handlers receive.
///
/// The type parameters are the handler-visible facet types, fixed by the
/// [`RouteValidation`] used at bind time; an unvalidated facet stays a
/// [`RawPayload`].
///
/// # Example
///
/// ```rust
/// use intake::{RawRequest, Request, RouteValidation, schema};
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Deserialize)]
/// struct UserParams { id: String }
///
/// let raw = RawRequest::builder()
///     .path("/users/{id}")
///     .params(json!({ "id": "42" }))
///     .build();
///
/// let req: Request<UserParams> = Request::from_raw_validated(
///     raw,
///     RouteValidation::none().params(schema::<UserParams>()),
/// )?;
///
/// assert_eq!(req.params().id, "42");
/// # Ok::<(), intake::BindError>(())
/// ```
#[derive(Debug)]
pub struct Request<P = RawPayload, Q = RawPayload, B = RawPayload> {
    identity: RequestIdentity,
    headers: HeaderMap,
    is_system_request: bool,
    route: RouteInfo,
    params: P,
    query: Q,
    body: B,
}

impl Request {
    /// Binds with no validation and the default (secured) policy: every
    /// facet reaches the handler as a [`RawPayload`].
    pub fn from_raw(raw: RawRequest) -> Result<Self, BindError> {
        Binder::new().bind(raw, RouteValidation::none())
    }
}

impl<P, Q, B> Request<P, Q, B> {
    /// Binds with `validation` and the default (secured) policy. Use a
    /// [`Binder`] directly to change the policy or the id source.
    pub fn from_raw_validated(
        raw: RawRequest,
        validation: RouteValidation<P, Q, B>,
    ) -> Result<Self, BindError> {
        Binder::new().bind(raw, validation)
    }

    /// The correlation identifier (upstream-supplied or generated).
    pub fn id(&self) -> &str {
        self.identity.id()
    }

    /// The request uuid (upstream-supplied or generated, independently of
    /// [`id`](Request::id)).
    pub fn uuid(&self) -> &str {
        self.identity.uuid()
    }

    pub fn identity(&self) -> &RequestIdentity {
        &self.identity
    }

    /// The policy-filtered header view. Always a copy owned by this
    /// facade — mutating the transport's map after binding changes
    /// nothing here, and there is no way to mutate this view at all.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Case-insensitive single-header lookup, for the common case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Whether the request was marked as programmatic (system) traffic.
    pub fn is_system_request(&self) -> bool {
        self.is_system_request
    }

    pub fn route(&self) -> &RouteInfo {
        &self.route
    }

    /// Validated path parameters (or the raw payload when unvalidated).
    pub fn params(&self) -> &P {
        &self.params
    }

    /// Validated query (or the raw payload when unvalidated).
    pub fn query(&self) -> &Q {
        &self.query
    }

    /// Validated body (or the raw payload when unvalidated).
    pub fn body(&self) -> &B {
        &self.body
    }

    /// Consumes the facade, yielding the body. For handlers that stream or
    /// forward the payload and don't need the rest of the request anymore.
    pub fn into_body(self) -> B {
        self.body
    }
}

// ── Binder ────────────────────────────────────────────────────────────────────

/// The construction entry point, with its two knobs.
///
/// A binder is cheap to build and reusable across requests; a transport
/// adapter typically configures one per route table and calls
/// [`bind`](Binder::bind) per request.
///
/// ```rust
/// use intake::{Binder, RawRequest, RouteValidation};
///
/// let binder = Binder::new().secured(false); // route opted into raw credentials
/// let req = binder.bind(RawRequest::builder().build(), RouteValidation::none())?;
/// # Ok::<(), intake::BindError>(())
/// ```
pub struct Binder {
    secured: bool,
    ids: Box<dyn IdGenerator>,
}

impl Binder {
    /// Secured policy, random identifiers.
    pub fn new() -> Self {
        Self { secured: true, ids: Box::new(RandomIds) }
    }

    /// Sets the header policy. Secured (the default) withholds the
    /// `authorization` header from handlers; pass `false` only for routes
    /// that genuinely consume raw credentials.
    pub fn secured(mut self, secured: bool) -> Self {
        self.secured = secured;
        self
    }

    /// Replaces the identifier source. Tests use this to make bound
    /// requests deterministic.
    pub fn id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Binds one raw request. See the [module docs](self) for the step
    /// order and failure semantics.
    pub fn bind<P, Q, B>(
        &self,
        raw: RawRequest,
        validation: RouteValidation<P, Q, B>,
    ) -> Result<Request<P, Q, B>, BindError> {
        let identity = RequestIdentity::assign(&raw.context, self.ids.as_ref());

        let auth_required = match auth::normalize(raw.route.auth.as_ref(), &raw.route.path) {
            Ok(requirement) => requirement,
            Err(err) => {
                error!(path = %raw.route.path, "route declares unrecognized authentication options");
                return Err(err);
            }
        };

        let headers = headers::filter(&raw.headers, self.secured);
        let is_system_request = system::is_system_request(&raw.headers);

        // Every facet runs; the first rejection in facet order is the one
        // reported.
        let params = validation.params.apply(raw.params, Facet::Params);
        let query = validation.query.apply(raw.query, Facet::Query);
        let body = validation.body.apply(raw.body, Facet::Body);

        match (params, query, body) {
            (Ok(params), Ok(query), Ok(body)) => {
                let request = Request {
                    identity,
                    headers,
                    is_system_request,
                    route: RouteInfo {
                        path: raw.route.path,
                        method: raw.route.method,
                        auth_required,
                    },
                    params,
                    query,
                    body,
                };
                debug!(
                    id = %request.identity.id(),
                    method = %request.route.method,
                    path = %request.route.path,
                    system = request.is_system_request,
                    "request bound"
                );
                Ok(request)
            }
            (Err(err), _, _) | (_, Err(err), _) | (_, _, Err(err)) => {
                debug!(%err, "request rejected by facet validation");
                Err(err)
            }
        }
    }
}

impl Default for Binder {
    fn default() -> Self {
        Self::new()
    }
}
