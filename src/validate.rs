//! Facet validation.
//!
//! A request has three independently validated facets: path **params**, the
//! **query**, and the **body**. A route declares at most one validator per
//! facet in a [`RouteValidation`]; a facet without a validator passes its
//! [`RawPayload`] through to the handler untyped.
//!
//! Validators come in two forms behind the single [`Validate`] trait:
//!
//! - **Declarative** — [`schema::<T>()`] drives serde deserialization into
//!   any `T: DeserializeOwned`, and [`bytes()`] demands an opaque binary
//!   body. Success produces the typed value; failure produces the engine's
//!   diagnostic.
//! - **A plain function** — any `Fn(RawPayload) -> ValidationOutcome<T>`
//!   closure, for structural checks a schema cannot express. Build the
//!   outcome with [`ValidationOutcome::ok`] / [`ValidationOutcome::bad_request`].
//!
//! Either way the call site never branches on the validator's form — it
//! just gets a [`ValidationOutcome`].

use std::fmt;
use std::marker::PhantomData;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::error::BindError;
use crate::raw::RawPayload;

// ── Facet ─────────────────────────────────────────────────────────────────────

/// One of the three independently validated parts of a request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Facet {
    Params,
    Query,
    Body,
}

impl Facet {
    /// The facet's name as it appears in error messages: `params`, `query`,
    /// or `body`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Params => "params",
            Self::Query  => "query",
            Self::Body   => "body",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ValidationOutcome ─────────────────────────────────────────────────────────

/// The tagged result of running one validator over one facet.
#[derive(Debug)]
pub enum ValidationOutcome<T> {
    /// The payload passed; `T` is the typed value the handler will see.
    Valid(T),
    /// The payload was rejected. `message` is human-readable; `details`
    /// carries whatever structured diagnostics the validator produced.
    Invalid { message: String, details: Vec<Value> },
}

impl<T> ValidationOutcome<T> {
    /// Accepts the payload.
    pub fn ok(value: T) -> Self {
        Self::Valid(value)
    }

    /// Rejects the payload as a client error.
    pub fn bad_request(message: impl Into<String>, details: Vec<Value>) -> Self {
        Self::Invalid { message: message.into(), details }
    }
}

// ── Validate ──────────────────────────────────────────────────────────────────

/// A facet validator: raw payload in, tagged outcome out.
///
/// Implemented by the declarative rules ([`schema`], [`bytes`]) and by any
/// `Fn(RawPayload) -> ValidationOutcome<T>` closure, so route declarations
/// mix the two forms freely.
pub trait Validate<T>: Send + Sync {
    fn validate(&self, raw: RawPayload) -> ValidationOutcome<T>;
}

impl<T, F> Validate<T> for F
where
    F: Fn(RawPayload) -> ValidationOutcome<T> + Send + Sync,
{
    fn validate(&self, raw: RawPayload) -> ValidationOutcome<T> {
        self(raw)
    }
}

// ── Declarative rules ─────────────────────────────────────────────────────────

/// Declarative structural validation: deserializes the facet into `T`.
///
/// Built by [`schema::<T>()`]; the type *is* the schema.
pub struct SchemaRule<T> {
    _type: PhantomData<fn() -> T>,
}

/// Validates a structured facet against `T`'s deserialization rules.
///
/// ```rust
/// use intake::{schema, RouteValidation};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct UserParams { id: String }
///
/// let validation = RouteValidation::none().params(schema::<UserParams>());
/// ```
pub fn schema<T: DeserializeOwned>() -> SchemaRule<T> {
    SchemaRule { _type: PhantomData }
}

impl<T: DeserializeOwned> Validate<T> for SchemaRule<T> {
    fn validate(&self, raw: RawPayload) -> ValidationOutcome<T> {
        match raw {
            RawPayload::Json(value) => match serde_json::from_value(value) {
                Ok(typed) => ValidationOutcome::ok(typed),
                Err(err) => {
                    let category = match err.classify() {
                        serde_json::error::Category::Data => "data",
                        serde_json::error::Category::Syntax => "syntax",
                        serde_json::error::Category::Eof => "eof",
                        serde_json::error::Category::Io => "io",
                    };
                    ValidationOutcome::bad_request(
                        err.to_string(),
                        vec![json!({ "category": category })],
                    )
                }
            },
            RawPayload::Bytes(_) => ValidationOutcome::bad_request(
                "expected structured data, got a binary payload",
                Vec::new(),
            ),
        }
    }
}

/// Declarative rule for opaque binary bodies. Built by [`bytes()`].
pub struct BytesRule;

/// Accepts only a binary payload and yields it as [`Bytes`].
pub fn bytes() -> BytesRule {
    BytesRule
}

impl Validate<Bytes> for BytesRule {
    fn validate(&self, raw: RawPayload) -> ValidationOutcome<Bytes> {
        match raw {
            RawPayload::Bytes(body) => ValidationOutcome::ok(body),
            RawPayload::Json(_) => ValidationOutcome::bad_request(
                "expected a binary payload, got structured data",
                Vec::new(),
            ),
        }
    }
}

// ── RouteValidation ───────────────────────────────────────────────────────────

/// The per-route validation declaration: one optional validator per facet.
///
/// Starts with [`RouteValidation::none()`] (every facet passes through as
/// [`RawPayload`]) and narrows one facet at a time; each builder call fixes
/// that facet's handler-visible type:
///
/// ```rust
/// use intake::{bytes, schema, RouteValidation};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Search { q: String }
///
/// // query typed as Search, body as Bytes, params left raw.
/// let validation = RouteValidation::none()
///     .query(schema::<Search>())
///     .body(bytes());
/// ```
pub struct RouteValidation<P = RawPayload, Q = RawPayload, B = RawPayload> {
    pub(crate) params: FacetValidator<P>,
    pub(crate) query: FacetValidator<Q>,
    pub(crate) body: FacetValidator<B>,
}

impl RouteValidation {
    /// No validation: every facet reaches the handler as [`RawPayload`].
    pub fn none() -> Self {
        Self {
            params: FacetValidator::Passthrough(std::convert::identity),
            query: FacetValidator::Passthrough(std::convert::identity),
            body: FacetValidator::Passthrough(std::convert::identity),
        }
    }
}

impl Default for RouteValidation {
    fn default() -> Self {
        Self::none()
    }
}

impl<P, Q, B> RouteValidation<P, Q, B> {
    /// Validates path params with `rule`; the facade's params become `P2`.
    pub fn params<P2>(self, rule: impl Validate<P2> + 'static) -> RouteValidation<P2, Q, B> {
        RouteValidation {
            params: FacetValidator::Rule(Box::new(rule)),
            query: self.query,
            body: self.body,
        }
    }

    /// Validates the query with `rule`; the facade's query becomes `Q2`.
    pub fn query<Q2>(self, rule: impl Validate<Q2> + 'static) -> RouteValidation<P, Q2, B> {
        RouteValidation {
            params: self.params,
            query: FacetValidator::Rule(Box::new(rule)),
            body: self.body,
        }
    }

    /// Validates the body with `rule`; the facade's body becomes `B2`.
    pub fn body<B2>(self, rule: impl Validate<B2> + 'static) -> RouteValidation<P, Q, B2> {
        RouteValidation {
            params: self.params,
            query: self.query,
            body: FacetValidator::Rule(Box::new(rule)),
        }
    }
}

// ── FacetValidator ────────────────────────────────────────────────────────────

/// One facet's slot in a [`RouteValidation`]: either the identity
/// pass-through (only constructed at `T = RawPayload`) or a boxed rule.
pub(crate) enum FacetValidator<T> {
    Passthrough(fn(RawPayload) -> T),
    Rule(Box<dyn Validate<T>>),
}

impl<T> FacetValidator<T> {
    /// Runs the slot over the raw payload, converting a rejection into the
    /// client-input error for `facet`.
    pub(crate) fn apply(&self, raw: RawPayload, facet: Facet) -> Result<T, BindError> {
        match self {
            Self::Passthrough(pass) => Ok(pass(raw)),
            Self::Rule(rule) => match rule.validate(raw) {
                ValidationOutcome::Valid(value) => Ok(value),
                ValidationOutcome::Invalid { message, details } => {
                    Err(BindError::InvalidFacet { facet, message, details })
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct IdParams {
        id: String,
    }

    #[test]
    fn schema_accepts_matching_structure() {
        let outcome = schema::<IdParams>().validate(RawPayload::Json(json!({ "id": "params" })));
        match outcome {
            ValidationOutcome::Valid(typed) => assert_eq!(typed.id, "params"),
            ValidationOutcome::Invalid { message, .. } => panic!("rejected: {message}"),
        }
    }

    #[test]
    fn schema_rejects_wrong_type_with_diagnostic() {
        let outcome = schema::<IdParams>().validate(RawPayload::Json(json!({ "id": 42 })));
        let ValidationOutcome::Invalid { message, details } = outcome else {
            panic!("expected rejection");
        };
        assert!(message.contains("invalid type"), "unhelpful message: {message}");
        assert_eq!(details, vec![json!({ "category": "data" })]);
    }

    #[test]
    fn schema_rejects_missing_field() {
        let outcome = schema::<IdParams>().validate(RawPayload::Json(json!({})));
        assert!(matches!(outcome, ValidationOutcome::Invalid { .. }));
    }

    #[test]
    fn schema_rejects_binary_payloads() {
        let outcome = schema::<IdParams>().validate(RawPayload::Bytes(Bytes::from_static(b"!")));
        let ValidationOutcome::Invalid { message, .. } = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(message, "expected structured data, got a binary payload");
    }

    #[test]
    fn bytes_rule_accepts_binary() {
        let outcome = bytes().validate(RawPayload::Bytes(Bytes::from_static(b"body!")));
        match outcome {
            ValidationOutcome::Valid(body) => assert_eq!(body.as_ref(), b"body!"),
            ValidationOutcome::Invalid { message, .. } => panic!("rejected: {message}"),
        }
    }

    #[test]
    fn bytes_rule_rejects_structured_data() {
        let outcome = bytes().validate(RawPayload::Json(json!({ "not": "binary" })));
        assert!(matches!(outcome, ValidationOutcome::Invalid { .. }));
    }

    #[test]
    fn closures_are_validators() {
        let even_length = |raw: RawPayload| match raw {
            RawPayload::Bytes(body) if body.len() % 2 == 0 => ValidationOutcome::ok(body),
            _ => ValidationOutcome::bad_request("length must be even", vec![json!("odd")]),
        };

        let ok = even_length.validate(RawPayload::Bytes(Bytes::from_static(b"ab")));
        assert!(matches!(ok, ValidationOutcome::Valid(_)));

        let ValidationOutcome::Invalid { message, details } =
            even_length.validate(RawPayload::Bytes(Bytes::from_static(b"abc")))
        else {
            panic!("expected rejection");
        };
        assert_eq!(message, "length must be even");
        assert_eq!(details, vec![json!("odd")]);
    }

    #[test]
    fn passthrough_slot_hands_the_raw_payload_over() {
        let validation = RouteValidation::none();
        let raw = RawPayload::Json(json!({ "anything": true }));
        let value = validation.params.apply(raw.clone(), Facet::Params).unwrap();
        assert_eq!(value, raw);
    }

    #[test]
    fn rule_rejection_names_the_facet() {
        let validation = RouteValidation::none().query(schema::<IdParams>());
        let err = validation
            .query
            .apply(RawPayload::Json(json!({ "id": 1 })), Facet::Query)
            .unwrap_err();
        let BindError::InvalidFacet { facet, .. } = err else {
            panic!("expected a facet error");
        };
        assert_eq!(facet, Facet::Query);
    }
}
