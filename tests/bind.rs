//! End-to-end tests of the bind entry point: raw request in, typed
//! immutable facade out, exercised the way a transport adapter would.

use bytes::Bytes;
use intake::{
    AuthRequirement, BindError, Binder, Facet, IdGenerator, RawPayload, RawRequest, Request,
    RouteValidation, ValidationOutcome, bytes, schema,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize, PartialEq)]
struct IdParams {
    id: String,
}

#[derive(Debug, Deserialize, PartialEq)]
struct SearchQuery {
    search: String,
}

struct FixedIds;

impl IdGenerator for FixedIds {
    fn request_id(&self) -> String {
        "fixed-id".to_owned()
    }

    fn request_uuid(&self) -> String {
        "00000000-0000-4000-8000-000000000000".to_owned()
    }
}

// ── Identity ──────────────────────────────────────────────────────────────────

#[test]
fn upstream_identity_is_used_verbatim() {
    let raw = RawRequest::builder()
        .request_id("fakeId")
        .request_uuid("123e4567-e89b-12d3-a456-426614174000")
        .build();
    let req = Request::from_raw(raw).unwrap();
    assert_eq!(req.id(), "fakeId");
    assert_eq!(req.uuid(), "123e4567-e89b-12d3-a456-426614174000");
}

#[test]
fn missing_identity_is_generated_independently() {
    // Only an id upstream: the uuid still comes from the generator.
    let raw = RawRequest::builder().request_id("fakeId").build();
    let req = Binder::new()
        .id_generator(FixedIds)
        .bind(raw, RouteValidation::none())
        .unwrap();
    assert_eq!(req.id(), "fakeId");
    assert_eq!(req.uuid(), "00000000-0000-4000-8000-000000000000");
}

#[test]
fn generated_ids_never_collide_across_binds() {
    let first = Request::from_raw(RawRequest::builder().build()).unwrap();
    let second = Request::from_raw(RawRequest::builder().build()).unwrap();
    assert_ne!(first.id(), second.id());
    assert_ne!(first.uuid(), second.uuid());
    // Generated uuids are canonical 36-character form.
    assert_eq!(first.uuid().len(), 36);
}

// ── Header policy ─────────────────────────────────────────────────────────────

#[test]
fn headers_are_an_owned_copy() {
    let mut transport_map = http::HeaderMap::new();
    transport_map.insert("custom", http::HeaderValue::from_static("one"));

    let raw = RawRequest::builder().headers(transport_map.clone()).build();
    let req = Request::from_raw(raw).unwrap();
    assert_eq!(req.header("custom"), Some("one"));

    // The transport mutating its own map after the bind cannot reach the
    // facade's view; the copy is owned outright.
    transport_map.insert("custom", http::HeaderValue::from_static("mutated"));
    assert_eq!(req.header("custom"), Some("one"));
}

#[test]
fn secured_by_default_withholds_authorization() {
    let raw = RawRequest::builder()
        .header("custom", "one")
        .header("authorization", "token")
        .build();
    let req = Request::from_raw(raw).unwrap();
    assert_eq!(req.header("custom"), Some("one"));
    assert_eq!(req.header("authorization"), None);
}

#[test]
fn unsecured_exposes_authorization_unchanged() {
    let raw = RawRequest::builder()
        .header("custom", "one")
        .header("authorization", "token")
        .build();
    let req = Binder::new()
        .secured(false)
        .bind(raw, RouteValidation::none())
        .unwrap();
    assert_eq!(req.header("authorization"), Some("token"));
    assert_eq!(req.header("custom"), Some("one"));
}

// ── System-request classification ─────────────────────────────────────────────

#[test]
fn system_marker_classifies_the_request() {
    let req = Request::from_raw(
        RawRequest::builder().header("x-system-request", "true").build(),
    )
    .unwrap();
    assert!(req.is_system_request());

    let req = Request::from_raw(
        RawRequest::builder().header("x-system-request", "false").build(),
    )
    .unwrap();
    assert!(!req.is_system_request());
}

#[test]
fn legacy_system_marker_still_works() {
    let req = Request::from_raw(
        RawRequest::builder().header("x-system-api", "true").build(),
    )
    .unwrap();
    assert!(req.is_system_request());
}

#[test]
fn unmarked_requests_are_not_system() {
    let req = Request::from_raw(RawRequest::builder().header("custom", "one").build()).unwrap();
    assert!(!req.is_system_request());
}

// ── Auth requirement ──────────────────────────────────────────────────────────

#[test]
fn auth_declarations_normalize_to_canonical_values() {
    let cases = [
        (None, AuthRequirement::Required),
        (Some(json!(false)), AuthRequirement::Disabled),
        (Some(json!({ "mode": "required" })), AuthRequirement::Required),
        (Some(json!({ "mode": "optional" })), AuthRequirement::Optional),
        (Some(json!({ "mode": "try" })), AuthRequirement::Optional),
    ];
    for (auth, expected) in cases {
        let mut builder = RawRequest::builder();
        if let Some(auth) = auth {
            builder = builder.auth(auth);
        }
        let req = Request::from_raw(builder.build()).unwrap();
        assert_eq!(req.route().auth_required(), expected);
    }
}

#[test]
fn unrecognized_auth_declaration_aborts_the_bind() {
    let raw = RawRequest::builder().auth(json!({ "strategies": ["session"] })).build();
    let err = Request::from_raw(raw).unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(
        err.to_string(),
        r#"unexpected authentication options: {"strategies":["session"]} for route: /"#
    );
}

#[test]
fn auth_error_message_carries_the_route_path() {
    let raw = RawRequest::builder().path("/admin").auth(json!({})).build();
    let err = Request::from_raw(raw).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unexpected authentication options: {} for route: /admin"
    );
}

// ── Facet validation ──────────────────────────────────────────────────────────

#[test]
fn schema_validation_types_all_three_facets() {
    let raw = RawRequest::builder()
        .params(json!({ "id": "params" }))
        .query(json!({ "search": "query" }))
        .body_bytes(&b"body!"[..])
        .build();
    let req = Request::from_raw_validated(
        raw,
        RouteValidation::none()
            .params(schema::<IdParams>())
            .query(schema::<SearchQuery>())
            .body(bytes()),
    )
    .unwrap();

    assert_eq!(req.params().id, "params");
    // The facet is genuinely string-typed now, not a loose value.
    assert_eq!(req.params().id.to_uppercase(), "PARAMS");
    assert_eq!(req.query().search.to_uppercase(), "QUERY");
    assert_eq!(req.body().as_ref(), b"body!");
    assert!(!req.body().is_empty());
}

#[test]
fn custom_function_validates_the_body() {
    let buffer_only = |raw: RawPayload| match raw {
        RawPayload::Bytes(data) => ValidationOutcome::ok(data),
        RawPayload::Json(_) => ValidationOutcome::bad_request("It should be a Buffer", Vec::new()),
    };

    let raw = RawRequest::builder()
        .params(json!({ "id": "params" }))
        .body_bytes(&b"body!"[..])
        .build();
    let req = Request::from_raw_validated(
        raw,
        RouteValidation::none().params(schema::<IdParams>()).body(buffer_only),
    )
    .unwrap();
    assert_eq!(req.params().id.to_uppercase(), "PARAMS");
    assert_eq!(req.body(), &Bytes::from_static(b"body!"));

    // A structured body must be rejected as client input naming the facet.
    let raw = RawRequest::builder().body_json(json!({ "not": "a buffer" })).build();
    let err = Request::from_raw_validated(raw, RouteValidation::none().body(buffer_only))
        .unwrap_err();
    assert!(err.is_client_input());
    let BindError::InvalidFacet { facet, message, .. } = err else {
        panic!("expected a facet error");
    };
    assert_eq!(facet, Facet::Body);
    assert_eq!(message, "It should be a Buffer");
}

#[test]
fn mismatched_params_fail_as_client_input_naming_the_facet() {
    let raw = RawRequest::builder().params(json!({ "id": 42 })).build();
    let err = Request::from_raw_validated(
        raw,
        RouteValidation::none().params(schema::<IdParams>()),
    )
    .unwrap_err();
    assert!(err.is_client_input());
    let BindError::InvalidFacet { facet, .. } = err else {
        panic!("expected a facet error");
    };
    assert_eq!(facet, Facet::Params);
}

#[test]
fn earlier_facet_failure_wins_over_later_ones() {
    // Both params and body are invalid; params is the fixed-order winner.
    let raw = RawRequest::builder()
        .params(json!({ "id": 42 }))
        .body_json(json!("should have been bytes"))
        .build();
    let err = Request::from_raw_validated(
        raw,
        RouteValidation::none().params(schema::<IdParams>()).body(bytes()),
    )
    .unwrap_err();
    let BindError::InvalidFacet { facet, .. } = err else {
        panic!("expected a facet error");
    };
    assert_eq!(facet, Facet::Params);
}

#[test]
fn unvalidated_facets_pass_through_raw() {
    let raw = RawRequest::builder()
        .params(json!({ "anything": ["goes", 1, null] }))
        .build();
    let req = Request::from_raw(raw).unwrap();
    assert_eq!(
        req.params(),
        &RawPayload::Json(json!({ "anything": ["goes", 1, null] }))
    );
}
