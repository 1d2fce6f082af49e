//! Minimal intake example — a fake transport adapter binding three requests.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example bind
//!
//! The three requests walk the three outcomes a transport sees:
//!   1. a valid interactive request with typed params and a binary body
//!   2. a system-marked request with an upstream-assigned id
//!   3. a request rejected by facet validation (the 400 path)

use intake::{RawRequest, Request, RouteValidation, bytes, schema};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct UploadParams {
    user_id: String,
}

fn main() {
    tracing_subscriber::fmt::init();

    // Declared once, next to the route definition.
    let validation = || {
        RouteValidation::none()
            .params(schema::<UploadParams>())
            .body(bytes())
    };

    // 1. The happy path: typed params, binary body.
    let raw = RawRequest::builder()
        .method(intake::Method::Post)
        .path("/users/{user_id}/avatar")
        .header("content-type", "application/octet-stream")
        .params(json!({ "user_id": "42" }))
        .body_bytes(&b"\x89PNG..."[..])
        .build();
    let req = Request::from_raw_validated(raw, validation()).expect("valid request");
    println!(
        "bound {} {} for user {} ({} body bytes, id {})",
        req.route().method(),
        req.route().path(),
        req.params().user_id,
        req.body().len(),
        req.id(),
    );

    // 2. A system request, already stamped by the proxy in front of us.
    let raw = RawRequest::builder()
        .path("/healthz")
        .header("x-system-request", "true")
        .request_id("proxy-7f3a")
        .build();
    let req = Request::from_raw(raw).expect("valid request");
    println!(
        "bound {} (system: {}, upstream id kept: {})",
        req.route().path(),
        req.is_system_request(),
        req.id(),
    );

    // 3. Bad client input: params don't match the schema. The error names
    //    the facet so the dispatcher can render a useful 400.
    let raw = RawRequest::builder()
        .path("/users/{user_id}/avatar")
        .params(json!({ "user_id": 42 }))
        .body_bytes(&b"\x89PNG..."[..])
        .build();
    match Request::from_raw_validated(raw, validation()) {
        Ok(_) => unreachable!("the schema rejects numeric ids"),
        Err(err) => println!("rejected (client input: {}): {err}", err.is_client_input()),
    }
}
