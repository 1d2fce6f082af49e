//! Canonical authentication requirement.
//!
//! Routes declare their authentication needs in a loose shape inherited
//! from the routing layer: absent, the boolean `false`, or an object with a
//! `mode` field. Handlers should never have to re-inspect that union, so
//! the normalizer collapses it into the closed [`AuthRequirement`] enum at
//! bind time — and refuses to bind at all when the declaration is a shape
//! it does not recognize. An unrecognized declaration is a broken route
//! definition, not a bad request.

use serde_json::Value;

use crate::error::BindError;

/// What the route demands of the authentication layer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AuthRequirement {
    /// The request must carry valid credentials.
    Required,
    /// Authentication is switched off for this route.
    Disabled,
    /// Credentials are verified when present, but their absence is fine.
    Optional,
}

/// Maps a raw auth declaration onto [`AuthRequirement`].
///
/// Recognized shapes, in evaluation order: absent → `Required`; `false` →
/// `Disabled`; `{"mode": "required"}` → `Required`; `{"mode": "optional"}`
/// and `{"mode": "try"}` → `Optional` (`try` differs from `optional` only
/// in how failures are answered, which is not this layer's concern).
/// Everything else is rejected with the offending declaration serialized
/// into the error.
pub(crate) fn normalize(auth: Option<&Value>, path: &str) -> Result<AuthRequirement, BindError> {
    let Some(settings) = auth else {
        return Ok(AuthRequirement::Required);
    };
    match settings {
        Value::Bool(false) => Ok(AuthRequirement::Disabled),
        Value::Object(fields) => match fields.get("mode").and_then(Value::as_str) {
            Some("required") => Ok(AuthRequirement::Required),
            Some("optional" | "try") => Ok(AuthRequirement::Optional),
            _ => Err(unexpected(settings, path)),
        },
        _ => Err(unexpected(settings, path)),
    }
}

fn unexpected(settings: &Value, path: &str) -> BindError {
    BindError::UnexpectedAuthOptions {
        // `Value`'s Display is compact JSON, so the broken declaration
        // appears in the message exactly as the route declared it.
        options: settings.to_string(),
        path: path.to_owned(),
    }
}
