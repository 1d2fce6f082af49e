//! Bind-time error type.
//!
//! Two distinct things can go wrong while a raw request is bound, and they
//! demand different treatment upstream:
//!
//! - a **configuration error** — the route itself declares something this
//!   layer refuses to interpret. No client did anything wrong; the route
//!   definition must be fixed. Surfacing it loudly at bind time beats
//!   silently guessing an authentication posture.
//! - a **client-input error** — a facet validator rejected the payload.
//!   The dispatcher translates this into a 400-class response.
//!
//! Construction is all-or-nothing: either every step succeeds and the
//! caller holds a complete [`Request`](crate::Request), or one of these
//! errors comes back and no facade exists.

use serde_json::Value;

use crate::validate::Facet;

/// The error type returned by [`Binder::bind`](crate::Binder::bind).
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    /// The route's authentication declaration is not a recognized shape.
    /// The offending declaration is serialized into the message for
    /// diagnostics.
    #[error("unexpected authentication options: {options} for route: {path}")]
    UnexpectedAuthOptions {
        /// The declaration, compact-JSON-serialized.
        options: String,
        /// The route that declared it.
        path: String,
    },

    /// A facet validator rejected the client-supplied payload.
    #[error("invalid request {facet}: {message}")]
    InvalidFacet {
        /// Which facet was rejected.
        facet: Facet,
        /// The validator's human-readable diagnostic.
        message: String,
        /// Structured diagnostics, suitable for a machine-readable error body.
        details: Vec<Value>,
    },
}

impl BindError {
    /// True for errors the client caused — translate these into a
    /// 400-class response.
    pub fn is_client_input(&self) -> bool {
        matches!(self, Self::InvalidFacet { .. })
    }

    /// True for errors in the route definition itself — these are bugs to
    /// fix, not responses to send.
    pub fn is_configuration(&self) -> bool {
        !self.is_client_input()
    }
}
