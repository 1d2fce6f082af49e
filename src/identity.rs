//! Per-request identity.
//!
//! Every bound request carries two identifiers:
//!
//! - **id** — the correlation identifier. If an upstream hop (reverse proxy,
//!   earlier middleware) already stamped one, it is used verbatim, opaque
//!   and unvalidated. Otherwise a fresh one is generated.
//! - **uuid** — a process-local unique handle for the request instance.
//!   Sourced independently of `id` under the same prefer-upstream rule.
//!
//! The two are never conflated: an upstream `id` does not stand in for a
//! missing `uuid`, and vice versa.
//!
//! Generation goes through the [`IdGenerator`] trait so tests and embedders
//! can substitute a deterministic source; the default [`RandomIds`] draws
//! UUID v4 values from the process-wide random source, which is safe under
//! concurrent request construction.

use uuid::Uuid;

use crate::raw::UpstreamContext;

// ── IdGenerator ───────────────────────────────────────────────────────────────

/// Source of freshly generated request identifiers.
///
/// Implement this to control identifier generation — most usefully in tests,
/// where a fixed generator makes bound requests fully deterministic:
///
/// ```rust
/// use intake::IdGenerator;
///
/// struct FixedIds;
///
/// impl IdGenerator for FixedIds {
///     fn request_id(&self) -> String { "id-1".to_owned() }
///     fn request_uuid(&self) -> String { "00000000-0000-4000-8000-000000000000".to_owned() }
/// }
/// ```
pub trait IdGenerator: Send + Sync {
    /// A fresh correlation identifier.
    fn request_id(&self) -> String;

    /// A fresh request uuid in canonical 36-character form.
    fn request_uuid(&self) -> String;
}

/// The default generator: UUID v4 for both identifiers.
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn request_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    fn request_uuid(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

// ── RequestIdentity ───────────────────────────────────────────────────────────

/// The identity assigned to one bound request. Immutable once assigned.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequestIdentity {
    id: String,
    uuid: String,
}

impl RequestIdentity {
    /// Resolves identity from the upstream context, generating whatever the
    /// upstream hop did not supply. Infallible.
    pub(crate) fn assign(context: &UpstreamContext, ids: &dyn IdGenerator) -> Self {
        let id = context
            .request_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| ids.request_id());
        let uuid = context
            .request_uuid
            .as_deref()
            .filter(|uuid| !uuid.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| ids.request_uuid());
        Self { id, uuid }
    }

    /// The correlation identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The process-local request uuid.
    pub fn uuid(&self) -> &str {
        &self.uuid
    }
}
