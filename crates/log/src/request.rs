//! Request id propagation
//!
//! A request id travels with the request in an explicit [`RequestContext`]
//! value. Handlers either turn it into a field for a derived logger or open a
//! [`span`](RequestContext::span) so every record inside carries it.
//!
//! ```
//! use wg_log::{Level, Logger, RequestContext, info, with_request_id_from_context};
//!
//! let logger = Logger::new(false, false, Level::Info);
//! let ctx = RequestContext::new().with_request_id("abc123");
//!
//! logger
//!     .with([with_request_id_from_context(Some(&ctx))])
//!     .scope(|| info!("request served"));
//! ```

use serde::{Deserialize, Serialize};

use crate::field::Field;

/// Header carrying the request id between services
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Field name of the request id.
///
/// Must match the name used by the services in front of us so their logs
/// can be joined on it.
pub const REQUEST_ID_FIELD: &str = "reqId";

/// Request-scoped values relevant to logging
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    request_id: Option<String>,
}

impl RequestContext {
    /// Create a new empty context
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set request ID
    #[must_use]
    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    /// Request ID, if one was set
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Open an INFO span carrying the request id as `reqId`.
    ///
    /// Create it while the target logger is the current dispatcher (inside
    /// [`Logger::scope`](crate::Logger::scope) or after
    /// [`Logger::set_default`](crate::Logger::set_default)); records emitted
    /// inside the span pick the field up.
    pub fn span(&self) -> tracing::Span {
        let span = tracing::info_span!("request", reqId = tracing::field::Empty);
        if let Some(id) = &self.request_id {
            span.record(REQUEST_ID_FIELD, id.as_str());
        }
        span
    }
}

/// Request id stored in `ctx`, or `""` when there is no context or no id.
pub fn request_id_from_context(ctx: Option<&RequestContext>) -> String {
    ctx.and_then(RequestContext::request_id)
        .unwrap_or_default()
        .to_string()
}

/// Field carrying `id` under [`REQUEST_ID_FIELD`].
pub fn with_request_id(id: impl Into<String>) -> Field {
    Field::string(REQUEST_ID_FIELD, id)
}

/// [`with_request_id`] applied to [`request_id_from_context`].
pub fn with_request_id_from_context(ctx: Option<&RequestContext>) -> Field {
    with_request_id(request_id_from_context(ctx))
}
