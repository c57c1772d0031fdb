//! Minimum-level filtering
//!
//! `tracing` tops out at ERROR, while loggers here go up to panic. Plain
//! events are filtered on their `tracing` level; events emitted through
//! [`fatal!`](crate::fatal) and [`panic_log!`](crate::panic_log) are ERROR
//! events carrying a `wg.severity` marker that decides when the minimum is
//! fatal or panic. A marker on any other level, or with a value other than
//! `fatal` or `panic`, is an ordinary field.

use tracing::field::{Field as TracingField, Visit};
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::config::Level;

/// Name of the marker field carrying a severity above ERROR
pub const SEVERITY_FIELD: &str = "wg.severity";

/// Layer that drops records below a minimum [`Level`]
#[derive(Debug, Clone, Copy)]
pub struct SeverityFilter {
    min: Level,
}

impl SeverityFilter {
    /// Create a filter letting `min` and everything above through
    #[must_use]
    pub fn new(min: Level) -> Self {
        Self { min }
    }

    /// Minimum level
    #[must_use]
    pub fn min(&self) -> Level {
        self.min
    }
}

/// Effective level of an event: its severity marker, else its `tracing` level.
pub(crate) fn event_level(event: &Event<'_>) -> Level {
    let metadata = event.metadata();
    let mut visitor = MarkerVisitor {
        metadata,
        level: None,
    };
    event.record(&mut visitor);
    visitor
        .level
        .unwrap_or_else(|| Level::from_tracing(metadata.level()))
}

/// Level named by a marker `value` on an event described by `metadata`.
pub(crate) fn marker_level(metadata: &Metadata<'_>, value: &str) -> Option<Level> {
    if *metadata.level() != tracing::Level::ERROR {
        return None;
    }
    Level::from_marker(value)
}

struct MarkerVisitor<'a> {
    metadata: &'a Metadata<'a>,
    level: Option<Level>,
}

impl Visit for MarkerVisitor<'_> {
    fn record_str(&mut self, field: &TracingField, value: &str) {
        if field.name() == SEVERITY_FIELD {
            self.level = marker_level(self.metadata, value);
        }
    }

    fn record_debug(&mut self, field: &TracingField, value: &dyn std::fmt::Debug) {
        if field.name() == SEVERITY_FIELD {
            self.level = marker_level(self.metadata, &format!("{value:?}"));
        }
    }
}

impl<S> Layer<S> for SeverityFilter
where
    S: Subscriber,
{
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        // Spans only carry fields; keep them so error records still see them.
        metadata.is_span() || *metadata.level() <= self.min.level_filter()
    }

    fn event_enabled(&self, event: &Event<'_>, _ctx: Context<'_, S>) -> bool {
        if self.min <= Level::Error {
            return true;
        }
        event_level(event) >= self.min
    }
}
