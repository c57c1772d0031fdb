//! Layer that resolves `tracing` events into [`Record`]s and writes them
//!
//! All loggers derived from one root share a single dispatcher. A logger's
//! component and context fields travel in a scope span opened by
//! [`Logger::scope`](crate::Logger::scope) and friends; the innermost scope
//! span above an event decides which logger it belongs to.

use std::backtrace::Backtrace;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::field::{Field as TracingField, Visit};
use tracing::span::{Attributes, Id, Record as SpanRecord};
use tracing::{Event, Metadata, Span, Subscriber};
use tracing_subscriber::Registry;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use super::severity::{SEVERITY_FIELD, marker_level};
use crate::config::Level;
use crate::encoder::{Encoder, EncoderKind, Record};
use crate::field::Field;
use crate::format::{Clock, short_caller};

/// Name and fields of one logger
#[derive(Debug, Default)]
pub(crate) struct LoggerState {
    pub(crate) component: Option<String>,
    pub(crate) context: Vec<Field>,
}

/// Settings shared by a logger and every logger derived from it
pub(crate) struct Core {
    pub(crate) encoder: EncoderKind,
    pub(crate) writer: BoxMakeWriter,
    pub(crate) level: Level,
    pub(crate) debug: bool,
    pub(crate) clock: Clock,
    /// Logger used for records emitted outside any scope span
    pub(crate) fallback: ArcSwap<LoggerState>,
}

impl fmt::Debug for Core {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Core")
            .field("encoder", &self.encoder)
            .field("level", &self.level)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

/// Fields recorded on a span, stored in the span's extensions
#[derive(Debug, Default)]
struct SpanFields(Vec<Field>);

impl SpanFields {
    fn upsert(&mut self, field: Field) {
        match self.0.iter_mut().find(|f| f.key == field.key) {
            Some(existing) => existing.value = field.value,
            None => self.0.push(field),
        }
    }
}

/// Marks a span as a logger scope
struct ScopeState(Arc<LoggerState>);

/// Make `span` a scope span for `state`.
///
/// No-op when the span is disabled or not backed by a [`Registry`].
pub(crate) fn attach_state(span: &Span, state: &Arc<LoggerState>) {
    span.with_subscriber(|(id, dispatch)| {
        let Some(registry) = dispatch.downcast_ref::<Registry>() else {
            return;
        };
        if let Some(span) = registry.span(id) {
            span.extensions_mut().replace(ScopeState(Arc::clone(state)));
        }
    });
}

/// Layer encoding every event with the encoder and fields of its logger
pub(crate) struct RecordLayer {
    core: Arc<Core>,
}

impl RecordLayer {
    pub(crate) fn new(core: Arc<Core>) -> Self {
        Self { core }
    }
}

impl<S> Layer<S> for RecordLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut visitor = FieldVisitor::for_span();
        attrs.record(&mut visitor);

        let mut fields = SpanFields::default();
        for field in visitor.fields {
            fields.upsert(field);
        }
        span.extensions_mut().insert(fields);
    }

    fn on_record(&self, id: &Id, values: &SpanRecord<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut visitor = FieldVisitor::for_span();
        values.record(&mut visitor);

        let mut extensions = span.extensions_mut();
        if let Some(fields) = extensions.get_mut::<SpanFields>() {
            for field in visitor.fields {
                fields.upsert(field);
            }
        } else {
            extensions.insert(SpanFields(visitor.fields));
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = FieldVisitor::for_event(metadata);
        event.record(&mut visitor);

        let level = visitor
            .severity
            .unwrap_or_else(|| Level::from_tracing(metadata.level()));
        if level < self.core.level {
            return;
        }

        let mut state = None;
        let mut fields = Vec::new();
        if let Some(spans) = ctx.event_scope(event) {
            for span in spans.from_root() {
                let extensions = span.extensions();
                if let Some(scope) = extensions.get::<ScopeState>() {
                    state = Some(Arc::clone(&scope.0));
                }
                if let Some(span_fields) = extensions.get::<SpanFields>() {
                    fields.extend(span_fields.0.iter().cloned());
                }
            }
        }
        fields.extend(visitor.fields);
        let state = state.unwrap_or_else(|| self.core.fallback.load_full());

        let caller = if self.core.debug {
            metadata
                .file()
                .map(|file| short_caller(file, metadata.line().unwrap_or(0)))
        } else {
            None
        };
        let stacktrace =
            (self.core.debug && level >= Level::Error).then(|| Backtrace::force_capture().to_string());

        let record = Record {
            level,
            time: (self.core.clock)(),
            component: state.component.as_deref(),
            caller,
            message: visitor.message.as_deref().unwrap_or_default(),
            context: &state.context,
            fields: &fields,
            stacktrace,
        };

        let mut buf = Vec::with_capacity(256);
        if self.core.encoder.encode(&record, &mut buf).is_ok() {
            let mut writer = self.core.writer.make_writer_for(metadata);
            // Write errors cannot be surfaced from a layer.
            let _ = writer.write_all(&buf);
        }
    }
}

/// Collects message, severity marker and remaining fields of an event or span
struct FieldVisitor {
    /// Set for events; span fields are never severity markers
    event: Option<&'static Metadata<'static>>,
    message: Option<String>,
    severity: Option<Level>,
    fields: Vec<Field>,
}

impl FieldVisitor {
    fn for_span() -> Self {
        Self {
            event: None,
            message: None,
            severity: None,
            fields: Vec::new(),
        }
    }

    fn for_event(metadata: &'static Metadata<'static>) -> Self {
        Self {
            event: Some(metadata),
            ..Self::for_span()
        }
    }

    fn marker(&self, field: &TracingField, value: &str) -> Option<Level> {
        if field.name() != SEVERITY_FIELD {
            return None;
        }
        self.event.and_then(|metadata| marker_level(metadata, value))
    }

    fn push(&mut self, field: &TracingField, value: serde_json::Value) {
        self.fields.push(Field::json(field.name(), value));
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &TracingField, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        } else if let Some(level) = self.marker(field, value) {
            self.severity = Some(level);
        } else {
            self.push(field, value.into());
        }
    }

    fn record_i64(&mut self, field: &TracingField, value: i64) {
        self.push(field, value.into());
    }

    fn record_u64(&mut self, field: &TracingField, value: u64) {
        self.push(field, value.into());
    }

    fn record_i128(&mut self, field: &TracingField, value: i128) {
        match i64::try_from(value) {
            Ok(value) => self.push(field, value.into()),
            Err(_) => self.push(field, value.to_string().into()),
        }
    }

    fn record_u128(&mut self, field: &TracingField, value: u128) {
        match u64::try_from(value) {
            Ok(value) => self.push(field, value.into()),
            Err(_) => self.push(field, value.to_string().into()),
        }
    }

    fn record_f64(&mut self, field: &TracingField, value: f64) {
        self.push(field, value.into());
    }

    fn record_bool(&mut self, field: &TracingField, value: bool) {
        self.push(field, value.into());
    }

    fn record_error(&mut self, field: &TracingField, value: &(dyn std::error::Error + 'static)) {
        self.push(field, value.to_string().into());
    }

    fn record_debug(&mut self, field: &TracingField, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        if field.name() == "message" {
            self.message = Some(rendered);
        } else if let Some(level) = self.marker(field, &rendered) {
            self.severity = Some(level);
        } else {
            self.push(field, rendered.into());
        }
    }
}
