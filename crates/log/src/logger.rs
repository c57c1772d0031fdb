//! Logger handle and factory

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use arc_swap::ArcSwap;
use time::OffsetDateTime;
use tracing::dispatcher::DefaultGuard;
use tracing::instrument::{Instrument, Instrumented, WithDispatch, WithSubscriber};
use tracing::span::EnteredSpan;
use tracing::{Dispatch, Span};
use tracing_subscriber::Registry;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;

use crate::base::base_fields;
use crate::config::{CloudConfig, Config, Level};
use crate::core::LogResult;
use crate::encoder::EncoderKind;
use crate::field::Field;
use crate::format::Clock;
use crate::layer::SeverityFilter;
use crate::layer::record::{Core, LoggerState, RecordLayer, attach_state};
use crate::writer;

/// Configured logger
///
/// A root logger owns its own `tracing` dispatcher, so several loggers with
/// different encoders or levels can coexist in one process. Cloning is cheap.
/// [`with`](Self::with) and [`named`](Self::named) return derived loggers that
/// share the root's dispatcher and leave `self` untouched; spans opened under
/// one of them stay visible to the others.
///
/// Records are emitted with the usual `tracing` macros while the logger is
/// installed:
///
/// ```
/// use wg_log::{Level, Logger, info};
///
/// let logger = Logger::new(false, false, Level::Info);
/// logger.scope(|| info!(port = 3002, "listening"));
/// ```
#[derive(Clone)]
pub struct Logger {
    core: Arc<Core>,
    state: Arc<LoggerState>,
    dispatch: Dispatch,
}

/// Keeps a logger installed on the current thread; see [`Logger::set_default`].
#[must_use = "the logger stops being the default when the guard is dropped"]
pub struct LoggerGuard {
    _scope: EnteredSpan,
    _default: DefaultGuard,
}

impl fmt::Debug for LoggerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerGuard").finish_non_exhaustive()
    }
}

impl Logger {
    /// Build a logger writing to stdout.
    ///
    /// Pretty loggers are returned as-is. Structured loggers get the base
    /// fields, with cloud identifiers read from the `WG_CLOUD_*` variables.
    /// With `debug`, every record carries its caller and records from `error`
    /// upwards carry a stack trace.
    pub fn new(pretty: bool, debug: bool, level: Level) -> Self {
        let config = Config::new(pretty, debug, level).with_cloud(CloudConfig::from_env());
        Self::from_config(&config)
    }

    /// Build a logger from explicit configuration; nothing is read from the environment.
    pub fn from_config(config: &Config) -> Self {
        Self::build(config, writer::make_writer(config.writer), OffsetDateTime::now_utc)
    }

    /// Like [`from_config`](Self::from_config), with a caller-supplied writer.
    ///
    /// `config.writer` is ignored.
    pub fn from_config_with_writer<W>(config: &Config, make_writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        Self::build(config, BoxMakeWriter::new(make_writer), OffsetDateTime::now_utc)
    }

    pub(crate) fn build(config: &Config, writer: BoxMakeWriter, clock: Clock) -> Self {
        let context = if config.pretty {
            Vec::new()
        } else {
            base_fields(&config.cloud)
        };
        let state = Arc::new(LoggerState {
            component: None,
            context,
        });
        let core = Arc::new(Core {
            encoder: EncoderKind::select(config.pretty, config.colors),
            writer,
            level: config.level,
            debug: config.debug,
            clock,
            fallback: ArcSwap::new(Arc::clone(&state)),
        });

        let subscriber = Registry::default()
            .with(SeverityFilter::new(core.level))
            .with(RecordLayer::new(Arc::clone(&core)));

        Self {
            core,
            state,
            dispatch: Dispatch::new(subscriber),
        }
    }

    fn derive(&self, state: LoggerState) -> Self {
        Self {
            core: Arc::clone(&self.core),
            state: Arc::new(state),
            dispatch: self.dispatch.clone(),
        }
    }

    /// Derived logger with hostname, pid and cloud identifiers added.
    pub fn attach_base_fields(&self, cloud: &CloudConfig) -> Self {
        self.with(base_fields(cloud))
    }

    /// Derived logger carrying `fields` on every record.
    pub fn with(&self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.derive(LoggerState {
            component: self.state.component.clone(),
            context: self.state.context.iter().cloned().chain(fields).collect(),
        })
    }

    /// Derived logger with `name` appended to the `component` key.
    ///
    /// Names nest with dots: `logger.named("router").named("cache")` logs
    /// `component = "router.cache"`. An empty name returns a plain clone.
    pub fn named(&self, name: &str) -> Self {
        if name.is_empty() {
            return self.clone();
        }
        let component = match &self.state.component {
            Some(parent) => format!("{parent}.{name}"),
            None => name.to_string(),
        };
        self.derive(LoggerState {
            component: Some(component),
            context: self.state.context.clone(),
        })
    }

    /// Minimum level
    #[must_use]
    pub fn level(&self) -> Level {
        self.core.level
    }

    /// Whether records are written with the pretty encoder
    #[must_use]
    pub fn is_pretty(&self) -> bool {
        self.core.encoder.is_pretty()
    }

    /// Whether caller and stack trace capture is on
    #[must_use]
    pub fn is_debug(&self) -> bool {
        self.core.debug
    }

    /// Logger name, if any
    #[must_use]
    pub fn component(&self) -> Option<&str> {
        self.state.component.as_deref()
    }

    /// Fields carried on every record
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.state.context
    }

    /// Whether records at `level` are written
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.core.level
    }

    /// The dispatcher shared by this logger and its relatives.
    ///
    /// Records emitted with only the dispatcher installed, outside any
    /// [`scope`](Self::scope), carry the root logger's fields, or those of the
    /// logger passed to [`init`](Self::init). Prefer
    /// [`instrument`](Self::instrument) for futures.
    #[must_use]
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Open this logger's scope span; the dispatcher must be current.
    fn scope_span(&self) -> Span {
        // ERROR so static max-level features never compile it out.
        let span = tracing::error_span!("wg_log.scope");
        attach_state(&span, &self.state);
        span
    }

    /// Run `f` with this logger installed on the current thread.
    pub fn scope<R>(&self, f: impl FnOnce() -> R) -> R {
        tracing::dispatcher::with_default(&self.dispatch, || self.scope_span().in_scope(f))
    }

    /// Install this logger on the current thread until the guard drops.
    pub fn set_default(&self) -> LoggerGuard {
        let default = tracing::dispatcher::set_default(&self.dispatch);
        LoggerGuard {
            _scope: self.scope_span().entered(),
            _default: default,
        }
    }

    /// Run `future` with this logger installed on every poll.
    ///
    /// Spans current when this is called become parents of the logger's
    /// scope, so a request span opened by the caller stays visible.
    pub fn instrument<F: Future>(&self, future: F) -> WithDispatch<Instrumented<F>> {
        let span = tracing::dispatcher::with_default(&self.dispatch, || self.scope_span());
        future
            .instrument(span)
            .with_subscriber(self.dispatch.clone())
    }

    /// Install this logger as the process-wide dispatcher.
    ///
    /// With the `log-compat` feature, records from the `log` crate are
    /// forwarded as well.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Init`](crate::LogError::Init) if a global
    /// dispatcher is already installed.
    pub fn init(&self) -> LogResult<()> {
        tracing::dispatcher::set_global_default(self.dispatch.clone())?;
        self.core.fallback.store(Arc::clone(&self.state));

        #[cfg(feature = "log-compat")]
        {
            // Another bridge may already be installed; logging still works.
            let _ = tracing_log::LogTracer::init();
        }

        Ok(())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("core", &self.core)
            .field("component", &self.state.component)
            .field("fields", &self.state.context)
            .finish_non_exhaustive()
    }
}
