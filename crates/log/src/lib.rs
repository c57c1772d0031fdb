//! # wg-log - structured logging for WunderGraph Cloud services
//!
//! Builds `tracing`-backed loggers that write either JSON lines (for log
//! pipelines) or pretty text (for terminals) to stdout.
//!
//! ## Quick Start
//!
//! ```rust
//! use wg_log::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let level = wg_log::find_level("info")?;
//!     let logger = wg_log::new(false, false, level);
//!
//!     let ctx = RequestContext::new().with_request_id("abc123");
//!     logger
//!         .with([with_request_id_from_context(Some(&ctx))])
//!         .scope(|| info!(status = 200, "request served"));
//!     Ok(())
//! }
//! ```
//!
//! A structured record looks like this:
//!
//! ```text
//! {"level":"info","time":1718000000000,"msg":"request served","hostname":"node-1","pid":4242,"reqId":"abc123","status":200}
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod base;
mod config;
pub mod core;
pub mod encoder;
mod field;
mod format;
pub mod layer;
mod logger;
mod macros;
mod request;
mod writer;

// Public API
pub use base::{
    DEPLOYMENT_ID, ENVIRONMENT_ID, HOSTNAME, PID, PROJECT_ID, UNKNOWN_HOST, base_fields,
};
pub use config::{
    CloudConfig, Config, LOG_COLORS, LOG_DEBUG, LOG_LEVEL, LOG_PRETTY, Level,
    WG_CLOUD_DEPLOYMENT_ID, WG_CLOUD_ENVIRONMENT_ID, WG_CLOUD_PROJECT_ID, WriterConfig,
    find_level,
};
pub use crate::core::{LogError, LogResult};
pub use encoder::keys;
pub use field::Field;
pub use format::epoch_millis;
pub use logger::{Logger, LoggerGuard};
pub use request::{
    REQUEST_ID_FIELD, REQUEST_ID_HEADER, RequestContext, request_id_from_context,
    with_request_id, with_request_id_from_context,
};

// Re-export tracing macros
pub use tracing::{Span, debug, error, info, instrument, span, trace, warn};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Field, Level, LogError, LogResult as Result, Logger, RequestContext, debug, error, fatal,
        find_level, info, panic_log, request_id_from_context, warn, with_request_id,
        with_request_id_from_context,
    };

    pub use tracing::{Span, field};
}

/// Build a logger writing to stdout.
///
/// Shorthand for [`Logger::new`]: pretty output when `pretty_logging` is set,
/// caller and stack trace capture when `debug` is set, records below `level`
/// dropped. Structured loggers carry hostname, pid and the `WG_CLOUD_*`
/// identifiers.
pub fn new(pretty_logging: bool, debug: bool, level: Level) -> Logger {
    Logger::new(pretty_logging, debug, level)
}
