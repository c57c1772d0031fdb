//! Record encoders
//!
//! A [`Record`] is the fully resolved form of one log call: level, timestamp,
//! message and every field that applies to it. An [`Encoder`] turns it into
//! bytes for the writer. Two encoders ship with the crate:
//!
//! - [`JsonEncoder`]: one JSON object per line, fixed key names (see [`keys`])
//! - [`PrettyEncoder`]: aligned, optionally colored text for terminals

mod json;
mod pretty;

use std::io;

use time::OffsetDateTime;

use crate::config::Level;
use crate::field::Field;

pub use json::JsonEncoder;
pub use pretty::PrettyEncoder;

/// Fixed key names of the structured record schema
pub mod keys {
    /// Level name
    pub const LEVEL: &str = "level";
    /// Message
    pub const MESSAGE: &str = "msg";
    /// Logger name
    pub const COMPONENT: &str = "component";
    /// Call site, `dir/file.rs:line`
    pub const CALLER: &str = "caller";
    /// Milliseconds since the Unix epoch
    pub const TIME: &str = "time";
    /// Captured stack trace
    pub const STACKTRACE: &str = "stacktrace";
}

/// One resolved log record
#[derive(Debug, Clone)]
pub struct Record<'a> {
    /// Effective severity
    pub level: Level,
    /// When the record was created
    pub time: OffsetDateTime,
    /// Logger name, if the logger was named
    pub component: Option<&'a str>,
    /// Call site, only captured in debug mode
    pub caller: Option<String>,
    /// Event message
    pub message: &'a str,
    /// Fields carried by the logger itself (base fields, `Logger::with`)
    pub context: &'a [Field],
    /// Span fields, outermost first, followed by the event's own fields
    pub fields: &'a [Field],
    /// Stack trace, only captured in debug mode from `error` upwards
    pub stacktrace: Option<String>,
}

/// Converts records into their output representation
pub trait Encoder: Send + Sync + 'static {
    /// Append the encoded record, including its trailing newline, to `buf`.
    fn encode(&self, record: &Record<'_>, buf: &mut Vec<u8>) -> io::Result<()>;
}

/// Encoder chosen by a logger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderKind {
    /// Structured JSON lines
    Json(JsonEncoder),
    /// Human-readable text
    Pretty(PrettyEncoder),
}

impl EncoderKind {
    /// Pick the pretty encoder when `pretty` is set, JSON otherwise.
    #[must_use]
    pub fn select(pretty: bool, colors: bool) -> Self {
        if pretty {
            Self::Pretty(PrettyEncoder::new(colors))
        } else {
            Self::Json(JsonEncoder::new())
        }
    }

    /// Whether this is the pretty encoder
    #[must_use]
    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty(_))
    }
}

impl Encoder for EncoderKind {
    fn encode(&self, record: &Record<'_>, buf: &mut Vec<u8>) -> io::Result<()> {
        match self {
            Self::Json(encoder) => encoder.encode(record, buf),
            Self::Pretty(encoder) => encoder.encode(record, buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_follows_pretty_flag() {
        assert!(EncoderKind::select(true, false).is_pretty());
        assert!(!EncoderKind::select(false, true).is_pretty());
    }
}
