//! Human-readable encoder

use std::io::{self, Write};

use serde_json::Value;

use super::{Encoder, Record};
use crate::config::Level;
use crate::format::clock_time;

/// Terminal-oriented encoder
///
/// ```text
/// 09:05:07.123 INFO  router: request served reqId=abc123 status=200 (src/main.rs:10)
/// ```
///
/// The stack trace, when present, follows on its own indented lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrettyEncoder {
    colors: bool,
}

impl PrettyEncoder {
    /// Create a pretty encoder; `colors` only has an effect with the `ansi` feature.
    #[must_use]
    pub fn new(colors: bool) -> Self {
        Self { colors }
    }

    fn level_label(&self, level: Level) -> String {
        let label = format!("{:<5}", level.as_str().to_uppercase());
        if !self.colors {
            return label;
        }
        colorize_level(level, label)
    }

    fn key_label(&self, key: &str) -> String {
        if !self.colors {
            return key.to_string();
        }
        dim(key)
    }
}

impl Encoder for PrettyEncoder {
    fn encode(&self, record: &Record<'_>, buf: &mut Vec<u8>) -> io::Result<()> {
        write!(
            buf,
            "{} {}",
            clock_time(record.time),
            self.level_label(record.level)
        )?;
        if let Some(component) = record.component {
            write!(buf, " {component}:")?;
        }
        write!(buf, " {}", record.message)?;

        for field in record.context.iter().chain(record.fields) {
            write!(buf, " {}={}", self.key_label(field.key()), render(&field.value))?;
        }
        if let Some(caller) = &record.caller {
            write!(buf, " ({caller})")?;
        }
        buf.push(b'\n');

        if let Some(stacktrace) = &record.stacktrace {
            for line in stacktrace.lines() {
                writeln!(buf, "    {line}")?;
            }
        }
        Ok(())
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) if !s.is_empty() && !s.contains(char::is_whitespace) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(feature = "ansi")]
fn colorize_level(level: Level, label: String) -> String {
    use colored::Colorize;

    match level {
        Level::Debug => label.magenta(),
        Level::Info => label.blue(),
        Level::Warn => label.yellow(),
        Level::Error | Level::Fatal | Level::Panic => label.red(),
    }
    .to_string()
}

#[cfg(not(feature = "ansi"))]
fn colorize_level(_level: Level, label: String) -> String {
    label
}

#[cfg(feature = "ansi")]
fn dim(key: &str) -> String {
    use colored::Colorize;
    key.dimmed().to_string()
}

#[cfg(not(feature = "ansi"))]
fn dim(key: &str) -> String {
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use pretty_assertions::assert_eq;
    use time::macros::datetime;

    fn encode(record: &Record<'_>) -> String {
        let mut buf = Vec::new();
        PrettyEncoder::new(false).encode(record, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn record<'a>(fields: &'a [Field]) -> Record<'a> {
        Record {
            level: Level::Warn,
            time: datetime!(2024-03-01 09:05:07.123_456 UTC),
            component: None,
            caller: None,
            message: "cache miss",
            context: &[],
            fields,
            stacktrace: None,
        }
    }

    #[test]
    fn plain_line() {
        assert_eq!(encode(&record(&[])), "09:05:07.123 WARN  cache miss\n");
    }

    #[test]
    fn fields_component_and_caller() {
        let fields = [
            Field::string("reqId", "abc123"),
            Field::string("path", "/a b"),
            Field::int("status", 200),
        ];
        let mut rec = record(&fields);
        rec.component = Some("router");
        rec.caller = Some("src/main.rs:10".into());

        assert_eq!(
            encode(&rec),
            "09:05:07.123 WARN  router: cache miss reqId=abc123 path=\"/a b\" status=200 (src/main.rs:10)\n"
        );
    }

    #[test]
    fn stacktrace_is_indented() {
        let mut rec = record(&[]);
        rec.level = Level::Error;
        rec.stacktrace = Some("frame one\nframe two".into());

        assert_eq!(
            encode(&rec),
            "09:05:07.123 ERROR cache miss\n    frame one\n    frame two\n"
        );
    }
}
