//! Core configuration types

use serde::{Deserialize, Serialize};

use super::{CloudConfig, Level, WriterConfig};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum level; lower records are dropped
    pub level: Level,

    /// Human-readable output instead of JSON lines
    pub pretty: bool,

    /// Capture caller on every record and a stack trace from `error` upwards
    pub debug: bool,

    /// Use ANSI colors in pretty output
    pub colors: bool,

    /// Output writer configuration
    pub writer: WriterConfig,

    /// Cloud identifiers attached as base fields (JSON output only)
    pub cloud: CloudConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: Level::Info,
            pretty: false,
            debug: false,
            colors: default_colors(WriterConfig::Stdout, WriterConfig::is_terminal),
            writer: WriterConfig::Stdout,
            cloud: CloudConfig::default(),
        }
    }
}

impl Config {
    /// Configuration for the given factory flags, cloud ids left empty.
    #[must_use]
    pub fn new(pretty: bool, debug: bool, level: Level) -> Self {
        Self {
            level,
            pretty,
            debug,
            ..Self::default()
        }
    }

    /// Set the minimum level
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the cloud identifiers
    #[must_use]
    pub fn with_cloud(mut self, cloud: CloudConfig) -> Self {
        self.cloud = cloud;
        self
    }

    /// Set the writer and detect colors again for its stream
    #[must_use]
    pub fn with_writer(mut self, writer: WriterConfig) -> Self {
        self.writer = writer;
        self.colors = default_colors(writer, WriterConfig::is_terminal);
        self
    }
}

/// Colors are on by default when the writer's stream is a terminal.
fn default_colors(writer: WriterConfig, is_terminal: impl Fn(WriterConfig) -> bool) -> bool {
    cfg!(feature = "ansi") && is_terminal(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn colors_follow_configured_stream() {
        let stderr_only = |writer: WriterConfig| writer == WriterConfig::Stderr;

        assert_eq!(
            default_colors(WriterConfig::Stderr, stderr_only),
            cfg!(feature = "ansi")
        );
        assert!(!default_colors(WriterConfig::Stdout, stderr_only));
    }

    #[test]
    fn with_writer_detects_colors_for_new_stream() {
        let config = Config::default().with_writer(WriterConfig::Stderr);
        assert_eq!(config.writer, WriterConfig::Stderr);
        assert_eq!(
            config.colors,
            default_colors(WriterConfig::Stderr, WriterConfig::is_terminal)
        );
    }
}
