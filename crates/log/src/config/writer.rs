//! Writer configuration

use std::io::{self, IsTerminal};

use serde::{Deserialize, Serialize};

/// Where records are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
#[non_exhaustive]
pub enum WriterConfig {
    /// Write to stdout
    #[default]
    Stdout,
    /// Write to stderr
    Stderr,
}

impl WriterConfig {
    /// Whether the target stream is attached to a terminal
    #[must_use]
    pub fn is_terminal(self) -> bool {
        match self {
            Self::Stdout => io::stdout().is_terminal(),
            Self::Stderr => io::stderr().is_terminal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stdout_is_default() {
        assert_eq!(WriterConfig::default(), WriterConfig::Stdout);
    }

    #[test]
    fn tagged_serde_form() {
        let json = serde_json::to_string(&WriterConfig::Stderr).unwrap();
        assert_eq!(json, r#"{"type":"stderr"}"#);
        let back: WriterConfig = serde_json::from_str(r#"{"type":"stdout"}"#).unwrap();
        assert_eq!(back, WriterConfig::Stdout);
    }
}
