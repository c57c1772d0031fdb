//! Log levels and level-name parsing

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing_subscriber::filter::LevelFilter;

use crate::core::{LogError, LogResult};

/// Log level, ordered by increasing severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// Debug level
    Debug,
    /// Info level
    #[default]
    Info,
    /// Warn level
    Warn,
    /// Error level
    Error,
    /// Fatal level
    Fatal,
    /// Panic level
    Panic,
}

/// Map a level name to a [`Level`].
///
/// Matching is case-insensitive against `DEBUG`, `INFO`, `WARNING`, `ERROR`,
/// `FATAL` and `PANIC`. There is no partial matching and no fallback: `"warn"`
/// is rejected just like `"nonsense"`.
///
/// # Errors
///
/// Returns [`LogError::UnknownLevel`] carrying `name` verbatim.
pub fn find_level(name: &str) -> LogResult<Level> {
    match name.to_uppercase().as_str() {
        "DEBUG" => Ok(Level::Debug),
        "INFO" => Ok(Level::Info),
        "WARNING" => Ok(Level::Warn),
        "ERROR" => Ok(Level::Error),
        "FATAL" => Ok(Level::Fatal),
        "PANIC" => Ok(Level::Panic),
        _ => Err(LogError::unknown_level(name)),
    }
}

impl Level {
    /// All levels, lowest severity first.
    pub const ALL: [Level; 6] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
        Level::Panic,
    ];

    /// Lowercase name as written into the `level` key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
            Level::Panic => "panic",
        }
    }

    /// Coarsest `tracing` filter that lets this level through.
    ///
    /// `tracing` stops at ERROR, so fatal and panic share its filter and are
    /// told apart later by [`SeverityFilter`](crate::layer::SeverityFilter).
    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        match self {
            Level::Debug => LevelFilter::DEBUG,
            Level::Info => LevelFilter::INFO,
            Level::Warn => LevelFilter::WARN,
            Level::Error | Level::Fatal | Level::Panic => LevelFilter::ERROR,
        }
    }

    /// Level of a plain `tracing` event, with no severity marker.
    #[must_use]
    pub fn from_tracing(level: &tracing::Level) -> Self {
        match *level {
            tracing::Level::TRACE | tracing::Level::DEBUG => Level::Debug,
            tracing::Level::INFO => Level::Info,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::ERROR => Level::Error,
        }
    }

    /// Level whose lowercase name is `name`, ignoring case.
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(name))
    }

    /// Parse the value of a severity marker field.
    ///
    /// Only `fatal` and `panic` are markers; every other value is an
    /// ordinary field value.
    pub(crate) fn from_marker(value: &str) -> Option<Self> {
        Self::from_name(value).filter(|level| *level > Level::Error)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        find_level(s)
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        // Accept our own serialized form ("warn") on top of the level names.
        find_level(&name)
            .or_else(|err| Self::from_name(&name).ok_or(err))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("debug", Level::Debug)]
    #[case("DEBUG", Level::Debug)]
    #[case("Debug", Level::Debug)]
    #[case("info", Level::Info)]
    #[case("iNfO", Level::Info)]
    #[case("warning", Level::Warn)]
    #[case("WARNING", Level::Warn)]
    #[case("error", Level::Error)]
    #[case("Fatal", Level::Fatal)]
    #[case("PANIC", Level::Panic)]
    fn find_level_is_case_insensitive(#[case] name: &str, #[case] expected: Level) {
        assert_eq!(find_level(name).unwrap(), expected);
    }

    #[rstest]
    #[case("nonsense")]
    #[case("warn")]
    #[case("")]
    #[case(" info")]
    #[case("trace")]
    fn find_level_rejects_unknown_names(#[case] name: &str) {
        let err = find_level(name).unwrap_err();
        assert_eq!(err, LogError::UnknownLevel(name.to_string()));
        assert!(err.to_string().contains(name));
    }

    #[test]
    fn levels_are_ordered_by_severity() {
        let mut sorted = Level::ALL;
        sorted.sort();
        assert_eq!(sorted, Level::ALL);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Error < Level::Fatal);
        assert!(Level::Fatal < Level::Panic);
    }

    #[test]
    fn from_str_delegates_to_find_level() {
        assert_eq!("Warning".parse::<Level>().unwrap(), Level::Warn);
        assert!("verbose".parse::<Level>().is_err());
    }

    #[test]
    fn severe_levels_share_error_filter() {
        assert_eq!(Level::Fatal.level_filter(), LevelFilter::ERROR);
        assert_eq!(Level::Panic.level_filter(), LevelFilter::ERROR);
        assert_eq!(Level::Debug.level_filter(), LevelFilter::DEBUG);
    }

    #[rstest]
    #[case("fatal", Some(Level::Fatal))]
    #[case("PANIC", Some(Level::Panic))]
    #[case("error", None)]
    #[case("debug", None)]
    #[case("warn", None)]
    #[case("critical", None)]
    fn only_fatal_and_panic_are_markers(#[case] value: &str, #[case] expected: Option<Level>) {
        assert_eq!(Level::from_marker(value), expected);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Level::Warn).unwrap();
        assert_eq!(json, "\"warn\"");
        assert_eq!(serde_json::from_str::<Level>(&json).unwrap(), Level::Warn);
        assert_eq!(
            serde_json::from_str::<Level>("\"WARNING\"").unwrap(),
            Level::Warn
        );
        assert!(serde_json::from_str::<Level>("\"loud\"").is_err());
    }
}
