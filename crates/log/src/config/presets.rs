//! Configuration presets for common scenarios

use super::{CloudConfig, Config, find_level};
use crate::core::LogResult;

/// Environment variable with the minimum level name
pub const LOG_LEVEL: &str = "LOG_LEVEL";
/// Environment variable switching to pretty output
pub const LOG_PRETTY: &str = "LOG_PRETTY";
/// Environment variable enabling caller and stack trace capture
pub const LOG_DEBUG: &str = "LOG_DEBUG";
/// Environment variable toggling ANSI colors
pub const LOG_COLORS: &str = "LOG_COLORS";

impl Config {
    /// Create configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns [`LogError::UnknownLevel`](crate::LogError::UnknownLevel) if
    /// `LOG_LEVEL` is set to something [`find_level`] does not accept.
    pub fn from_env() -> LogResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> LogResult<Self> {
        let mut config = Self::default();

        if let Some(level) = lookup(LOG_LEVEL).filter(|v| !v.is_empty()) {
            config.level = find_level(&level)?;
        }
        if let Some(v) = lookup(LOG_PRETTY) {
            config.pretty = parse_flag(&v);
        }
        if let Some(v) = lookup(LOG_DEBUG) {
            config.debug = parse_flag(&v);
        }
        if let Some(v) = lookup(LOG_COLORS) {
            config.colors = parse_flag(&v);
        }

        config.cloud = CloudConfig::from_lookup(lookup);

        Ok(config)
    }

    /// Development configuration (pretty, debug level, caller capture)
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: super::Level::Debug,
            pretty: true,
            debug: true,
            colors: cfg!(feature = "ansi"),
            ..Self::default()
        }
    }

    /// Production configuration (JSON, info level, cloud ids from the environment)
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: super::Level::Info,
            pretty: false,
            debug: false,
            colors: false,
            cloud: CloudConfig::from_env(),
            ..Self::default()
        }
    }
}

fn parse_flag(value: &str) -> bool {
    value != "0" && !value.eq_ignore_ascii_case("false")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Level;
    use crate::core::LogError;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> LogResult<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn lookup_reads_flags_and_level() {
        let config = config(&[
            (LOG_LEVEL, "Warning"),
            (LOG_PRETTY, "true"),
            (LOG_DEBUG, "1"),
            (LOG_COLORS, "false"),
            ("WG_CLOUD_PROJECT_ID", "proj-7"),
        ])
        .unwrap();

        assert_eq!(config.level, Level::Warn);
        assert!(config.pretty);
        assert!(config.debug);
        assert!(!config.colors);
        assert_eq!(config.cloud.project_id.as_deref(), Some("proj-7"));
    }

    #[test]
    fn unknown_level_is_surfaced() {
        let err = config(&[(LOG_LEVEL, "loud")]).unwrap_err();
        assert_eq!(err, LogError::UnknownLevel("loud".into()));
    }

    #[test]
    fn empty_lookup_gives_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.level, Level::Info);
        assert!(!config.pretty);
        assert!(!config.debug);
        assert!(config.cloud.is_empty());
    }

    #[test]
    fn development_is_pretty_debug() {
        let config = Config::development();
        assert!(config.pretty);
        assert!(config.debug);
        assert_eq!(config.level, Level::Debug);
    }
}
