//! Error handling for wg-log
//!
//! Only two things can go wrong when setting up a logger: the caller hands us a
//! level name we do not know, or a process-wide logger was already installed.
//! Everything else (hostname lookup, writes to the sink) is recovered locally.

/// Type alias for Result with [`LogError`] for logging operations
pub type LogResult<T> = Result<T, LogError>;

/// Error type for logger setup
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum LogError {
    /// Level name did not match any known level.
    ///
    /// Carries the input verbatim, before upper-casing.
    #[error("unknown log level: {0}")]
    UnknownLevel(String),

    /// Installing the global default dispatcher failed.
    #[error("logger initialization failed: {0}")]
    Init(String),
}

impl LogError {
    /// Convenience constructor for [`LogError::UnknownLevel`].
    pub fn unknown_level(input: impl Into<String>) -> Self {
        Self::UnknownLevel(input.into())
    }

    /// Returns `true` when the caller supplied bad input.
    ///
    /// Startup code typically falls back to a default level on these.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::UnknownLevel(_))
    }
}

impl From<tracing::dispatcher::SetGlobalDefaultError> for LogError {
    fn from(err: tracing::dispatcher::SetGlobalDefaultError) -> Self {
        Self::Init(err.to_string())
    }
}
