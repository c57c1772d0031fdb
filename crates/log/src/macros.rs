//! Macros for severities above `tracing`'s ERROR

/// Log at fatal severity.
///
/// Emits an ERROR event with a `wg.severity = "fatal"` marker; loggers report it
/// as `fatal` and a fatal minimum level lets it through. Only logs: shutting
/// the process down is up to the caller.
///
/// ```
/// # let logger = wg_log::Logger::new(false, false, wg_log::Level::Info);
/// # logger.scope(|| {
/// wg_log::fatal!(path = "/etc/router.yaml", "config missing");
/// # });
/// ```
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => {
        $crate::error!(wg.severity = "fatal", $($arg)+)
    };
}

/// Log at panic severity.
///
/// Same as [`fatal!`] with a `panic` marker. Does not panic.
#[macro_export]
macro_rules! panic_log {
    ($($arg:tt)+) => {
        $crate::error!(wg.severity = "panic", $($arg)+)
    };
}
