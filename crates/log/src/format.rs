//! Format utilities (time, caller)

use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Source of record timestamps
pub(crate) type Clock = fn() -> OffsetDateTime;

const CLOCK_TIME: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second].[subsecond digits:3]");

/// Milliseconds since the Unix epoch, truncated toward zero.
pub fn epoch_millis(t: OffsetDateTime) -> i64 {
    (t.unix_timestamp_nanos() / 1_000_000) as i64
}

/// Wall-clock time of day (`HH:MM:SS.mmm`) for pretty output.
pub(crate) fn clock_time(t: OffsetDateTime) -> String {
    t.format(CLOCK_TIME).unwrap_or_default()
}

/// Caller as `parent/file.rs:line`, keeping only the last two path segments.
pub(crate) fn short_caller(file: &str, line: u32) -> String {
    let file = file.replace('\\', "/");
    let short = match file.rmatch_indices('/').nth(1) {
        Some((idx, _)) => &file[idx + 1..],
        None => file.as_str(),
    };
    format!("{short}:{line}")
}
