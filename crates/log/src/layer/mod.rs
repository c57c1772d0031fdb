//! `tracing-subscriber` layers backing a [`Logger`](crate::Logger)
//!
//! Every logger owns a `Registry` with two layers on top:
//! - [`SeverityFilter`]: drops records below the logger's minimum level
//! - `RecordLayer`: resolves events (plus span and logger fields) into
//!   records and hands them to the encoder

pub(crate) mod record;
pub mod severity;

pub use severity::{SEVERITY_FIELD, SeverityFilter};
