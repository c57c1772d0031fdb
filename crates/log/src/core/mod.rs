//! Core components for the wg-log logging system.
//!
//! ### [`error`] - Error handling
//! The [`LogError`] enum and the [`LogResult`] alias returned by every
//! fallible operation in the crate.

pub mod error;

// Re-export core types
pub use error::{LogError, LogResult};
