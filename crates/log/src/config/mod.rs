//! Configuration types and builders
//!
//! This module provides configuration types for the logging system, organized into:
//! - `base`: The [`Config`] struct handed to [`Logger::from_config`](crate::Logger::from_config)
//! - `level`: [`Level`] and level-name parsing
//! - `cloud`: Cloud identifiers attached as base fields
//! - `writer`: Output writer selection
//! - `presets`: Pre-configured setups (development, production, environment)

mod base;
mod cloud;
mod level;
mod presets;
mod writer;

// Re-export all public types
pub use base::Config;
pub use cloud::{CloudConfig, WG_CLOUD_DEPLOYMENT_ID, WG_CLOUD_ENVIRONMENT_ID, WG_CLOUD_PROJECT_ID};
pub use level::{Level, find_level};
pub use presets::{LOG_COLORS, LOG_DEBUG, LOG_LEVEL, LOG_PRETTY};
pub use writer::WriterConfig;
