//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults, limits, environment variable names)
//! - CLI option types and parsing
//! - The library `Config` and its validation into a geo-fence

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, Opt};
