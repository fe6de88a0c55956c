//! Error handling and admission statistics.
//!
//! This module provides:
//! - Error type definitions for startup and location resolution
//! - Admission statistics tracking (decisions per reason code, resolver timeouts)
//!
//! Only configuration and initialization errors may stop the process. Every
//! per-request failure ends up as a deny decision.

mod stats;
mod types;

// Re-export public API
pub use stats::{AdmissionStats, DecisionCounts};
pub use types::{ConfigError, InitializationError, ResolveError};
