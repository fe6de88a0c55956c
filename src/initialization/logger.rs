//! Logger initialization.
//!
//! This module provides functions to initialize the logger with custom formatting.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting. Supports both plain text
/// (with colors) and JSON formats for structured logging.
///
/// The provided `level` sets the base level, with noisy server internals
/// (`hyper`, `axum`) held at `info`. Directives in the `RUST_LOG` environment
/// variable are applied on top and win for the modules they name.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=geo_gate=debug geo_gate --center-lat 51.5 --center-lon=-0.12 --radius-km 50
///
/// # Machine-readable output for log shipping
/// geo_gate ... --log-format json
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let rust_log = std::env::var(env_logger::DEFAULT_FILTER_ENV).ok();
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(&filter_directives(level, rust_log.as_deref()));

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };

                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    // try_init() so tests that initialize twice get an error instead of a panic
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// Filter directives for `level`, followed by any `RUST_LOG` directives.
///
/// Later directives for the same module replace earlier ones.
fn filter_directives(level: LevelFilter, rust_log: Option<&str>) -> String {
    let level = level.to_string().to_lowercase();
    let mut directives = format!(
        "{level},hyper=info,hyper_util=info,axum=info,geo_gate={level}",
        level = level
    );
    if let Some(rust_log) = rust_log.map(str::trim).filter(|value| !value.is_empty()) {
        directives.push(',');
        directives.push_str(rust_log);
    }
    directives
}
