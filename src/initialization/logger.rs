//! Logger initialization.
//!
//! The library only logs at debug/trace level; everything a user sees comes
//! from the binary. This module sets up `env_logger` for the binary.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::{Level, LevelFilter, Record};

/// Initializes the logger with the specified level and format.
///
/// The logger reads from the `RUST_LOG` environment variable first; the
/// provided `level` then overrides the global and crate filters, so
/// `RUST_LOG=hickory_proto=debug` still works for a dependency while
/// `--log-level` controls this crate.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Show the resolved IP, request path and redirect decisions
/// target_fetch http://example.com --log-level debug
///
/// # Machine-readable logs
/// target_fetch http://example.com --log-format json
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    // hickory logs every truncated/malformed UDP answer at warn level
    builder.filter_module("hickory_proto", LevelFilter::Error);
    builder.filter_module("hickory_resolver", LevelFilter::Warn);
    builder.filter_module("target_fetch", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| writeln!(buf, "{}", json_line(record)));
        }
        LogFormat::Plain => {
            builder.format(|buf, record| writeln!(buf, "{}", plain_line(record)));
        }
    }

    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

fn json_line(record: &Record<'_>) -> String {
    format!(
        "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
        chrono::Utc::now().timestamp_millis(),
        record.level(),
        record.target(),
        serde_json::to_string(&record.args().to_string()).unwrap_or_else(|_| "\"\"".into())
    )
}

fn plain_line(record: &Record<'_>) -> String {
    let level = record.level();
    let colored_level = match level {
        Level::Error => level.to_string().red(),
        Level::Warn => level.to_string().yellow(),
        Level::Info => level.to_string().green(),
        Level::Debug => level.to_string().blue(),
        Level::Trace => level.to_string().purple(),
    };
    format!(
        "{} [{}] {}",
        record.target().cyan(),
        colored_level,
        record.args()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_line_is_valid_json() {
        let line = json_line(
            &Record::builder()
                .args(format_args!("resolved \"example.com\""))
                .level(Level::Debug)
                .target("target_fetch::fetch")
                .build(),
        );
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["level"], "DEBUG");
        assert_eq!(value["target"], "target_fetch::fetch");
        assert_eq!(value["msg"], "resolved \"example.com\"");
    }

    #[test]
    fn test_plain_line_contains_message() {
        colored::control::set_override(false);
        let line = plain_line(
            &Record::builder()
                .args(format_args!("GET /index.html"))
                .level(Level::Info)
                .target("target_fetch")
                .build(),
        );
        assert_eq!(line, "target_fetch [INFO] GET /index.html");
    }

    #[test]
    fn test_init_logger_twice_fails_gracefully() {
        // Only one logger can be installed per process; the second call must
        // report an error instead of panicking.
        let _ = init_logger_with(LevelFilter::Info, LogFormat::Plain);
        assert!(init_logger_with(LevelFilter::Debug, LogFormat::Json).is_err());
    }
}
