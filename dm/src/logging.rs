//! Logging setup
//!
//! Stdout is the protocol transport, so logs go to a file (the `dm` binary)
//! or to stderr (generated servers), never to stdout.

use std::fs;
use std::path::PathBuf;

use eyre::{Context, Result};
use tracing::info;

/// Where log output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Truncate and write this file
    File(PathBuf),
    Stderr,
}

/// Default log file location: `<data-local-dir>/docmcp/logs/docmcp.log`
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("docmcp")
        .join("logs")
        .join("docmcp.log")
}

/// Parse a level name; unknown names fall back to INFO
pub fn parse_level(level: Option<&str>) -> tracing::Level {
    match level.map(|s| s.to_uppercase()).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    }
}

/// Install the global tracing subscriber
pub fn setup_logging(level: Option<&str>, target: LogTarget) -> Result<()> {
    let level = parse_level(level);
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    match &target {
        LogTarget::File(path) => {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir).context("Failed to create log directory")?;
            }
            let log_file = fs::File::create(path).context("Failed to create log file")?;
            tracing_subscriber::fmt()
                .with_writer(log_file)
                .with_ansi(false)
                .with_env_filter(filter)
                .try_init()
                .map_err(|e| eyre::eyre!("Failed to initialize logging: {}", e))?;
        }
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_env_filter(filter)
                .try_init()
                .map_err(|e| eyre::eyre!("Failed to initialize logging: {}", e))?;
        }
    }

    info!("Logging initialized (level: {:?}, target: {:?})", level, target);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(Some("debug")), tracing::Level::DEBUG);
        assert_eq!(parse_level(Some("Warning")), tracing::Level::WARN);
        assert_eq!(parse_level(None), tracing::Level::INFO);
        assert_eq!(parse_level(Some("chatty")), tracing::Level::INFO);
    }

    #[test]
    fn test_default_log_path() {
        assert!(default_log_path().ends_with("docmcp/logs/docmcp.log"));
    }
}
