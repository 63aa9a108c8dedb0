//! Structured logging setup for hosts embedding the router.
//!
//! The library only emits `tracing` events (targets under `routetree::`); it
//! never installs a subscriber itself. Applications that do not already have
//! one can call [`init_logging`] once at startup.
//!
//! ## Environment Variables
//!
//! - `ROUTETREE_LOG_LEVEL` - trace/debug/info/warn/error (default `info`)
//! - `ROUTETREE_LOG_FORMAT` - json/pretty (default `json`)
//! - `ROUTETREE_LOG_TARGET_FILTER` - extra comma-separated `EnvFilter` directives
//! - `ROUTETREE_LOG_INCLUDE_LOCATION` - include file:line (default `false`)
//!
//! `RUST_LOG`, when set, takes precedence over `ROUTETREE_LOG_LEVEL`.

use anyhow::{Context, Result};
use std::env;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: JSON for production, pretty-print for development
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json, // Default to JSON
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log level: trace/debug/info/warn/error
    pub log_level: String,
    /// Log format: json/pretty
    pub format: LogFormat,
    /// Extra filter directives (comma-separated)
    pub target_filter: Option<String>,
    /// Include file:line location
    pub include_location: bool,
}

/// `info`, JSON, no extra directives, no source locations.
impl Default for LogConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl LogConfig {
    /// Parse configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            log_level: lookup("ROUTETREE_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            format: LogFormat::parse(
                &lookup("ROUTETREE_LOG_FORMAT").unwrap_or_else(|| "json".to_string()),
            ),
            target_filter: lookup("ROUTETREE_LOG_TARGET_FILTER"),
            include_location: lookup("ROUTETREE_LOG_INCLUDE_LOCATION")
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        }
    }

    /// The configured level, falling back to `INFO` for unknown names.
    #[must_use]
    pub fn level(&self) -> Level {
        self.log_level.trim().parse().unwrap_or(Level::INFO)
    }

    /// Build the `EnvFilter` described by this configuration.
    ///
    /// Invalid extra directives are skipped.
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        let mut env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level().as_str()));

        let directives = self.target_filter.iter().flat_map(|f| f.split(','));
        for directive in directives.map(str::trim).filter(|d| !d.is_empty()) {
            match directive.parse() {
                Ok(parsed) => env_filter = env_filter.add_directive(parsed),
                Err(_) => eprintln!("Warning: Invalid log filter directive: {}", directive),
            }
        }
        env_filter
    }
}

/// Install a global subscriber according to `config`.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
///
/// # Example
///
/// ```no_run
/// use routetree::logging::{init_logging, LogConfig};
///
/// init_logging(&LogConfig::from_env()).expect("Failed to initialize logging");
/// ```
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("PRETTY"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("invalid"), LogFormat::Json); // Default
    }

    #[test]
    fn test_log_config_from_lookup() {
        let config = LogConfig::from_lookup(|key| match key {
            "ROUTETREE_LOG_LEVEL" => Some("warn".to_string()),
            "ROUTETREE_LOG_FORMAT" => Some("pretty".to_string()),
            "ROUTETREE_LOG_TARGET_FILTER" => Some("routetree=trace".to_string()),
            "ROUTETREE_LOG_INCLUDE_LOCATION" => Some("true".to_string()),
            _ => None,
        });
        assert_eq!(config.level(), Level::WARN);
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.target_filter.as_deref(), Some("routetree=trace"));
        assert!(config.include_location);
    }

    #[test]
    fn test_log_config_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.level(), Level::INFO);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.target_filter, None);
        assert!(!config.include_location);
    }

    #[test]
    fn test_env_filter_adds_target_directives() {
        let config = LogConfig {
            target_filter: Some("routetree=trace, ,".to_string()),
            ..LogConfig::default()
        };
        let rendered = config.env_filter().to_string();
        assert!(rendered.contains("routetree=trace"), "got {rendered}");
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        let mut config = LogConfig::default();
        config.log_level = "chatty".to_string();
        assert_eq!(config.level(), Level::INFO);
    }
}
