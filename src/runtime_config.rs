//! # Runtime Configuration Module
//!
//! Router tuning loaded from environment variables or a TOML file.
//!
//! ## Environment Variables
//!
//! ### `ROUTETREE_SLOW_MATCH_US`
//!
//! Matches that take longer than this many microseconds are logged at `warn`.
//! Default: `1000` (1 ms)
//!
//! ### `ROUTETREE_STRIP_QUERY`
//!
//! Whether [`RouteMatcher::match_path`](crate::router::RouteMatcher::match_path)
//! drops everything from the first `?`. Default: `true`
//!
//! Unparseable values fall back to the default.
//!
//! ## TOML
//!
//! ```toml
//! slow_match_threshold_us = 250
//! strip_query = false
//! ```
//!
//! Missing keys take their default.
//!
//! ## Usage
//!
//! ```rust
//! use routetree::runtime_config::RouterConfig;
//!
//! let config = RouterConfig::from_env();
//! println!("Slow match threshold: {:?}", config.slow_match_threshold());
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::path::Path;
use std::time::Duration;

const DEFAULT_SLOW_MATCH_US: u64 = 1000;

/// Router configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
    /// Log matches slower than this at `warn` (microseconds)
    pub slow_match_threshold_us: u64,
    /// Drop the query string before splitting raw paths
    pub strip_query: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            slow_match_threshold_us: DEFAULT_SLOW_MATCH_US,
            strip_query: true,
        }
    }
}

impl RouterConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            slow_match_threshold_us: lookup("ROUTETREE_SLOW_MATCH_US")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.slow_match_threshold_us),
            strip_query: lookup("ROUTETREE_STRIP_QUERY")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.strip_query),
        }
    }

    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Fails on malformed TOML, wrongly typed values or unknown keys.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("Failed to parse router configuration")
    }

    /// Read and parse a TOML file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read router configuration from {}", path.display()))?;
        Self::from_toml_str(&raw)
            .with_context(|| format!("Invalid router configuration in {}", path.display()))
    }

    #[must_use]
    pub fn slow_match_threshold(&self) -> Duration {
        Duration::from_micros(self.slow_match_threshold_us)
    }
}
