//! Configuration Module
//!
//! Loads server configuration from environment variables, optionally backed
//! by a `key=value` env file.

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AppError, Result};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// How long a rendered page stays cached, in seconds, 0 disables page caching
    pub page_cache_ttl: u64,
    /// Background cleanup task interval in seconds, 0 disables the sweep
    pub cleanup_interval: u64,
    /// JSON file of templates to seed the template store with
    pub templates_path: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `PAGE_CACHE_TTL` - Page TTL in seconds (default: 60, 0 = pages are never cached)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 30, 0 = off)
    /// - `TEMPLATES_PATH` - Template seed file (default: none)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), falling back to values read from
    /// `env_file` for variables the process environment does not set.
    ///
    /// A missing env file is not an error.
    pub fn from_env_with_file(env_file: impl AsRef<Path>) -> Result<Self> {
        let path = env_file.as_ref();
        let file_vars = if path.exists() {
            load_env_file(path)?
        } else {
            HashMap::new()
        };

        Ok(Self::from_lookup(|key| {
            env::var(key).ok().or_else(|| file_vars.get(key).cloned())
        }))
    }

    /// Builds a Config from an arbitrary variable lookup.
    ///
    /// Unparseable values fall back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            server_port: lookup("SERVER_PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.server_port),
            page_cache_ttl: lookup("PAGE_CACHE_TTL")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.page_cache_ttl),
            cleanup_interval: lookup("CLEANUP_INTERVAL")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.cleanup_interval),
            templates_path: lookup("TEMPLATES_PATH")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .or(defaults.templates_path),
        }
    }

    pub fn page_ttl(&self) -> Duration {
        Duration::from_secs(self.page_cache_ttl)
    }

    /// Sweep interval, or `None` when the sweep is disabled.
    pub fn cleanup_interval(&self) -> Option<Duration> {
        (self.cleanup_interval > 0).then(|| Duration::from_secs(self.cleanup_interval))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            page_cache_ttl: 60,
            cleanup_interval: 30,
            templates_path: None,
        }
    }
}

// == Env File ==
/// Reads a `key=value` file.
///
/// Each line is split on its first `=`; lines without one are skipped.
/// Keys and values are taken verbatim, so `A= b` yields the value `" b"`.
pub fn load_env_file(path: impl AsRef<Path>) -> Result<HashMap<String, String>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        AppError::Config(format!("cannot read env file {}: {}", path.display(), e))
    })?;
    Ok(parse_env(&contents))
}

fn parse_env(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
