//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Initial key index capacity, 0 selects the index default
    pub index_size_hint: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Directory static files are served from
    pub serve_dir: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 10)
    /// - `INDEX_SIZE_HINT` - Key index capacity hint (default: 0)
    /// - `SERVER_PORT` - HTTP server port (default: 3490)
    /// - `SERVE_DIR` - Document root (default: ./serverroot)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            index_size_hint: parse_var("INDEX_SIZE_HINT").unwrap_or(defaults.index_size_hint),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            serve_dir: env::var_os("SERVE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.serve_dir),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 10,
            index_size_hint: 0,
            server_port: 3490,
            serve_dir: PathBuf::from("./serverroot"),
        }
    }
}
