//! Configuration Module
//!
//! Handles loading and managing configuration from environment variables.

use std::env;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// TTL in seconds for cached page content
    pub page_ttl: u64,
    /// Timeout in seconds for outbound page fetches
    pub fetch_timeout: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `PAGE_TTL` - Page cache TTL in seconds (default: 10)
    /// - `FETCH_TIMEOUT` - Outbound fetch timeout in seconds (default: 30)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            page_ttl: env::var("PAGE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            fetch_timeout: env::var("FETCH_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            page_ttl: 10,
            fetch_timeout: 30,
            cleanup_interval: 1,
        }
    }
}
