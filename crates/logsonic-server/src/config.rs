//! Boot configuration: flags override environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration resolved from flags, env vars, and defaults.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port (without the leading colon).
    pub port: u16,
    /// Base directory for shards and the pattern catalog.
    pub storage_path: PathBuf,
    /// Per-request deadline.
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8080,
            storage_path: default_storage_path(),
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl ServerConfig {
    /// The address string to bind to.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parses a port value that may carry a leading colon (`8080` or `:8080`).
///
/// # Errors
///
/// Returns a message suitable for CLI display when the value is not a
/// valid port number.
pub fn parse_port(raw: &str) -> Result<u16, String> {
    raw.trim_start_matches(':')
        .parse::<u16>()
        .map_err(|_| format!("'{raw}' is not a valid port"))
}

/// The default storage directory: `%APPDATA%\logsonic` on Windows, the
/// working directory's `.logsonic` elsewhere.
#[must_use]
pub fn default_storage_path() -> PathBuf {
    if cfg!(windows) {
        if let Ok(appdata) = env::var("APPDATA") {
            return PathBuf::from(appdata).join("logsonic");
        }
    }
    env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".logsonic")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_port_accepts_bare_and_colon_forms() {
        assert_eq!(parse_port("8080").unwrap(), 8080);
        assert_eq!(parse_port(":9000").unwrap(), 9000);
    }

    #[test]
    fn parse_port_rejects_garbage() {
        assert!(parse_port("http").is_err());
        assert!(parse_port("70000").is_err());
    }

    #[test]
    fn defaults_match_the_documented_contract() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8080);
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.bind_addr(), "localhost:8080");
    }
}
