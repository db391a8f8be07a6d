//! Server configuration.
//!
//! Limits are compile-time constants. Everything deployment-specific comes
//! from environment variables (optionally loaded from `.env` by `main`).

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Room for multipart boundaries and part headers on top of the file itself.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// JSON escaping can grow a byte of uploaded content to six bytes on the
/// loopback analyze request.
pub const MAX_ANALYZE_BODY_BYTES: usize = 6 * MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES;

pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_ANALYZE_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `DOCSIGHT_ADDR`
    pub addr: String,
    /// `API_URL`: base URL the upload handler posts to for analysis.
    pub api_url: String,
    /// `UPLOAD_DIR`
    pub upload_dir: PathBuf,
    /// `ANALYZE_IN_PROCESS`: skip the loopback request and analyze directly.
    pub analyze_in_process: bool,
    /// `ANALYZE_TIMEOUT_SECS`
    pub analyze_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let addr = lookup("DOCSIGHT_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let api_url = lookup("API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("http://localhost:{}", port_of(&addr)));
        let upload_dir = lookup("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR));
        let analyze_in_process = lookup("ANALYZE_IN_PROCESS")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let analyze_timeout = lookup("ANALYZE_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_ANALYZE_TIMEOUT_SECS));

        Self {
            addr,
            api_url,
            upload_dir,
            analyze_in_process,
            analyze_timeout,
        }
    }
}

fn port_of(addr: &str) -> &str {
    addr.rsplit_once(':')
        .map(|(_, port)| port)
        .filter(|port| !port.is_empty())
        .unwrap_or("3000")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.addr, "0.0.0.0:3000");
        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert!(!config.analyze_in_process);
        assert_eq!(config.analyze_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_api_url_follows_port() {
        let config = config_from(&[("DOCSIGHT_ADDR", "127.0.0.1:8088")]);
        assert_eq!(config.api_url, "http://localhost:8088");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("API_URL", "http://analyzer.internal:9000/"),
            ("UPLOAD_DIR", "/var/lib/docsight"),
            ("ANALYZE_IN_PROCESS", "TRUE"),
            ("ANALYZE_TIMEOUT_SECS", "5"),
        ]);
        assert_eq!(config.api_url, "http://analyzer.internal:9000");
        assert_eq!(config.upload_dir, PathBuf::from("/var/lib/docsight"));
        assert!(config.analyze_in_process);
        assert_eq!(config.analyze_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let config = config_from(&[("ANALYZE_TIMEOUT_SECS", "soon")]);
        assert_eq!(config.analyze_timeout, Duration::from_secs(30));
    }
}
