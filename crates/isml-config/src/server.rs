//! HTTP server and observability settings.
//!
//! # Environment Variables
//!
//! - `PORT`: listening port (default: 3005)
//! - `LOG_DIR`: directory for rolling log files (default: `storage/logs`)
//! - `OBSERVABILITY_ENABLED`: set to `false` or `0` to disable the
//!   Prometheus recorder and request metrics (default: enabled)

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub log_dir: String,
    pub observability_enabled: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            port: lookup("PORT").and_then(|s| s.parse().ok()).unwrap_or(3005),
            log_dir: lookup("LOG_DIR").unwrap_or_else(|| "storage/logs".to_string()),
            observability_enabled: lookup("OBSERVABILITY_ENABLED")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),
        }
    }
}
