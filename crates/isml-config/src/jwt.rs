//! JWT signing configuration.
//!
//! The signing secret is process-wide configuration. It is read once at
//! startup; a missing or blank `SECRET_KEY` is a fatal error rather than a
//! silent bypass of authentication.
//!
//! # Environment Variables
//!
//! - `SECRET_KEY`: HMAC secret used to sign and verify bearer tokens (required)
//! - `JWT_ACCESS_EXPIRY`: lifetime of issued tokens in seconds (default: 3600)

use anyhow::{Result, bail};

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("SECRET_KEY").unwrap_or_default();
        if secret.trim().is_empty() {
            bail!("SECRET_KEY is missing in environment variables");
        }

        Ok(Self {
            secret,
            access_token_expiry: lookup("JWT_ACCESS_EXPIRY")
                .and_then(|s| s.parse().ok())
                .filter(|expiry: &i64| *expiry > 0)
                .unwrap_or(3600), // 1 hour
        })
    }
}
