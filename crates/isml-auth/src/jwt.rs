//! Bearer token issuing and validation.
//!
//! Tokens are HS256 JWTs signed with the server-held secret from
//! [`JwtConfig`]. Validation checks the signature, and `exp` when the token
//! carries one, and returns the decoded [`Claims`]. Only `role` is required.
//!
//! # Errors
//!
//! - blank secret: [`ErrorKind::Configuration`](isml_core::ErrorKind::Configuration).
//!   This is a server fault and is kept distinct from a bad token.
//! - empty, malformed, wrongly signed or expired token:
//!   [`ErrorKind::InvalidCredential`](isml_core::ErrorKind::InvalidCredential)
//!
//! # Example
//!
//! ```ignore
//! use isml_auth::{TokenValidator, issue_token};
//!
//! let token = issue_token("user-1", "academic", None, &jwt_config)?;
//! let claims = TokenValidator::new(&jwt_config).validate(&token)?;
//! assert_eq!(claims.role, "academic");
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::Map;

use isml_config::JwtConfig;
use isml_core::AppError;

use crate::claims::Claims;

/// Decodes and verifies bearer tokens against the configured secret.
#[derive(Clone)]
pub struct TokenValidator {
    secret: Arc<str>,
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator")
            .field("secret_configured", &!self.secret.trim().is_empty())
            .finish()
    }
}

impl TokenValidator {
    pub fn new(jwt_config: &JwtConfig) -> Self {
        Self::from_secret(&jwt_config.secret)
    }

    pub fn from_secret(secret: &str) -> Self {
        Self {
            secret: Arc::from(secret),
        }
    }

    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        if self.secret.trim().is_empty() {
            return Err(AppError::configuration(
                "SECRET_KEY is missing in environment variables.",
            ));
        }

        if token.trim().is_empty() {
            return Err(AppError::invalid_credential(anyhow::anyhow!(
                "Token is empty"
            )));
        }

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation(),
        )
        .map(|data| data.claims)
        .map_err(|e| AppError::invalid_credential(anyhow::anyhow!("{:?}", e.kind())))
    }
}

/// HS256 with no mandatory registered claims; `exp` is still enforced
/// whenever it is present.
fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims = HashSet::new();
    validation
}

/// Issues a signed token for `subject` acting with `role`.
pub fn issue_token(
    subject: &str,
    role: &str,
    email: Option<&str>,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    issue_token_with_expiry(subject, role, email, jwt_config.access_token_expiry, jwt_config)
}

/// Same as [`issue_token`] with an explicit lifetime in seconds.
pub fn issue_token_with_expiry(
    subject: &str,
    role: &str,
    email: Option<&str>,
    expiry_secs: i64,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    if jwt_config.secret.trim().is_empty() {
        return Err(AppError::configuration(
            "SECRET_KEY is missing in environment variables.",
        ));
    }

    let now = Utc::now().timestamp();
    let exp = now.saturating_add(expiry_secs).max(0) as usize;

    let claims = Claims {
        sub: subject.to_string(),
        role: role.to_string(),
        email: email.map(str::to_string),
        exp: Some(exp),
        iat: now as usize,
        extra: Map::new(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}
