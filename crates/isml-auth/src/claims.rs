//! Bearer token claims.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decoded identity carried by a bearer token.
///
/// Only `role` drives authorization. The remaining identity fields are kept
/// for logging and for handlers that want to know who is acting; unknown
/// fields issued by other services are preserved in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user identifier)
    #[serde(default)]
    pub sub: String,
    /// Role checked by the route gates, e.g. `academic` or `manager`
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Expiration timestamp (Unix seconds). Checked when present; a token
    /// without one does not expire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>,
    /// Issued-at timestamp (Unix seconds)
    #[serde(default)]
    pub iat: usize,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }

    pub fn has_any_role<S: AsRef<str>>(&self, roles: &[S]) -> bool {
        roles.iter().any(|r| self.has_role(r.as_ref()))
    }
}
