//! Role-based authorization for route groups.
//!
//! A [`RoleGate`] pairs the token validator with the roles allowed on one
//! route group. [`require_role`] runs it in front of every route of the
//! group, so handlers never see a request that failed authentication or
//! authorization.
//!
//! | Request | Outcome |
//! |---|---|
//! | no `Authorization` header | 401 "Access Denied. No Token Provided." |
//! | `Bearer` with no token | 401 "Access Denied. Token is missing." |
//! | another scheme | 401 "Invalid authorization header format" |
//! | bad signature, malformed, expired | 400 "Invalid Token" |
//! | role not allowed | 403 "Access Denied. You are not authorized." |

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use isml_auth::{Claims, TokenValidator};
use isml_core::{AppError, ErrorKind};

use crate::metrics::track_auth_rejection;
use crate::middleware::auth::AuthUser;

#[derive(Clone, Debug)]
pub struct RoleGate {
    validator: TokenValidator,
    allowed_roles: Arc<[String]>,
}

impl RoleGate {
    pub fn new(validator: TokenValidator, allowed_roles: &[String]) -> Self {
        Self {
            validator,
            allowed_roles: Arc::from(allowed_roles),
        }
    }

    pub fn allowed_roles(&self) -> &[String] {
        &self.allowed_roles
    }

    /// Validates the bearer token in `headers` and checks its role.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<Claims, AppError> {
        let token = bearer_token(headers)?;
        let claims = self.validator.validate(token)?;

        if !claims.has_any_role(self.allowed_roles()) {
            return Err(AppError::forbidden("Access Denied. You are not authorized."));
        }

        Ok(claims)
    }
}

/// Middleware admitting only callers whose role the gate allows.
///
/// # Usage with axum::middleware::from_fn_with_state
///
/// ```rust,ignore
/// let batches = init_batches_router().route_layer(middleware::from_fn_with_state(
///     state.role_gate(RouteGroup::Batches),
///     require_role,
/// ));
/// ```
pub async fn require_role(
    State(gate): State<RoleGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = gate.authorize(req.headers()).inspect_err(|err| {
        track_auth_rejection(rejection_reason(err.kind()));
        tracing::debug!(kind = ?err.kind(), path = %req.uri().path(), "Request rejected by role gate");
    })?;

    req.extensions_mut().insert(AuthUser(claims));
    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .map(|value| {
            value
                .to_str()
                .map_err(|_| AppError::unauthenticated("Invalid authorization header format"))
        })
        .transpose()?
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::unauthenticated("Access Denied. No Token Provided."))?;

    let (scheme, token) = value.split_once(' ').unwrap_or((value, ""));
    // A non-Bearer scheme is a 401 here, never a 400 "Invalid Token".
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AppError::unauthenticated(
            "Invalid authorization header format",
        ));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AppError::unauthenticated("Access Denied. Token is missing."));
    }

    Ok(token)
}

fn rejection_reason(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Unauthenticated => "missing_token",
        ErrorKind::InvalidCredential => "invalid_token",
        ErrorKind::Forbidden => "forbidden",
        ErrorKind::Configuration => "configuration",
        _ => "other",
    }
}
