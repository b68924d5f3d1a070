use axum::{extract::FromRequestParts, http::request::Parts};
use isml_auth::Claims;
use isml_core::AppError;

/// The claims of the caller, as admitted by the route group's role gate.
///
/// Only available on routes behind [`require_role`](crate::middleware::role::require_role);
/// elsewhere extraction fails with 401.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthenticated("Access Denied. No Token Provided."))
    }
}
