//! Application error type with HTTP response conversion.
//!
//! Every failure path in the API ends up as an [`AppError`]. The error carries
//! an [`ErrorKind`] (what went wrong, independent of transport), the HTTP status
//! it is surfaced with, and the underlying [`anyhow::Error`].
//!
//! Client-facing kinds render their message as-is. Server-side kinds
//! (`Internal`, `Configuration`, `StoreUnavailable`) are logged with their full
//! cause and rendered with a generic message so internals never reach clients.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Classification of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No credential, or an empty one.
    Unauthenticated,
    /// Credential present but malformed, wrongly signed or expired.
    InvalidCredential,
    /// Credential valid but the role is not allowed on this route.
    Forbidden,
    NotFound,
    /// The student has already been approved.
    AlreadyApproved,
    BadRequest,
    /// Two allocations raced for the same registration number.
    AllocationConflict,
    /// The record store could not be reached in time.
    StoreUnavailable,
    /// Server misconfiguration, e.g. a missing signing secret.
    Configuration,
    Internal,
}

impl ErrorKind {
    /// Status used when the error is built without an explicit override.
    pub fn default_status(self) -> StatusCode {
        match self {
            ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorKind::InvalidCredential => StatusCode::BAD_REQUEST,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::AlreadyApproved => StatusCode::BAD_REQUEST,
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::AllocationConflict => StatusCode::CONFLICT,
            ErrorKind::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub kind: ErrorKind,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status: kind.default_status(),
            kind,
            error: err.into(),
        }
    }

    /// Overrides the HTTP status while keeping the kind.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, anyhow::anyhow!(message.into()))
    }

    pub fn invalid_credential<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::InvalidCredential, err)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, anyhow::anyhow!(message.into()))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, err)
    }

    pub fn already_approved() -> Self {
        Self::new(
            ErrorKind::AlreadyApproved,
            anyhow::anyhow!("Student is already approved"),
        )
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::BadRequest, err)
    }

    pub fn allocation_conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::AllocationConflict, err)
    }

    pub fn store_unavailable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::StoreUnavailable, err)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, anyhow::anyhow!(message.into()))
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::internal(anyhow::anyhow!(message.into()))
    }

    /// The message shown to clients.
    fn public_message(&self) -> String {
        match self.kind {
            ErrorKind::InvalidCredential => "Invalid Token".to_string(),
            ErrorKind::StoreUnavailable => "Service temporarily unavailable".to_string(),
            ErrorKind::Configuration => "Server configuration error".to_string(),
            ErrorKind::Internal => "Internal server error".to_string(),
            _ => self.error.to_string(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.kind {
            ErrorKind::Configuration => {
                tracing::error!(error = %self.error, "Configuration error, operator action required");
            }
            ErrorKind::Internal | ErrorKind::StoreUnavailable => {
                tracing::error!(error = ?self.error, kind = ?self.kind, "Request failed");
            }
            _ => {}
        }

        let body = match self.kind {
            ErrorKind::InvalidCredential => json!({
                "error": self.public_message(),
                "details": self.error.to_string(),
            }),
            _ => json!({ "error": self.public_message() }),
        };

        (self.status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
