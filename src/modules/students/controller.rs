use crate::middleware::auth::AuthUser;
use crate::modules::students::model::{ApproveStudentDto, ApproveStudentResponse, ErrorResponse};
use crate::modules::students::service::{ApprovalWorkflow, student_not_found};
use crate::state::AppState;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use isml_core::AppError;
use isml_core::serde::SuppliedId;
use tracing::instrument;

#[utoipa::path(
    post,
    path = "/api/students/approve",
    request_body = ApproveStudentDto,
    responses(
        (status = 200, description = "Student approved successfully", body = ApproveStudentResponse),
        (status = 400, description = "Missing student ID, unknown student, already approved, or invalid token", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Role not allowed", body = ErrorResponse),
        (status = 409, description = "Registration number conflict, retry", body = ErrorResponse),
        (status = 503, description = "Record store unavailable", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn approve_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    payload: Result<Json<ApproveStudentDto>, JsonRejection>,
) -> Result<Json<ApproveStudentResponse>, AppError> {
    // An unreadable body is treated like one without an id.
    let dto = payload.map(|Json(dto)| dto).unwrap_or_default();

    let student_id = match dto.student_id {
        None => return Err(AppError::bad_request(anyhow::anyhow!("Student ID is required"))),
        Some(SuppliedId::Numeric(id)) => id,
        // Present but not an id any student can have.
        Some(SuppliedId::Unrecognized(raw)) => {
            tracing::debug!(student_id = %raw, "Unusable student id");
            return Err(student_not_found());
        }
    };

    let student = ApprovalWorkflow::approve(state.students.as_ref(), student_id, &auth_user.0).await?;

    Ok(Json(ApproveStudentResponse {
        message: "Student approved successfully".to_string(),
        student,
    }))
}
