use crate::modules::courses::model::{
    CourseResponse, CreateCourseDto, ErrorResponse, MessageResponse, REQUIRED_FIELDS_MESSAGE,
};
use crate::modules::courses::service::CourseService;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use isml_core::AppError;
use tracing::instrument;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created successfully", body = CourseResponse),
        (status = 400, description = "Course name and type are required", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Role not allowed", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Courses"
)]
#[instrument(skip(state, payload))]
pub async fn create_course(
    State(state): State<AppState>,
    payload: Result<Json<CreateCourseDto>, JsonRejection>,
) -> Result<(StatusCode, Json<CourseResponse>), AppError> {
    let required = || AppError::bad_request(anyhow::anyhow!(REQUIRED_FIELDS_MESSAGE));

    let Json(dto) = payload.map_err(|e| {
        tracing::debug!(rejection = %e.body_text(), "Unreadable course body");
        required()
    })?;
    dto.validate().map_err(|_| required())?;

    let (Some(course_name), Some(course_type)) = (dto.course_name, dto.course_type) else {
        return Err(required());
    };

    let course = CourseService::create_course(&state.db, &course_name, &course_type).await?;

    Ok((
        StatusCode::CREATED,
        Json(CourseResponse {
            message: "Course created successfully".to_string(),
            course,
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(
        ("id" = i64, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course deleted successfully", body = MessageResponse),
        (status = 400, description = "Course still used by batches", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Role not allowed", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    CourseService::delete_course(&state.db, id).await?;
    Ok(Json(MessageResponse::new("Course deleted successfully")))
}
