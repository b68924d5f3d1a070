use crate::modules::batches::model::{
    Batch, BatchListResponse, BatchResponse, CreateBatchDto, ErrorResponse, MessageResponse,
    REQUIRED_FIELDS_MESSAGE, UpdateBatchDto,
};
use crate::modules::batches::service::BatchService;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use isml_core::AppError;
use tracing::instrument;
use validator::Validate;

fn required_fields() -> AppError {
    AppError::bad_request(anyhow::anyhow!(REQUIRED_FIELDS_MESSAGE))
}

#[utoipa::path(
    post,
    path = "/api/batches",
    request_body = CreateBatchDto,
    responses(
        (status = 201, description = "Batch created successfully", body = BatchResponse),
        (status = 400, description = "Missing fields or invalid course ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Role not allowed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Batches"
)]
#[instrument(skip(state, payload))]
pub async fn create_batch(
    State(state): State<AppState>,
    payload: Result<Json<CreateBatchDto>, JsonRejection>,
) -> Result<(StatusCode, Json<BatchResponse>), AppError> {
    // A body that cannot be read has no fields either.
    let Json(dto) = payload.map_err(|e| {
        tracing::debug!(rejection = %e.body_text(), "Unreadable batch body");
        required_fields()
    })?;

    dto.validate().map_err(|_| required_fields())?;
    let new_batch = dto.into_new_batch().ok_or_else(required_fields)?;

    let batch = BatchService::create_batch(&state.db, new_batch).await?;

    Ok((
        StatusCode::CREATED,
        Json(BatchResponse {
            message: "Batch created successfully".to_string(),
            batch,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/batches",
    responses(
        (status = 200, description = "All batches", body = BatchListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Role not allowed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Batches"
)]
#[instrument(skip(state))]
pub async fn get_batches(State(state): State<AppState>) -> Result<Json<BatchListResponse>, AppError> {
    let data = BatchService::get_batches(&state.db).await?;
    Ok(Json(BatchListResponse {
        success: true,
        data,
    }))
}

#[utoipa::path(
    get,
    path = "/api/batches/{id}",
    params(
        ("id" = i64, Path, description = "Batch ID")
    ),
    responses(
        (status = 200, description = "Batch details", body = Batch),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Role not allowed", body = ErrorResponse),
        (status = 404, description = "Batch not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Batches"
)]
#[instrument(skip(state))]
pub async fn get_batch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Batch>, AppError> {
    let batch = BatchService::get_batch(&state.db, id).await?;
    Ok(Json(batch))
}

#[utoipa::path(
    put,
    path = "/api/batches/{id}",
    params(
        ("id" = i64, Path, description = "Batch ID")
    ),
    request_body = UpdateBatchDto,
    responses(
        (status = 200, description = "Batch updated successfully", body = BatchResponse),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Role not allowed", body = ErrorResponse),
        (status = 404, description = "Batch not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Batches"
)]
#[instrument(skip(state, payload))]
pub async fn update_batch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateBatchDto>, JsonRejection>,
) -> Result<Json<BatchResponse>, AppError> {
    let Json(dto) = payload.map_err(|e| AppError::bad_request(anyhow::anyhow!(e.body_text())))?;

    dto.validate()
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Validation failed: {}", e)))?;

    let batch = BatchService::update_batch(&state.db, id, dto).await?;

    Ok(Json(BatchResponse {
        message: "Batch updated successfully".to_string(),
        batch,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/batches/{id}",
    params(
        ("id" = i64, Path, description = "Batch ID")
    ),
    responses(
        (status = 200, description = "Batch deleted successfully", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Role not allowed", body = ErrorResponse),
        (status = 404, description = "Batch not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Batches"
)]
#[instrument(skip(state))]
pub async fn delete_batch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    BatchService::delete_batch(&state.db, id).await?;
    Ok(Json(MessageResponse::new("Batch deleted successfully")))
}
