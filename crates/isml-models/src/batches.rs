//! Batch models and DTOs.
//!
//! A batch belongs to a course and is taught by one teacher at one center.
//! Joined names are flattened into [`Batch`]; which of them are filled in
//! depends on the query that produced the row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

pub const REQUIRED_FIELDS_MESSAGE: &str =
    "All fields are required: batch_name, duration, center, teacher, course_id";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Batch {
    pub batch_id: i64,
    pub batch_name: String,
    pub duration: String,
    /// Center id
    pub center: i64,
    /// Teacher id
    pub teacher: i64,
    pub course_id: i64,
    pub created_at: DateTime<Utc>,
    #[sqlx(default)]
    pub center_name: Option<String>,
    #[sqlx(default)]
    pub teacher_name: Option<String>,
    #[sqlx(default)]
    pub course_name: Option<String>,
    #[sqlx(default)]
    pub course_type: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct CreateBatchDto {
    #[validate(required, length(min = 1, max = 200))]
    pub batch_name: Option<String>,
    #[validate(required, length(min = 1, max = 100))]
    pub duration: Option<String>,
    #[validate(required, range(min = 1))]
    pub center: Option<i64>,
    #[validate(required, range(min = 1))]
    pub teacher: Option<i64>,
    #[validate(required, range(min = 1))]
    pub course_id: Option<i64>,
}

/// A validated [`CreateBatchDto`] with every field present.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBatch {
    pub batch_name: String,
    pub duration: String,
    pub center: i64,
    pub teacher: i64,
    pub course_id: i64,
}

impl CreateBatchDto {
    pub fn into_new_batch(self) -> Option<NewBatch> {
        Some(NewBatch {
            batch_name: self.batch_name?,
            duration: self.duration?,
            center: self.center?,
            teacher: self.teacher?,
            course_id: self.course_id?,
        })
    }
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateBatchDto {
    #[validate(length(min = 1, max = 200))]
    pub batch_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub duration: Option<String>,
    #[validate(range(min = 1))]
    pub center: Option<i64>,
    #[validate(range(min = 1))]
    pub teacher: Option<i64>,
    #[validate(range(min = 1))]
    pub course_id: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BatchResponse {
    pub message: String,
    pub batch: Batch,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BatchListResponse {
    pub success: bool,
    pub data: Vec<Batch>,
}
