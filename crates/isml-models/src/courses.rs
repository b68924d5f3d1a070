//! Course models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Course name and type are required";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: i64,
    pub course_name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub course_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct CreateCourseDto {
    #[validate(required, length(min = 1, max = 200))]
    pub course_name: Option<String>,
    #[serde(rename = "type")]
    #[validate(required, length(min = 1, max = 50))]
    pub course_type: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub message: String,
    pub course: Course,
}
