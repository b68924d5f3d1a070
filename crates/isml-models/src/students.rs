//! Student approval models.
//!
//! Student rows are created by the enrollment process outside this service.
//! Only `status` and `registration_number` are ever written here, and only by
//! the approval workflow.

use chrono::{DateTime, Utc};
use isml_core::serde::{SuppliedId, deserialize_supplied_id};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A student row with its state and center names flattened in.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct Student {
    pub student_id: i64,
    pub state_id: Option<i64>,
    pub center_id: Option<i64>,
    pub state_name: Option<String>,
    pub center_name: Option<String>,
    /// `true` once approved. Never goes back to `false`.
    pub status: bool,
    /// Assigned exactly once, on approval.
    pub registration_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
}

/// The fields the approval workflow reads before deciding.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ApprovalCandidate {
    pub student_id: i64,
    pub status: bool,
    pub state_name: Option<String>,
    pub center_name: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ApproveStudentDto {
    /// Integer or numeric string. `null`, `0` and `""` count as missing.
    #[serde(default, deserialize_with = "deserialize_supplied_id")]
    #[schema(value_type = Option<i64>)]
    pub student_id: Option<SuppliedId>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApproveStudentResponse {
    pub message: String,
    pub student: Student,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_id_as_string() {
        let dto: ApproveStudentDto = serde_json::from_str(r#"{"student_id":"42"}"#).unwrap();
        assert_eq!(dto.student_id, Some(SuppliedId::Numeric(42)));
    }

    #[test]
    fn test_unparseable_student_id_is_present() {
        let dto: ApproveStudentDto = serde_json::from_str(r#"{"student_id":"abc"}"#).unwrap();
        assert!(matches!(dto.student_id, Some(SuppliedId::Unrecognized(_))));
    }

    #[test]
    fn test_zero_student_id_is_missing() {
        let dto: ApproveStudentDto = serde_json::from_str(r#"{"student_id":0}"#).unwrap();
        assert!(dto.student_id.is_none());
        let dto: ApproveStudentDto = serde_json::from_str("{}").unwrap();
        assert!(dto.student_id.is_none());
    }
}
