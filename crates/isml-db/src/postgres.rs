use async_trait::async_trait;
use isml_models::students::{ApprovalCandidate, Student};
use sqlx::PgPool;
use tracing::instrument;

use crate::error::StoreError;
use crate::students::StudentRecordStore;

#[derive(Debug, Clone)]
pub struct PgStudentStore {
    db: PgPool,
}

impl PgStudentStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentRecordStore for PgStudentStore {
    #[instrument(skip(self))]
    async fn find_approval_candidate(
        &self,
        student_id: i64,
    ) -> Result<Option<ApprovalCandidate>, StoreError> {
        let candidate = sqlx::query_as::<_, ApprovalCandidate>(
            r#"
            SELECT s.student_id, s.status, st.state_name, c.center_name
            FROM students s
            LEFT JOIN states st ON st.state_id = s.state_id
            LEFT JOIN centers c ON c.center_id = s.center_id
            WHERE s.student_id = $1
            "#,
        )
        .bind(student_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(candidate)
    }

    #[instrument(skip(self))]
    async fn next_registration_sequence(&self) -> Result<i64, StoreError> {
        let value = sqlx::query_scalar::<_, i64>("SELECT nextval('registration_number_seq')")
            .fetch_one(&self.db)
            .await?;

        Ok(value)
    }

    #[instrument(skip(self))]
    async fn mark_approved(
        &self,
        student_id: i64,
        registration_number: &str,
    ) -> Result<Option<Student>, StoreError> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            WITH updated AS (
                UPDATE students
                SET status = TRUE, registration_number = $2, approved_at = NOW()
                WHERE student_id = $1 AND status = FALSE AND registration_number IS NULL
                RETURNING student_id, state_id, center_id, status, registration_number,
                          created_at, approved_at
            )
            SELECT u.student_id, u.state_id, u.center_id, st.state_name, c.center_name,
                   u.status, u.registration_number, u.created_at, u.approved_at
            FROM updated u
            LEFT JOIN states st ON st.state_id = u.state_id
            LEFT JOIN centers c ON c.center_id = u.center_id
            "#,
        )
        .bind(student_id)
        .bind(registration_number)
        .fetch_optional(&self.db)
        .await?;

        Ok(student)
    }
}
