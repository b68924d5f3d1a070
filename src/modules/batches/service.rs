use crate::modules::batches::model::{Batch, NewBatch, UpdateBatchDto};
use anyhow::anyhow;
use isml_core::AppError;
use isml_db::db_error;
use sqlx::PgPool;
use tracing::instrument;

/// Batch columns with the center, teacher and course names joined in.
const BATCH_SELECT: &str = r#"
    SELECT b.batch_id, b.batch_name, b.duration, b.center, b.teacher, b.course_id, b.created_at,
           c.center_name, u.name AS teacher_name, co.course_name, co.type AS course_type
    FROM batches b
    LEFT JOIN centers c ON c.center_id = b.center
    LEFT JOIN teachers t ON t.teacher_id = b.teacher
    LEFT JOIN users u ON u.id = t.user_id
    LEFT JOIN courses co ON co.id = b.course_id
"#;

pub struct BatchService;

impl BatchService {
    #[instrument(skip(db))]
    pub async fn create_batch(db: &PgPool, batch: NewBatch) -> Result<Batch, AppError> {
        let (course_name, course_type) = Self::find_course(db, batch.course_id)
            .await?
            .ok_or_else(|| AppError::bad_request(anyhow!("Invalid course ID")))?;

        let mut created = sqlx::query_as::<_, Batch>(
            r#"
            INSERT INTO batches (batch_name, duration, center, teacher, course_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING batch_id, batch_name, duration, center, teacher, course_id, created_at
            "#,
        )
        .bind(&batch.batch_name)
        .bind(&batch.duration)
        .bind(batch.center)
        .bind(batch.teacher)
        .bind(batch.course_id)
        .fetch_one(db)
        .await
        .map_err(reference_error)?;

        created.course_name = Some(course_name);
        created.course_type = Some(course_type);

        Ok(created)
    }

    #[instrument(skip(db))]
    pub async fn get_batches(db: &PgPool) -> Result<Vec<Batch>, AppError> {
        let batches = sqlx::query_as::<_, Batch>(&format!("{BATCH_SELECT} ORDER BY b.batch_id"))
            .fetch_all(db)
            .await
            .map_err(db_error)?;

        Ok(batches)
    }

    #[instrument(skip(db))]
    pub async fn get_batch(db: &PgPool, id: i64) -> Result<Batch, AppError> {
        sqlx::query_as::<_, Batch>(&format!("{BATCH_SELECT} WHERE b.batch_id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| AppError::not_found(anyhow!("Batch not found")))
    }

    /// Applies the fields present in `dto`; absent fields are left untouched.
    #[instrument(skip(db, dto))]
    pub async fn update_batch(db: &PgPool, id: i64, dto: UpdateBatchDto) -> Result<Batch, AppError> {
        if let Some(course_id) = dto.course_id {
            Self::find_course(db, course_id)
                .await?
                .ok_or_else(|| AppError::bad_request(anyhow!("Invalid course ID")))?;
        }

        let updated = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE batches
            SET batch_name = COALESCE($2, batch_name),
                duration = COALESCE($3, duration),
                center = COALESCE($4, center),
                teacher = COALESCE($5, teacher),
                course_id = COALESCE($6, course_id)
            WHERE batch_id = $1
            RETURNING batch_id
            "#,
        )
        .bind(id)
        .bind(dto.batch_name)
        .bind(dto.duration)
        .bind(dto.center)
        .bind(dto.teacher)
        .bind(dto.course_id)
        .fetch_optional(db)
        .await
        .map_err(reference_error)?;

        match updated {
            Some(id) => Self::get_batch(db, id).await,
            None => Err(AppError::not_found(anyhow!("Batch not found"))),
        }
    }

    #[instrument(skip(db))]
    pub async fn delete_batch(db: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM batches WHERE batch_id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Batch not found")));
        }

        Ok(())
    }

    async fn find_course(db: &PgPool, course_id: i64) -> Result<Option<(String, String)>, AppError> {
        sqlx::query_as::<_, (String, String)>("SELECT course_name, type FROM courses WHERE id = $1")
            .bind(course_id)
            .fetch_optional(db)
            .await
            .map_err(db_error)
    }
}

/// Foreign key violations mean the request named a center, teacher or
/// course that does not exist.
fn reference_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_foreign_key_violation() {
            return AppError::bad_request(anyhow!("Invalid center, teacher or course ID"));
        }
    }
    db_error(err)
}
