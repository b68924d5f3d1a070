use crate::modules::courses::model::Course;
use anyhow::anyhow;
use isml_core::AppError;
use isml_db::db_error;
use sqlx::PgPool;
use tracing::instrument;

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db))]
    pub async fn create_course(
        db: &PgPool,
        course_name: &str,
        course_type: &str,
    ) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses (course_name, type)
            VALUES ($1, $2)
            RETURNING id, course_name, type, created_at
            "#,
        )
        .bind(course_name)
        .bind(course_type)
        .fetch_one(db)
        .await
        .map_err(db_error)?;

        Ok(course)
    }

    #[instrument(skip(db))]
    pub async fn delete_course(db: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_foreign_key_violation() {
                        return AppError::bad_request(anyhow!(
                            "Course is still used by one or more batches"
                        ));
                    }
                }
                db_error(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Course not found")));
        }

        Ok(())
    }
}
