//! The student approval workflow.
//!
//! `Unapproved --approve()--> Approved` is the only transition, and it is
//! terminal. Approval assigns the registration number in the same write that
//! flips the status.

use anyhow::anyhow;
use axum::http::StatusCode;
use isml_auth::Claims;
use isml_core::AppError;
use isml_core::registration::registration_number;
use isml_db::{StoreError, StudentRecordStore};
use tracing::{info, instrument, warn};

use crate::metrics::{track_registration_conflict, track_student_approved};
use crate::modules::students::model::Student;

/// Attempts made before a registration number conflict is surfaced.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 3;

pub struct ApprovalWorkflow;

impl ApprovalWorkflow {
    /// Approves `student_id` on behalf of `actor` and returns the updated row.
    ///
    /// # Errors
    ///
    /// - `NotFound` (rendered as 400) if the student does not exist
    /// - `AlreadyApproved` if the student was approved before or concurrently
    /// - `AllocationConflict` if every allocated number was already taken
    /// - `StoreUnavailable` if the record store cannot be reached
    #[instrument(skip(store, actor), fields(actor_sub = %actor.sub, actor_role = %actor.role))]
    pub async fn approve(
        store: &dyn StudentRecordStore,
        student_id: i64,
        actor: &Claims,
    ) -> Result<Student, AppError> {
        let candidate = store
            .find_approval_candidate(student_id)
            .await
            .map_err(StoreError::into_app_error)?
            .ok_or_else(student_not_found)?;

        if candidate.status {
            return Err(AppError::already_approved());
        }

        for attempt in 1..=MAX_ALLOCATION_ATTEMPTS {
            let sequence = store
                .next_registration_sequence()
                .await
                .map_err(StoreError::into_app_error)?;
            let number = registration_number(
                candidate.state_name.as_deref(),
                candidate.center_name.as_deref(),
                sequence,
            );

            match store.mark_approved(student_id, &number).await {
                Ok(Some(student)) => {
                    info!(
                        student_id,
                        registration_number = %number,
                        actor_sub = %actor.sub,
                        actor_role = %actor.role,
                        "Student approved"
                    );
                    track_student_approved();
                    return Ok(student);
                }
                Ok(None) => return Err(Self::explain_unchanged(store, student_id).await),
                Err(StoreError::Conflict(reason)) => {
                    warn!(attempt, registration_number = %number, %reason, "Registration number already taken");
                    track_registration_conflict();
                }
                Err(err) => return Err(err.into_app_error()),
            }
        }

        Err(AppError::allocation_conflict(anyhow!(
            "Could not allocate a unique registration number, please retry"
        )))
    }

    /// Works out why the conditional update touched no row.
    async fn explain_unchanged(store: &dyn StudentRecordStore, student_id: i64) -> AppError {
        match store.find_approval_candidate(student_id).await {
            Ok(None) => student_not_found(),
            Ok(Some(candidate)) if candidate.status => AppError::already_approved(),
            Ok(Some(_)) => AppError::internal_error(format!(
                "Student {} is unapproved but already holds a registration number",
                student_id
            )),
            Err(err) => err.into_app_error(),
        }
    }
}

pub fn student_not_found() -> AppError {
    AppError::not_found(anyhow!("Student not found or database error"))
        .with_status(StatusCode::BAD_REQUEST)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use isml_core::ErrorKind;
    use isml_db::InMemoryStudentStore;
    use isml_models::students::ApprovalCandidate;
    use serde_json::Map;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn actor() -> Claims {
        Claims {
            sub: "academic-1".to_string(),
            role: "academic".to_string(),
            email: None,
            exp: None,
            iat: 0,
            extra: Map::new(),
        }
    }

    #[tokio::test]
    async fn test_approve_assigns_number() {
        let store = InMemoryStudentStore::new();
        let id = store.insert_student(Some("Karnataka"), Some("Bangalore North")).await;

        let student = ApprovalWorkflow::approve(&store, id, &actor()).await.unwrap();

        assert!(student.status);
        assert_eq!(student.registration_number.as_deref(), Some("ISMLKABA1000"));
    }

    #[tokio::test]
    async fn test_approve_unknown_student() {
        let store = InMemoryStudentStore::new();
        let err = ApprovalWorkflow::approve(&store, 999, &actor()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error.to_string(), "Student not found or database error");
    }

    #[tokio::test]
    async fn test_second_approval_is_rejected() {
        let store = InMemoryStudentStore::new();
        let id = store.insert_student(Some("Goa"), Some("Panaji")).await;

        let first = ApprovalWorkflow::approve(&store, id, &actor()).await.unwrap();
        let err = ApprovalWorkflow::approve(&store, id, &actor()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::AlreadyApproved);
        let row = store.get(id).await.unwrap();
        assert_eq!(row.registration_number, first.registration_number);
    }

    #[tokio::test]
    async fn test_conflict_is_retried_with_next_sequence() {
        let store = InMemoryStudentStore::new();
        store.insert_approved("ISMLGOPA1000").await;
        let id = store.insert_student(Some("Goa"), Some("Panaji")).await;

        let student = ApprovalWorkflow::approve(&store, id, &actor()).await.unwrap();
        assert_eq!(student.registration_number.as_deref(), Some("ISMLGOPA1001"));
    }

    #[tokio::test]
    async fn test_conflict_surfaces_after_max_attempts() {
        let store = InMemoryStudentStore::new();
        for seq in 1000..1000 + MAX_ALLOCATION_ATTEMPTS as i64 {
            store.insert_approved(&format!("ISMLGOPA{seq}")).await;
        }
        let id = store.insert_student(Some("Goa"), Some("Panaji")).await;

        let err = ApprovalWorkflow::approve(&store, id, &actor()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AllocationConflict);
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert!(!store.get(id).await.unwrap().status);
    }

    #[tokio::test]
    async fn test_unavailable_store() {
        let store = InMemoryStudentStore::new();
        let id = store.insert_student(None, None).await;
        store.set_available(false);

        let err = ApprovalWorkflow::approve(&store, id, &actor()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StoreUnavailable);
    }

    /// Lets the read succeed and then loses the write to another approver.
    #[derive(Debug, Default)]
    struct RacingStore {
        reads: AtomicUsize,
        deleted: bool,
    }

    #[async_trait]
    impl StudentRecordStore for RacingStore {
        async fn find_approval_candidate(
            &self,
            student_id: i64,
        ) -> Result<Option<ApprovalCandidate>, StoreError> {
            let first_read = self.reads.fetch_add(1, Ordering::SeqCst) == 0;
            if !first_read && self.deleted {
                return Ok(None);
            }
            Ok(Some(ApprovalCandidate {
                student_id,
                status: !first_read,
                state_name: Some("Kerala".to_string()),
                center_name: Some("Kochi".to_string()),
            }))
        }

        async fn next_registration_sequence(&self) -> Result<i64, StoreError> {
            Ok(1000)
        }

        async fn mark_approved(
            &self,
            _student_id: i64,
            _registration_number: &str,
        ) -> Result<Option<Student>, StoreError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_concurrent_approval_is_already_approved() {
        let store = RacingStore::default();
        let err = ApprovalWorkflow::approve(&store, 5, &actor()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyApproved);
    }

    #[tokio::test]
    async fn test_concurrent_delete_is_not_found() {
        let store = RacingStore {
            deleted: true,
            ..Default::default()
        };
        let err = ApprovalWorkflow::approve(&store, 5, &actor()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
