//! The student record store seam.

use async_trait::async_trait;
use isml_models::students::{ApprovalCandidate, Student};

use crate::error::StoreError;

/// Read/write access to student rows for the approval workflow.
///
/// Implementations guarantee:
///
/// - [`next_registration_sequence`](Self::next_registration_sequence) never
///   hands out the same value twice, even under concurrent callers.
/// - [`mark_approved`](Self::mark_approved) writes status and number in one
///   step, only if the student is still unapproved, and reports a
///   [`StoreError::Conflict`] if the number is already taken.
#[async_trait]
pub trait StudentRecordStore: Send + Sync + std::fmt::Debug {
    /// Loads the student with its state and center names resolved.
    async fn find_approval_candidate(
        &self,
        student_id: i64,
    ) -> Result<Option<ApprovalCandidate>, StoreError>;

    async fn next_registration_sequence(&self) -> Result<i64, StoreError>;

    /// Approves the student and assigns `registration_number`.
    ///
    /// Returns `Ok(None)` when no row changed: the student does not exist or
    /// is no longer unapproved.
    async fn mark_approved(
        &self,
        student_id: i64,
        registration_number: &str,
    ) -> Result<Option<Student>, StoreError>;
}
