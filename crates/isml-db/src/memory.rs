//! Process-local student store.
//!
//! Mirrors the guarantees of the PostgreSQL store: an atomic global
//! sequence, a conditional approve that only touches unapproved rows, and a
//! uniqueness check on registration numbers. Used by the test suite and for
//! running the API without a database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use isml_core::registration::SEQUENCE_START;
use isml_models::students::{ApprovalCandidate, Student};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::students::StudentRecordStore;

#[derive(Debug)]
pub struct InMemoryStudentStore {
    rows: RwLock<HashMap<i64, Student>>,
    next_id: AtomicI64,
    sequence: AtomicI64,
    available: AtomicBool,
}

impl Default for InMemoryStudentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStudentStore {
    pub fn new() -> Self {
        Self::with_sequence_start(SEQUENCE_START)
    }

    pub fn with_sequence_start(start: i64) -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            sequence: AtomicI64::new(start),
            available: AtomicBool::new(true),
        }
    }

    /// Simulates the store going away; every call fails with
    /// [`StoreError::Unavailable`] until re-enabled.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Inserts an unapproved student and returns its id.
    pub async fn insert_student(&self, state_name: Option<&str>, center_name: Option<&str>) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.insert_with_id(id, state_name, center_name).await;
        id
    }

    /// Inserts an unapproved student under a caller-chosen id.
    pub async fn insert_with_id(&self, id: i64, state_name: Option<&str>, center_name: Option<&str>) {
        let student = Student {
            student_id: id,
            state_id: None,
            center_id: None,
            state_name: state_name.map(str::to_string),
            center_name: center_name.map(str::to_string),
            status: false,
            registration_number: None,
            created_at: Utc::now(),
            approved_at: None,
        };
        self.rows.write().await.insert(id, student);
    }

    /// Inserts an already approved student holding `registration_number`,
    /// as found in data imported from elsewhere.
    pub async fn insert_approved(&self, registration_number: &str) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let student = Student {
            student_id: id,
            state_id: None,
            center_id: None,
            state_name: None,
            center_name: None,
            status: true,
            registration_number: Some(registration_number.to_string()),
            created_at: now,
            approved_at: Some(now),
        };
        self.rows.write().await.insert(id, student);
        id
    }

    pub async fn get(&self, student_id: i64) -> Option<Student> {
        self.rows.read().await.get(&student_id).cloned()
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable(
                "in-memory store disabled".to_string(),
            ))
        }
    }
}

#[async_trait]
impl StudentRecordStore for InMemoryStudentStore {
    async fn find_approval_candidate(
        &self,
        student_id: i64,
    ) -> Result<Option<ApprovalCandidate>, StoreError> {
        self.ensure_available()?;
        let rows = self.rows.read().await;
        Ok(rows.get(&student_id).map(|s| ApprovalCandidate {
            student_id: s.student_id,
            status: s.status,
            state_name: s.state_name.clone(),
            center_name: s.center_name.clone(),
        }))
    }

    async fn next_registration_sequence(&self) -> Result<i64, StoreError> {
        self.ensure_available()?;
        Ok(self.sequence.fetch_add(1, Ordering::SeqCst))
    }

    async fn mark_approved(
        &self,
        student_id: i64,
        registration_number: &str,
    ) -> Result<Option<Student>, StoreError> {
        self.ensure_available()?;
        let mut rows = self.rows.write().await;

        let taken = rows
            .values()
            .any(|s| s.registration_number.as_deref() == Some(registration_number));
        if taken {
            return Err(StoreError::Conflict(format!(
                "registration number {registration_number} already assigned"
            )));
        }

        let Some(student) = rows
            .get_mut(&student_id)
            .filter(|s| !s.status && s.registration_number.is_none())
        else {
            return Ok(None);
        };

        student.status = true;
        student.registration_number = Some(registration_number.to_string());
        student.approved_at = Some(Utc::now());
        Ok(Some(student.clone()))
    }
}
