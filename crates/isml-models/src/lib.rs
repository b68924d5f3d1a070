//! # ISML Models
//!
//! Row structs, request DTOs and response envelopes for the ISML academics API.
//!
//! - [`batches`]: batches and their course/center/teacher joins
//! - [`courses`]: courses
//! - [`students`]: students as seen by the approval workflow
//! - [`common`]: message and error envelopes

pub mod batches;
pub mod common;
pub mod courses;
pub mod students;

pub use batches::{
    Batch, BatchListResponse, BatchResponse, CreateBatchDto, NewBatch, UpdateBatchDto,
};
pub use common::{ErrorResponse, MessageResponse};
pub use courses::{Course, CourseResponse, CreateCourseDto};
pub use students::{ApprovalCandidate, ApproveStudentDto, ApproveStudentResponse, Student};
