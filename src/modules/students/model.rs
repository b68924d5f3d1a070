pub use isml_models::common::ErrorResponse;
pub use isml_models::students::{
    ApprovalCandidate, ApproveStudentDto, ApproveStudentResponse, Student,
};
