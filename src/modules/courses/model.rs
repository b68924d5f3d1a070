pub use isml_models::common::{ErrorResponse, MessageResponse};
pub use isml_models::courses::{Course, CourseResponse, CreateCourseDto, REQUIRED_FIELDS_MESSAGE};
