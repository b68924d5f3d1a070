use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use isml_models::batches::{
    Batch, BatchListResponse, BatchResponse, CreateBatchDto, UpdateBatchDto,
};
use isml_models::common::{ErrorResponse, MessageResponse};
use isml_models::courses::{Course, CourseResponse, CreateCourseDto};
use isml_models::students::{ApproveStudentDto, ApproveStudentResponse, Student};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::batches::controller::create_batch,
        crate::modules::batches::controller::get_batches,
        crate::modules::batches::controller::get_batch,
        crate::modules::batches::controller::update_batch,
        crate::modules::batches::controller::delete_batch,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::students::controller::approve_student,
    ),
    components(
        schemas(
            Batch,
            BatchListResponse,
            BatchResponse,
            CreateBatchDto,
            UpdateBatchDto,
            Course,
            CourseResponse,
            CreateCourseDto,
            Student,
            ApproveStudentDto,
            ApproveStudentResponse,
            MessageResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Batches", description = "Batch management endpoints"),
        (name = "Courses", description = "Course management endpoints"),
        (name = "Students", description = "Student approval endpoints")
    ),
    info(
        title = "ISML Academics API",
        version = "0.1.0",
        description = "Batches, courses and student approval behind role-gated bearer authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/api/batches",
            "/api/batches/{id}",
            "/api/courses",
            "/api/courses/{id}",
            "/api/students/approve",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
