mod common;

use std::collections::HashSet;

use axum::http::{Method, StatusCode};
use common::{
    approve, bearer, create_test_center, create_test_student, pg_app, send, test_app,
};
use fake::Fake;
use fake::faker::address::en::{CityName, StateName};
use isml::isml_core::registration::{center_code, is_well_formed, state_code};
use serde_json::json;
use sqlx::PgPool;

#[tokio::test]
async fn test_approve_student_assigns_registration_number() {
    let app = test_app();
    app.store
        .insert_with_id(42, Some("Karnataka"), Some("Bangalore North"))
        .await;

    let (status, body) = approve(&app.router, &bearer("academic"), 42).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Student approved successfully");
    assert_eq!(body["student"]["student_id"], 42);
    assert_eq!(body["student"]["status"], true);
    assert_eq!(body["student"]["state_name"], "Karnataka");

    let number = body["student"]["registration_number"].as_str().unwrap();
    let digits = number.strip_prefix("ISMLKABA").unwrap();
    assert_eq!(digits.len(), 4);
    assert!(digits.chars().all(|c| c.is_ascii_digit()));

    let row = app.store.get(42).await.unwrap();
    assert!(row.status);
    assert_eq!(row.registration_number.as_deref(), Some(number));
}

#[tokio::test]
async fn test_missing_names_use_fallback_codes() {
    let app = test_app();
    let id = app.store.insert_student(None, Some("")).await;

    let (status, body) = approve(&app.router, &bearer("academic"), id).await;

    assert_eq!(status, StatusCode::OK);
    let number = body["student"]["registration_number"].as_str().unwrap();
    assert!(number.starts_with("ISMLXXYY"), "got {number}");
}

#[tokio::test]
async fn test_approve_twice_fails_and_keeps_number() {
    let app = test_app();
    let id = app.store.insert_student(Some("Kerala"), Some("Kochi")).await;

    let (status, first) = approve(&app.router, &bearer("academic"), id).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = approve(&app.router, &bearer("academic"), id).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Student is already approved");

    let row = app.store.get(id).await.unwrap();
    assert_eq!(
        row.registration_number.as_deref(),
        first["student"]["registration_number"].as_str()
    );
}

#[tokio::test]
async fn test_approve_unknown_student() {
    let app = test_app();

    let (status, body) = approve(&app.router, &bearer("academic"), 999).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Student not found or database error");
}

#[tokio::test]
async fn test_missing_student_id() {
    let app = test_app();
    let auth = bearer("academic");

    for body in [
        json!({}),
        json!({ "student_id": null }),
        json!({ "student_id": 0 }),
        json!({ "student_id": "" }),
    ] {
        let (status, response) = send(
            &app.router,
            Method::POST,
            "/api/students/approve",
            Some(&auth),
            Some(body.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(response["error"], "Student ID is required");
    }
}

async fn approve_raw(app: &common::TestApp, student_id: serde_json::Value) -> (StatusCode, serde_json::Value) {
    send(
        &app.router,
        Method::POST,
        "/api/students/approve",
        Some(&bearer("academic")),
        Some(json!({ "student_id": student_id })),
    )
    .await
}

#[tokio::test]
async fn test_student_id_as_numeric_string() {
    let app = test_app();
    app.store
        .insert_with_id(42, Some("Karnataka"), Some("Bangalore North"))
        .await;

    let (status, body) = approve_raw(&app, json!("42")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["student"]["student_id"], 42);
    assert!(app.store.get(42).await.unwrap().status);
}

#[tokio::test]
async fn test_unparseable_student_id_is_not_found() {
    let app = test_app();
    app.store.insert_with_id(42, Some("Goa"), Some("Panaji")).await;

    for student_id in [json!("abc"), json!("0"), json!(4.5)] {
        let (status, body) = approve_raw(&app, student_id.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "student_id {student_id}");
        assert_eq!(body["error"], "Student not found or database error");
    }
    assert!(!app.store.get(42).await.unwrap().status);
}

#[tokio::test]
async fn test_empty_body_is_missing_student_id() {
    let app = test_app();

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/students/approve",
        Some(&bearer("academic")),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Student ID is required");
}

#[tokio::test]
async fn test_store_outage_is_service_unavailable() {
    let app = test_app();
    let id = app.store.insert_student(Some("Goa"), Some("Panaji")).await;
    app.store.set_available(false);

    let (status, body) = approve(&app.router, &bearer("academic"), id).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Service temporarily unavailable");
}

#[tokio::test]
async fn test_taken_numbers_are_skipped() {
    let app = test_app();
    app.store.insert_approved("ISMLGOPA1000").await;
    let id = app.store.insert_student(Some("Goa"), Some("Panaji")).await;

    let (status, body) = approve(&app.router, &bearer("academic"), id).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["student"]["registration_number"], "ISMLGOPA1001");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_approvals_get_unique_numbers() {
    let app = test_app();
    let auth = bearer("academic");

    let mut expected = Vec::new();
    for _ in 0..32 {
        let state: String = StateName().fake();
        let center: String = CityName().fake();
        let id = app.store.insert_student(Some(&state), Some(&center)).await;
        expected.push((id, format!("ISML{}{}", state_code(Some(&state)), center_code(Some(&center)))));
    }

    let mut handles = Vec::new();
    for (id, prefix) in expected {
        let router = app.router.clone();
        let auth = auth.clone();
        handles.push(tokio::spawn(async move {
            let (status, body) = approve(&router, &auth, id).await;
            (status, prefix, body)
        }));
    }

    let mut numbers = HashSet::new();
    for handle in handles {
        let (status, prefix, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        let number = body["student"]["registration_number"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(number.starts_with(&prefix), "{number} should start with {prefix}");
        assert!(is_well_formed(&number), "{number} is malformed");
        assert!(numbers.insert(number.clone()), "duplicate {number}");
    }
    assert_eq!(numbers.len(), 32);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_approvals_of_one_student_succeed_once() {
    let app = test_app();
    let id = app.store.insert_student(Some("Kerala"), Some("Kochi")).await;
    let auth = bearer("academic");

    let mut handles = Vec::new();
    for _ in 0..8 {
        let router = app.router.clone();
        let auth = auth.clone();
        handles.push(tokio::spawn(async move { approve(&router, &auth, id).await }));
    }

    let mut approved = Vec::new();
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        match status {
            StatusCode::OK => approved.push(body),
            StatusCode::BAD_REQUEST => {
                assert_eq!(body["error"], "Student is already approved")
            }
            other => panic!("unexpected status {other}"),
        }
    }

    assert_eq!(approved.len(), 1);
    let row = app.store.get(id).await.unwrap();
    assert_eq!(
        row.registration_number.as_deref(),
        approved[0]["student"]["registration_number"].as_str()
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_approve_against_database(pool: PgPool) {
    let center_id = create_test_center(&pool, "Karnataka", "Bangalore North").await;
    let id = create_test_student(&pool, Some(center_id)).await;
    let router = pg_app(pool.clone());

    let (status, body) = approve(&router, &bearer("academic"), id).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["student"]["student_id"], id);
    assert_eq!(body["student"]["state_name"], "Karnataka");
    assert_eq!(body["student"]["center_name"], "Bangalore North");
    assert_eq!(body["student"]["registration_number"], "ISMLKABA1000");
    assert!(body["student"]["approved_at"].is_string());

    let (status, number): (bool, Option<String>) =
        sqlx::query_as("SELECT status, registration_number FROM students WHERE student_id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(status);
    assert_eq!(number.as_deref(), Some("ISMLKABA1000"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_second_approval_against_database(pool: PgPool) {
    let center_id = create_test_center(&pool, "Kerala", "Kochi").await;
    let id = create_test_student(&pool, Some(center_id)).await;
    let router = pg_app(pool.clone());

    let (status, _) = approve(&router, &bearer("academic"), id).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = approve(&router, &bearer("academic"), id).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Student is already approved");

    let number: Option<String> =
        sqlx::query_scalar("SELECT registration_number FROM students WHERE student_id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(number.as_deref(), Some("ISMLKEKO1000"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_student_against_database(pool: PgPool) {
    let router = pg_app(pool);

    let (status, body) = approve(&router, &bearer("academic"), 999).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Student not found or database error");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_without_center_against_database(pool: PgPool) {
    let id = create_test_student(&pool, None).await;
    let router = pg_app(pool);

    let (status, body) = approve(&router, &bearer("academic"), id).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["student"]["registration_number"], "ISMLXXYY1000");
    assert!(body["student"]["state_name"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_concurrent_approvals_against_database(pool: PgPool) {
    let mut ids = Vec::new();
    for (state, center) in [("Goa", "Panaji"), ("Kerala", "Kochi"), ("Goa", "Margao")] {
        let center_id = create_test_center(&pool, state, center).await;
        for _ in 0..8 {
            ids.push(create_test_student(&pool, Some(center_id)).await);
        }
    }
    let router = pg_app(pool.clone());
    let auth = bearer("academic");

    let mut handles = Vec::new();
    for id in ids.iter().copied() {
        let router = router.clone();
        let auth = auth.clone();
        handles.push(tokio::spawn(async move { approve(&router, &auth, id).await }));
    }

    let mut numbers = HashSet::new();
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        let number = body["student"]["registration_number"].as_str().unwrap().to_string();
        assert!(is_well_formed(&number), "{number} is malformed");
        assert!(numbers.insert(number.clone()), "duplicate {number}");
    }
    assert_eq!(numbers.len(), ids.len());

    let approved: i64 = sqlx::query_scalar(
        "SELECT COUNT(DISTINCT registration_number) FROM students WHERE status",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(approved, ids.len() as i64);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_concurrent_approvals_of_one_student_against_database(pool: PgPool) {
    let center_id = create_test_center(&pool, "Kerala", "Kochi").await;
    let id = create_test_student(&pool, Some(center_id)).await;
    let router = pg_app(pool.clone());
    let auth = bearer("academic");

    let mut handles = Vec::new();
    for _ in 0..6 {
        let router = router.clone();
        let auth = auth.clone();
        handles.push(tokio::spawn(async move { approve(&router, &auth, id).await }));
    }

    let mut approved = 0;
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        match status {
            StatusCode::OK => approved += 1,
            StatusCode::BAD_REQUEST => {
                assert_eq!(body["error"], "Student is already approved")
            }
            other => panic!("unexpected status {other}"),
        }
    }
    assert_eq!(approved, 1);
}
