//! Integration tests for CSV guest import.
//!
//! These tests require a running PostgreSQL instance.
//! Run with: TEST_DATABASE_URL=... cargo test --test guest_import_integration -- --test-threads=1

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{admin_token, create_guest, create_test_app, empty_request, send, setup};
use domain::models::guest_import::ParsedGuestRow;
use rsvp_api::services::guest_registry::{store_row, RowOutcome, ERR_PHONE_REGISTERED};

const BOUNDARY: &str = "rsvp-test-boundary";

fn import_request(csv: &str, token: &str) -> Request<Body> {
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"convidados.csv\"\r\nContent-Type: text/csv\r\n\r\n{csv}\r\n--{b}--\r\n",
        b = BOUNDARY,
        csv = csv
    );

    Request::builder()
        .method(Method::POST)
        .uri("/api/v1/admin/guests/import")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_import_creates_guests_with_invites() {
    let Some((pool, config)) = setup().await else {
        return;
    };
    let app = create_test_app(config, pool.clone());
    let token = admin_token(&app, &pool).await;

    let csv = "fullName,phone,email,maxCompanions\n\
               Maria Souza,(11) 99999-0001,maria@example.com,2\n\
               Joao Lima,11 98888-7777,,\n";

    let (status, json) = send(&app, import_request(csv, &token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["imported"], 2);
    assert_eq!(json["duplicates"], 0);
    assert_eq!(json["invalid"], 0);
    assert!(json["errors"].as_array().unwrap().is_empty());

    let rows: Vec<(String, i32)> = sqlx::query_as(
        "SELECT g.phone, g.max_companions FROM guests g JOIN invites i ON i.guest_id = g.id ORDER BY g.phone",
    )
    .fetch_all(&pool)
    .await
    .unwrap();
    assert_eq!(
        rows,
        vec![
            ("11988887777".to_string(), 0),
            ("11999990001".to_string(), 2)
        ]
    );
}

#[tokio::test]
async fn test_import_duplicate_phone_in_file_marks_second_row() {
    let Some((pool, config)) = setup().await else {
        return;
    };
    let app = create_test_app(config, pool.clone());
    let token = admin_token(&app, &pool).await;

    let csv = "fullName,phone,email,maxCompanions\n\
               Maria Souza,11999990001,,1\n\
               Maria S.,(11) 99999-0001,,1\n";

    let (status, json) = send(&app, import_request(csv, &token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["imported"], 1);
    assert_eq!(json["invalid"], 1);
    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["line"], 3);
}

#[tokio::test]
async fn test_import_skips_registered_phones() {
    let Some((pool, config)) = setup().await else {
        return;
    };
    let app = create_test_app(config, pool.clone());
    let token = admin_token(&app, &pool).await;

    create_guest(&app, &token, "Maria Souza", "11999990001", 1).await;

    let csv = "\"FullName\",PHONE,MaxCompanions\n\
               Maria Souza,11999990001,0\n\
               \n\
               Ana Paula,11977776666,0\n";

    let (status, json) = send(&app, import_request(csv, &token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["imported"], 1);
    assert_eq!(json["duplicates"], 1);
    assert_eq!(json["invalid"], 0);
}

#[tokio::test]
async fn test_store_row_with_phone_registered_meanwhile_fails_row() {
    let Some((pool, config)) = setup().await else {
        return;
    };
    let event_id = config.event.id;
    let app = create_test_app(config, pool.clone());
    let token = admin_token(&app, &pool).await;

    create_guest(&app, &token, "Maria Souza", "11999990001", 1).await;

    let row = ParsedGuestRow {
        line: 2,
        full_name: "Maria S.".to_string(),
        phone: "11999990001".to_string(),
        email: None,
        max_companions: 0,
    };
    let outcome = store_row(&pool, event_id, &row).await;
    assert_eq!(outcome, RowOutcome::Failed(ERR_PHONE_REGISTERED));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM guests")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_import_reports_invalid_rows() {
    let Some((pool, config)) = setup().await else {
        return;
    };
    let app = create_test_app(config, pool.clone());
    let token = admin_token(&app, &pool).await;

    let csv = "fullName,phone,email,maxCompanions\n\
               Al,123,bad-email,x\n\
               Ana Paula,11977776666,ana@example.com,1\n";

    let (status, json) = send(&app, import_request(csv, &token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["imported"], 1);
    assert_eq!(json["invalid"], 1);
    let errors = json["errors"].as_array().unwrap();
    assert!(!errors.is_empty());
    assert!(errors.iter().all(|e| e["line"] == 2));
}

#[tokio::test]
async fn test_import_missing_required_column_fails() {
    let Some((pool, config)) = setup().await else {
        return;
    };
    let app = create_test_app(config, pool.clone());
    let token = admin_token(&app, &pool).await;

    let csv = "fullName,email\nMaria Souza,maria@example.com\n";

    let (status, json) = send(&app, import_request(csv, &token)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM guests")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_download_template_requires_admin() {
    let Some((pool, config)) = setup().await else {
        return;
    };
    let app = create_test_app(config, pool.clone());

    let (status, _) = send(
        &app,
        empty_request(Method::GET, "/api/v1/admin/guests/template", None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = admin_token(&app, &pool).await;
    let (status, _) = send(
        &app,
        empty_request(Method::GET, "/api/v1/admin/guests/template", Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
