//! Common test utilities for integration tests.
//!
//! Tests run against a real PostgreSQL database given by `TEST_DATABASE_URL`
//! and return early when it is not set. Every test truncates all tables, so
//! run them with `--test-threads=1`.

// Not every test binary uses every helper.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use persistence::repositories::AdminUserRepository;
use rsvp_api::{app::create_app, config::Config, services::ensure_event};
use serde_json::{json, Value};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_EVENT_ID: &str = "00000000-0000-0000-0000-0000000000aa";
pub const TEST_ADMIN_USERNAME: &str = "admin";
pub const TEST_ADMIN_PASSWORD: &str = "senha-forte-123";

/// Create a test database pool, or `None` when no test database is configured.
pub async fn create_test_pool() -> Option<PgPool> {
    let database_url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) if !url.is_empty() => url,
        _ => {
            eprintln!("TEST_DATABASE_URL not set, skipping integration test");
            return None;
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    Some(pool)
}

/// Run migrations on the test database.
pub async fn run_migrations(pool: &PgPool) {
    let migration_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("persistence/src/migrations");

    let mut entries: Vec<_> = std::fs::read_dir(&migration_dir)
        .expect("Failed to read migrations directory")
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|ext| ext == "sql").unwrap_or(false))
        .collect();

    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let sql = std::fs::read_to_string(entry.path()).expect("Failed to read migration file");

        // Already-applied migrations fail on re-run; that is fine here.
        sqlx::raw_sql(&sql)
            .execute(pool)
            .await
            .unwrap_or_else(|_| sqlx::postgres::PgQueryResult::default());
    }
}

/// Clean up ALL test data from the database.
pub async fn cleanup_all_test_data(pool: &PgPool) {
    sqlx::query("TRUNCATE TABLE rsvps, invites, guests, admin_users, events CASCADE")
        .execute(pool)
        .await
        .expect("Failed to truncate test tables");
}

/// Connects, migrates, wipes the tables and recreates the test event.
pub async fn setup() -> Option<(PgPool, Config)> {
    let pool = create_test_pool().await?;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    ensure_event(&pool, &config.event)
        .await
        .expect("Failed to create test event");

    Some((pool, config))
}

/// Test configuration.
pub fn test_config() -> Config {
    let uploads_dir = std::env::temp_dir()
        .join(format!("rsvp-uploads-{}", Uuid::new_v4()))
        .to_string_lossy()
        .into_owned();
    let database_url = std::env::var("TEST_DATABASE_URL").unwrap_or_default();

    Config::load_for_test(&[
        ("database.url", database_url.as_str()),
        ("server.host", "127.0.0.1"),
        ("logging.level", "debug"),
        ("logging.format", "pretty"),
        ("event.id", TEST_EVENT_ID),
        ("event.public_base_url", "https://festa.example"),
        ("admin.session_secret", "integration-test-secret"),
        ("admin.default_username", TEST_ADMIN_USERNAME),
        ("admin.default_password", TEST_ADMIN_PASSWORD),
        ("uploads.dir", uploads_dir.as_str()),
    ])
    .expect("Failed to build test config")
}

pub fn test_event_id() -> Uuid {
    Uuid::parse_str(TEST_EVENT_ID).unwrap()
}

/// Create a test application router.
pub fn create_test_app(config: Config, pool: PgPool) -> Router {
    create_app(config, pool)
}

/// Parse a response body as JSON (`Null` when the body is not JSON).
pub async fn parse_response_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

/// Build a JSON request.
pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Build a JSON request carrying an admin session.
pub fn json_request_with_token(method: Method, uri: &str, body: Value, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Build a bodyless request, optionally carrying an admin session.
pub fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Send a request and return status and JSON body.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, parse_response_body(response).await)
}

/// Insert an admin account directly.
pub async fn create_test_admin(pool: &PgPool, username: &str, password: &str) -> Uuid {
    let hash = shared::password::hash_password(password).unwrap();
    AdminUserRepository::new(pool.clone())
        .create(username, &hash, "Test Admin")
        .await
        .expect("Failed to create test admin")
        .id
}

/// Create the default test admin and return a session token.
pub async fn admin_token(app: &Router, pool: &PgPool) -> String {
    create_test_admin(pool, TEST_ADMIN_USERNAME, TEST_ADMIN_PASSWORD).await;
    login(app, TEST_ADMIN_USERNAME, TEST_ADMIN_PASSWORD).await
}

/// Log in and return the session token.
pub async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, json) = send(
        app,
        json_request(
            Method::POST,
            "/api/v1/admin/login",
            json!({ "username": username, "password": password }),
        ),
    )
    .await;

    if status != StatusCode::OK {
        panic!("Login failed with status: {}, body: {}", status, json);
    }

    json["token"]
        .as_str()
        .unwrap_or_else(|| panic!("Missing token in response. Full response: {}", json))
        .to_string()
}

/// Create a guest through the API and return the response body.
pub async fn create_guest(
    app: &Router,
    token: &str,
    full_name: &str,
    phone: &str,
    max_companions: i32,
) -> Value {
    let (status, json) = send(
        app,
        json_request_with_token(
            Method::POST,
            "/api/v1/admin/guests",
            json!({
                "fullName": full_name,
                "phone": phone,
                "email": "",
                "maxCompanions": max_companions
            }),
            token,
        ),
    )
    .await;

    if status != StatusCode::CREATED {
        panic!("Guest creation failed with status: {}, body: {}", status, json);
    }

    json
}

/// Short code of a guest response.
pub fn short_code_of(guest_response: &Value) -> String {
    guest_response["guest"]["invite"]["shortCode"]
        .as_str()
        .unwrap_or_else(|| panic!("Missing invite short code: {}", guest_response))
        .to_string()
}

/// Set or clear the RSVP deadline of the test event.
pub async fn set_event_deadline(pool: &PgPool, deadline: Option<chrono::DateTime<chrono::Utc>>) {
    sqlx::query("UPDATE events SET rsvp_deadline = $2 WHERE id = $1")
        .bind(test_event_id())
        .bind(deadline)
        .execute(pool)
        .await
        .expect("Failed to set deadline");
}
