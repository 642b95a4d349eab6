// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides common database, auth, and router helpers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PetLodge
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `petlodge`

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use petlodge::{auth::AuthManager, database::Database, server::ServerResources};
use serde_json::Value;
use std::sync::{Arc, Once};
use tower::ServiceExt;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    let database = Arc::new(Database::new("sqlite::memory:").await?);
    Ok(database)
}

/// Create test authentication manager with the standard one-hour expiry
pub fn create_test_auth_manager() -> AuthManager {
    let jwt_secret = petlodge::auth::generate_jwt_secret()
        .expect("test RNG")
        .to_vec();
    AuthManager::with_default_expiry(jwt_secret)
}

/// Standard test server resources on an in-memory database
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    let auth_manager = create_test_auth_manager();
    Ok(Arc::new(ServerResources::new(database, auth_manager)))
}

/// Test server resources signing tokens with a caller-supplied secret
pub async fn create_test_resources_with_secret(secret: Vec<u8>) -> Result<Arc<ServerResources>> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    let auth_manager = AuthManager::with_default_expiry(secret);
    Ok(Arc::new(ServerResources::new(database, auth_manager)))
}

/// Build the full application router for the given resources
pub fn test_router(resources: Arc<ServerResources>) -> Router {
    petlodge::server::router(resources)
}

/// Build a JSON request with an optional bearer token
pub fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: &Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request build")
}

/// Build a bodyless request with an optional bearer token
pub fn bare_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request build")
}

/// Drive a single request through the router
pub async fn send(router: &Router, request: Request<Body>) -> Response<axum::body::Body> {
    router
        .clone()
        .oneshot(request)
        .await
        .expect("router response")
}

/// Read a response body as JSON
pub async fn response_json(response: Response<axum::body::Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("body is valid JSON")
}

/// Register a tutor through the API and return the created id
pub async fn register_tutor(
    router: &Router,
    name: &str,
    email: &str,
    phone: &str,
    password: &str,
) -> String {
    let response = send(
        router,
        json_request(
            Method::POST,
            "/tutors",
            None,
            &serde_json::json!({
                "name": name,
                "email": email,
                "phone": phone,
                "password": password,
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    body["id"].as_str().expect("tutor id").to_string()
}

/// Log a tutor in through the API and return the bearer token
pub async fn login_tutor(router: &Router, email: &str, password: &str) -> String {
    let response = send(
        router,
        json_request(
            Method::POST,
            "/login",
            None,
            &serde_json::json!({ "email": email, "password": password }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    body["token"].as_str().expect("session token").to_string()
}
