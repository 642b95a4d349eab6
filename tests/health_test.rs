// ABOUTME: Integration tests for health and readiness endpoints
// ABOUTME: Verifies probe responses and that probes skip authentication
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PetLodge

mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let resources = common::create_test_resources().await?;
    let router = common::test_router(resources);

    let response = common::send(&router, common::bare_request(Method::GET, "/health", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::response_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "petlodge-server");
    assert!(body["version"].as_str().is_some());

    Ok(())
}

#[tokio::test]
async fn test_ready_endpoint_with_working_database() -> Result<()> {
    let resources = common::create_test_resources().await?;
    let router = common::test_router(resources);

    let response = common::send(&router, common::bare_request(Method::GET, "/ready", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::response_json(response).await;
    assert_eq!(body["status"], "healthy");

    Ok(())
}
