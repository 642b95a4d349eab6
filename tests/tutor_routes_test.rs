// ABOUTME: Integration tests for tutor registration, login, and profile routes
// ABOUTME: Drives the full router against an in-memory database
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PetLodge

mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_register_returns_created_without_secret() -> Result<()> {
    let resources = common::create_test_resources().await?;
    let router = common::test_router(resources);

    let response = common::send(
        &router,
        common::json_request(
            Method::POST,
            "/tutors",
            None,
            &json!({
                "name": "Ana",
                "email": "ana@example.com",
                "phone": "555-0100",
                "password": "pw",
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = common::response_json(response).await;
    assert_eq!(body["name"], "Ana");
    assert_eq!(body["email"], "ana@example.com");
    assert!(body["id"].as_str().is_some());
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    Ok(())
}

#[tokio::test]
async fn test_register_rejects_invalid_email() -> Result<()> {
    let resources = common::create_test_resources().await?;
    let router = common::test_router(resources);

    let response = common::send(
        &router,
        common::json_request(
            Method::POST,
            "/tutors",
            None,
            &json!({
                "name": "Ana",
                "email": "not-an-email",
                "phone": "555-0100",
                "password": "pw",
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::response_json(response).await;
    assert_eq!(body["error"]["code"], "INVALID_INPUT");

    Ok(())
}

#[tokio::test]
async fn test_duplicate_registration_leaves_first_account_intact() -> Result<()> {
    let resources = common::create_test_resources().await?;
    let router = common::test_router(resources);

    common::register_tutor(&router, "Ana", "ana@example.com", "555-0100", "first-pw").await;

    let response = common::send(
        &router,
        common::json_request(
            Method::POST,
            "/tutors",
            None,
            &json!({
                "name": "Impostor",
                "email": "ana@example.com",
                "phone": "555-9999",
                "password": "other-pw",
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::response_json(response).await;
    assert_eq!(body["error"]["code"], "EMAIL_TAKEN");

    // The original credentials still work
    common::login_tutor(&router, "ana@example.com", "first-pw").await;

    Ok(())
}

#[tokio::test]
async fn test_login_returns_token_and_tutor_summary() -> Result<()> {
    let resources = common::create_test_resources().await?;
    let router = common::test_router(resources);

    let id = common::register_tutor(&router, "Ana", "ana@example.com", "555-0100", "pw").await;

    let response = common::send(
        &router,
        common::json_request(
            Method::POST,
            "/login",
            None,
            &json!({ "email": "ana@example.com", "password": "pw" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::response_json(response).await;
    assert_eq!(body["tutor"]["id"], id.as_str());
    assert_eq!(body["tutor"]["name"], "Ana");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(body["expires_at"].as_str().is_some());

    Ok(())
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() -> Result<()> {
    let resources = common::create_test_resources().await?;
    let router = common::test_router(resources);

    common::register_tutor(&router, "Ana", "ana@example.com", "555-0100", "pw").await;

    let wrong_password = common::send(
        &router,
        common::json_request(
            Method::POST,
            "/login",
            None,
            &json!({ "email": "ana@example.com", "password": "wrong" }),
        ),
    )
    .await;
    let unknown_email = common::send(
        &router,
        common::json_request(
            Method::POST,
            "/login",
            None,
            &json!({ "email": "nobody@example.com", "password": "pw" }),
        ),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let wrong_body = common::response_json(wrong_password).await;
    let unknown_body = common::response_json(unknown_email).await;
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["error"]["code"], "INVALID_CREDENTIALS");

    Ok(())
}

#[tokio::test]
async fn test_update_profile() -> Result<()> {
    let resources = common::create_test_resources().await?;
    let router = common::test_router(resources);

    common::register_tutor(&router, "Ana", "ana@example.com", "555-0100", "pw").await;
    let token = common::login_tutor(&router, "ana@example.com", "pw").await;

    let response = common::send(
        &router,
        common::json_request(
            Method::PUT,
            "/tutors",
            Some(&token),
            &json!({
                "name": "Ana Silva",
                "email": "ana.silva@example.com",
                "phone": "555-0200",
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::response_json(response).await;
    assert_eq!(body["name"], "Ana Silva");
    assert_eq!(body["email"], "ana.silva@example.com");
    assert_eq!(body["phone"], "555-0200");
    assert!(body.get("password_hash").is_none());

    Ok(())
}

#[tokio::test]
async fn test_update_profile_email_conflict() -> Result<()> {
    let resources = common::create_test_resources().await?;
    let router = common::test_router(resources);

    common::register_tutor(&router, "Ana", "ana@example.com", "555-0100", "pw").await;
    common::register_tutor(&router, "Bia", "bia@example.com", "555-0101", "pw").await;
    let token = common::login_tutor(&router, "bia@example.com", "pw").await;

    let response = common::send(
        &router,
        common::json_request(
            Method::PUT,
            "/tutors",
            Some(&token),
            &json!({
                "name": "Bia",
                "email": "ana@example.com",
                "phone": "555-0101",
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::response_json(response).await;
    assert_eq!(body["error"]["code"], "EMAIL_CONFLICT");

    Ok(())
}

#[tokio::test]
async fn test_update_profile_keeping_own_email_is_allowed() -> Result<()> {
    let resources = common::create_test_resources().await?;
    let router = common::test_router(resources);

    common::register_tutor(&router, "Ana", "ana@example.com", "555-0100", "pw").await;
    let token = common::login_tutor(&router, "ana@example.com", "pw").await;

    let response = common::send(
        &router,
        common::json_request(
            Method::PUT,
            "/tutors",
            Some(&token),
            &json!({
                "name": "Ana Renamed",
                "email": "ana@example.com",
                "phone": "555-0100",
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_email_change_login_round_trip() -> Result<()> {
    let resources = common::create_test_resources().await?;
    let router = common::test_router(resources);

    common::register_tutor(&router, "Ana", "ana@example.com", "555-0100", "pw").await;
    let token = common::login_tutor(&router, "ana@example.com", "pw").await;

    let response = common::send(
        &router,
        common::json_request(
            Method::PUT,
            "/tutors",
            Some(&token),
            &json!({
                "name": "Ana",
                "email": "ana.new@example.com",
                "phone": "555-0100",
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The new email logs in; the old one no longer does
    common::login_tutor(&router, "ana.new@example.com", "pw").await;

    let old_email = common::send(
        &router,
        common::json_request(
            Method::POST,
            "/login",
            None,
            &json!({ "email": "ana@example.com", "password": "pw" }),
        ),
    )
    .await;
    assert_eq!(old_email.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn test_profile_update_requires_credential() -> Result<()> {
    let resources = common::create_test_resources().await?;
    let router = common::test_router(resources);

    let response = common::send(
        &router,
        common::json_request(
            Method::PUT,
            "/tutors",
            None,
            &json!({ "name": "x", "email": "x@example.com", "phone": "1" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = common::response_json(response).await;
    assert_eq!(body["error"]["code"], "AUTH_REQUIRED");

    Ok(())
}

#[tokio::test]
async fn test_delete_account_removes_owned_animals() -> Result<()> {
    let resources = common::create_test_resources().await?;
    let database = resources.database.clone();
    let router = common::test_router(resources);

    common::register_tutor(&router, "Ana", "ana@example.com", "555-0100", "pw").await;
    let token = common::login_tutor(&router, "ana@example.com", "pw").await;

    for name in ["Rex", "Mimi"] {
        let created = common::send(
            &router,
            common::json_request(
                Method::POST,
                "/animals",
                Some(&token),
                &json!({ "name": name, "species": "dog", "breed": "mixed", "age": 3 }),
            ),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
    }

    let response = common::send(
        &router,
        common::bare_request(Method::DELETE, "/tutors", Some(&token)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // No orphaned animal rows remain
    let animal_rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM animals")
        .fetch_one(database.pool())
        .await?;
    assert_eq!(animal_rows, 0);

    // The credential no longer works
    let after = common::send(
        &router,
        common::bare_request(Method::GET, "/my-animals", Some(&token)),
    )
    .await;
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
