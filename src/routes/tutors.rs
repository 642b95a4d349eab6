// ABOUTME: Route handlers for tutor accounts
// ABOUTME: Provides registration, profile update, and transactional account deletion
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PetLodge

//! Tutor account routes
//!
//! Registration is open; profile update and account deletion require a
//! bearer credential, and the mutated row is always the verified caller,
//! never a client-supplied id.

use crate::{
    auth::AuthResult,
    errors::AppError,
    models::Tutor,
    routes::auth::{AuthService, RegisterRequest},
    server::ServerResources,
};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Profile update request (name, email, phone only)
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Tutor profile response, without the secret field
#[derive(Debug, Serialize, Deserialize)]
pub struct TutorResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: String,
}

impl From<Tutor> for TutorResponse {
    fn from(tutor: Tutor) -> Self {
        Self {
            id: tutor.id.to_string(),
            name: tutor.name,
            email: tutor.email,
            phone: tutor.phone,
            created_at: tutor.created_at.to_rfc3339(),
        }
    }
}

/// Tutor profile routes handler
pub struct TutorRoutes;

impl TutorRoutes {
    /// Create the tutor account routes
    ///
    /// Registration is public; profile update and deletion require a
    /// bearer credential.
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/tutors", post(Self::handle_register))
            .route("/tutors", put(Self::handle_update_profile))
            .route("/tutors", delete(Self::handle_delete_account))
            .with_state(resources)
    }

    /// Handle POST /tutors - Register a new tutor
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let service = AuthService::new(resources);
        let response = service.register(body).await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Extract and authenticate the caller from the authorization header
    async fn authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<AuthResult, AppError> {
        let auth_header = headers.get("authorization").and_then(|h| h.to_str().ok());
        resources
            .auth_middleware
            .authenticate_request(auth_header)
            .await
    }

    /// Handle PUT /tutors - Update the caller's profile
    async fn handle_update_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<UpdateProfileRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let tutor = resources
            .database
            .update_tutor_profile(auth.tutor_id, &body.name, &body.email, &body.phone)
            .await?;

        tracing::info!("Profile updated for tutor: {}", auth.tutor_id);

        let response: TutorResponse = tutor.into();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle DELETE /tutors - Delete the caller's account and owned animals
    async fn handle_delete_account(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        resources.database.delete_tutor_account(auth.tutor_id).await?;

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
