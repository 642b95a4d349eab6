// ABOUTME: Authentication service and login route for tutor accounts
// ABOUTME: Issues bearer credentials and validates registration input
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PetLodge

//! Authentication routes for tutor account management
//!
//! This module handles tutor registration and login. Handlers are thin
//! wrappers that delegate business logic to [`AuthService`].

use crate::{
    database::Database,
    errors::{AppError, AppResult},
    models::Tutor,
    server::ServerResources,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Tutor registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Tutor registration response, never echoing the secret
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Tutor login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Tutor summary for login responses
#[derive(Debug, Serialize, Deserialize)]
pub struct TutorInfo {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Tutor login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub tutor: TutorInfo,
    pub token: String,
    pub expires_at: String,
}

/// Authentication service for registration and login business logic
#[derive(Clone)]
pub struct AuthService {
    resources: Arc<ServerResources>,
}

impl AuthService {
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    fn database(&self) -> &Arc<Database> {
        &self.resources.database
    }

    /// Handle tutor registration
    ///
    /// # Errors
    /// Returns `EmailTaken` when the email is already registered,
    /// `InvalidInput` when validation fails, or a database error
    pub async fn register(&self, request: RegisterRequest) -> AppResult<RegisterResponse> {
        tracing::info!("Tutor registration attempt for email: {}", request.email);

        if !Self::is_valid_email(&request.email) {
            return Err(AppError::invalid_input("Invalid email format"));
        }
        if request.password.is_empty() {
            return Err(AppError::invalid_input("Password must not be empty"));
        }

        if self
            .database()
            .get_tutor_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(AppError::email_taken());
        }

        // Secrets are stored as salted one-way hashes, never raw
        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        let tutor = Tutor::new(request.name, request.email, request.phone, password_hash);
        let tutor_id = self.database().create_tutor(&tutor).await?;

        tracing::info!("Tutor registered successfully: {} ({})", tutor.email, tutor_id);

        Ok(RegisterResponse {
            id: tutor_id.to_string(),
            name: tutor.name,
            email: tutor.email,
        })
    }

    /// Handle tutor login
    ///
    /// Unknown email and wrong password produce the same
    /// `INVALID_CREDENTIALS` failure so callers cannot enumerate accounts.
    ///
    /// # Errors
    /// Returns `InvalidCredentials` on mismatch or an internal error if
    /// token generation fails
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        tracing::info!("Tutor login attempt for email: {}", request.email);

        let Some(tutor) = self.database().get_tutor_by_email(&request.email).await? else {
            return Err(AppError::invalid_credentials());
        };

        // Verify password off the async executor
        let password = request.password;
        let password_hash = tutor.password_hash.clone();
        let is_valid =
            tokio::task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
                .await
                .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
                .map_err(|e| AppError::internal(format!("Password verification error: {e}")))?;

        if !is_valid {
            tracing::warn!("Invalid password for tutor: {}", request.email);
            return Err(AppError::invalid_credentials());
        }

        let session = self
            .resources
            .auth_manager
            .create_session(&tutor)
            .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

        tracing::info!("Tutor logged in successfully: {} ({})", tutor.email, tutor.id);

        Ok(LoginResponse {
            tutor: TutorInfo {
                id: tutor.id.to_string(),
                name: tutor.name,
                email: tutor.email,
            },
            token: session.jwt_token,
            expires_at: session.expires_at.to_rfc3339(),
        })
    }

    /// Validate email format
    #[must_use]
    pub fn is_valid_email(email: &str) -> bool {
        if email.len() <= 5 {
            return false;
        }
        let Some(at_pos) = email.find('@') else {
            return false;
        };
        if at_pos == 0 || at_pos == email.len() - 1 {
            return false;
        }
        let domain_part = &email[at_pos + 1..];
        domain_part.contains('.')
    }

}

/// Authentication routes handler
///
/// Registration lives with the other `/tutors` routes in
/// [`crate::routes::TutorRoutes`]; this router carries login only.
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create the public authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/login", post(Self::handle_login))
            .with_state(resources)
    }

    /// Handle POST /login - Authenticate and issue a bearer credential
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let service = AuthService::new(resources);
        let response = service.login(body).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
