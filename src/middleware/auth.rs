// ABOUTME: Bearer credential verification middleware for protected routes
// ABOUTME: Validates JWT tokens and resolves the verified tutor identity
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PetLodge

use crate::auth::{AuthManager, AuthResult, JwtValidationError};
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use std::sync::Arc;
use uuid::Uuid;

/// Middleware verifying the bearer credential on protected operations
///
/// Mandatory on every animal operation and on tutor profile
/// mutation/deletion; bypassed only for registration, login, and health.
#[derive(Clone)]
pub struct BearerAuthMiddleware {
    auth_manager: Arc<AuthManager>,
    database: Arc<Database>,
}

impl BearerAuthMiddleware {
    /// Create new bearer auth middleware
    #[must_use]
    pub const fn new(auth_manager: Arc<AuthManager>, database: Arc<Database>) -> Self {
        Self {
            auth_manager,
            database,
        }
    }

    /// Authenticate a request from its authorization header value
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The authorization header is missing (`AUTH_REQUIRED`)
    /// - The header is not a `Bearer <token>` value (`AUTH_INVALID`)
    /// - The token is malformed, expired, or carries a bad signature
    /// - The tutor encoded in the token no longer exists
    #[tracing::instrument(
        skip(self, auth_header),
        fields(tutor_id = tracing::field::Empty, success = tracing::field::Empty)
    )]
    pub async fn authenticate_request(&self, auth_header: Option<&str>) -> AppResult<AuthResult> {
        let Some(auth_str) = auth_header else {
            tracing::warn!("Authentication failed: Missing authorization header");
            return Err(AppError::auth_required());
        };

        let Some(token) = auth_str.strip_prefix("Bearer ") else {
            tracing::warn!(
                "Authentication failed: Invalid authorization header format (expected 'Bearer ...')"
            );
            return Err(AppError::auth_invalid(
                "Invalid authorization header format - must be 'Bearer <token>'",
            ));
        };

        match self.authenticate_token(token).await {
            Ok(result) => {
                tracing::Span::current()
                    .record("tutor_id", result.tutor_id.to_string())
                    .record("success", true);
                tracing::debug!("JWT authentication successful for tutor: {}", result.tutor_id);
                Ok(result)
            }
            Err(e) => {
                tracing::Span::current().record("success", false);
                tracing::warn!("JWT authentication failed: {}", e);
                Err(e)
            }
        }
    }

    /// Authenticate using a bearer `JWT` token
    async fn authenticate_token(&self, token: &str) -> AppResult<AuthResult> {
        let claims = self
            .auth_manager
            .validate_token_detailed(token)
            .map_err(|e| match e {
                JwtValidationError::TokenExpired { .. } => AppError::auth_expired(),
                JwtValidationError::TokenMalformed { details } => AppError::auth_malformed(details),
                JwtValidationError::TokenInvalid { reason } => AppError::auth_invalid(reason),
            })?;

        let tutor_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::auth_invalid("Invalid tutor ID in token"))?;

        // A valid token for a deleted account grants nothing
        self.database
            .get_tutor(tutor_id)
            .await?
            .ok_or_else(|| AppError::auth_invalid(format!("Tutor {tutor_id} no longer exists")))?;

        Ok(AuthResult {
            tutor_id,
            name: claims.name,
        })
    }

    /// Get reference to the auth manager for testing purposes
    #[must_use]
    pub const fn auth_manager(&self) -> &Arc<AuthManager> {
        &self.auth_manager
    }
}
