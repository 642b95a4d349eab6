// ABOUTME: HTTP server assembly, shared resource container, and serve loop
// ABOUTME: Builds the axum router from route modules and binds the listener
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PetLodge

//! Server resources and HTTP serving
//!
//! [`ServerResources`] is the dependency container created once at startup
//! and shared across all handlers via `Arc`. Route modules receive it
//! through axum state.

use crate::{
    auth::AuthManager,
    database::Database,
    errors::AppResult,
    middleware::BearerAuthMiddleware,
    routes::{AnimalRoutes, AuthRoutes, HealthRoutes, TutorRoutes},
};
use axum::Router;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Centralized dependency container for all server resources
///
/// Created once at startup with each component wrapped in `Arc` exactly
/// once. Handlers clone the outer `Arc`, never the resources themselves.
pub struct ServerResources {
    /// Storage backend
    pub database: Arc<Database>,
    /// Token issuance and validation
    pub auth_manager: Arc<AuthManager>,
    /// Bearer credential middleware
    pub auth_middleware: Arc<BearerAuthMiddleware>,
}

impl ServerResources {
    /// Create new server resources with proper Arc sharing
    #[must_use]
    pub fn new(database: Database, auth_manager: AuthManager) -> Self {
        let database = Arc::new(database);
        let auth_manager = Arc::new(auth_manager);
        let auth_middleware = Arc::new(BearerAuthMiddleware::new(
            auth_manager.clone(),
            database.clone(),
        ));

        Self {
            database,
            auth_manager,
            auth_middleware,
        }
    }
}

/// Build the complete application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(AuthRoutes::routes(resources.clone()))
        .merge(TutorRoutes::routes(resources.clone()))
        .merge(AnimalRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind the listener and serve requests until shutdown
///
/// # Errors
/// Returns an error if the port cannot be bound or the server loop fails
pub async fn serve(resources: Arc<ServerResources>, port: u16) -> AppResult<()> {
    let app = router(resources);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| crate::errors::AppError::config(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("HTTP server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| crate::errors::AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}
