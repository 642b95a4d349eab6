// ABOUTME: Health and readiness endpoints for operational visibility
// ABOUTME: Reports service identity and storage connectivity for probes
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PetLodge

//! Health check endpoints
//!
//! `/health` is a fast liveness probe; `/ready` additionally verifies the
//! database connection.

use crate::{constants::service_names, errors::AppError, server::ServerResources};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Overall health status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: HealthStatus,
    /// Service name
    pub service: String,
    /// Service version
    pub version: String,
    /// Response timestamp
    pub timestamp: String,
}

/// Health routes handler
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health and readiness routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .route("/ready", get(Self::handle_ready))
            .with_state(resources)
    }

    fn health_body(status: HealthStatus) -> HealthResponse {
        HealthResponse {
            status,
            service: service_names::PETLODGE_SERVER.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Handle GET /health - Fast liveness probe
    async fn handle_health() -> Response {
        (StatusCode::OK, Json(Self::health_body(HealthStatus::Healthy))).into_response()
    }

    /// Handle GET /ready - Readiness probe including storage connectivity
    async fn handle_ready(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        match resources.database.get_tutor_count().await {
            Ok(_) => {
                Ok((StatusCode::OK, Json(Self::health_body(HealthStatus::Healthy))).into_response())
            }
            Err(e) => {
                tracing::error!("Readiness check failed: {e}");
                Ok((
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(Self::health_body(HealthStatus::Unhealthy)),
                )
                    .into_response())
            }
        }
    }
}
