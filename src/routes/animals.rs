// ABOUTME: Route handlers for the owner-scoped animal registry REST API
// ABOUTME: Provides CRUD endpoints where every record is bound to its owning tutor
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PetLodge

//! Animal registry routes
//!
//! All endpoints require a bearer credential identifying the owning tutor.
//! The owner field is always taken from the verified identity, never from
//! client input, and lookups for absent or foreign-owned animals fail
//! identically with not-found.

use crate::{
    auth::AuthResult,
    database::{CreateAnimalRequest, UpdateAnimalRequest},
    errors::AppError,
    models::{Animal, Species},
    server::ServerResources,
};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Response for an animal record
#[derive(Debug, Serialize, Deserialize)]
pub struct AnimalResponse {
    /// Unique identifier
    pub id: String,
    /// Owning tutor
    pub tutor_id: String,
    /// Animal name
    pub name: String,
    /// Species classification
    pub species: String,
    /// Free-text breed
    pub breed: String,
    /// Age in years
    pub age: u32,
    /// Creation timestamp
    pub created_at: String,
}

impl From<Animal> for AnimalResponse {
    fn from(animal: Animal) -> Self {
        Self {
            id: animal.id.to_string(),
            tutor_id: animal.tutor_id.to_string(),
            name: animal.name,
            species: animal.species.as_str().to_owned(),
            breed: animal.breed,
            age: animal.age,
            created_at: animal.created_at.to_rfc3339(),
        }
    }
}

/// Request body for creating an animal
///
/// Carries no owner field; ownership comes from the credential.
#[derive(Debug, Deserialize)]
pub struct CreateAnimalBody {
    /// Animal name
    pub name: String,
    /// Species classification
    pub species: Species,
    /// Free-text breed
    pub breed: String,
    /// Age in years
    pub age: u32,
}

impl From<CreateAnimalBody> for CreateAnimalRequest {
    fn from(body: CreateAnimalBody) -> Self {
        Self {
            name: body.name,
            species: body.species,
            breed: body.breed,
            age: body.age,
        }
    }
}

/// Request body for replacing an animal's mutable fields
#[derive(Debug, Deserialize)]
pub struct UpdateAnimalBody {
    /// New animal name
    pub name: String,
    /// New species classification
    pub species: Species,
    /// New breed
    pub breed: String,
    /// New age in years
    pub age: u32,
}

impl From<UpdateAnimalBody> for UpdateAnimalRequest {
    fn from(body: UpdateAnimalBody) -> Self {
        Self {
            name: body.name,
            species: body.species,
            breed: body.breed,
            age: body.age,
        }
    }
}

/// Animal registry routes handler
pub struct AnimalRoutes;

impl AnimalRoutes {
    /// Create all animal registry routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/my-animals", get(Self::handle_list))
            .route("/animals", post(Self::handle_create))
            .route("/animals/:id", put(Self::handle_update))
            .route("/animals/:id", delete(Self::handle_delete))
            .with_state(resources)
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

    /// Parse an animal id path segment
    fn parse_animal_id(id: &str) -> Result<Uuid, AppError> {
        // An unparseable id can't name any animal; same conflated outcome
        Uuid::parse_str(id).map_err(|_| AppError::not_found(format!("Animal {id}")))
    }

    /// Handle GET /my-animals - List the caller's animals
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let animals = resources.database.list_animals(auth.tutor_id).await?;
        let response: Vec<AnimalResponse> = animals.into_iter().map(Into::into).collect();

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /animals - Create an animal owned by the caller
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<CreateAnimalBody>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let request: CreateAnimalRequest = body.into();
        let animal = resources
            .database
            .create_animal(auth.tutor_id, &request)
            .await?;

        tracing::info!("Animal {} created for tutor {}", animal.id, auth.tutor_id);

        let response: AnimalResponse = animal.into();
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle PUT /animals/:id - Update an animal the caller owns
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(body): Json<UpdateAnimalBody>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;
        let animal_id = Self::parse_animal_id(&id)?;

        let request: UpdateAnimalRequest = body.into();
        let animal = resources
            .database
            .update_animal(animal_id, auth.tutor_id, &request)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Animal {id}")))?;

        let response: AnimalResponse = animal.into();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle DELETE /animals/:id - Delete an animal the caller owns
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;
        let animal_id = Self::parse_animal_id(&id)?;

        let deleted = resources
            .database
            .delete_animal(animal_id, auth.tutor_id)
            .await?;

        if !deleted {
            return Err(AppError::not_found(format!("Animal {id}")));
        }

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
