// ABOUTME: Animal registry database operations with owner scoping
// ABOUTME: Every read, update, and delete is filtered by the owning tutor
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PetLodge

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{Animal, Species};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::Row;
use uuid::Uuid;

/// Request to create a new animal record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAnimalRequest {
    /// Animal name
    pub name: String,
    /// Species classification
    pub species: Species,
    /// Free-text breed
    pub breed: String,
    /// Age in years
    pub age: u32,
}

/// Request to replace an animal's mutable fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAnimalRequest {
    /// New animal name
    pub name: String,
    /// New species classification
    pub species: Species,
    /// New breed
    pub breed: String,
    /// New age in years
    pub age: u32,
}

impl Database {
    /// Create the animals table
    pub(super) async fn migrate_animals(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS animals (
                id TEXT PRIMARY KEY,
                tutor_id TEXT NOT NULL REFERENCES tutors(id),
                name TEXT NOT NULL,
                species TEXT NOT NULL CHECK (species IN ('dog', 'cat', 'other')),
                breed TEXT NOT NULL,
                age INTEGER NOT NULL CHECK (age >= 0),
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create animals table: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_animals_tutor ON animals(tutor_id)")
            .execute(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to create animals index: {e}")))?;

        Ok(())
    }

    /// Create a new animal owned by the given tutor
    ///
    /// The owner always comes from the verified caller identity, never
    /// from client input.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create_animal(
        &self,
        tutor_id: Uuid,
        request: &CreateAnimalRequest,
    ) -> AppResult<Animal> {
        let now = Utc::now();
        let id = Uuid::new_v4();

        sqlx::query(
            r"
            INSERT INTO animals (id, tutor_id, name, species, breed, age, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(id.to_string())
        .bind(tutor_id.to_string())
        .bind(&request.name)
        .bind(request.species.as_str())
        .bind(&request.breed)
        .bind(i64::from(request.age))
        .bind(now)
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create animal: {e}")))?;

        Ok(Animal {
            id,
            tutor_id,
            name: request.name.clone(),
            species: request.species,
            breed: request.breed.clone(),
            age: request.age,
            created_at: now,
        })
    }

    /// List every animal owned by a tutor, in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_animals(&self, tutor_id: Uuid) -> AppResult<Vec<Animal>> {
        let rows = sqlx::query(
            r"
            SELECT id, tutor_id, name, species, breed, age, created_at
            FROM animals
            WHERE tutor_id = $1
            ORDER BY rowid
            ",
        )
        .bind(tutor_id.to_string())
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to list animals: {e}")))?;

        rows.iter().map(row_to_animal).collect()
    }

    /// Get an animal by ID, visible only to its owner
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_animal(&self, animal_id: Uuid, tutor_id: Uuid) -> AppResult<Option<Animal>> {
        let row = sqlx::query(
            r"
            SELECT id, tutor_id, name, species, breed, age, created_at
            FROM animals
            WHERE id = $1 AND tutor_id = $2
            ",
        )
        .bind(animal_id.to_string())
        .bind(tutor_id.to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to get animal: {e}")))?;

        row.map(|r| row_to_animal(&r)).transpose()
    }

    /// Replace an animal's mutable fields, scoped to its owner
    ///
    /// Returns `None` when the animal does not exist or belongs to a
    /// different tutor; the two cases are indistinguishable to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn update_animal(
        &self,
        animal_id: Uuid,
        tutor_id: Uuid,
        request: &UpdateAnimalRequest,
    ) -> AppResult<Option<Animal>> {
        let result = sqlx::query(
            r"
            UPDATE animals SET name = $3, species = $4, breed = $5, age = $6
            WHERE id = $1 AND tutor_id = $2
            ",
        )
        .bind(animal_id.to_string())
        .bind(tutor_id.to_string())
        .bind(&request.name)
        .bind(request.species.as_str())
        .bind(&request.breed)
        .bind(i64::from(request.age))
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to update animal: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_animal(animal_id, tutor_id).await
    }

    /// Delete an animal, scoped to its owner
    ///
    /// Returns `false` when zero rows were deleted (absent or foreign-owned);
    /// callers report that as not found rather than silent success.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete_animal(&self, animal_id: Uuid, tutor_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM animals WHERE id = $1 AND tutor_id = $2")
            .bind(animal_id.to_string())
            .bind(tutor_id.to_string())
            .execute(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to delete animal: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Count the animals owned by a tutor
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn count_animals(&self, tutor_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM animals WHERE tutor_id = $1")
            .bind(tutor_id.to_string())
            .fetch_one(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to count animals: {e}")))
    }
}

/// Convert a database row to an Animal struct
fn row_to_animal(row: &sqlx::sqlite::SqliteRow) -> AppResult<Animal> {
    let id: String = row.get("id");
    let tutor_id: String = row.get("tutor_id");
    let species: String = row.get("species");
    let age: i64 = row.get("age");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    Ok(Animal {
        id: Uuid::parse_str(&id)
            .map_err(|e| AppError::database(format!("Invalid animal id in storage: {e}")))?,
        tutor_id: Uuid::parse_str(&tutor_id)
            .map_err(|e| AppError::database(format!("Invalid tutor id in storage: {e}")))?,
        name: row.get("name"),
        species: Species::parse(&species),
        breed: row.get("breed"),
        age: u32::try_from(age).unwrap_or(0),
        created_at,
    })
}
