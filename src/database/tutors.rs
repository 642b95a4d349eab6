// ABOUTME: Tutor account database operations
// ABOUTME: Handles registration, lookup, profile updates, and account deletion
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PetLodge

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::Tutor;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the tutors table
    pub(super) async fn migrate_tutors(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS tutors (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL,
                phone TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create tutors table: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_tutors_email ON tutors(email)")
            .execute(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to create tutors index: {e}")))?;

        Ok(())
    }

    /// Insert a new tutor
    ///
    /// # Errors
    ///
    /// Returns `EmailTaken` when the email is already registered, or a
    /// database error if the operation fails
    pub async fn create_tutor(&self, tutor: &Tutor) -> AppResult<Uuid> {
        sqlx::query(
            r"
            INSERT INTO tutors (id, name, email, phone, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(tutor.id.to_string())
        .bind(&tutor.name)
        .bind(&tutor.email)
        .bind(&tutor.phone)
        .bind(&tutor.password_hash)
        .bind(tutor.created_at)
        .execute(self.pool())
        .await
        .map_err(|e| {
            // Backstop for races past the route-level existence check
            if e.as_database_error()
                .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
            {
                AppError::email_taken()
            } else {
                AppError::database(format!("Failed to create tutor: {e}"))
            }
        })?;

        Ok(tutor.id)
    }

    /// Get a tutor by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_tutor(&self, tutor_id: Uuid) -> AppResult<Option<Tutor>> {
        self.get_tutor_impl("id", &tutor_id.to_string()).await
    }

    /// Get a tutor by email
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_tutor_by_email(&self, email: &str) -> AppResult<Option<Tutor>> {
        self.get_tutor_impl("email", email).await
    }

    /// Internal implementation for getting a tutor
    async fn get_tutor_impl(&self, field: &str, value: &str) -> AppResult<Option<Tutor>> {
        let query = format!(
            r"
            SELECT id, name, email, phone, password_hash, created_at
            FROM tutors WHERE {field} = $1
            "
        );

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to get tutor: {e}")))?;

        row.map(|r| row_to_tutor(&r)).transpose()
    }

    /// Update a tutor's profile (name, email, phone only)
    ///
    /// The target row is always the verified caller; the secret field is
    /// untouched. Returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns `EmailConflict` when the new email belongs to a different
    /// tutor, `ResourceNotFound` when the caller's account no longer
    /// exists, or a database error if the operation fails
    pub async fn update_tutor_profile(
        &self,
        tutor_id: Uuid,
        name: &str,
        email: &str,
        phone: &str,
    ) -> AppResult<Tutor> {
        if let Some(existing) = self.get_tutor_by_email(email).await? {
            if existing.id != tutor_id {
                return Err(AppError::email_conflict());
            }
        }

        let result = sqlx::query(
            r"
            UPDATE tutors SET name = $2, email = $3, phone = $4 WHERE id = $1
            ",
        )
        .bind(tutor_id.to_string())
        .bind(name)
        .bind(email)
        .bind(phone)
        .execute(self.pool())
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
            {
                AppError::email_conflict()
            } else {
                AppError::database(format!("Failed to update tutor profile: {e}"))
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Tutor {tutor_id}")));
        }

        self.get_tutor(tutor_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tutor {tutor_id}")))
    }

    /// Delete a tutor account together with every animal it owns
    ///
    /// Both deletes run inside a single transaction so a failure between
    /// the two steps cannot leave orphaned animals or a tutor without a
    /// consistent registry.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the account no longer exists, or a
    /// database error if the transaction fails
    pub async fn delete_tutor_account(&self, tutor_id: Uuid) -> AppResult<()> {
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query("DELETE FROM animals WHERE tutor_id = $1")
            .bind(tutor_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete animals: {e}")))?;

        let result = sqlx::query("DELETE FROM tutors WHERE id = $1")
            .bind(tutor_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete tutor: {e}")))?;

        if result.rows_affected() == 0 {
            // Rolls back the animal deletes on drop
            return Err(AppError::not_found(format!("Tutor {tutor_id}")));
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit account deletion: {e}")))?;

        tracing::info!("Deleted tutor account and owned animals: {}", tutor_id);
        Ok(())
    }

    /// Get total tutor count
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_tutor_count(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM tutors")
            .fetch_one(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to count tutors: {e}")))
    }
}

/// Convert a database row to a Tutor struct
fn row_to_tutor(row: &sqlx::sqlite::SqliteRow) -> AppResult<Tutor> {
    let id: String = row.get("id");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    Ok(Tutor {
        id: Uuid::parse_str(&id)
            .map_err(|e| AppError::database(format!("Invalid tutor id in storage: {e}")))?,
        name: row.get("name"),
        email: row.get("email"),
        phone: row.get("phone"),
        password_hash: row.get("password_hash"),
        created_at,
    })
}
