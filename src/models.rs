// ABOUTME: Core data models for tutors, animals, and session tokens
// ABOUTME: Defines Tutor, Animal, Species and related fundamental structures
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PetLodge

//! # Data Models
//!
//! Core data structures used throughout the PetLodge server.
//!
//! - `Tutor`: an account holder / pet owner
//! - `Animal`: a pet record owned by exactly one tutor
//! - `Species`: the enumerated animal species
//! - `TutorSession`: an issued bearer credential with its expiry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An account holder who boards animals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tutor {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Contact email, unique across tutors
    pub email: String,
    /// Contact phone number
    pub phone: String,
    /// Bcrypt hash of the account password, never serialized
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Tutor {
    /// Create a new tutor with a generated id
    #[must_use]
    pub fn new(name: String, email: String, phone: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            phone,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Animal species supported by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    /// Dogs
    Dog,
    /// Cats
    Cat,
    /// Anything else boarded at the lodge
    #[default]
    Other,
}

impl Species {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dog => "dog",
            Self::Cat => "cat",
            Self::Other => "other",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "dog" => Self::Dog,
            "cat" => Self::Cat,
            _ => Self::Other,
        }
    }
}

/// A pet record owned by exactly one tutor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animal {
    /// Unique identifier
    pub id: Uuid,
    /// Owning tutor, immutable after creation
    pub tutor_id: Uuid,
    /// Animal name
    pub name: String,
    /// Species classification
    pub species: Species,
    /// Free-text breed
    pub breed: String,
    /// Age in years, non-negative
    pub age: u32,
    /// Record creation timestamp
    pub created_at: DateTime<Utc>,
}

/// An issued session credential together with its validity window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorSession {
    /// Tutor the credential was issued to
    pub tutor_id: Uuid,
    /// Tutor display name embedded in the token
    pub name: String,
    /// The signed bearer token
    pub jwt_token: String,
    /// When the credential stops being accepted
    pub expires_at: DateTime<Utc>,
}
