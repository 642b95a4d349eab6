// ABOUTME: Route module organization for PetLodge HTTP endpoints
// ABOUTME: Provides route definitions organized by domain with thin handlers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PetLodge

//! Route module for the PetLodge server
//!
//! This module organizes all HTTP routes by domain. Each domain module
//! contains route definitions and thin handler functions that delegate to
//! service and storage layers.

/// Owner-scoped animal registry routes
pub mod animals;
/// Registration and login routes
pub mod auth;
/// Health check and system status routes
pub mod health;
/// Tutor profile routes (authenticated)
pub mod tutors;

/// Animal route handlers
pub use animals::AnimalRoutes;
/// Authentication route handlers
pub use auth::AuthRoutes;
/// Authentication service
pub use auth::AuthService;
/// Login request payload
pub use auth::LoginRequest;
/// Login response with token
pub use auth::LoginResponse;
/// Registration request payload
pub use auth::RegisterRequest;
/// Registration response with tutor summary
pub use auth::RegisterResponse;
/// Tutor summary used in responses
pub use auth::TutorInfo;
/// Health check route handlers
pub use health::HealthRoutes;
/// Tutor profile route handlers
pub use tutors::TutorRoutes;
