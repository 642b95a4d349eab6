// ABOUTME: Middleware module organization for request authentication
// ABOUTME: Exposes the bearer credential verification middleware
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PetLodge

//! Request middleware for the PetLodge server

/// Bearer credential verification
pub mod auth;

pub use auth::BearerAuthMiddleware;
