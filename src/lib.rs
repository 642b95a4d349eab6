// ABOUTME: Main library entry point for the PetLodge boarding API
// ABOUTME: Provides REST endpoints for tutor accounts and owner-scoped animal records
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PetLodge

#![deny(unsafe_code)]

//! # PetLodge Server
//!
//! A pet-boarding management backend. Tutors (pet owners) register,
//! authenticate with a time-limited bearer token, and manage the animals
//! they own. Every animal operation is scoped to the owning tutor.
//!
//! ## Architecture
//!
//! The server follows a modular architecture:
//! - **Routes**: Thin axum handlers per domain (auth, tutors, animals)
//! - **Database**: SQLite storage through sqlx with owner-scoped queries
//! - **Auth**: HS256 JWT issuance and validation with a one-hour window
//! - **Middleware**: Bearer credential verification for protected routes
//! - **Config**: Environment-based configuration for deployment
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use petlodge::config::environment::ServerConfig;
//! use petlodge::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("PetLodge configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Authentication and session token management
pub mod auth;

/// Configuration management
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Tutor and animal storage
pub mod database;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Structured logging configuration
pub mod logging;

/// Bearer credential verification middleware
pub mod middleware;

/// Core data models
pub mod models;

/// HTTP route handlers organized by domain
pub mod routes;

/// Router assembly and shared server resources
pub mod server;
