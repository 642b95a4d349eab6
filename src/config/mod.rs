// ABOUTME: Configuration module grouping environment-driven server settings
// ABOUTME: Re-exports the environment configuration types
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PetLodge

//! Server configuration

pub mod environment;

pub use environment::{
    AuthConfig, DatabaseConfig, DatabaseUrl, Environment, LogLevel, ServerConfig,
};
