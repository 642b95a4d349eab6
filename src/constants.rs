// ABOUTME: Application constants and default configuration values
// ABOUTME: Centralizes limits, defaults, and environment variable names
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PetLodge

//! Application-wide constants

/// Limits and validity windows
pub mod limits {
    /// Session token validity in hours
    pub const SESSION_EXPIRY_HOURS: i64 = 1;
}

/// Time conversion constants
pub mod time_constants {
    /// Seconds in one hour
    pub const SECONDS_PER_HOUR: u32 = 3600;
}

/// Default configuration values
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 3333;

    /// Default database connection string
    pub const DATABASE_URL: &str = "sqlite:data/petlodge.db";
}

/// Environment variable names
pub mod env_config {
    /// HTTP port override
    pub const HTTP_PORT: &str = "HTTP_PORT";

    /// Database connection string
    pub const DATABASE_URL: &str = "DATABASE_URL";

    /// Shared secret for signing session tokens
    pub const JWT_SECRET: &str = "JWT_SECRET";

    /// Deployment environment (development, production, testing)
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Service identification
pub mod service_names {
    /// Service name used in logs and health responses
    pub const PETLODGE_SERVER: &str = "petlodge-server";
}
