// ABOUTME: Server binary for the pet boarding management REST API
// ABOUTME: Loads configuration, wires resources, and serves HTTP requests
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PetLodge

//! # PetLodge Server Binary
//!
//! Starts the pet boarding REST API with tutor authentication and
//! SQLite-backed storage.

use anyhow::Result;
use clap::Parser;
use petlodge::{
    auth::AuthManager, config::ServerConfig, database::Database, logging,
    server::{self, ServerResources},
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "petlodge-server")]
#[command(about = "PetLodge - pet boarding management API for tutors and their animals")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting PetLodge Server");
    info!("{}", config.summary());

    let database = Database::new(&config.database.url.to_connection_string()).await?;
    info!(
        "Database initialized: {}",
        config.database.url.to_connection_string()
    );

    let auth_manager = AuthManager::new(
        config.auth.jwt_secret.clone(),
        config.auth.token_expiry_hours,
    );
    info!("Authentication manager initialized");

    let resources = Arc::new(ServerResources::new(database, auth_manager));

    server::serve(resources, config.http_port).await?;

    Ok(())
}
