// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! RouteMate: bus routes, live bus positions and rider accounts
//!
//! This crate provides the backend API. Accounts and sessions live in
//! Supabase Auth; profiles, routes and buses live in Supabase tables.

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use anyhow::Context;
use config::Config;
use db::{BusRepository, PostgrestClient, RouteRepository, UserRepository};
use services::AuthService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub auth_service: AuthService,
    pub users: UserRepository,
    pub bus_routes: RouteRepository,
    pub buses: BusRepository,
}

impl AppState {
    /// Build provider clients over one shared HTTP connection pool.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.provider_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        let db = PostgrestClient::new(
            http.clone(),
            &config.supabase_url,
            config.table_key().to_string(),
        );

        Ok(Self {
            auth_service: AuthService::new(http, &config),
            users: UserRepository::new(db.clone()),
            bus_routes: RouteRepository::new(db.clone()),
            buses: BusRepository::new(db),
            config,
        })
    }
}
