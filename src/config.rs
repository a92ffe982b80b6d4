// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Built once at startup and handed to the services that need it through
//! `AppState`. Nothing reads the environment after `main` has run.

use std::env;
use std::time::Duration;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Application ---
    /// Display name reported by the root endpoint and health check
    pub app_name: String,
    /// Version reported by the root endpoint
    pub app_version: String,
    /// Prefix every API route is mounted under (e.g. `/api`)
    pub api_prefix: String,
    /// Server port
    pub port: u16,
    /// Origins allowed by the CORS layer
    pub cors_origins: Vec<String>,

    // --- Supabase ---
    /// Base URL of the Supabase project (no trailing slash)
    pub supabase_url: String,
    /// Public anon key, sent as `apikey` on every provider call
    pub supabase_key: String,
    /// Service role key; when set, table access bypasses row-level security
    pub supabase_service_key: Option<String>,
    /// Where the password-reset email should send the user
    pub password_reset_redirect_url: Option<String>,
    /// Per-request timeout for provider calls
    pub provider_timeout: Duration,
}

const DEFAULT_APP_NAME: &str = "RouteMate API";
const DEFAULT_API_PREFIX: &str = "/api";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 10;

impl Config {
    /// Load configuration from environment variables (and `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let supabase_url = required("SUPABASE_URL")?;
        if !supabase_url.starts_with("http://") && !supabase_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                name: "SUPABASE_URL",
                reason: "must start with http:// or https://".to_string(),
            });
        }

        let provider_timeout_secs = match env::var("PROVIDER_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PROVIDER_TIMEOUT_SECS",
                reason: format!("'{}' is not a whole number of seconds", raw),
            })?,
            Err(_) => DEFAULT_PROVIDER_TIMEOUT_SECS,
        };

        Ok(Self {
            app_name: env::var("APP_NAME").unwrap_or_else(|_| DEFAULT_APP_NAME.to_string()),
            app_version: env::var("APP_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string()),
            api_prefix: normalize_prefix(
                &env::var("API_PREFIX").unwrap_or_else(|_| DEFAULT_API_PREFIX.to_string()),
            ),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            cors_origins: parse_origins(
                &env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string()),
            ),
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            supabase_key: required("SUPABASE_KEY")?,
            supabase_service_key: optional("SUPABASE_SERVICE_KEY"),
            password_reset_redirect_url: optional("PASSWORD_RESET_REDIRECT_URL"),
            provider_timeout: Duration::from_secs(provider_timeout_secs),
        })
    }

    /// Config for tests, pointed at a fake provider.
    pub fn test_default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            app_version: "0.0.0-test".to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            port: DEFAULT_PORT,
            cors_origins: parse_origins(DEFAULT_CORS_ORIGINS),
            supabase_url: "http://127.0.0.1:54321".to_string(),
            supabase_key: "test-anon-key".to_string(),
            supabase_service_key: None,
            password_reset_redirect_url: None,
            provider_timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
        }
    }

    /// Key used for table access: the service key if configured, else the anon key.
    pub fn table_key(&self) -> &str {
        self.supabase_service_key
            .as_deref()
            .unwrap_or(&self.supabase_key)
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .map(|v| v.trim().to_string())
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `"api/"` and `"/api"` both become `"/api"`; an empty prefix stays empty.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/').to_string())
        .filter(|o| !o.is_empty())
        .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
