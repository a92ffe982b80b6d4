// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Supabase Auth (GoTrue) API client.
//!
//! Raw HTTP calls only: one method per provider endpoint, no interpretation of
//! errors beyond turning them into `ProviderError`. `AuthService` decides what
//! the errors mean.

use crate::services::provider_error::ProviderError;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Supabase Auth client.
#[derive(Clone)]
pub struct GoTrueClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Profile fields stored in the provider's `user_metadata`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl GoTrueClient {
    /// Create a client for `{project_url}/auth/v1`.
    pub fn new(http: reqwest::Client, project_url: &str, api_key: String) -> Self {
        Self {
            http,
            base_url: format!("{}/auth/v1", project_url.trim_end_matches('/')),
            api_key,
        }
    }

    /// Register a new account.
    ///
    /// Returns a session when the project auto-confirms, otherwise just the
    /// created user.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: &ProfileData,
    ) -> Result<SignUpResponse, ProviderError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "data": profile,
        });

        let response = self
            .http
            .post(format!("{}/signup", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        check_response_json(response).await
    }

    /// Exchange email and password for a session.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, ProviderError> {
        let body = serde_json::json!({ "email": email, "password": password });
        self.token_grant("password", &body).await
    }

    /// Exchange a refresh token for a new session.
    pub async fn refresh_session(
        &self,
        refresh_token: &str,
    ) -> Result<ProviderSession, ProviderError> {
        let body = serde_json::json!({ "refresh_token": refresh_token });
        self.token_grant("refresh_token", &body).await
    }

    /// Revoke the session the access token belongs to.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError> {
        let response = self
            .http
            .post(format!("{}/logout", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        check_response(response).await
    }

    /// Look up the user an access token belongs to.
    pub async fn get_user(&self, access_token: &str) -> Result<ProviderUser, ProviderError> {
        let response = self
            .http
            .get(format!("{}/user", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        check_response_json(response).await
    }

    /// Ask the provider to email a password-reset link.
    pub async fn reset_password_email(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> Result<(), ProviderError> {
        let mut request = self
            .http
            .post(format!("{}/recover", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "email": email }));

        if let Some(redirect_to) = redirect_to {
            request = request.query(&[("redirect_to", redirect_to)]);
        }

        check_response(request.send().await?).await
    }

    /// Change the password of the user the access token belongs to.
    pub async fn update_password(
        &self,
        access_token: &str,
        new_password: &str,
    ) -> Result<ProviderUser, ProviderError> {
        let response = self
            .http
            .put(format!("{}/user", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .json(&serde_json::json!({ "password": new_password }))
            .send()
            .await?;

        check_response_json(response).await
    }

    async fn token_grant(
        &self,
        grant_type: &str,
        body: &serde_json::Value,
    ) -> Result<ProviderSession, ProviderError> {
        let response = self
            .http
            .post(format!("{}/token", self.base_url))
            .query(&[("grant_type", grant_type)])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        check_response_json(response).await
    }
}

/// Check response status and return error if not successful.
async fn check_response(response: reqwest::Response) -> Result<(), ProviderError> {
    if response.status().is_success() {
        return Ok(());
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::from_response(status, &body))
}

/// Check response and parse JSON body.
async fn check_response_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ProviderError> {
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::from_response(status, &body));
    }

    response
        .json()
        .await
        .map_err(|e| ProviderError::Decode(e.to_string()))
}

/// Session issued by the provider.
#[derive(Clone, Deserialize)]
pub struct ProviderSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub user: Option<ProviderUser>,
}

impl ProviderSession {
    /// Both tokens present and not already expired.
    pub fn is_usable(&self) -> bool {
        !self.access_token.is_empty() && !self.refresh_token.is_empty() && self.expires_in > 0
    }
}

/// User object as the provider returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: serde_json::Map<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub email_confirmed_at: Option<DateTime<Utc>>,
}

impl ProviderUser {
    /// Read a string field from `user_metadata`; empty strings count as absent.
    pub fn metadata_str(&self, key: &str) -> Option<String> {
        self.user_metadata
            .get(key)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// Sign-up answer: a full session, or a bare user awaiting confirmation.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(ProviderSession),
    User(ProviderUser),
}
