// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session and token responses.

use crate::services::gotrue::{ProviderSession, ProviderUser};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// User summary embedded in a token response.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionUser {
    pub id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

impl From<&ProviderUser> for SessionUser {
    fn from(user: &ProviderUser) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            full_name: user.metadata_str("full_name"),
            phone: user.metadata_str("phone"),
        }
    }
}

/// Token response returned by sign-up, sign-in and refresh.
#[derive(Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
    /// Seconds until the access token expires.
    pub expires_in: i64,
    pub refresh_token: String,
    pub user: SessionUser,
}

impl TokenResponse {
    pub fn new(session: ProviderSession, user: SessionUser) -> Self {
        Self {
            access_token: session.access_token,
            token_type: "bearer".to_string(),
            expires_in: session.expires_in,
            refresh_token: session.refresh_token,
            user,
        }
    }
}

/// Account created, but the provider wants the email confirmed before
/// issuing a session.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PendingConfirmation {
    /// Always `"pending_confirmation"`.
    pub status: String,
    pub message: String,
    pub email: String,
    pub user_id: String,
}

impl PendingConfirmation {
    pub fn new(email: String, user_id: String) -> Self {
        Self {
            status: "pending_confirmation".to_string(),
            message: "Registration successful! Please check your email to confirm your account."
                .to_string(),
            email,
            user_id,
        }
    }
}

/// Result of a sign-up call.
pub enum SignUpOutcome {
    /// The provider issued a session straight away.
    Active(TokenResponse),
    PendingConfirmation(PendingConfirmation),
}
