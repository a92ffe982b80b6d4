// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication façade over Supabase Auth.
//!
//! Each operation validates its input locally, makes one provider round trip
//! and reshapes the answer. Provider errors go through
//! `classify_provider_error` exactly once, then get an operation-specific
//! message here.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    MessageResponse, PasswordResetRequest, PasswordUpdateRequest, PendingConfirmation,
    RefreshTokenRequest, SessionUser, SignInRequest, SignUpOutcome, SignUpRequest, TokenResponse,
    User,
};
use crate::services::gotrue::{GoTrueClient, ProfileData, ProviderSession, SignUpResponse};
use crate::services::provider_error::{classify_provider_error, AuthFailure, ProviderError};
use validator::Validate;

/// Same text whether or not the email belongs to an account.
pub const PASSWORD_RESET_ACK: &str = "If the email exists, a password reset link has been sent.";

const INVALID_LOGIN: &str = "Invalid email or password.";
const INVALID_ACCESS_TOKEN: &str = "Invalid or expired token";
const INVALID_REFRESH_TOKEN: &str = "Invalid or expired refresh token";

/// Authentication service.
#[derive(Clone)]
pub struct AuthService {
    client: GoTrueClient,
    reset_redirect_url: Option<String>,
}

impl AuthService {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            client: GoTrueClient::new(http, &config.supabase_url, config.supabase_key.clone()),
            reset_redirect_url: config.password_reset_redirect_url.clone(),
        }
    }

    /// Register a new user.
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome> {
        request.validate()?;

        let profile = ProfileData {
            full_name: request.full_name.clone(),
            phone: request.phone.clone(),
        };

        let response = self
            .client
            .sign_up(&request.email, &request.password, &profile)
            .await
            .map_err(|err| {
                tracing::warn!(email = %request.email, error = %err, "Sign up failed");
                sign_up_error(&request.email, &err)
            })?;

        match response {
            SignUpResponse::Session(session) if session.is_usable() => {
                let provider_user = session.user.as_ref().ok_or_else(|| {
                    AppError::Provider("Registration failed: session returned without a user".to_string())
                })?;

                // Echo the submitted profile, not whatever the provider stored.
                let user = SessionUser {
                    id: provider_user.id.clone(),
                    email: provider_user.email.clone(),
                    full_name: request.full_name.clone(),
                    phone: request.phone.clone(),
                };
                tracing::info!(user_id = %user.id, "User registered with active session");
                Ok(SignUpOutcome::Active(TokenResponse::new(session, user)))
            }
            SignUpResponse::Session(session) => {
                let user_id = session.user.map(|u| u.id).unwrap_or_default();
                tracing::info!(user_id = %user_id, "User registered, confirmation pending");
                Ok(SignUpOutcome::PendingConfirmation(PendingConfirmation::new(
                    request.email.clone(),
                    user_id,
                )))
            }
            SignUpResponse::User(user) => {
                tracing::info!(user_id = %user.id, "User registered, confirmation pending");
                Ok(SignUpOutcome::PendingConfirmation(PendingConfirmation::new(
                    request.email.clone(),
                    user.id,
                )))
            }
        }
    }

    /// Authenticate with email and password.
    pub async fn sign_in(&self, request: &SignInRequest) -> Result<TokenResponse> {
        request.validate()?;

        let session = self
            .client
            .sign_in_with_password(&request.email, &request.password)
            .await
            .map_err(|err| {
                tracing::warn!(email = %request.email, error = %err, "Sign in failed");
                sign_in_error(&err)
            })?;

        let user = usable_session_user(&session)
            .ok_or_else(|| AppError::Unauthorized(INVALID_LOGIN.to_string()))?;

        tracing::info!(user_id = %user.id, "User signed in");
        Ok(TokenResponse::new(session, user))
    }

    /// Trade a refresh token for a fresh session.
    pub async fn refresh(&self, request: &RefreshTokenRequest) -> Result<TokenResponse> {
        request.validate()?;

        let session = self
            .client
            .refresh_session(&request.refresh_token)
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "Session refresh failed");
                match classify_provider_error(&err) {
                    AuthFailure::Unavailable(msg) => {
                        AppError::Provider(format!("Failed to refresh session: {}", msg))
                    }
                    _ => AppError::Unauthorized(INVALID_REFRESH_TOKEN.to_string()),
                }
            })?;

        let user = usable_session_user(&session)
            .ok_or_else(|| AppError::Unauthorized(INVALID_REFRESH_TOKEN.to_string()))?;

        Ok(TokenResponse::new(session, user))
    }

    /// Revoke the caller's session.
    pub async fn sign_out(&self, access_token: &str) -> Result<MessageResponse> {
        match self.client.sign_out(access_token).await {
            Ok(()) => Ok(MessageResponse::new("Successfully signed out")),
            Err(err) => match classify_provider_error(&err) {
                // Already gone provider-side; nothing left to revoke.
                AuthFailure::InvalidToken => {
                    tracing::debug!(error = %err, "Sign out on a session that no longer exists");
                    Ok(MessageResponse::new("Successfully signed out"))
                }
                _ => {
                    tracing::error!(error = %err, "Sign out failed");
                    Err(AppError::Provider(format!(
                        "Failed to sign out: {}",
                        err.message()
                    )))
                }
            },
        }
    }

    /// Resolve an access token to its user.
    pub async fn get_current_user(&self, access_token: &str) -> Result<User> {
        self.client
            .get_user(access_token)
            .await
            .map(User::from)
            .map_err(|err| match classify_provider_error(&err) {
                AuthFailure::Unavailable(msg) => {
                    tracing::error!(error = %msg, "Could not verify access token");
                    AppError::Provider(format!("Could not verify credentials: {}", msg))
                }
                _ => {
                    tracing::debug!(error = %err, "Access token rejected");
                    AppError::Unauthorized(INVALID_ACCESS_TOKEN.to_string())
                }
            })
    }

    /// Send a reset link. Never reveals whether the email is registered.
    pub async fn request_password_reset(
        &self,
        request: &PasswordResetRequest,
    ) -> Result<MessageResponse> {
        request.validate()?;

        if let Err(err) = self
            .client
            .reset_password_email(&request.email, self.reset_redirect_url.as_deref())
            .await
        {
            tracing::warn!(email = %request.email, error = %err, "Password reset request failed");
        }

        Ok(MessageResponse::new(PASSWORD_RESET_ACK))
    }

    /// Change the caller's password.
    pub async fn update_password(
        &self,
        access_token: &str,
        request: &PasswordUpdateRequest,
    ) -> Result<MessageResponse> {
        request.validate()?;

        self.client
            .update_password(access_token, &request.new_password)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "Password update failed");
                AppError::Provider("Failed to update password".to_string())
            })?;

        Ok(MessageResponse::new("Password updated successfully"))
    }
}

fn usable_session_user(session: &ProviderSession) -> Option<SessionUser> {
    if !session.is_usable() {
        return None;
    }
    session.user.as_ref().map(SessionUser::from)
}

fn sign_up_error(email: &str, err: &ProviderError) -> AppError {
    match classify_provider_error(err) {
        AuthFailure::AlreadyRegistered => AppError::Conflict(format!(
            "Email '{}' is already registered. Please sign in instead.",
            email
        )),
        AuthFailure::InvalidEmail => AppError::BadRequest(
            "Invalid email format. Please provide a valid email address.".to_string(),
        ),
        AuthFailure::WeakPassword => AppError::BadRequest(
            "Password does not meet requirements. Must be at least 6 characters.".to_string(),
        ),
        AuthFailure::Unavailable(msg) | AuthFailure::Unclassified(msg) => {
            AppError::Provider(format!("Registration failed: {}", msg))
        }
        _ => AppError::Provider(format!("Registration failed: {}", err.message())),
    }
}

fn sign_in_error(err: &ProviderError) -> AppError {
    match classify_provider_error(err) {
        AuthFailure::EmailNotConfirmed => AppError::Unauthorized(
            "Please verify your email address before signing in. Check your inbox for the confirmation link."
                .to_string(),
        ),
        AuthFailure::Unavailable(msg) | AuthFailure::Unclassified(msg) => {
            AppError::Provider(format!("Sign in failed: {}", msg))
        }
        // Wrong password and unknown account read the same.
        _ => AppError::Unauthorized(INVALID_LOGIN.to_string()),
    }
}
