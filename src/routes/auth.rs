// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication routes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use std::sync::Arc;

use crate::error::Result;
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::models::{
    MessageResponse, PasswordResetRequest, PasswordUpdateRequest, RefreshTokenRequest,
    SignInRequest, SignUpOutcome, SignUpRequest, TokenResponse, User,
};
use crate::AppState;

/// Routes that work without a session.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/signup", post(sign_up))
        .route("/auth/signin", post(sign_in))
        .route("/auth/refresh", post(refresh))
        .route("/auth/password-reset", post(request_password_reset))
}

/// Routes that act on the caller's session.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/signout", post(sign_out))
        .route("/auth/me", get(get_me))
        .route("/auth/password-update", post(update_password))
}

/// Register a new user.
///
/// 201 with tokens when the provider issues a session right away, 202 when
/// the account waits on email confirmation.
async fn sign_up(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<SignUpRequest>,
) -> Result<Response> {
    let response = match state.auth_service.sign_up(&request).await? {
        SignUpOutcome::Active(tokens) => (StatusCode::CREATED, Json(tokens)).into_response(),
        SignUpOutcome::PendingConfirmation(pending) => {
            (StatusCode::ACCEPTED, Json(pending)).into_response()
        }
    };
    Ok(response)
}

async fn sign_in(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<SignInRequest>,
) -> Result<Json<TokenResponse>> {
    Ok(Json(state.auth_service.sign_in(&request).await?))
}

async fn refresh(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<RefreshTokenRequest>,
) -> Result<Json<TokenResponse>> {
    Ok(Json(state.auth_service.refresh(&request).await?))
}

/// Revoke the session behind the caller's token.
async fn sign_out(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MessageResponse>> {
    tracing::info!(user_id = %user.user.id, "User signing out");
    Ok(Json(state.auth_service.sign_out(&user.access_token).await?))
}

/// Current user, as resolved by the auth middleware.
pub(crate) async fn get_me(Extension(user): Extension<AuthUser>) -> Json<User> {
    Json(user.user)
}

async fn request_password_reset(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<PasswordResetRequest>,
) -> Result<Json<MessageResponse>> {
    Ok(Json(
        state.auth_service.request_password_reset(&request).await?,
    ))
}

async fn update_password(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    JsonBody(request): JsonBody<PasswordUpdateRequest>,
) -> Result<Json<MessageResponse>> {
    let response = state
        .auth_service
        .update_password(&user.access_token, &request)
        .await?;
    tracing::info!(user_id = %user.user.id, "Password updated");
    Ok(Json(response))
}
