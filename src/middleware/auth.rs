// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer-token authentication and role checks.
//!
//! Tokens are opaque here: the provider decides whether one is valid by
//! resolving it to a user.

use crate::error::AppError;
use crate::models::User;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Role allowed to list every user.
pub const ADMIN_ROLE: &str = "admin";

/// Authenticated caller, inserted into request extensions by `require_auth`.
#[derive(Clone)]
pub struct AuthUser {
    pub user: User,
    /// The caller's own access token, for calls made on their behalf.
    pub access_token: String,
}

/// Pull the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Middleware that requires a bearer token the provider accepts.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let access_token = bearer_token(request.headers())
        .ok_or_else(AppError::invalid_credentials)?
        .to_string();

    let user = state.auth_service.get_current_user(&access_token).await?;

    request.extensions_mut().insert(AuthUser { user, access_token });

    Ok(next.run(request).await)
}

/// Middleware that requires the caller's profile to carry the admin role.
/// Must run inside `require_auth`.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user_id = request
        .extensions()
        .get::<AuthUser>()
        .map(|auth| auth.user.id.clone())
        .ok_or_else(AppError::invalid_credentials)?;

    ensure_role(&state, &user_id, ADMIN_ROLE).await?;

    Ok(next.run(request).await)
}

/// Look the user's role up in the `users` table and compare.
pub async fn ensure_role(state: &AppState, user_id: &str, required: &str) -> Result<(), AppError> {
    match state.users.get_role(user_id).await? {
        Some(role) if role == required => Ok(()),
        role => {
            tracing::warn!(user_id, ?role, required, "Blocked request: insufficient role");
            Err(AppError::Forbidden("Insufficient permissions".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(&headers("bearer abc")), Some("abc"));
    }

    #[test]
    fn test_bearer_token_rejects_other_schemes() {
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwdw==")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("Bearer")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
