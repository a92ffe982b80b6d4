// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User routes. All of them sit behind `require_auth`.

use crate::db::Record;
use crate::error::{AppError, Result};
use crate::extract::{JsonBody, QueryParams};
use crate::middleware::auth::{require_admin, AuthUser};
use crate::models::NewFavorite;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use validator::Validate;

use super::transit::clamp_limit;

pub fn routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let admin_routes = Router::new()
        .route("/users", get(list_users))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/users/me", get(super::auth::get_me).patch(update_me))
        .route("/users/me/favorites", get(list_favorites).post(add_favorite))
        .route("/users/me/favorites/{id}", delete(remove_favorite))
        .route("/users/{id}", get(get_user))
        .merge(admin_routes)
}

// ─── Profiles ────────────────────────────────────────────────

/// Get a user's profile row by id.
async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Record>> {
    state
        .users
        .get_by_id(&user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Profile fields to change. Besides `name`, only `PROFILE_COLUMNS` may appear.
#[derive(Deserialize)]
struct ProfileUpdate {
    name: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Columns a caller may set on their own profile row, besides `name`.
const PROFILE_COLUMNS: &[&str] = &["phone", "avatar_url"];

async fn update_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    JsonBody(update): JsonBody<ProfileUpdate>,
) -> Result<Json<Record>> {
    if let Some(column) = update
        .extra
        .keys()
        .find(|k| !PROFILE_COLUMNS.contains(&k.as_str()))
    {
        return Err(AppError::BadRequest(format!(
            "Field '{}' cannot be changed",
            column
        )));
    }

    state
        .users
        .update_profile(&user.user.id, update.name.as_deref(), update.extra)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("User profile not found".to_string()))
}

#[derive(Deserialize)]
struct ListUsersQuery {
    role: Option<String>,
    limit: Option<u32>,
    offset: Option<u32>,
}

/// List users, optionally by role. Admin only.
async fn list_users(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<ListUsersQuery>,
) -> Result<Json<Vec<Record>>> {
    let limit = Some(clamp_limit(params.limit));
    let offset = params.offset;

    let users = match params.role.as_deref() {
        Some(role) => state.users.get_users_by_role(role, limit, offset).await?,
        None => state.users.table().get_all(limit, offset).await?,
    };
    Ok(Json(users))
}

// ─── Favorites ───────────────────────────────────────────────

async fn list_favorites(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Record>>> {
    Ok(Json(state.users.get_user_favorites(&user.user.id).await?))
}

async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    JsonBody(favorite): JsonBody<NewFavorite>,
) -> Result<(StatusCode, Json<Record>)> {
    favorite.validate()?;
    let created = state.users.add_favorite(&user.user.id, &favorite).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(favorite_id): Path<String>,
) -> Result<StatusCode> {
    if state
        .users
        .remove_favorite(&user.user.id, &favorite_id)
        .await?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Favorite not found".to_string()))
    }
}
