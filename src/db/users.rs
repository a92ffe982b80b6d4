// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profiles, roles and favorites.

use crate::db::postgrest::{PostgrestClient, Record};
use crate::db::repository::TableRepository;
use crate::db::tables;
use crate::error::AppError;
use crate::models::NewFavorite;
use serde_json::{Map, Value};

#[derive(Clone)]
pub struct UserRepository {
    table: TableRepository,
}

impl UserRepository {
    pub fn new(db: PostgrestClient) -> Self {
        Self {
            table: TableRepository::new(db, tables::USERS),
        }
    }

    /// Generic CRUD on the `users` table.
    pub fn table(&self) -> &TableRepository {
        &self.table
    }

    pub async fn get_by_id(&self, user_id: &str) -> Result<Option<Record>, AppError> {
        self.table.get_by_id(user_id).await
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<Record>, AppError> {
        self.table.query().eq("email", email).maybe_single().await
    }

    /// Insert a profile row; `extra` fields are merged in.
    pub async fn create_user(
        &self,
        email: &str,
        name: &str,
        extra: Map<String, Value>,
    ) -> Result<Record, AppError> {
        let mut data = extra;
        data.insert("email".to_string(), Value::from(email));
        data.insert("name".to_string(), Value::from(name));
        self.table.create(&data).await
    }

    /// Patch a profile. An empty `name` leaves the stored one alone.
    pub async fn update_profile(
        &self,
        user_id: &str,
        name: Option<&str>,
        extra: Map<String, Value>,
    ) -> Result<Option<Record>, AppError> {
        let mut data = extra;
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            data.insert("name".to_string(), Value::from(name));
        }
        self.table.update(user_id, &data).await
    }

    pub async fn get_users_by_role(
        &self,
        role: &str,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Record>, AppError> {
        self.table
            .query()
            .eq("role", role)
            .page(limit, offset)
            .execute()
            .await
    }

    /// Role stored on the user's profile row, if both exist.
    pub async fn get_role(&self, user_id: &str) -> Result<Option<String>, AppError> {
        let row = self
            .table
            .query()
            .select("role")
            .eq("id", user_id)
            .maybe_single()
            .await?;

        Ok(row.and_then(|r| r.get("role").and_then(Value::as_str).map(str::to_string)))
    }

    // ─── Favorites ───────────────────────────────────────────────

    /// Favorites with the referenced route or bus embedded.
    pub async fn get_user_favorites(&self, user_id: &str) -> Result<Vec<Record>, AppError> {
        self.table
            .query_table(tables::USER_FAVORITES)
            .select("*, routes(*), buses(*)")
            .eq("user_id", user_id)
            .execute()
            .await
    }

    pub async fn add_favorite(
        &self,
        user_id: &str,
        favorite: &NewFavorite,
    ) -> Result<Record, AppError> {
        let data = serde_json::json!({
            "user_id": user_id,
            "favorite_type": favorite.favorite_type,
            "favorite_id": favorite.favorite_id,
        });

        self.table
            .query_table(tables::USER_FAVORITES)
            .insert(&data)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Provider("Insert into user_favorites returned no rows".to_string()))
    }

    /// Remove one of the user's favorites. Other users' rows never match.
    pub async fn remove_favorite(&self, user_id: &str, favorite_id: &str) -> Result<bool, AppError> {
        let deleted = self
            .table
            .query_table(tables::USER_FAVORITES)
            .eq("user_id", user_id)
            .eq("id", favorite_id)
            .delete()
            .await?;
        Ok(!deleted.is_empty())
    }
}
