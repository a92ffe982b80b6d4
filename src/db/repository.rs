// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Generic CRUD over one table.
//!
//! Every entity repository wraps one of these and adds its named queries.
//! Records are keyed by an `id` column.

use crate::db::postgrest::{PostgrestClient, Query, Record};
use crate::error::AppError;
use serde::Serialize;

#[derive(Clone)]
pub struct TableRepository {
    db: PostgrestClient,
    table: &'static str,
}

impl TableRepository {
    pub fn new(db: PostgrestClient, table: &'static str) -> Self {
        Self { db, table }
    }

    /// Fresh query against this table.
    pub fn query(&self) -> Query {
        self.db.from(self.table)
    }

    /// Query against another table on the same connection.
    pub fn query_table(&self, table: &str) -> Query {
        self.db.from(table)
    }

    /// All records, optionally paginated.
    pub async fn get_all(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Record>, AppError> {
        self.query().page(limit, offset).execute().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Record>, AppError> {
        self.query().eq("id", id).maybe_single().await
    }

    /// Insert one record and return it as stored.
    pub async fn create<T: Serialize + ?Sized>(&self, data: &T) -> Result<Record, AppError> {
        self.query()
            .insert(data)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                AppError::Provider(format!("Insert into {} returned no rows", self.table))
            })
    }

    /// Patch a record; `None` if no record has that id.
    pub async fn update<T: Serialize + ?Sized>(
        &self,
        id: &str,
        data: &T,
    ) -> Result<Option<Record>, AppError> {
        Ok(self
            .query()
            .eq("id", id)
            .update(data)
            .await?
            .into_iter()
            .next())
    }

    /// `true` if a record was deleted.
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        Ok(!self.query().eq("id", id).delete().await?.is_empty())
    }

    /// Records where every `(field, value)` pair matches exactly.
    pub async fn filter_by(&self, filters: &[(&str, &str)]) -> Result<Vec<Record>, AppError> {
        filters
            .iter()
            .fold(self.query(), |query, (field, value)| query.eq(field, value))
            .execute()
            .await
    }

    pub async fn count(&self) -> Result<u64, AppError> {
        self.query().count().await
    }
}
