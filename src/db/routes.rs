// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bus routes.

use crate::db::postgrest::{PostgrestClient, Record};
use crate::db::repository::TableRepository;
use crate::db::tables;
use crate::error::AppError;
use serde_json::json;

#[derive(Clone)]
pub struct RouteRepository {
    table: TableRepository,
}

impl RouteRepository {
    pub fn new(db: PostgrestClient) -> Self {
        Self {
            table: TableRepository::new(db, tables::ROUTES),
        }
    }

    pub fn table(&self) -> &TableRepository {
        &self.table
    }

    /// Route by its public number (e.g. "138").
    pub async fn get_by_route_number(&self, route_number: &str) -> Result<Option<Record>, AppError> {
        self.table
            .query()
            .eq("route_number", route_number)
            .maybe_single()
            .await
    }

    /// Routes with their buses embedded under `buses`.
    pub async fn get_routes_with_buses(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Record>, AppError> {
        self.table
            .query()
            .select("*, buses(*)")
            .page(limit, offset)
            .execute()
            .await
    }

    /// Substring match on either end of the route; no filter returns everything.
    pub async fn search_routes(
        &self,
        start_location: Option<&str>,
        end_location: Option<&str>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Record>, AppError> {
        let mut query = self.table.query().page(limit, offset);
        if let Some(start) = start_location.filter(|s| !s.is_empty()) {
            query = query.ilike("start_location", start);
        }
        if let Some(end) = end_location.filter(|s| !s.is_empty()) {
            query = query.ilike("end_location", end);
        }
        query.execute().await
    }

    /// Routes whose `stops` JSON array has a stop with this name.
    pub async fn get_routes_by_stop(
        &self,
        stop_name: &str,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Record>, AppError> {
        self.table
            .query()
            .contains("stops", &json!([{ "name": stop_name }]))
            .page(limit, offset)
            .execute()
            .await
    }

    /// Most used routes first.
    pub async fn get_popular_routes(&self, limit: u32) -> Result<Vec<Record>, AppError> {
        self.table
            .query()
            .order("usage_count", true)
            .limit(limit)
            .execute()
            .await
    }
}
