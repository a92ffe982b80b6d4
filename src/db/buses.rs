// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Buses and their last known positions.

use crate::db::postgrest::{PostgrestClient, Record};
use crate::db::repository::TableRepository;
use crate::db::tables;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde_json::json;

/// Status value marking a bus as in service.
pub const ACTIVE_STATUS: &str = "active";

#[derive(Clone)]
pub struct BusRepository {
    table: TableRepository,
}

impl BusRepository {
    pub fn new(db: PostgrestClient) -> Self {
        Self {
            table: TableRepository::new(db, tables::BUSES),
        }
    }

    pub fn table(&self) -> &TableRepository {
        &self.table
    }

    pub async fn get_by_route(
        &self,
        route_id: &str,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Record>, AppError> {
        self.table
            .query()
            .eq("route_id", route_id)
            .page(limit, offset)
            .execute()
            .await
    }

    pub async fn get_by_bus_number(&self, bus_number: &str) -> Result<Option<Record>, AppError> {
        self.table
            .query()
            .eq("bus_number", bus_number)
            .maybe_single()
            .await
    }

    pub async fn get_active_buses(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Record>, AppError> {
        self.table
            .query()
            .eq("status", ACTIVE_STATUS)
            .page(limit, offset)
            .execute()
            .await
    }

    /// Store a new position; `None` if the bus doesn't exist.
    pub async fn update_location(
        &self,
        bus_id: &str,
        latitude: f64,
        longitude: f64,
        at: DateTime<Utc>,
    ) -> Result<Option<Record>, AppError> {
        let data = json!({
            "current_location": point_wkt(latitude, longitude),
            "last_updated": at.to_rfc3339(),
        });
        self.table.update(bus_id, &data).await
    }

    /// Substring match on the bus number.
    pub async fn search_buses(
        &self,
        term: &str,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Record>, AppError> {
        self.table
            .query()
            .ilike("bus_number", term)
            .page(limit, offset)
            .execute()
            .await
    }
}

/// WKT point; longitude comes first.
fn point_wkt(latitude: f64, longitude: f64) -> String {
    format!("POINT({} {})", longitude, latitude)
}
