// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bus route and bus routes.

use crate::db::Record;
use crate::error::{AppError, Result};
use crate::extract::{JsonBody, QueryParams};
use crate::middleware::auth::AuthUser;
use crate::models::LocationUpdate;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

const DEFAULT_LIMIT: u32 = 50;
const MAX_LIMIT: u32 = 100;
const DEFAULT_POPULAR_LIMIT: u32 = 10;

pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/routes", get(list_routes))
        .route("/routes/search", get(search_routes))
        .route("/routes/popular", get(popular_routes))
        .route("/routes/number/{number}", get(get_route_by_number))
        .route("/routes/{id}", get(get_route))
        .route("/buses", get(list_buses))
        .route("/buses/number/{number}", get(get_bus_by_number))
        .route("/buses/{id}", get(get_bus))
}

pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/buses/{id}/location", put(update_bus_location))
}

#[derive(Deserialize)]
struct PopularQuery {
    limit: Option<u32>,
}

/// Default and cap a requested page size.
pub fn clamp_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

fn found(record: Option<Record>, what: &str) -> Result<Json<Record>> {
    record
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("{} not found", what)))
}

// ─── Routes ──────────────────────────────────────────────────

#[derive(Deserialize)]
struct ListRoutesQuery {
    #[serde(default)]
    with_buses: bool,
    limit: Option<u32>,
    offset: Option<u32>,
}

async fn list_routes(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<ListRoutesQuery>,
) -> Result<Json<Vec<Record>>> {
    let limit = Some(clamp_limit(params.limit));
    let offset = params.offset;

    let routes = if params.with_buses {
        state.bus_routes.get_routes_with_buses(limit, offset).await?
    } else {
        state.bus_routes.table().get_all(limit, offset).await?
    };
    Ok(Json(routes))
}

#[derive(Deserialize)]
struct SearchRoutesQuery {
    start: Option<String>,
    end: Option<String>,
    stop: Option<String>,
    limit: Option<u32>,
    offset: Option<u32>,
}

/// Search by stop name, or by start/end location.
async fn search_routes(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<SearchRoutesQuery>,
) -> Result<Json<Vec<Record>>> {
    let limit = Some(clamp_limit(params.limit));
    let offset = params.offset;

    let routes = match params.stop.as_deref().filter(|s| !s.is_empty()) {
        Some(stop) => {
            state
                .bus_routes
                .get_routes_by_stop(stop, limit, offset)
                .await?
        }
        None => {
            state
                .bus_routes
                .search_routes(params.start.as_deref(), params.end.as_deref(), limit, offset)
                .await?
        }
    };
    Ok(Json(routes))
}

async fn popular_routes(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<PopularQuery>,
) -> Result<Json<Vec<Record>>> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_POPULAR_LIMIT)
        .clamp(1, MAX_LIMIT);
    Ok(Json(state.bus_routes.get_popular_routes(limit).await?))
}

async fn get_route(
    State(state): State<Arc<AppState>>,
    Path(route_id): Path<String>,
) -> Result<Json<Record>> {
    found(state.bus_routes.table().get_by_id(&route_id).await?, "Route")
}

async fn get_route_by_number(
    State(state): State<Arc<AppState>>,
    Path(number): Path<String>,
) -> Result<Json<Record>> {
    found(
        state.bus_routes.get_by_route_number(&number).await?,
        "Route",
    )
}

// ─── Buses ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct ListBusesQuery {
    route_id: Option<String>,
    status: Option<String>,
    /// Substring of the bus number
    q: Option<String>,
    limit: Option<u32>,
    offset: Option<u32>,
}

/// List buses; at most one of `route_id`, `status=active` or `q` applies,
/// in that order.
async fn list_buses(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<ListBusesQuery>,
) -> Result<Json<Vec<Record>>> {
    let limit = Some(clamp_limit(params.limit));
    let offset = params.offset;

    let buses = if let Some(route_id) = params.route_id.as_deref() {
        state.buses.get_by_route(route_id, limit, offset).await?
    } else if let Some(status) = params.status.as_deref() {
        if status != crate::db::buses::ACTIVE_STATUS {
            return Err(AppError::BadRequest(format!(
                "Unsupported status filter '{}'",
                status
            )));
        }
        state.buses.get_active_buses(limit, offset).await?
    } else if let Some(term) = params.q.as_deref().filter(|q| !q.is_empty()) {
        state.buses.search_buses(term, limit, offset).await?
    } else {
        state.buses.table().get_all(limit, offset).await?
    };
    Ok(Json(buses))
}

async fn get_bus(
    State(state): State<Arc<AppState>>,
    Path(bus_id): Path<String>,
) -> Result<Json<Record>> {
    found(state.buses.table().get_by_id(&bus_id).await?, "Bus")
}

async fn get_bus_by_number(
    State(state): State<Arc<AppState>>,
    Path(number): Path<String>,
) -> Result<Json<Record>> {
    found(state.buses.get_by_bus_number(&number).await?, "Bus")
}

/// Report a bus position.
async fn update_bus_location(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(bus_id): Path<String>,
    JsonBody(update): JsonBody<LocationUpdate>,
) -> Result<Json<Record>> {
    update.validate()?;

    tracing::info!(
        bus_id = %bus_id,
        user_id = %user.user.id,
        latitude = update.latitude,
        longitude = update.longitude,
        "Bus location reported"
    );

    found(
        state
            .buses
            .update_location(&bus_id, update.latitude, update.longitude, chrono::Utc::now())
            .await?,
        "Bus",
    )
}
