// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Supabase REST (PostgREST) client with a small query builder.
//!
//! Mirrors the handful of operations the repositories need:
//! - `select` / `eq` / `ilike` / `contains` / `order` / `limit` / `offset`
//! - `insert`, `update`, `delete` returning the affected rows
//! - exact row counts via `Prefer: count=exact`

use crate::error::AppError;
use crate::services::provider_error::ProviderError;
use reqwest::{header, Method};
use serde::Serialize;
use serde_json::Value;

/// Table rows come back as plain JSON objects.
pub type Record = Value;

/// PostgREST client bound to one project and API key.
#[derive(Clone)]
pub struct PostgrestClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PostgrestClient {
    /// Create a client for `{project_url}/rest/v1`.
    pub fn new(http: reqwest::Client, project_url: &str, api_key: String) -> Self {
        Self {
            http,
            base_url: format!("{}/rest/v1", project_url.trim_end_matches('/')),
            api_key,
        }
    }

    /// Start a query against `table`.
    pub fn from(&self, table: &str) -> Query {
        Query {
            client: self.clone(),
            table: table.to_string(),
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
            offset: None,
        }
    }

    fn request(&self, method: Method, table: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}/{}", self.base_url, table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

/// A query under construction. Nothing is sent until a terminal method runs.
#[must_use]
pub struct Query {
    client: PostgrestClient,
    table: String,
    columns: String,
    filters: Vec<(String, String)>,
    order: Option<String>,
    limit: Option<u32>,
    offset: Option<u32>,
}

impl Query {
    /// Columns to return, PostgREST syntax (`"*, buses(*)"` embeds a relation).
    pub fn select(mut self, columns: &str) -> Self {
        self.columns = columns.to_string();
        self
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    /// Case-insensitive substring match.
    pub fn ilike(mut self, column: &str, needle: &str) -> Self {
        // `*` is PostgREST's URL-safe spelling of `%`.
        self.filters
            .push((column.to_string(), format!("ilike.*{}*", needle)));
        self
    }

    /// JSON containment (`@>`).
    pub fn contains(mut self, column: &str, value: &Value) -> Self {
        self.filters
            .push((column.to_string(), format!("cs.{}", value)));
        self
    }

    pub fn order(mut self, column: &str, descending: bool) -> Self {
        let direction = if descending { "desc" } else { "asc" };
        self.order = Some(format!("{}.{}", column, direction));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Apply whichever of `limit` and `offset` are given.
    pub fn page(mut self, limit: Option<u32>, offset: Option<u32>) -> Self {
        self.limit = limit.or(self.limit);
        self.offset = offset.or(self.offset);
        self
    }

    /// Query-string pairs for a read.
    fn read_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.columns.clone())];
        params.extend(self.filters.iter().cloned());
        if let Some(order) = &self.order {
            params.push(("order".to_string(), order.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset".to_string(), offset.to_string()));
        }
        params
    }

    /// Run as a read and return all matching rows.
    pub async fn execute(self) -> Result<Vec<Record>, AppError> {
        let response = self
            .client
            .request(Method::GET, &self.table)
            .query(&self.read_params())
            .send()
            .await
            .map_err(ProviderError::from)?;

        rows(response).await
    }

    /// Run as a read and return the first row, if any.
    pub async fn maybe_single(self) -> Result<Option<Record>, AppError> {
        Ok(self.execute().await?.into_iter().next())
    }

    /// Exact number of rows matching the filters.
    pub async fn count(self) -> Result<u64, AppError> {
        let mut params = self.filters.clone();
        params.push(("select".to_string(), "id".to_string()));

        let response = self
            .client
            .request(Method::HEAD, &self.table)
            .query(&params)
            .header("Prefer", "count=exact")
            .send()
            .await
            .map_err(ProviderError::from)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(ProviderError::from_response(status, "").into());
        }

        response
            .headers()
            .get(header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or_else(|| {
                ProviderError::Decode("missing or malformed Content-Range header".to_string())
                    .into()
            })
    }

    /// Insert `body` (an object or an array of objects) and return the new rows.
    pub async fn insert<T: Serialize + ?Sized>(self, body: &T) -> Result<Vec<Record>, AppError> {
        let response = self
            .client
            .request(Method::POST, &self.table)
            .query(&[("select", self.columns.as_str())])
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(ProviderError::from)?;

        rows(response).await
    }

    /// Patch every row matching the filters and return them.
    pub async fn update<T: Serialize + ?Sized>(self, body: &T) -> Result<Vec<Record>, AppError> {
        let response = self
            .client
            .request(Method::PATCH, &self.table)
            .query(&self.write_params())
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(ProviderError::from)?;

        rows(response).await
    }

    /// Delete every row matching the filters and return them.
    pub async fn delete(self) -> Result<Vec<Record>, AppError> {
        let response = self
            .client
            .request(Method::DELETE, &self.table)
            .query(&self.write_params())
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(ProviderError::from)?;

        rows(response).await
    }

    fn write_params(&self) -> Vec<(String, String)> {
        let mut params = self.filters.clone();
        params.push(("select".to_string(), self.columns.clone()));
        params
    }
}

/// Check the status and decode a JSON array of rows.
async fn rows(response: reqwest::Response) -> Result<Vec<Record>, AppError> {
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::from_response(status, &body).into());
    }

    response
        .json::<Vec<Record>>()
        .await
        .map_err(|e| ProviderError::Decode(e.to_string()).into())
}

/// `"0-24/3573"` → 3573, `"*/0"` → 0. `"0-24/*"` (count not requested) → None.
fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}
