// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Write payloads for routes, buses and favorites.
//!
//! Reads come back from the provider as plain JSON; only the few writes that
//! shape data locally get a type here.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteKind {
    Route,
    Bus,
}

/// Body of `POST /users/me/favorites`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewFavorite {
    pub favorite_type: FavoriteKind,
    #[validate(length(min = 1, message = "favorite_id must not be empty"))]
    pub favorite_id: String,
}

/// Body of `PUT /buses/{id}/location`.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct LocationUpdate {
    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be between -90 and 90"))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude must be between -180 and 180"))]
    pub longitude: f64,
}
