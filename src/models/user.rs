// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model as returned by the API.

use crate::services::gotrue::ProviderUser;
use chrono::{DateTime, Utc};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Authenticated user, sourced verbatim from the provider.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub email_confirmed_at: Option<DateTime<Utc>>,
}

impl From<ProviderUser> for User {
    fn from(user: ProviderUser) -> Self {
        Self {
            full_name: user.metadata_str("full_name"),
            phone: user.metadata_str("phone"),
            email: user.email.unwrap_or_default(),
            id: user.id,
            created_at: user.created_at,
            email_confirmed_at: user.email_confirmed_at,
        }
    }
}
