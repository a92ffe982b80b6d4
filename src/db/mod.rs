// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (Supabase REST).

pub mod buses;
pub mod postgrest;
pub mod repository;
pub mod routes;
pub mod users;

pub use buses::BusRepository;
pub use postgrest::{PostgrestClient, Record};
pub use repository::TableRepository;
pub use routes::RouteRepository;
pub use users::UserRepository;

/// Table names as constants.
pub mod tables {
    pub const USERS: &str = "users";
    pub const ROUTES: &str = "routes";
    pub const BUSES: &str = "buses";
    pub const USER_FAVORITES: &str = "user_favorites";
}
