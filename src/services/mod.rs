// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - provider clients and the auth façade.

pub mod auth;
pub mod gotrue;
pub mod provider_error;

pub use auth::AuthService;
pub use gotrue::GoTrueClient;
pub use provider_error::{classify_provider_error, AuthFailure, ProviderError};
