// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request and response models for the API.

pub mod auth;
pub mod common;
pub mod session;
pub mod transit;
pub mod user;

pub use auth::{
    PasswordResetRequest, PasswordUpdateRequest, RefreshTokenRequest, SignInRequest,
    SignUpRequest,
};
pub use common::{HealthResponse, MessageResponse, RootResponse};
pub use session::{PendingConfirmation, SessionUser, SignUpOutcome, TokenResponse};
pub use transit::{FavoriteKind, LocationUpdate, NewFavorite};
pub use user::User;
