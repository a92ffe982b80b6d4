// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Provider errors and their translation into auth failures.
//!
//! `classify_provider_error` is the only place that knows how the provider
//! words its errors. Structured error codes win; lower-cased message
//! substrings are the fallback for older provider versions that only send
//! free text.

use serde::Deserialize;

/// Failure talking to the hosted provider (auth or REST API).
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// Request never completed (DNS, TLS, timeout, connection reset).
    #[error("Provider request failed: {0}")]
    Transport(String),

    /// Provider answered with a non-success status.
    #[error("Provider returned HTTP {status}: {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// Provider answered 2xx but the body wasn't what we expected.
    #[error("Unexpected provider response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Human-readable message without the status prefix.
    pub fn message(&self) -> &str {
        match self {
            ProviderError::Transport(msg) | ProviderError::Decode(msg) => msg,
            ProviderError::Api { message, .. } => message,
        }
    }

    /// Build an `Api` error from a failed response's status and raw body.
    ///
    /// Understands the GoTrue shapes (`error_code`/`msg`, and the older
    /// `error`/`error_description`) and PostgREST's `code`/`message`.
    pub fn from_response(status: u16, body: &str) -> Self {
        #[derive(Deserialize, Default)]
        struct ErrorBody {
            error_code: Option<String>,
            code: Option<serde_json::Value>,
            error: Option<String>,
            msg: Option<String>,
            message: Option<String>,
            error_description: Option<String>,
        }

        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

        let code = parsed
            .error_code
            .or_else(|| match parsed.code {
                Some(serde_json::Value::String(code)) => Some(code),
                _ => None,
            })
            .or(parsed.error.clone());

        let message = parsed
            .msg
            .or(parsed.error_description)
            .or(parsed.message)
            .or(parsed.error)
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    format!("HTTP {}", status)
                } else {
                    trimmed.to_string()
                }
            });

        ProviderError::Api {
            status,
            code,
            message,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

/// What went wrong, in auth terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    AlreadyRegistered,
    InvalidEmail,
    WeakPassword,
    InvalidCredentials,
    EmailNotConfirmed,
    UserNotFound,
    /// Access or refresh token rejected (expired, revoked, malformed).
    InvalidToken,
    /// Provider unreachable or failing on its side.
    Unavailable(String),
    /// Recognised nothing; carries the provider's own message.
    Unclassified(String),
}

/// Translate a provider error into an `AuthFailure`.
pub fn classify_provider_error(err: &ProviderError) -> AuthFailure {
    match err {
        ProviderError::Transport(msg) | ProviderError::Decode(msg) => {
            AuthFailure::Unavailable(msg.clone())
        }
        ProviderError::Api {
            status, message, ..
        } if *status >= 500 => AuthFailure::Unavailable(message.clone()),
        ProviderError::Api { code, message, .. } => code
            .as_deref()
            .and_then(classify_code)
            .unwrap_or_else(|| classify_message(message)),
    }
}

fn classify_code(code: &str) -> Option<AuthFailure> {
    let failure = match code {
        "user_already_exists" | "email_exists" | "identity_already_exists" | "23505" => {
            AuthFailure::AlreadyRegistered
        }
        "email_address_invalid" => AuthFailure::InvalidEmail,
        "weak_password" | "same_password" => AuthFailure::WeakPassword,
        "invalid_credentials" => AuthFailure::InvalidCredentials,
        "email_not_confirmed" => AuthFailure::EmailNotConfirmed,
        "user_not_found" => AuthFailure::UserNotFound,
        "bad_jwt" | "no_authorization" | "session_not_found" | "session_expired"
        | "refresh_token_not_found" | "refresh_token_already_used" => AuthFailure::InvalidToken,
        // Generic codes ("invalid_grant", "validation_failed", ...) say too
        // little on their own; the message decides.
        _ => return None,
    };
    Some(failure)
}

fn classify_message(message: &str) -> AuthFailure {
    let lower = message.to_lowercase();

    if ["already", "duplicate", "unique"]
        .iter()
        .any(|k| lower.contains(k))
    {
        AuthFailure::AlreadyRegistered
    } else if lower.contains("invalid login credentials") {
        AuthFailure::InvalidCredentials
    } else if lower.contains("email not confirmed") {
        AuthFailure::EmailNotConfirmed
    } else if lower.contains("invalid") && lower.contains("email") {
        AuthFailure::InvalidEmail
    } else if lower.contains("password") {
        AuthFailure::WeakPassword
    } else if lower.contains("user not found") {
        AuthFailure::UserNotFound
    } else {
        AuthFailure::Unclassified(message.to_string())
    }
}
