// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Auth request bodies and their local validation rules.
//!
//! These are the only checks made before contacting the provider. Uniqueness,
//! password strength and account existence are the provider's business.
//! Types carrying secrets don't derive `Debug`.

use serde::Deserialize;
use validator::Validate;

/// Registration request.
#[derive(Clone, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(email(message = "Invalid email format. Please provide a valid email address."))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Login request.
#[derive(Clone, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email(message = "Invalid email format. Please provide a valid email address."))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Clone, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token must not be empty"))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(email(message = "Invalid email format. Please provide a valid email address."))]
    pub email: String,
}

#[derive(Clone, Deserialize, Validate)]
pub struct PasswordUpdateRequest {
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMAIL_MESSAGE: &str = "Invalid email format. Please provide a valid email address.";
    const PASSWORD_MESSAGE: &str = "Password must be at least 6 characters";

    fn sign_up(email: &str, password: &str) -> SignUpRequest {
        SignUpRequest {
            email: email.to_string(),
            password: password.to_string(),
            full_name: None,
            phone: None,
        }
    }

    #[test]
    fn test_valid_credentials_pass() {
        assert!(sign_up("a@b.com", "secret").validate().is_ok());
    }

    #[test]
    fn test_malformed_emails_rejected() {
        for email in ["", "plainaddress", "@no-local.com", "a@"] {
            let errors = sign_up(email, "secret").validate().unwrap_err();
            assert!(
                errors.field_errors().contains_key("email"),
                "expected email error for {:?}",
                email
            );
        }
    }

    #[test]
    fn test_short_passwords_rejected() {
        for password in ["", "a", "12345"] {
            let errors = sign_up("a@b.com", password).validate().unwrap_err();
            let messages: Vec<_> = errors.field_errors()["password"]
                .iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .collect();
            assert_eq!(messages, vec![PASSWORD_MESSAGE.to_string()]);
        }
    }

    #[test]
    fn test_sign_in_validates_both_fields() {
        let request = SignInRequest {
            email: "not-an-email".to_string(),
            password: "123".to_string(),
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert_eq!(
            fields["email"][0].message.as_deref(),
            Some(EMAIL_MESSAGE)
        );
    }

    #[test]
    fn test_password_update_minimum_length() {
        let short = PasswordUpdateRequest {
            new_password: "12345".to_string(),
        };
        assert!(short.validate().is_err());

        let ok = PasswordUpdateRequest {
            new_password: "123456".to_string(),
        };
        assert!(ok.validate().is_ok());
    }
}
