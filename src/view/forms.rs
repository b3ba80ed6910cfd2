//! Auth form validation
//!
//! Presence checks plus the registration password length. Nothing else is
//! validated client side; the backend has the final word.

use thiserror::Error;

use crate::client::{LoginRequest, RegisterRequest};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Inline form error. `Display` is the text shown next to the form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
}

/// Username is trimmed; the password is taken as typed.
pub fn validate_login(username: &str, password: &str) -> Result<LoginRequest, FormError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(FormError::MissingFields);
    }
    Ok(LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Username and email are trimmed; the password is taken as typed.
pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
) -> Result<RegisterRequest, FormError> {
    let username = username.trim();
    let email = email.trim();
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(FormError::MissingFields);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(FormError::PasswordTooShort);
    }
    Ok(RegisterRequest {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    })
}
