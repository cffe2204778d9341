//! Client-side field format checks.
//!
//! These run before any network call and block the request entirely on
//! failure; server-side field errors are applied only after a request was
//! actually sent and rejected.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"));

pub const EMAIL_MESSAGE: &str = "Invalid email format.";
pub const PASSWORD_MESSAGE: &str =
    "Password must be at least 8 characters, include a number and an uppercase letter.";
pub const CONFIRM_MESSAGE: &str = "Passwords do not match.";

/// Checks the basic `local@domain.tld` email shape.
pub fn check_email(value: &str) -> Result<(), String> {
    if EMAIL_RE.is_match(value.trim()) {
        Ok(())
    } else {
        Err(EMAIL_MESSAGE.to_string())
    }
}

/// Checks the password policy: at least 8 characters with at least one
/// digit and one uppercase letter.
pub fn check_password(value: &str) -> Result<(), String> {
    let strong = value.len() >= 8
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| c.is_ascii_uppercase());
    if strong {
        Ok(())
    } else {
        Err(PASSWORD_MESSAGE.to_string())
    }
}

/// Checks password-confirmation equality.
pub fn check_confirmation(password: &str, confirmation: &str) -> Result<(), String> {
    if password == confirmation {
        Ok(())
    } else {
        Err(CONFIRM_MESSAGE.to_string())
    }
}
