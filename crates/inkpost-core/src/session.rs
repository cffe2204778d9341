//! Session token model and storage trait.
//!
//! The bearer token is the only persisted client state. Its presence is the
//! sole gating signal for private views and requests; the client never
//! inspects or decodes it.

use crate::error::Result;

/// An opaque bearer token issued at login.
///
/// # Security Note
///
/// The token value must never be logged or exposed in error messages, so
/// `Debug` redacts it. Use [`AccessToken::reveal`] only at the point where
/// the `Authorization` header is built.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw token value for the `Authorization` header.
    pub fn reveal(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Storage for the single live session token.
///
/// At most one token is live per client at a time; `set` overwrites any
/// prior value. `clear` is called on explicit logout and whenever a private
/// request receives an authentication-failure response.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the current token, if a session is live.
    async fn get(&self) -> Option<AccessToken>;

    /// Stores a freshly issued token, replacing any prior one.
    async fn set(&self, token: AccessToken) -> Result<()>;

    /// Destroys the current session.
    async fn clear(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_token() {
        let token = AccessToken::new("secret-value");
        assert_eq!(format!("{:?}", token), "AccessToken(***)");
    }

    #[test]
    fn test_reveal_returns_raw_value() {
        let token = AccessToken::new("abc123");
        assert_eq!(token.reveal(), "abc123");
    }
}
