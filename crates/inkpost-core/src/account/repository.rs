//! Authentication and account traits implemented by the API layer.

use async_trait::async_trait;

use crate::account::model::{ContactMessage, Profile, Registration};
use crate::error::Result;
use crate::post::model::Attachment;
use crate::session::AccessToken;

/// Credential exchange with the backend.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for a bearer token.
    async fn login(&self, email: &str, password: &str) -> Result<AccessToken>;
}

/// Account management operations.
#[async_trait]
pub trait AccountApi: Send + Sync {
    /// Registers a new author account.
    async fn register(
        &self,
        registration: &Registration,
        photo: Option<&Attachment>,
    ) -> Result<()>;

    /// Fetches the authenticated author's profile. Private.
    async fn profile(&self) -> Result<Profile>;

    /// Submits the contact form. Returns the server's acknowledgement text.
    async fn send_contact(&self, message: &ContactMessage) -> Result<String>;

    /// Requests a password-reset email.
    async fn request_password_reset(&self, email: &str) -> Result<()>;

    /// Completes a password reset using the emailed token.
    async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<()>;
}
