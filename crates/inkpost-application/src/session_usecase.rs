//! Session lifecycle and the auth gate for private views.

use std::sync::Arc;
use std::time::Duration;

use inkpost_core::account::repository::AuthApi;
use inkpost_core::error::Result;
use inkpost_core::session::SessionStore;
use inkpost_core::view::{Nav, NavBar, View};

/// Outcome of opening a gated view: either a redirect away or the opened
/// view model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gated<T> {
    Redirect(Nav),
    Open(T),
}

/// Use case for the single client session.
///
/// The token's presence is the sole gating signal; this type owns the two
/// single-writer operations (`set` on login, `clear` on logout or auth
/// failure) and the gate consulted by every private view.
pub struct SessionUseCase {
    session: Arc<dyn SessionStore>,
    auth: Arc<dyn AuthApi>,
    redirect_delay: Duration,
}

impl SessionUseCase {
    pub fn new(
        session: Arc<dyn SessionStore>,
        auth: Arc<dyn AuthApi>,
        redirect_delay: Duration,
    ) -> Self {
        Self {
            session,
            auth,
            redirect_delay,
        }
    }

    pub async fn signed_in(&self) -> bool {
        self.session.get().await.is_some()
    }

    /// Navigation bar for the current session state.
    pub async fn nav_bar(&self) -> NavBar {
        NavBar::for_session(self.signed_in().await)
    }

    /// The gate for views that mandate authentication.
    ///
    /// Returns the redirect to the login view when the session is absent;
    /// callers must abort all further initialization for the view and
    /// issue no private requests. Returns `None` when initialization may
    /// proceed.
    pub async fn require_session(&self, view: &View) -> Option<Nav> {
        if view.requires_session() && !self.signed_in().await {
            tracing::info!(?view, "no session for gated view, redirecting to login");
            return Some(Nav::To(View::Login));
        }
        None
    }

    /// Exchanges credentials for a token and stores it.
    pub async fn login(&self, email: &str, password: &str) -> Result<Nav> {
        let token = self.auth.login(email, password).await?;
        self.session.set(token).await?;
        tracing::info!("login succeeded");
        Ok(Nav::ToAfter(View::Home, self.redirect_delay))
    }

    /// Destroys the session explicitly.
    pub async fn logout(&self) -> Result<Nav> {
        self.session.clear().await?;
        tracing::info!("logged out");
        Ok(Nav::To(View::Login))
    }

    /// Global policy for an authentication-failure response from any
    /// private endpoint: clear the token exactly once, then return to the
    /// login view. A second failure arriving after the clear is a no-op.
    pub async fn handle_auth_failure(&self) -> Result<Nav> {
        if self.signed_in().await {
            self.session.clear().await?;
            tracing::warn!("session invalidated by authentication failure");
        }
        Ok(Nav::To(View::Login))
    }
}
