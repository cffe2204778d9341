//! Views, navigation outcomes, and the navigation-bar view model.

use std::time::Duration;

/// The screens of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Home,
    PostDetail(String),
    Login,
    Register,
    ForgotPassword,
    ResetPassword(String),
    Contact,
    Dashboard,
    MyPosts,
    /// The post editor; `None` creates, `Some(id)` edits.
    Editor(Option<u64>),
}

impl View {
    /// Gated views mandate a live session; initialization redirects to
    /// login when the token is absent.
    pub fn requires_session(&self) -> bool {
        matches!(self, Self::Dashboard | Self::MyPosts | Self::Editor(_))
    }
}

/// Where the client goes after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nav {
    Stay,
    To(View),
    /// Navigate after a short delay, so the user sees the confirmation
    /// message before the view changes.
    ToAfter(View, Duration),
}

/// Render model for the navigation bar, gated on session presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBar {
    /// Protected links (dashboard, new post) are shown only when signed in.
    pub protected_links_visible: bool,
    /// Signed out: sign-up and login links. Signed in: a logout action.
    pub actions: Vec<NavAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum NavAction {
    SignUp,
    Login,
    Logout,
}

impl NavBar {
    pub fn for_session(signed_in: bool) -> Self {
        if signed_in {
            Self {
                protected_links_visible: true,
                actions: vec![NavAction::Logout],
            }
        } else {
            Self {
                protected_links_visible: false,
                actions: vec![NavAction::SignUp, NavAction::Login],
            }
        }
    }
}
