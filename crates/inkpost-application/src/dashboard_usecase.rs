//! The author dashboard: a gated view combining the profile header, the
//! private my-posts list, and post deletion.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use inkpost_core::account::model::Profile;
use inkpost_core::account::repository::AccountApi;
use inkpost_core::config::ClientConfig;
use inkpost_core::error::Result;
use inkpost_core::feedback::{Feedback, FeedbackBoard, FeedbackTimings, Severity};
use inkpost_core::list::ListScope;
use inkpost_core::post::repository::PostLister;
use inkpost_core::view::View;

use crate::list_controller::{ListBrowser, ListViewModel};
use crate::post_usecase::PostUseCase;
use crate::session_usecase::{Gated, SessionUseCase};

/// Render model for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub welcome: String,
    pub total_posts: u64,
    pub list: ListViewModel,
    pub notice: Option<Feedback>,
}

/// Use case for the dashboard view.
///
/// Initialization is gated on the session: without a token the caller is
/// redirected to login before any private request is issued. Any
/// authentication failure from the profile, list, or delete endpoints is
/// routed through the session layer's global clear-and-redirect policy.
pub struct DashboardUseCase {
    session: Arc<SessionUseCase>,
    account: Arc<dyn AccountApi>,
    posts: Arc<PostUseCase>,
    browser: ListBrowser,
    profile: Mutex<Option<Profile>>,
    feedback: Mutex<FeedbackBoard>,
    timings: FeedbackTimings,
}

impl DashboardUseCase {
    pub fn new(
        session: Arc<SessionUseCase>,
        account: Arc<dyn AccountApi>,
        posts: Arc<PostUseCase>,
        lister: Arc<dyn PostLister>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            session,
            account,
            posts,
            browser: ListBrowser::new(
                lister,
                ListScope::Mine,
                config.per_page,
                config.request_timeout(),
            ),
            profile: Mutex::new(None),
            feedback: Mutex::new(FeedbackBoard::new()),
            timings: config.feedback_timings(),
        }
    }

    /// Initializes the dashboard: auth gate, profile fetch, first page.
    pub async fn open(&self, now: DateTime<Utc>) -> Result<Gated<DashboardView>> {
        if let Some(nav) = self.session.require_session(&View::Dashboard).await {
            return Ok(Gated::Redirect(nav));
        }

        let outcome = async {
            let profile = self.account.profile().await?;
            *self.profile.lock().await = Some(profile);
            self.browser.open().await
        }
        .await;

        self.finish(outcome, now).await
    }

    pub async fn set_page(&self, page: u32, now: DateTime<Utc>) -> Result<Gated<DashboardView>> {
        let outcome = self.browser.set_page(page).await;
        self.finish(outcome, now).await
    }

    pub async fn set_search(&self, text: &str, now: DateTime<Utc>) -> Result<Gated<DashboardView>> {
        let outcome = self.browser.set_search(text).await;
        self.finish(outcome, now).await
    }

    /// Deletes a post, then refreshes the page that was displayed before
    /// the delete. When the delete emptied the last page, the browser
    /// clamps to the new last page instead of rendering an out-of-range
    /// empty one.
    ///
    /// An application-level rejection leaves the list unchanged and
    /// surfaces the server's error text; only a 401-class response
    /// redirects.
    pub async fn delete_post(&self, id: u64, now: DateTime<Utc>) -> Result<Gated<DashboardView>> {
        match self.posts.delete(id).await {
            Ok(()) => {
                self.feedback.lock().await.set_notice(
                    "Post deleted successfully!",
                    Severity::Success,
                    now,
                    &self.timings,
                );
                let outcome = self.browser.refresh().await;
                self.finish(outcome, now).await
            }
            Err(err) if err.is_auth_failure() => {
                Ok(Gated::Redirect(self.session.handle_auth_failure().await?))
            }
            Err(err) => {
                self.feedback.lock().await.set_notice(
                    err.user_message(),
                    Severity::Error,
                    now,
                    &self.timings,
                );
                let list = self.browser.view().await;
                Ok(Gated::Open(self.assemble(list, now).await))
            }
        }
    }

    /// Maps a list outcome into the gated view, applying the global auth
    /// policy on 401-class failures.
    async fn finish(
        &self,
        outcome: Result<ListViewModel>,
        now: DateTime<Utc>,
    ) -> Result<Gated<DashboardView>> {
        match outcome {
            Ok(list) => Ok(Gated::Open(self.assemble(list, now).await)),
            Err(err) if err.is_auth_failure() => {
                Ok(Gated::Redirect(self.session.handle_auth_failure().await?))
            }
            Err(err) => Err(err),
        }
    }

    async fn assemble(&self, list: ListViewModel, now: DateTime<Utc>) -> DashboardView {
        let welcome = self
            .profile
            .lock()
            .await
            .as_ref()
            .map(|profile| format!("Welcome, {}", profile.name))
            .unwrap_or_default();
        let notice = self.feedback.lock().await.notice(now).cloned();
        DashboardView {
            welcome,
            total_posts: list.total_count,
            list,
            notice,
        }
    }
}
