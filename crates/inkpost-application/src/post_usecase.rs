//! Post mutations: create, update, delete, and the fetch that pre-fills
//! the editor.

use std::sync::Arc;
use std::time::Duration;

use inkpost_core::error::Result;
use inkpost_core::post::model::{Attachment, Post, PostDraft};
use inkpost_core::post::repository::PostRepository;
use inkpost_core::view::{Nav, View};

/// What a successful mutation tells the view layer: the confirmation text
/// and where to go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    pub message: String,
    pub nav: Nav,
}

/// Use case for mutations on the caller's own posts.
///
/// Failures are returned unchanged so the form layer can surface the
/// server's error text verbatim; no partial mutation is ever assumed to
/// have applied.
pub struct PostUseCase {
    posts: Arc<dyn PostRepository>,
    redirect_delay: Duration,
}

impl PostUseCase {
    pub fn new(posts: Arc<dyn PostRepository>, redirect_delay: Duration) -> Self {
        Self {
            posts,
            redirect_delay,
        }
    }

    /// Creates a post; on success the client navigates straight to the
    /// dashboard list.
    pub async fn create(
        &self,
        draft: &PostDraft,
        attachment: Option<&Attachment>,
    ) -> Result<MutationOutcome> {
        self.posts.create(draft, attachment).await?;
        tracing::info!(title = %draft.title, "post created");
        Ok(MutationOutcome {
            message: "Post added successfully! Redirecting...".to_string(),
            nav: Nav::To(View::Dashboard),
        })
    }

    /// Fetches a post to pre-fill the editor form.
    pub async fn fetch_for_edit(&self, id: u64) -> Result<Post> {
        self.posts.fetch_for_edit(id).await
    }

    /// Updates a post; the navigation back to the dashboard is delayed so
    /// the user sees the confirmation first.
    pub async fn update(
        &self,
        id: u64,
        draft: &PostDraft,
        attachment: Option<&Attachment>,
    ) -> Result<MutationOutcome> {
        let message = self.posts.update(id, draft, attachment).await?;
        tracing::info!(id, "post updated");
        Ok(MutationOutcome {
            message,
            nav: Nav::ToAfter(View::Dashboard, self.redirect_delay),
        })
    }

    /// Deletes a post. The caller refreshes its list on success.
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.posts.delete(id).await?;
        tracing::info!(id, "post deleted");
        Ok(())
    }
}
