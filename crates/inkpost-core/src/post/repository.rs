//! Post access traits implemented by the API layer.

use async_trait::async_trait;

use crate::error::Result;
use crate::list::{ListQuery, ListResult};
use crate::post::model::{Attachment, Post, PostDraft};

/// Read access to the post collection.
///
/// `list` serves both the public post list and the caller's own posts; the
/// scope inside [`ListQuery`] selects the endpoint and whether credentials
/// are attached.
#[async_trait]
pub trait PostLister: Send + Sync {
    /// Fetches one page of posts plus pagination metadata.
    async fn list(&self, query: &ListQuery) -> Result<ListResult>;

    /// Fetches a single post by its slug.
    async fn by_slug(&self, slug: &str) -> Result<Post>;
}

/// Mutating access to the caller's own posts. All operations carry the
/// current session token.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Creates a new post, optionally with an image attachment.
    async fn create(&self, draft: &PostDraft, attachment: Option<&Attachment>) -> Result<()>;

    /// Fetches a post for pre-filling the edit form.
    async fn fetch_for_edit(&self, id: u64) -> Result<Post>;

    /// Updates a post. An absent attachment keeps the existing image.
    /// Returns the server's confirmation message.
    async fn update(
        &self,
        id: u64,
        draft: &PostDraft,
        attachment: Option<&Attachment>,
    ) -> Result<String>;

    /// Deletes a post.
    async fn delete(&self, id: u64) -> Result<()>;
}
