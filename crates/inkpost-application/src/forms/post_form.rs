//! The post editor form, shared by the create and edit flows.

use chrono::{DateTime, Utc};

use inkpost_core::error::{InkpostError, Result};
use inkpost_core::feedback::{FeedbackBoard, FeedbackTimings, Severity};
use inkpost_core::form::FormGuard;
use inkpost_core::post::model::{Attachment, PostDraft};
use inkpost_core::view::Nav;

use crate::post_usecase::PostUseCase;

/// Whether the editor creates a new post or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(u64),
}

/// Controller for the post editor.
///
/// On edit, the attachment is optional: leaving it absent keeps the
/// existing image on the server.
#[derive(Debug)]
pub struct PostForm {
    mode: EditorMode,
    guard: FormGuard,
    attachment: Option<Attachment>,
    /// Server-side file name of the image currently on the post, shown in
    /// the edit view.
    current_image: Option<String>,
    feedback: FeedbackBoard,
    timings: FeedbackTimings,
}

impl PostForm {
    /// An empty editor for a new post.
    pub fn create(timings: FeedbackTimings) -> Self {
        Self {
            mode: EditorMode::Create,
            guard: FormGuard::new(&["title", "content"]),
            attachment: None,
            current_image: None,
            feedback: FeedbackBoard::new(),
            timings,
        }
    }

    /// An editor pre-filled from the stored post.
    pub async fn edit(posts: &PostUseCase, id: u64, timings: FeedbackTimings) -> Result<Self> {
        let post = posts.fetch_for_edit(id).await?;
        let mut guard = FormGuard::new(&["title", "content"]);
        guard.set_value("title", post.title);
        guard.set_value("content", post.content);
        Ok(Self {
            mode: EditorMode::Edit(post.id),
            guard,
            attachment: None,
            current_image: post.image,
            feedback: FeedbackBoard::new(),
            timings,
        })
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn set_title(&mut self, value: &str) {
        self.guard.set_value("title", value);
        self.feedback.clear_field("title");
    }

    pub fn set_content(&mut self, value: &str) {
        self.guard.set_value("content", value);
        self.feedback.clear_field("content");
    }

    pub fn title(&self) -> &str {
        self.guard.value("title")
    }

    pub fn content(&self) -> &str {
        self.guard.value("content")
    }

    /// Attaches a new image, replacing the stored one on submit.
    pub fn attach(&mut self, attachment: Attachment) {
        self.attachment = Some(attachment);
    }

    pub fn current_image(&self) -> Option<&str> {
        self.current_image.as_deref()
    }

    pub fn can_submit(&self) -> bool {
        self.guard.can_submit()
    }

    pub fn feedback(&self) -> &FeedbackBoard {
        &self.feedback
    }

    /// Submits the draft. Returns the navigation on success; on rejection
    /// the server's error text lands on the feedback board and the caller
    /// stays put. Authentication failures bubble up for the global
    /// session policy.
    pub async fn submit(
        &mut self,
        posts: &PostUseCase,
        now: DateTime<Utc>,
    ) -> Result<Option<Nav>> {
        if !self.guard.begin_submit() {
            return Ok(None);
        }
        self.feedback.clear_all();

        let draft = PostDraft {
            title: self.guard.value("title").to_string(),
            content: self.guard.value("content").to_string(),
        };

        let result = match self.mode {
            EditorMode::Create => posts.create(&draft, self.attachment.as_ref()).await,
            EditorMode::Edit(id) => posts.update(id, &draft, self.attachment.as_ref()).await,
        };
        self.guard.finish_submit();

        match result {
            Ok(outcome) => {
                self.feedback
                    .set_notice(outcome.message, Severity::Success, now, &self.timings);
                Ok(Some(outcome.nav))
            }
            Err(InkpostError::Server { message }) => {
                self.feedback
                    .set_notice(message, Severity::Error, now, &self.timings);
                Ok(None)
            }
            Err(err) if err.is_transport() => {
                self.feedback
                    .set_notice(err.user_message(), Severity::Error, now, &self.timings);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use inkpost_core::view::View;

    use crate::post_usecase::tests::MockPostRepository;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn usecase() -> (Arc<MockPostRepository>, PostUseCase) {
        let repo = Arc::new(MockPostRepository::new());
        let posts = PostUseCase::new(repo.clone(), Duration::from_secs(2));
        (repo, posts)
    }

    #[tokio::test]
    async fn test_create_requires_title_and_content() {
        let (repo, posts) = usecase();
        let mut form = PostForm::create(FeedbackTimings::default());
        form.set_title("Hello");

        assert_eq!(form.submit(&posts, now()).await.unwrap(), None);
        assert_eq!(*repo.create_calls.lock().unwrap(), 0);

        form.set_content("World");
        let nav = form.submit(&posts, now()).await.unwrap().unwrap();
        assert_eq!(nav, Nav::To(View::Dashboard));
        assert_eq!(*repo.create_calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_attachment_is_optional() {
        let (_repo, posts) = usecase();
        let mut form = PostForm::create(FeedbackTimings::default());
        form.set_title("Hello");
        form.set_content("World");
        form.attach(Attachment::new("cover.png", vec![0xFF]));

        assert!(form.submit(&posts, now()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_edit_prefills_from_stored_post() {
        let (_repo, posts) = usecase();
        let form = PostForm::edit(&posts, 4, FeedbackTimings::default())
            .await
            .unwrap();

        assert_eq!(form.mode(), EditorMode::Edit(4));
        assert_eq!(form.title(), "Stored");
        assert_eq!(form.content(), "body");
        assert_eq!(form.current_image(), Some("stored.png"));
        assert!(form.can_submit());
    }

    #[tokio::test]
    async fn test_edit_submit_confirms_then_navigates_after_delay() {
        let (_repo, posts) = usecase();
        let mut form = PostForm::edit(&posts, 4, FeedbackTimings::default())
            .await
            .unwrap();
        form.set_title("Updated title");

        let nav = form.submit(&posts, now()).await.unwrap().unwrap();
        assert_eq!(nav, Nav::ToAfter(View::Dashboard, Duration::from_secs(2)));
        assert_eq!(
            form.feedback().notice(now()).unwrap().text,
            "Post updated successfully"
        );
    }

    #[tokio::test]
    async fn test_edit_of_missing_post_surfaces_error() {
        let repo = Arc::new(MockPostRepository::new());
        *repo.stored.lock().unwrap() = None;
        let posts = PostUseCase::new(repo, Duration::from_secs(2));

        let err = PostForm::edit(&posts, 99, FeedbackTimings::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
