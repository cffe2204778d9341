pub mod model;
pub mod repository;

pub use model::{Attachment, Post, PostDraft, PostSummary};
pub use repository::{PostLister, PostRepository};
