//! Post domain models.

use serde::{Deserialize, Serialize};

/// Read projection of a post as it appears in a list.
///
/// Not independently mutated by the client; every render fully replaces the
/// previously rendered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: u64,
    pub title: String,
    pub date: String,
    pub slug: String,
    /// Excerpt or full content, depending on what the endpoint returns.
    pub content: String,
    /// Server-side image file name, if the post has one.
    pub image: Option<String>,
    pub author: Option<String>,
}

/// A full post, as returned by the detail and fetch-for-edit endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub date: String,
    pub image: Option<String>,
}

/// The editable fields of a post, for create and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
}

/// A binary attachment submitted alongside a post or profile.
///
/// The MIME type is derived from the file name at request-building time.
/// Omitting the attachment on update signals "keep the existing image";
/// there is no explicit remove-image instruction.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}
