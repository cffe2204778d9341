//! Wire types for the blog backend's JSON responses.
//!
//! The backend reports success through a `status` flag or a `message`
//! field and failures through `error` (request-scoped) or `errors`
//! (field-scoped). Fields are optional wherever the backend omits them on
//! one of the two paths.

use std::collections::BTreeMap;

use serde::Deserialize;

use inkpost_core::list::ListResult;
use inkpost_core::post::model::{Post, PostSummary};

#[derive(Debug, Clone, Deserialize)]
pub struct PostDto {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub img_file: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub author: Option<String>,
}

impl PostDto {
    pub fn into_summary(self) -> PostSummary {
        PostSummary {
            id: self.id,
            title: self.title,
            date: self.date,
            slug: self.slug,
            content: self.content,
            image: self.img_file,
            author: self.author,
        }
    }

    pub fn into_post(self) -> Post {
        Post {
            id: self.id,
            title: self.title,
            slug: self.slug,
            content: self.content,
            date: self.date,
            image: self.img_file,
        }
    }
}

/// `GET /post` and `GET /user/posts`.
#[derive(Debug, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub posts: Vec<PostDto>,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_posts: u64,
    #[serde(default)]
    pub error: Option<String>,
}

impl ListResponse {
    pub fn into_result(self) -> ListResult {
        ListResult {
            items: self.posts.into_iter().map(PostDto::into_summary).collect(),
            current_page: self.current_page,
            total_pages: self.total_pages,
            total_count: self.total_posts,
        }
    }
}

/// `GET /post/{slug}` — the post arrives as a single-element sequence, not
/// a bare object.
#[derive(Debug, Deserialize)]
pub struct SinglePostResponse {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub post: Vec<PostDto>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `GET /edit/{id}` — here the post is a bare object.
#[derive(Debug, Deserialize)]
pub struct EditFetchResponse {
    #[serde(default)]
    pub post: Option<PostDto>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `GET /profile`.
#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub user: Option<UserDto>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserDto {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `POST /add`, `DELETE /delete/{id}` — status flag plus optional error.
#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// `PUT /edit/{id}`, `POST /forgot-password`, `POST /reset-password/{t}`.
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `POST /register`, `POST /contact` — may carry a field-error map.
#[derive(Debug, Deserialize)]
pub struct FormResponse {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub error: Option<String>,
}
