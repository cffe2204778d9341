//! HTTP integration layer: the typed REST client for the blog backend.
//!
//! [`ApiClient`] implements the access traits defined in `inkpost-core`
//! (`PostLister`, `PostRepository`, `AuthApi`, `AccountApi`) against the
//! backend's JSON-over-HTTP contract.

pub mod client;
pub mod dto;

pub use client::ApiClient;
