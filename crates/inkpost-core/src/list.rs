//! Paginated list queries, results, and the pagination render model.

use serde::{Deserialize, Serialize};

use crate::post::model::PostSummary;

/// Whether a list endpoint requires authentication and filters to the
/// caller's own posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum ListScope {
    /// The public post list; no credentials attached.
    Public,
    /// The caller's own posts; bearer token required.
    Mine,
}

/// The state synchronized with a server-paginated list endpoint.
///
/// `per_page` is fixed per view and not user-adjustable. The query is
/// mutated only by explicit user input (page control, search edit) or
/// programmatically after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub per_page: u32,
    pub search: String,
    pub scope: ListScope,
}

impl ListQuery {
    pub fn new(scope: ListScope, per_page: u32) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
            search: String::new(),
            scope,
        }
    }

    /// The effective search term: trimmed, `None` when empty.
    ///
    /// An empty search is omitted from the request rather than sent as an
    /// empty-string filter.
    pub fn search_term(&self) -> Option<&str> {
        let trimmed = self.search.trim();
        if trimmed.is_empty() { None } else { Some(trimmed) }
    }
}

/// One page of posts plus pagination metadata, produced fresh by every list
/// request and never merged with a previous result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListResult {
    pub items: Vec<PostSummary>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
}

impl ListResult {
    /// True when the reported current page lies beyond the last page while
    /// posts still exist, e.g. after deleting the sole item of the last
    /// page. Callers clamp to [`ListResult::last_page`] and re-fetch.
    pub fn page_out_of_range(&self) -> bool {
        self.total_count > 0 && self.current_page > self.total_pages
    }

    /// The last valid page number, never below 1.
    pub fn last_page(&self) -> u32 {
        self.total_pages.max(1)
    }
}

/// A numbered page link in the pagination control region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub number: u32,
    pub active: bool,
}

/// Render model for the pagination control region.
///
/// `prev`/`next` carry the target page number and are absent at the
/// respective boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageControls {
    pub prev: Option<u32>,
    pub pages: Vec<PageLink>,
    pub next: Option<u32>,
}

impl PageControls {
    /// Builds the control region for a rendered result.
    ///
    /// Returns `None` when `total_pages <= 1`: the entire region is
    /// suppressed rather than showing a single meaningless page-1 button.
    pub fn build(current_page: u32, total_pages: u32) -> Option<Self> {
        if total_pages <= 1 {
            return None;
        }

        let pages = (1..=total_pages)
            .map(|number| PageLink {
                number,
                active: number == current_page,
            })
            .collect();

        Some(Self {
            prev: (current_page > 1).then(|| current_page - 1),
            pages,
            next: (current_page < total_pages).then(|| current_page + 1),
        })
    }
}
