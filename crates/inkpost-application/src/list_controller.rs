//! The session-gated paginated resource browser.
//!
//! One parametrized controller serves the public post list, the dashboard
//! list, and the my-posts list; the variations (scope, per-page count) are
//! configuration, not forked code.
//!
//! The state machine is `Idle -> Loading -> (Rendered | LoadError)`,
//! re-entrant: any state may transition back to `Loading` on a new query.
//! [`ListController`] is the synchronous core; [`ListBrowser`] drives it
//! against a [`PostLister`] with a per-request timeout.

use std::sync::Arc;

use tokio::sync::Mutex;

use inkpost_core::error::{InkpostError, Result};
use inkpost_core::list::{ListQuery, ListResult, ListScope, PageControls};
use inkpost_core::post::model::PostSummary;
use inkpost_core::post::repository::PostLister;

/// Phase of the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    Idle,
    Loading,
    Rendered,
    LoadError,
}

/// Identifies one issued fetch. Responses are applied only when their
/// ticket still matches the most recently issued one; stale, out-of-order
/// responses are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// A fetch the caller must perform: the ticket plus a snapshot of the
/// query to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    pub ticket: FetchTicket,
    pub query: ListQuery,
}

/// What the list region shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListContent {
    /// Nothing fetched yet and nothing in flight worth showing.
    Blank,
    /// A fetch is in flight and there is no prior list to keep on screen.
    Loading,
    /// The server confirmed an empty result; render the explicit
    /// "no posts found" placeholder.
    NoResults,
    /// The rendered items. Kept on screen while a newer fetch is in
    /// flight or after a failed one.
    Posts(Vec<PostSummary>),
}

/// Render model for the whole list region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewModel {
    pub content: ListContent,
    pub controls: Option<PageControls>,
    pub error_notice: Option<String>,
    pub total_count: u64,
}

/// Synchronous state machine for one paginated list.
#[derive(Debug)]
pub struct ListController {
    query: ListQuery,
    phase: ListPhase,
    rendered: Option<ListResult>,
    error_notice: Option<String>,
    generation: u64,
}

impl ListController {
    pub fn new(scope: ListScope, per_page: u32) -> Self {
        Self {
            query: ListQuery::new(scope, per_page),
            phase: ListPhase::Idle,
            rendered: None,
            error_notice: None,
            generation: 0,
        }
    }

    /// Issues the initial fetch for page 1 of the unfiltered list.
    pub fn initial_fetch(&mut self) -> PendingFetch {
        self.issue()
    }

    /// Moves to another page, keeping the search term unchanged.
    ///
    /// Valid only for `1 <= page <= total_pages` of the last rendered
    /// result; controls for other pages are not offered, so an
    /// out-of-range request is ignored and returns `None`.
    pub fn set_page(&mut self, page: u32) -> Option<PendingFetch> {
        let total_pages = self.rendered.as_ref()?.total_pages;
        if page < 1 || page > total_pages {
            return None;
        }
        self.query.page = page;
        Some(self.issue())
    }

    /// Applies a new search term and issues an immediate fetch.
    ///
    /// A new search always starts at the first page. There is no debounce;
    /// the staleness guard on tickets keeps rapid edits consistent.
    pub fn set_search(&mut self, text: &str) -> PendingFetch {
        self.query.search = text.to_string();
        self.query.page = 1;
        self.issue()
    }

    /// Re-issues the fetch for the current query unchanged; used after
    /// mutations.
    pub fn refresh(&mut self) -> PendingFetch {
        self.issue()
    }

    fn issue(&mut self) -> PendingFetch {
        self.generation += 1;
        self.phase = ListPhase::Loading;
        PendingFetch {
            ticket: FetchTicket(self.generation),
            query: self.query.clone(),
        }
    }

    /// Applies a successful response. Returns `false` when the response is
    /// stale (a newer fetch was issued meanwhile) and was discarded.
    pub fn apply_success(&mut self, ticket: FetchTicket, result: ListResult) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!(
                ticket = ticket.0,
                current = self.generation,
                "discarding stale list response"
            );
            return false;
        }
        self.rendered = Some(result);
        self.error_notice = None;
        self.phase = ListPhase::Rendered;
        true
    }

    /// Applies a failed response. The prior rendered list is left in
    /// place; a non-blocking error notice is surfaced instead. Stale
    /// failures are discarded like stale successes.
    pub fn apply_failure(&mut self, ticket: FetchTicket, error: &InkpostError) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!(ticket = ticket.0, "discarding stale list failure");
            return false;
        }
        self.error_notice = Some(error.user_message());
        self.phase = ListPhase::LoadError;
        true
    }

    /// After a delete emptied the last page, the server reports a current
    /// page beyond the new last page. Detects that and issues a fetch for
    /// the clamped page instead of rendering an out-of-range empty page.
    pub fn out_of_range_refetch(&mut self) -> Option<PendingFetch> {
        let rendered = self.rendered.as_ref()?;
        if !rendered.page_out_of_range() {
            return None;
        }
        let clamped = rendered.last_page();
        tracing::debug!(page = clamped, "clamping to last page after shrink");
        self.query.page = clamped;
        Some(self.issue())
    }

    pub fn phase(&self) -> ListPhase {
        self.phase
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    /// The page currently rendered, when something is rendered.
    pub fn current_page(&self) -> Option<u32> {
        self.rendered.as_ref().map(|r| r.current_page)
    }

    /// Renders the current state.
    pub fn view(&self) -> ListViewModel {
        let content = match (&self.rendered, self.phase) {
            (Some(result), _) if !result.items.is_empty() => {
                ListContent::Posts(result.items.clone())
            }
            // The "no results" placeholder must not appear while a fetch
            // is in flight.
            (Some(_), ListPhase::Loading) => ListContent::Loading,
            (Some(_), _) => ListContent::NoResults,
            (None, ListPhase::Loading) => ListContent::Loading,
            (None, _) => ListContent::Blank,
        };

        let controls = self.rendered.as_ref().and_then(|result| {
            if result.total_count == 0 {
                None
            } else {
                PageControls::build(result.current_page, result.total_pages)
            }
        });

        ListViewModel {
            content,
            controls,
            error_notice: self.error_notice.clone(),
            total_count: self.rendered.as_ref().map_or(0, |r| r.total_count),
        }
    }
}

/// Asynchronous driver for a [`ListController`] against a [`PostLister`].
///
/// Superseded requests are not cancelled; they complete and their results
/// are discarded by the ticket check. A fetch that outlives the timeout
/// renders as a load error instead of leaving the view loading forever.
pub struct ListBrowser {
    lister: Arc<dyn PostLister>,
    controller: Mutex<ListController>,
    timeout: std::time::Duration,
}

impl ListBrowser {
    pub fn new(
        lister: Arc<dyn PostLister>,
        scope: ListScope,
        per_page: u32,
        timeout: std::time::Duration,
    ) -> Self {
        Self {
            lister,
            controller: Mutex::new(ListController::new(scope, per_page)),
            timeout,
        }
    }

    /// Performs the initial fetch and renders.
    pub async fn open(&self) -> Result<ListViewModel> {
        let pending = self.controller.lock().await.initial_fetch();
        self.drive(pending).await
    }

    pub async fn set_page(&self, page: u32) -> Result<ListViewModel> {
        let pending = self.controller.lock().await.set_page(page);
        match pending {
            Some(pending) => self.drive(pending).await,
            None => Ok(self.view().await),
        }
    }

    pub async fn set_search(&self, text: &str) -> Result<ListViewModel> {
        let pending = self.controller.lock().await.set_search(text);
        self.drive(pending).await
    }

    /// Re-fetches the current page; used after mutations. When the
    /// refreshed result reports a page beyond the new last page, the
    /// browser transparently re-fetches the clamped page.
    pub async fn refresh(&self) -> Result<ListViewModel> {
        let pending = self.controller.lock().await.refresh();
        self.drive(pending).await
    }

    /// Renders the current state without fetching.
    pub async fn view(&self) -> ListViewModel {
        self.controller.lock().await.view()
    }

    async fn drive(&self, mut pending: PendingFetch) -> Result<ListViewModel> {
        loop {
            let outcome = tokio::time::timeout(self.timeout, self.lister.list(&pending.query)).await;

            let mut controller = self.controller.lock().await;
            let followup = match outcome {
                Ok(Ok(result)) => {
                    if controller.apply_success(pending.ticket, result) {
                        controller.out_of_range_refetch()
                    } else {
                        None
                    }
                }
                // Auth failures are not list render states; they bubble to
                // the session layer's global policy.
                Ok(Err(err)) if err.is_auth_failure() => return Err(err),
                Ok(Err(err)) => {
                    controller.apply_failure(pending.ticket, &err);
                    None
                }
                Err(_) => {
                    controller.apply_failure(
                        pending.ticket,
                        &InkpostError::transport("request timed out"),
                    );
                    None
                }
            };

            match followup {
                Some(next) => pending = next,
                None => return Ok(controller.view()),
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;

    pub(crate) fn summary(id: u64, title: &str) -> PostSummary {
        PostSummary {
            id,
            title: title.to_string(),
            date: "2025-05-01".to_string(),
            slug: format!("post-{id}"),
            content: "body".to_string(),
            image: None,
            author: None,
        }
    }

    pub(crate) fn page(ids: &[u64], current: u32, total_pages: u32, total_count: u64) -> ListResult {
        ListResult {
            items: ids.iter().map(|id| summary(*id, "post")).collect(),
            current_page: current,
            total_pages,
            total_count,
        }
    }

    // ------------------------------------------------------------------
    // ListController (synchronous state machine)
    // ------------------------------------------------------------------

    #[test]
    fn test_first_page_of_three_renders_controls() {
        let mut controller = ListController::new(ListScope::Public, 4);
        let pending = controller.initial_fetch();
        assert_eq!(pending.query.page, 1);

        assert!(controller.apply_success(pending.ticket, page(&[1, 2, 3, 4], 1, 3, 10)));

        let view = controller.view();
        match &view.content {
            ListContent::Posts(items) => assert_eq!(items.len(), 4),
            other => panic!("expected posts, got {other:?}"),
        }
        let controls = view.controls.unwrap();
        assert_eq!(controls.prev, None);
        assert_eq!(controls.next, Some(2));
        assert_eq!(
            controls.pages.iter().map(|p| p.number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(controls.pages[0].active);
        assert_eq!(view.total_count, 10);
    }

    #[test]
    fn test_controls_absent_for_single_page_or_empty() {
        let mut controller = ListController::new(ListScope::Public, 4);
        let pending = controller.initial_fetch();
        controller.apply_success(pending.ticket, page(&[1, 2], 1, 1, 2));
        assert!(controller.view().controls.is_none());

        let pending = controller.refresh();
        controller.apply_success(pending.ticket, page(&[], 1, 0, 0));
        let view = controller.view();
        assert!(view.controls.is_none());
        assert_eq!(view.content, ListContent::NoResults);
    }

    #[test]
    fn test_set_page_bounds() {
        let mut controller = ListController::new(ListScope::Public, 4);
        assert!(controller.set_page(2).is_none()); // nothing rendered yet

        let pending = controller.initial_fetch();
        controller.apply_success(pending.ticket, page(&[1, 2, 3, 4], 1, 3, 10));

        assert!(controller.set_page(0).is_none());
        assert!(controller.set_page(4).is_none());

        let pending = controller.set_page(3).unwrap();
        assert_eq!(pending.query.page, 3);
        controller.apply_success(pending.ticket, page(&[9, 10], 3, 3, 10));
        assert_eq!(controller.current_page(), Some(3));
    }

    #[test]
    fn test_set_search_resets_page_and_trims_at_request_time() {
        let mut controller = ListController::new(ListScope::Public, 4);
        let pending = controller.initial_fetch();
        controller.apply_success(pending.ticket, page(&[1, 2, 3, 4], 1, 3, 10));
        let pending = controller.set_page(2).unwrap();
        controller.apply_success(pending.ticket, page(&[5, 6, 7, 8], 2, 3, 10));

        let pending = controller.set_search("  cats ");
        assert_eq!(pending.query.page, 1);
        assert_eq!(pending.query.search_term(), Some("cats"));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut controller = ListController::new(ListScope::Public, 4);
        let initial = controller.initial_fetch();
        controller.apply_success(initial.ticket, page(&[1], 1, 3, 10));

        // Request A (page 2), then request B (search) before A resolves.
        let a = controller.set_page(2).unwrap();
        let b = controller.set_search("cats");

        // B resolves first and renders.
        assert!(controller.apply_success(b.ticket, page(&[42], 1, 1, 1)));
        // A resolves late and must be discarded.
        assert!(!controller.apply_success(a.ticket, page(&[5, 6, 7, 8], 2, 3, 10)));

        let view = controller.view();
        assert_eq!(view.content, ListContent::Posts(vec![summary(42, "post")]));
        assert_eq!(controller.current_page(), Some(1));
    }

    #[test]
    fn test_stale_failure_is_discarded() {
        let mut controller = ListController::new(ListScope::Public, 4);
        let a = controller.initial_fetch();
        let b = controller.set_search("cats");

        assert!(controller.apply_success(b.ticket, page(&[1], 1, 1, 1)));
        assert!(!controller.apply_failure(a.ticket, &InkpostError::transport("late failure")));
        assert_eq!(controller.view().error_notice, None);
    }

    #[test]
    fn test_failure_keeps_prior_list_with_notice() {
        let mut controller = ListController::new(ListScope::Public, 4);
        let pending = controller.initial_fetch();
        controller.apply_success(pending.ticket, page(&[1, 2], 1, 2, 6));

        let pending = controller.set_page(2).unwrap();
        controller.apply_failure(pending.ticket, &InkpostError::server("No posts found"));

        let view = controller.view();
        assert_eq!(view.content, ListContent::Posts(vec![summary(1, "post"), summary(2, "post")]));
        assert_eq!(view.error_notice.as_deref(), Some("No posts found"));
        assert_eq!(controller.phase(), ListPhase::LoadError);
    }

    #[test]
    fn test_loading_shows_prior_list_not_placeholder() {
        let mut controller = ListController::new(ListScope::Public, 4);
        let pending = controller.initial_fetch();
        assert_eq!(controller.view().content, ListContent::Loading);

        controller.apply_success(pending.ticket, page(&[1], 1, 1, 1));
        controller.refresh();
        assert_eq!(
            controller.view().content,
            ListContent::Posts(vec![summary(1, "post")])
        );
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let mut controller = ListController::new(ListScope::Public, 4);
        let pending = controller.initial_fetch();
        controller.apply_success(pending.ticket, page(&[1, 2], 1, 2, 6));

        let first = controller.refresh();
        controller.apply_success(first.ticket, page(&[1, 2], 1, 2, 6));
        let view_a = controller.view();

        let second = controller.refresh();
        assert_eq!(first.query, second.query);
        controller.apply_success(second.ticket, page(&[1, 2], 1, 2, 6));
        assert_eq!(controller.view(), view_a);
    }

    #[test]
    fn test_out_of_range_refetch_clamps() {
        let mut controller = ListController::new(ListScope::Mine, 4);
        let pending = controller.initial_fetch();
        // Page 3 existed before the delete; the refresh now reports only
        // two pages.
        controller.query.page = 3;
        controller.apply_success(pending.ticket, page(&[], 3, 2, 8));

        let follow = controller.out_of_range_refetch().unwrap();
        assert_eq!(follow.query.page, 2);

        controller.apply_success(follow.ticket, page(&[7, 8], 2, 2, 8));
        assert!(controller.out_of_range_refetch().is_none());
        assert_eq!(controller.current_page(), Some(2));
    }

    // ------------------------------------------------------------------
    // ListBrowser (async driver)
    // ------------------------------------------------------------------

    pub(crate) struct ScriptedLister {
        responses: StdMutex<VecDeque<Result<ListResult>>>,
        calls: StdMutex<Vec<ListQuery>>,
        hang: bool,
    }

    impl ScriptedLister {
        pub(crate) fn new(responses: Vec<Result<ListResult>>) -> Self {
            Self {
                responses: StdMutex::new(responses.into()),
                calls: StdMutex::new(Vec::new()),
                hang: false,
            }
        }

        pub(crate) fn hanging() -> Self {
            Self {
                responses: StdMutex::new(VecDeque::new()),
                calls: StdMutex::new(Vec::new()),
                hang: true,
            }
        }

        pub(crate) fn calls(&self) -> Vec<ListQuery> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl PostLister for ScriptedLister {
        async fn list(&self, query: &ListQuery) -> Result<ListResult> {
            self.calls.lock().unwrap().push(query.clone());
            if self.hang {
                futures::future::pending::<()>().await;
            }
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(InkpostError::internal("no scripted response")))
        }

        async fn by_slug(&self, _slug: &str) -> Result<inkpost_core::post::model::Post> {
            Err(InkpostError::internal("not scripted"))
        }
    }

    #[tokio::test]
    async fn test_browser_open_renders_first_page() {
        let lister = Arc::new(ScriptedLister::new(vec![Ok(page(&[1, 2, 3, 4], 1, 3, 10))]));
        let browser = ListBrowser::new(
            lister.clone(),
            ListScope::Public,
            4,
            std::time::Duration::from_secs(5),
        );

        let view = browser.open().await.unwrap();
        assert!(matches!(view.content, ListContent::Posts(ref items) if items.len() == 4));
        assert_eq!(lister.calls().len(), 1);
        assert_eq!(lister.calls()[0].page, 1);
    }

    #[tokio::test]
    async fn test_browser_refresh_clamps_after_shrink() {
        // First refresh lands on an out-of-range page after a delete; the
        // browser must follow up with the clamped page.
        let lister = Arc::new(ScriptedLister::new(vec![
            Ok(page(&[9], 3, 3, 9)),
            Ok(page(&[], 3, 2, 8)),
            Ok(page(&[7, 8], 2, 2, 8)),
        ]));
        let browser = ListBrowser::new(
            lister.clone(),
            ListScope::Mine,
            4,
            std::time::Duration::from_secs(5),
        );

        browser.open().await.unwrap();
        {
            // Walk to page 3 so the refresh targets it.
            let mut controller = browser.controller.lock().await;
            let pending = controller.set_page(3).unwrap();
            controller.apply_success(pending.ticket, page(&[9], 3, 3, 9));
        }

        let view = browser.refresh().await.unwrap();
        assert!(matches!(view.content, ListContent::Posts(ref items) if items.len() == 2));

        let calls = lister.calls();
        assert_eq!(calls.last().unwrap().page, 2);
        assert_eq!(browser.controller.lock().await.current_page(), Some(2));
    }

    #[tokio::test]
    async fn test_browser_timeout_becomes_load_error() {
        let lister = Arc::new(ScriptedLister::hanging());
        let browser = ListBrowser::new(
            lister,
            ListScope::Public,
            4,
            std::time::Duration::from_millis(20),
        );

        let view = browser.open().await.unwrap();
        assert!(view.error_notice.is_some());
        assert_eq!(view.content, ListContent::Blank);
    }

    #[tokio::test]
    async fn test_browser_bubbles_auth_failure() {
        let lister = Arc::new(ScriptedLister::new(vec![Err(InkpostError::AuthRequired)]));
        let browser = ListBrowser::new(
            lister,
            ListScope::Mine,
            4,
            std::time::Duration::from_secs(5),
        );

        let err = browser.open().await.unwrap_err();
        assert!(err.is_auth_failure());
    }
}
