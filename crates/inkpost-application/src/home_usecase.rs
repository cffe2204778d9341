//! The public home view: anonymous browsing of the paginated post list.

use std::sync::Arc;

use inkpost_core::config::ClientConfig;
use inkpost_core::error::Result;
use inkpost_core::list::ListScope;
use inkpost_core::post::model::Post;
use inkpost_core::post::repository::PostLister;
use inkpost_core::view::NavBar;

use crate::list_controller::{ListBrowser, ListViewModel};
use crate::session_usecase::SessionUseCase;

/// Render model for the home view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView {
    pub nav_bar: NavBar,
    pub list: ListViewModel,
}

/// Use case for the public post list.
///
/// No credentials are attached; only the navigation bar changes with the
/// session state.
pub struct HomeUseCase {
    session: Arc<SessionUseCase>,
    lister: Arc<dyn PostLister>,
    browser: ListBrowser,
}

impl HomeUseCase {
    pub fn new(
        session: Arc<SessionUseCase>,
        lister: Arc<dyn PostLister>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            session,
            lister: lister.clone(),
            browser: ListBrowser::new(
                lister,
                ListScope::Public,
                config.per_page,
                config.request_timeout(),
            ),
        }
    }

    pub async fn open(&self) -> Result<HomeView> {
        let list = self.browser.open().await?;
        Ok(self.assemble(list).await)
    }

    pub async fn set_page(&self, page: u32) -> Result<HomeView> {
        let list = self.browser.set_page(page).await?;
        Ok(self.assemble(list).await)
    }

    pub async fn set_search(&self, text: &str) -> Result<HomeView> {
        let list = self.browser.set_search(text).await?;
        Ok(self.assemble(list).await)
    }

    /// Fetches a single post for the detail view.
    pub async fn open_post(&self, slug: &str) -> Result<Post> {
        self.lister.by_slug(slug).await
    }

    /// Re-renders without fetching, e.g. after a logout toggled the
    /// navigation bar.
    pub async fn view(&self) -> HomeView {
        let list = self.browser.view().await;
        self.assemble(list).await
    }

    async fn assemble(&self, list: ListViewModel) -> HomeView {
        HomeView {
            nav_bar: self.session.nav_bar().await,
            list,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use inkpost_core::view::NavAction;

    use crate::list_controller::ListContent;
    use crate::list_controller::tests::{ScriptedLister, page};
    use crate::session_usecase::tests::{MockAuthApi, MockSessionStore};

    fn home(store: MockSessionStore, lister: Arc<ScriptedLister>) -> HomeUseCase {
        let session = Arc::new(SessionUseCase::new(
            Arc::new(store),
            Arc::new(MockAuthApi::ok("tok")),
            Duration::from_secs(2),
        ));
        HomeUseCase::new(session, lister, &ClientConfig::default())
    }

    #[tokio::test]
    async fn test_open_renders_anonymous_nav_and_posts() {
        let lister = Arc::new(ScriptedLister::new(vec![Ok(page(&[1, 2, 3, 4], 1, 3, 10))]));
        let home = home(MockSessionStore::empty(), lister.clone());

        let view = home.open().await.unwrap();
        assert!(!view.nav_bar.protected_links_visible);
        assert_eq!(view.nav_bar.actions, vec![NavAction::SignUp, NavAction::Login]);
        assert!(matches!(view.list.content, ListContent::Posts(ref items) if items.len() == 4));
        // Public scope never attaches credentials.
        assert_eq!(lister.calls()[0].scope, ListScope::Public);
    }

    #[tokio::test]
    async fn test_signed_in_nav_shows_protected_links() {
        let lister = Arc::new(ScriptedLister::new(vec![Ok(page(&[1], 1, 1, 1))]));
        let home = home(MockSessionStore::with_token("tok"), lister);

        let view = home.open().await.unwrap();
        assert!(view.nav_bar.protected_links_visible);
        assert_eq!(view.nav_bar.actions, vec![NavAction::Logout]);
    }

    #[tokio::test]
    async fn test_search_starts_at_page_one() {
        let lister = Arc::new(ScriptedLister::new(vec![
            Ok(page(&[1, 2, 3, 4], 1, 3, 10)),
            Ok(page(&[5, 6, 7, 8], 2, 3, 10)),
            Ok(page(&[42], 1, 1, 1)),
        ]));
        let home = home(MockSessionStore::empty(), lister.clone());

        home.open().await.unwrap();
        home.set_page(2).await.unwrap();
        home.set_search("cats").await.unwrap();

        let calls = lister.calls();
        assert_eq!(calls[1].page, 2);
        assert_eq!(calls[2].page, 1);
        assert_eq!(calls[2].search_term(), Some("cats"));
    }
}
