use tracing::{debug, info};

use crate::article::{contains_article, Article};
use crate::client::FeedClient;
use crate::error::{FeedError, StorageError};
use crate::outcome::LoadOutcome;
use crate::storage::KeyValueStore;
use crate::store::BookmarkStore;
use crate::view::{
    ArticleCard, ImageFailures, ListView, BOOKMARKS_EMPTY, BOOKMARKS_HEADER, HOME_EMPTY,
    HOME_HEADER,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenPhase {
    #[default]
    Idle,
    Loading,
    Ready,
}

/// Home screen: the feed snapshot plus bookmark toggling.
pub struct HomeController<S> {
    client: FeedClient,
    bookmarks: BookmarkStore<S>,
    phase: ScreenPhase,
    feed: Vec<Article>,
    fetch_failed: bool,
}

impl<S: KeyValueStore> HomeController<S> {
    pub fn new(client: FeedClient, bookmarks: BookmarkStore<S>) -> Self {
        Self {
            client,
            bookmarks,
            phase: ScreenPhase::Idle,
            feed: Vec::new(),
            fetch_failed: false,
        }
    }

    pub fn client(&self) -> &FeedClient {
        &self.client
    }

    pub fn bookmarks(&self) -> &BookmarkStore<S> {
        &self.bookmarks
    }

    pub fn phase(&self) -> ScreenPhase {
        self.phase
    }

    /// Current feed snapshot.
    pub fn articles(&self) -> &[Article] {
        &self.feed
    }

    /// Whether the last fetch failed, as opposed to returning no articles.
    pub fn fetch_failed(&self) -> bool {
        self.fetch_failed
    }

    pub fn begin_loading(&mut self) {
        self.phase = ScreenPhase::Loading;
    }

    /// Replaces the snapshot and settles in `Ready`, empty or not.
    pub fn finish_loading(&mut self, outcome: LoadOutcome<FeedError>) {
        self.fetch_failed = outcome.is_failed();
        self.feed = outcome.into_articles();
        self.phase = ScreenPhase::Ready;
        debug!(count = self.feed.len(), failed = self.fetch_failed, "home feed ready");
    }

    pub async fn mount(&mut self) {
        self.begin_loading();
        let outcome = self.client.fetch_feed().await;
        self.finish_loading(outcome);
    }

    pub async fn on_focus(&self) -> Result<usize, StorageError> {
        self.bookmarks.refresh().await
    }

    pub async fn toggle_bookmark(&self, article: &Article) -> Result<bool, StorageError> {
        self.bookmarks.toggle(article).await
    }

    pub async fn is_bookmarked(&self, article: &Article) -> bool {
        self.bookmarks.is_bookmarked(article).await
    }

    pub async fn list_view(&self, failures: &ImageFailures) -> ListView {
        let saved = self.bookmarks.list().await;
        let cards = self
            .feed
            .iter()
            .map(|article| {
                let bookmarked = contains_article(&saved, article);
                ArticleCard::new(article, bookmarked, failures)
            })
            .collect();
        ListView {
            header: HOME_HEADER,
            cards,
            empty: HOME_EMPTY,
        }
    }
}

/// Bookmarks screen: lists saved articles and removes them.
pub struct BookmarksController<S> {
    bookmarks: BookmarkStore<S>,
}

impl<S: KeyValueStore> BookmarksController<S> {
    pub fn new(bookmarks: BookmarkStore<S>) -> Self {
        Self { bookmarks }
    }

    pub async fn on_focus(&self) -> Result<usize, StorageError> {
        self.bookmarks.refresh().await
    }

    pub async fn bookmarks(&self) -> Vec<Article> {
        self.bookmarks.list().await
    }

    pub async fn remove_bookmark(&self, article: &Article) -> Result<bool, StorageError> {
        let result = self.bookmarks.remove(article).await;
        if let Ok(false) = result {
            info!(url = %article.url, "bookmark to remove was not in the collection");
        }
        result
    }

    pub async fn list_view(&self, failures: &ImageFailures) -> ListView {
        let cards = self
            .bookmarks
            .list()
            .await
            .iter()
            .map(|article| ArticleCard::new(article, true, failures))
            .collect();
        ListView {
            header: BOOKMARKS_HEADER,
            cards,
            empty: BOOKMARKS_EMPTY,
        }
    }
}
