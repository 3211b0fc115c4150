use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info};

use crate::article::{contains_article, remove_article, toggle_article, Article};
use crate::error::StorageError;
use crate::storage::{BookmarkPersistence, KeyValueStore};

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkEvent {
    Added(Article),
    /// Url of the removed article.
    Removed(String),
    /// The collection was replaced from storage; carries the new length.
    Reloaded(usize),
}

/// Bookmark collection shared by every screen.
///
/// Clones share the same collection, so a change made through one handle is
/// visible to all of them immediately. Each mutation keeps the write lock
/// until the full collection has been handed to storage, which serializes
/// saves in mutation order.
pub struct BookmarkStore<S> {
    inner: Arc<RwLock<Vec<Article>>>,
    persistence: Arc<BookmarkPersistence<S>>,
    events: broadcast::Sender<BookmarkEvent>,
}

impl<S> Clone for BookmarkStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            persistence: Arc::clone(&self.persistence),
            events: self.events.clone(),
        }
    }
}

impl<S: KeyValueStore> BookmarkStore<S> {
    /// Starts empty; call [`BookmarkStore::refresh`] to pull the stored collection.
    pub fn new(persistence: BookmarkPersistence<S>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(RwLock::new(Vec::new())),
            persistence: Arc::new(persistence),
            events,
        }
    }

    pub async fn open(persistence: BookmarkPersistence<S>) -> Self {
        let store = Self::new(persistence);
        // load failures are logged by the adapter and leave the store empty
        let _ = store.refresh().await;
        store
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BookmarkEvent> {
        self.events.subscribe()
    }

    /// Replaces the in-memory collection with what storage holds. On a failed
    /// load the collection becomes empty and the error is returned.
    pub async fn refresh(&self) -> Result<usize, StorageError> {
        let mut bookmarks = self.inner.write().await;
        let (loaded, failure) = self.persistence.load().await.into_parts();
        *bookmarks = loaded;
        let count = bookmarks.len();
        drop(bookmarks);

        debug!(count, "bookmarks reloaded from storage");
        self.notify(BookmarkEvent::Reloaded(count));
        match failure {
            Some(err) => Err(err),
            None => Ok(count),
        }
    }

    /// Adds the article when no bookmark shares its url, removes it otherwise,
    /// then persists. Returns the membership after the toggle.
    ///
    /// A save failure is returned as `Err`, but the in-memory collection keeps
    /// the change.
    pub async fn toggle(&self, article: &Article) -> Result<bool, StorageError> {
        let mut bookmarks = self.inner.write().await;
        let bookmarked = toggle_article(&mut bookmarks, article);
        let saved = self.persistence.save(&bookmarks).await;
        drop(bookmarks);

        info!(url = %article.url, bookmarked, "bookmark toggled");
        if bookmarked {
            self.notify(BookmarkEvent::Added(article.clone()));
        } else {
            self.notify(BookmarkEvent::Removed(article.url.clone()));
        }
        saved.map(|()| bookmarked)
    }

    /// Removes every bookmark sharing the article's url and persists.
    /// Returns whether something was removed.
    pub async fn remove(&self, article: &Article) -> Result<bool, StorageError> {
        let mut bookmarks = self.inner.write().await;
        let removed = remove_article(&mut bookmarks, article);
        let saved = self.persistence.save(&bookmarks).await;
        drop(bookmarks);

        if removed {
            info!(url = %article.url, "bookmark removed");
            self.notify(BookmarkEvent::Removed(article.url.clone()));
        }
        saved.map(|()| removed)
    }

    pub async fn is_bookmarked(&self, article: &Article) -> bool {
        contains_article(&self.inner.read().await, article)
    }

    pub async fn list(&self) -> Vec<Article> {
        self.inner.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    fn notify(&self, event: BookmarkEvent) {
        // no subscribers is fine
        let _ = self.events.send(event);
    }
}
