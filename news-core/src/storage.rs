use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::article::Article;
use crate::error::StorageError;
use crate::outcome::LoadOutcome;

pub const BOOKMARKS_KEY: &str = "@bookmarked_articles";

/// String key-value facility the bookmark blob lives in.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> impl Future<Output = io::Result<Option<String>>> + Send;

    fn set_item(&self, key: &str, value: String) -> impl Future<Output = io::Result<()>> + Send;
}

/// One `<key>.json` file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `@bookmarked_articles` -> `<dir>/bookmarked_articles.json`
    pub fn key_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl KeyValueStore for FileStore {
    async fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        let path = self.key_path(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn set_item(&self, key: &str, value: String) -> io::Result<()> {
        let path = self.key_path(key);
        tokio::fs::create_dir_all(&self.dir).await?;
        // write a sibling then rename over the old file
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value.as_bytes()).await?;
        tokio::fs::rename(&tmp, &path).await
    }
}

/// Process-local store, nothing survives a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn in_memory() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> io::Result<()> {
        self.items.write().await.insert(key.to_owned(), value);
        Ok(())
    }
}

/// Reads and writes the whole bookmark collection as one JSON array.
#[derive(Debug, Clone)]
pub struct BookmarkPersistence<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> BookmarkPersistence<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, BOOKMARKS_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Overwrites the stored collection. Failures are logged and handed back;
    /// nothing is retried.
    pub async fn save(&self, articles: &[Article]) -> Result<(), StorageError> {
        let result = self.try_save(articles).await;
        if let Err(err) = &result {
            warn!(key = %self.key, error = %err, "failed to save bookmarks");
        }
        result
    }

    async fn try_save(&self, articles: &[Article]) -> Result<(), StorageError> {
        let json = serde_json::to_string(articles).map_err(StorageError::Encode)?;
        self.store.set_item(&self.key, json).await?;
        debug!(key = %self.key, count = articles.len(), "bookmarks saved");
        Ok(())
    }

    /// Absent or blank value loads as an empty collection. Read and decode
    /// errors are logged and reported as `Failed`.
    pub async fn load(&self) -> LoadOutcome<StorageError> {
        let outcome = LoadOutcome::from(self.try_load().await);
        if let Some(err) = outcome.failure() {
            warn!(key = %self.key, error = %err, "failed to load bookmarks");
        }
        outcome
    }

    async fn try_load(&self) -> Result<Vec<Article>, StorageError> {
        match self.store.get_item(&self.key).await? {
            Some(text) if !text.trim().is_empty() => {
                serde_json::from_str(&text).map_err(StorageError::Decode)
            }
            _ => Ok(Vec::new()),
        }
    }
}
