pub mod article;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod navigation;
pub mod outcome;
pub mod storage;
pub mod store;
pub mod view;

pub use article::{Article, FeedPage};
pub use client::{FeedClient, DEFAULT_FEED_URL};
pub use config::{AppConfig, FeedConfig, StorageConfig};
pub use controller::{BookmarksController, HomeController, ScreenPhase};
pub use error::{ConfigError, FeedError, StorageError};
pub use navigation::{FocusEvent, Navigator, Route, Tab};
pub use outcome::LoadOutcome;
pub use storage::{BookmarkPersistence, FileStore, KeyValueStore, MemoryStore, BOOKMARKS_KEY};
pub use store::{BookmarkEvent, BookmarkStore};
