mod app;

use std::sync::Arc;

use eframe::{egui, NativeOptions};
use news_core::{
    AppConfig, BookmarkPersistence, BookmarkStore, BookmarksController, FeedClient, FeedConfig,
    FileStore, HomeController,
};
use tokio::runtime::Runtime;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::app::{AppInit, NewsApp};

fn main() -> eframe::Result<()> {
    init_tracing();

    let runtime = Arc::new(Runtime::new().expect("failed to initialise Tokio runtime"));
    let config = AppConfig::load();
    let client = load_feed_client(&config);

    info!(endpoint = %client.endpoint(), "feed endpoint");

    let file_store = FileStore::new(config.data_dir());
    info!(dir = %file_store.dir().display(), "bookmarks directory");
    let bookmarks = BookmarkStore::new(BookmarkPersistence::new(file_store));

    let init = AppInit {
        runtime,
        home: HomeController::new(client, bookmarks.clone()),
        saved: BookmarksController::new(bookmarks),
    };

    eframe::run_native(
        "Spaceflight News",
        NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([480.0, 800.0])
                .with_min_inner_size([360.0, 480.0]),
            ..Default::default()
        },
        Box::new(move |cc| {
            // http fetch plus jpeg/png decoding for article images
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Box::new(NewsApp::new(init))
        }),
    )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn load_feed_client(config: &AppConfig) -> FeedClient {
    match FeedClient::from_config(&config.feed) {
        Ok(client) => client,
        Err(err) => {
            error!(error = %err, "invalid feed configuration, using the default endpoint");
            FeedClient::from_config(&FeedConfig::default())
                .expect("failed to build HTTP client")
        }
    }
}
