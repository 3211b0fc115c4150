use reqwest::{Client, ClientBuilder};
use tracing::{debug, warn};
use url::Url;

use crate::article::{Article, FeedPage};
use crate::config::FeedConfig;
use crate::error::FeedError;
use crate::outcome::LoadOutcome;

pub const DEFAULT_FEED_URL: &str = "https://api.spaceflightnewsapi.net/v4/articles";

/// Issues the single feed request. Cloning is cheap: the inner `reqwest::Client`
/// shares its connection pool.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: Client,
    endpoint: Url,
}

impl FeedClient {
    pub fn new(http: Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    pub fn from_config(config: &FeedConfig) -> Result<Self, FeedError> {
        let endpoint = Url::parse(&config.endpoint)?;
        let http = ClientBuilder::new()
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self::new(http, endpoint))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches the first page of the feed. Never fails from the caller's
    /// point of view: any error is logged and reported as `Failed`, whose
    /// article view is empty.
    pub async fn fetch_feed(&self) -> LoadOutcome<FeedError> {
        match self.fetch_page().await {
            Ok(page) => {
                debug!(count = page.results.len(), "feed fetched");
                LoadOutcome::Loaded(page.results)
            }
            Err(err) => {
                warn!(endpoint = %self.endpoint, error = %err, "failed to fetch feed");
                LoadOutcome::Failed(err)
            }
        }
    }

    pub async fn fetch_page(&self) -> Result<FeedPage, FeedError> {
        let response = self.http.get(self.endpoint.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }
        let bytes = response.bytes().await?;
        let page = serde_json::from_slice::<FeedPage>(&bytes)?;
        Ok(page)
    }

    pub async fn fetch_articles(&self) -> Vec<Article> {
        self.fetch_feed().await.into_articles()
    }
}
