use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};

/// One article as served by the feed and as stored in the bookmark blob.
///
/// Identity is the `url`, not the numeric `id`: bookmark lookup, removal and
/// list keys all compare urls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    pub id: i64,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub summary: String,
    pub image_url: Option<String>,
    pub url: String,
    pub news_site: Option<String>,
    pub published_at: Option<String>,
}

impl Article {
    pub fn identity(&self) -> &str {
        &self.url
    }

    pub fn is_same_article(&self, other: &Article) -> bool {
        self.url == other.url
    }

    /// Parsed `published_at`, converted to local time. `None` when the field
    /// is missing or not RFC 3339.
    pub fn published_local(&self) -> Option<DateTime<Local>> {
        self.published_at
            .as_deref()
            .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
            .map(|dt| dt.with_timezone(&Local))
    }
}

/// The feed sends `"summary": null` for some items; treat it like a missing one.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Paginated envelope returned by the feed endpoint. Only `results` is used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedPage {
    #[serde(default)]
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<Article>,
}

pub fn contains_article(collection: &[Article], article: &Article) -> bool {
    collection.iter().any(|existing| existing.is_same_article(article))
}

/// Removes `article` if present (by url), appends it otherwise.
/// Returns whether the article is in the collection afterwards.
pub fn toggle_article(collection: &mut Vec<Article>, article: &Article) -> bool {
    if contains_article(collection, article) {
        collection.retain(|existing| !existing.is_same_article(article));
        false
    } else {
        collection.push(article.clone());
        true
    }
}

/// Drops every entry sharing `article`'s url. Returns whether anything was removed.
pub fn remove_article(collection: &mut Vec<Article>, article: &Article) -> bool {
    let before = collection.len();
    collection.retain(|existing| !existing.is_same_article(article));
    collection.len() != before
}
