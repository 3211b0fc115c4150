//! Render-ready models shared by the list and detail screens.
//!
//! Nothing in here touches a UI toolkit; a frontend maps these values onto
//! its own widgets.

use std::collections::HashSet;

use url::Url;

use crate::article::Article;
use crate::navigation::Route;

pub const THUMBNAIL_PLACEHOLDER: &str =
    "https://dummyimage.com/80x80/cccccc/000000.png&text=No+Image";
pub const HERO_PLACEHOLDER: &str =
    "https://dummyimage.com/600x400/cccccc/000000.png&text=No+Image";

pub const UNKNOWN_SITE: &str = "Unknown";
pub const MISSING_DATE: &str = "N/A";
pub const MISSING_SUMMARY: &str = "No summary available.";
pub const READ_MORE: &str = "Read full article";

pub const HOME_HEADER: &str = "📰 Top Headlines";
pub const BOOKMARKS_HEADER: &str = "🔖 Bookmarked Articles";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    /// Small image on a list card.
    Thumbnail,
    /// Full-width image on the detail screen.
    Hero,
}

impl ImageSlot {
    pub fn placeholder(self) -> &'static str {
        match self {
            ImageSlot::Thumbnail => THUMBNAIL_PLACEHOLDER,
            ImageSlot::Hero => HERO_PLACEHOLDER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Remote(String),
    Placeholder(&'static str),
}

impl ImageSource {
    pub fn uri(&self) -> &str {
        match self {
            ImageSource::Remote(uri) => uri,
            ImageSource::Placeholder(uri) => uri,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImageSource::Placeholder(_))
    }
}

/// Image urls that failed to load during this session.
#[derive(Debug, Clone, Default)]
pub struct ImageFailures {
    failed: HashSet<String>,
}

impl ImageFailures {
    pub fn mark_failed(&mut self, uri: &str) {
        self.failed.insert(uri.to_owned());
    }

    /// Records a remote image that failed to load. Placeholders are never
    /// recorded. Returns whether the url is new to the set.
    pub fn record_failure(&mut self, source: &ImageSource) -> bool {
        match source {
            ImageSource::Remote(uri) if !self.has_failed(uri) => {
                self.mark_failed(uri);
                true
            }
            _ => false,
        }
    }

    pub fn has_failed(&self, uri: &str) -> bool {
        self.failed.contains(uri)
    }
}

/// Placeholder when the url is missing, blank, not an absolute url, or
/// already failed to load. List and detail screens both go through here.
pub fn resolve_image(
    image_url: Option<&str>,
    failures: &ImageFailures,
    slot: ImageSlot,
) -> ImageSource {
    match image_url.map(str::trim) {
        Some(uri) if !uri.is_empty() && Url::parse(uri).is_ok() && !failures.has_failed(uri) => {
            ImageSource::Remote(uri.to_owned())
        }
        _ => ImageSource::Placeholder(slot.placeholder()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// Date only; nothing when the article carries no date.
    Short,
    /// Date and time; `N/A` when the article carries no date.
    Long,
}

pub fn format_published(article: &Article, style: DateStyle) -> String {
    match (article.published_local(), &article.published_at, style) {
        (Some(dt), _, DateStyle::Short) => dt.format("%Y-%m-%d").to_string(),
        (Some(dt), _, DateStyle::Long) => dt.format("%Y-%m-%d %H:%M").to_string(),
        (None, Some(raw), _) if !raw.trim().is_empty() => raw.clone(),
        (None, _, DateStyle::Short) => String::new(),
        (None, _, DateStyle::Long) => MISSING_DATE.to_owned(),
    }
}

pub fn meta_line(article: &Article, style: DateStyle) -> String {
    let site = article
        .news_site
        .as_deref()
        .filter(|site| !site.trim().is_empty())
        .unwrap_or(UNKNOWN_SITE);
    format!("📰 {site} • {}", format_published(article, style))
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArticleCard {
    pub article: Article,
    pub bookmarked: bool,
    pub meta: String,
    pub image: ImageSource,
}

impl ArticleCard {
    pub fn new(article: &Article, bookmarked: bool, failures: &ImageFailures) -> Self {
        Self {
            article: article.clone(),
            bookmarked,
            meta: meta_line(article, DateStyle::Short),
            image: resolve_image(article.image_url.as_deref(), failures, ImageSlot::Thumbnail),
        }
    }

    /// List key; articles are keyed by url.
    pub fn key(&self) -> &str {
        self.article.identity()
    }

    /// Where a click anywhere on the card body leads.
    pub fn detail_route(&self) -> Route {
        Route::Detail(Box::new(self.article.clone()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub title: String,
    pub meta: String,
    pub summary: String,
    pub image: ImageSource,
    pub link_label: &'static str,
    pub link: String,
}

impl DetailView {
    pub fn new(article: &Article, failures: &ImageFailures) -> Self {
        let summary = if article.summary.trim().is_empty() {
            MISSING_SUMMARY.to_owned()
        } else {
            article.summary.clone()
        };
        Self {
            title: article.title.clone(),
            meta: meta_line(article, DateStyle::Long),
            summary,
            image: resolve_image(article.image_url.as_deref(), failures, ImageSlot::Hero),
            link_label: READ_MORE,
            link: article.url.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub action: Option<&'static str>,
    /// Whether the list header stays above this empty state.
    pub keeps_header: bool,
}

pub const HOME_EMPTY: EmptyState = EmptyState {
    title: "No articles available",
    subtitle: "Please check your internet connection or try again later.",
    action: None,
    keeps_header: true,
};

pub const BOOKMARKS_EMPTY: EmptyState = EmptyState {
    title: "No bookmarks saved",
    subtitle: "Browse articles and bookmark your favorites!",
    action: Some("Browse News"),
    keeps_header: false,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub header: &'static str,
    pub cards: Vec<ArticleCard>,
    pub empty: EmptyState,
}

impl ListView {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Header to draw, if any: hidden when the list is empty and its empty
    /// state stands alone.
    pub fn visible_header(&self) -> Option<&'static str> {
        if self.is_empty() && !self.empty.keeps_header {
            None
        } else {
            Some(self.header)
        }
    }
}
