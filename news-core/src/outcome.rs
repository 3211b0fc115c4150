use crate::article::Article;

/// Result of a total load operation (feed fetch or bookmark read).
///
/// A failure still behaves as an empty collection for callers that only
/// want something to render, while the error stays available for callers
/// that need to tell "nothing there" apart from "could not load".
#[derive(Debug)]
pub enum LoadOutcome<E> {
    Loaded(Vec<Article>),
    Failed(E),
}

impl<E> LoadOutcome<E> {
    pub fn articles(&self) -> &[Article] {
        match self {
            LoadOutcome::Loaded(articles) => articles,
            LoadOutcome::Failed(_) => &[],
        }
    }

    pub fn into_articles(self) -> Vec<Article> {
        match self {
            LoadOutcome::Loaded(articles) => articles,
            LoadOutcome::Failed(_) => Vec::new(),
        }
    }

    pub fn failure(&self) -> Option<&E> {
        match self {
            LoadOutcome::Loaded(_) => None,
            LoadOutcome::Failed(err) => Some(err),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadOutcome::Failed(_))
    }

    /// Splits into the renderable collection and the optional error.
    pub fn into_parts(self) -> (Vec<Article>, Option<E>) {
        match self {
            LoadOutcome::Loaded(articles) => (articles, None),
            LoadOutcome::Failed(err) => (Vec::new(), Some(err)),
        }
    }
}

impl<E> From<Result<Vec<Article>, E>> for LoadOutcome<E> {
    fn from(result: Result<Vec<Article>, E>) -> Self {
        match result {
            Ok(articles) => LoadOutcome::Loaded(articles),
            Err(err) => LoadOutcome::Failed(err),
        }
    }
}
