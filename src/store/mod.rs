use crate::models::{Airdrop, Article, Signal, SourceError};
use async_trait::async_trait;
use std::sync::Mutex;

mod filter;

pub use filter::ContentFilter;

/// Result-count cap applied to every list query.
pub const MAX_RESULTS: usize = 100;

/// Read-only access to the persistent content collections. Implementations
/// do no caching and no fallback; an empty match is `Ok(vec![])`, never an
/// error. Lists come back sorted by recency, newest first.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn articles(&self, filter: &ContentFilter) -> Result<Vec<Article>, SourceError>;
    async fn article_by_id(&self, id: &str) -> Result<Option<Article>, SourceError>;
    async fn airdrops(&self, filter: &ContentFilter) -> Result<Vec<Airdrop>, SourceError>;
    async fn airdrop_by_id(&self, id: &str) -> Result<Option<Airdrop>, SourceError>;
    async fn signals(&self, filter: &ContentFilter) -> Result<Vec<Signal>, SourceError>;
}

/// Seedable in-process store. Stands in for the document database behind
/// the same trait a persistent reader would implement.
#[derive(Default)]
pub struct MemoryStore {
    articles: Mutex<Vec<Article>>,
    airdrops: Mutex<Vec<Airdrop>>,
    signals: Mutex<Vec<Signal>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_articles(&self, articles: Vec<Article>) {
        *self.articles.lock().unwrap() = articles;
    }

    pub fn seed_airdrops(&self, airdrops: Vec<Airdrop>) {
        *self.airdrops.lock().unwrap() = airdrops;
    }

    pub fn seed_signals(&self, signals: Vec<Signal>) {
        *self.signals.lock().unwrap() = signals;
    }
}

fn sorted_desc<T, F: Fn(&T) -> String>(mut items: Vec<T>, recency: F) -> Vec<T> {
    // RFC 3339 UTC timestamps order lexicographically.
    items.sort_by(|a, b| recency(b).cmp(&recency(a)));
    items.truncate(MAX_RESULTS);
    items
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn articles(&self, filter: &ContentFilter) -> Result<Vec<Article>, SourceError> {
        let articles = self.articles.lock().unwrap();
        let matched: Vec<Article> = articles
            .iter()
            .filter(|a| filter.matches_article(a))
            .cloned()
            .collect();
        Ok(sorted_desc(matched, |a| a.published_at.clone()))
    }

    async fn article_by_id(&self, id: &str) -> Result<Option<Article>, SourceError> {
        let articles = self.articles.lock().unwrap();
        Ok(articles.iter().find(|a| a.id == id).cloned())
    }

    async fn airdrops(&self, filter: &ContentFilter) -> Result<Vec<Airdrop>, SourceError> {
        let airdrops = self.airdrops.lock().unwrap();
        let matched: Vec<Airdrop> = airdrops
            .iter()
            .filter(|a| filter.matches_airdrop(a))
            .cloned()
            .collect();
        Ok(sorted_desc(matched, |a| a.deadline.clone()))
    }

    async fn airdrop_by_id(&self, id: &str) -> Result<Option<Airdrop>, SourceError> {
        let airdrops = self.airdrops.lock().unwrap();
        Ok(airdrops.iter().find(|a| a.id == id).cloned())
    }

    async fn signals(&self, filter: &ContentFilter) -> Result<Vec<Signal>, SourceError> {
        let signals = self.signals.lock().unwrap();
        let matched: Vec<Signal> = signals
            .iter()
            .filter(|s| filter.matches_signal(s))
            .cloned()
            .collect();
        Ok(sorted_desc(matched, |s| s.timestamp.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::FallbackCatalog;

    #[tokio::test]
    async fn articles_come_back_newest_first() {
        let store = MemoryStore::new();
        store.seed_articles(FallbackCatalog::default().articles);

        let articles = store.articles(&ContentFilter::default()).await.unwrap();
        assert!(!articles.is_empty());
        for pair in articles.windows(2) {
            assert!(pair[0].published_at >= pair[1].published_at);
        }
    }

    #[tokio::test]
    async fn category_filter_is_case_insensitive() {
        let store = MemoryStore::new();
        store.seed_articles(FallbackCatalog::default().articles);

        let filter = ContentFilter::default().with_category("defi");
        let articles = store.articles(&filter).await.unwrap();
        assert!(!articles.is_empty());
        assert!(articles.iter().all(|a| a.category.eq_ignore_ascii_case("defi")));
    }

    #[tokio::test]
    async fn unknown_id_is_none_not_error() {
        let store = MemoryStore::new();
        assert!(store.article_by_id("nope").await.unwrap().is_none());
        assert!(store.airdrop_by_id("nope").await.unwrap().is_none());
    }
}
