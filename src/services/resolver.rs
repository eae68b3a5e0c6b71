use crate::api::{
    AlternativeMeApi, CoingeckoApi, DefiFeed, DefiLlamaApi, MarketFeed, SentimentFeed,
};
use crate::config::ResolverConfig;
use crate::fallback::FallbackCatalog;
use crate::models::{
    Airdrop, Article, ChartPoint, DefiTvl, FearGreedIndex, GainersLosers, GlobalMarket,
    MarketIndices, MarketStats, NotFound, PriceQuote, Signal, SourceError,
    StablecoinDominance, StablecoinOverview, TtlCache,
};
use crate::store::{ContentFilter, ContentStore, MemoryStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const KEY_PRICES: &str = "coingecko:markets";
const KEY_GLOBAL: &str = "coingecko:global";
const KEY_CHART: &str = "coingecko:chart";
const KEY_FEAR_GREED: &str = "alternative.me:fng";
const KEY_STABLECOINS: &str = "defillama:stablecoins";
const KEY_TVL: &str = "defillama:tvl";

/// The resolution policy: decides, per read, whether to serve the cache,
/// call an upstream source, fall back to the content store, or fall back
/// to static defaults. The only component that writes the cache.
///
/// Every list/price operation always returns something usable; upstream
/// and store failures degrade to the static catalog and are logged, never
/// surfaced. Single-document lookups are the one place `NotFound` can
/// escape.
pub struct Resolver {
    cache: Arc<TtlCache>,
    config: ResolverConfig,
    fallback: FallbackCatalog,
    market: Arc<dyn MarketFeed>,
    sentiment: Arc<dyn SentimentFeed>,
    defi: Arc<dyn DefiFeed>,
    store: Arc<dyn ContentStore>,
}

impl Resolver {
    pub fn new(
        cache: Arc<TtlCache>,
        config: ResolverConfig,
        fallback: FallbackCatalog,
        market: Arc<dyn MarketFeed>,
        sentiment: Arc<dyn SentimentFeed>,
        defi: Arc<dyn DefiFeed>,
        store: Arc<dyn ContentStore>,
    ) -> Self {
        Self {
            cache,
            config,
            fallback,
            market,
            sentiment,
            defi,
            store,
        }
    }

    /// Resolver over the real provider adapters and an empty in-process
    /// store, with its own freshly constructed cache.
    pub fn with_live_sources(config: ResolverConfig) -> Self {
        let timeout = config.request_timeout;
        Self::new(
            Arc::new(TtlCache::new()),
            config,
            FallbackCatalog::default(),
            Arc::new(CoingeckoApi::new(timeout)),
            Arc::new(AlternativeMeApi::new(timeout)),
            Arc::new(DefiLlamaApi::new(timeout)),
            Arc::new(MemoryStore::new()),
        )
    }

    pub fn cache(&self) -> &TtlCache {
        &self.cache
    }

    /// Cache-through resolution for one upstream key. The fallback value
    /// is never written to the cache: after an outage the next call
    /// retries the upstream immediately instead of serving a frozen
    /// default for a full TTL window.
    async fn resolve_cached<T, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        fetch: impl FnOnce() -> Fut,
        fallback: impl FnOnce() -> T,
    ) -> T
    where
        T: Serialize + DeserializeOwned,
        Fut: Future<Output = Result<T, SourceError>>,
    {
        if let Some(cached) = self.cache.get(key, ttl) {
            match serde_json::from_value(cached) {
                Ok(value) => return value,
                Err(err) => {
                    // A cache payload that no longer matches the current
                    // shape is treated as a miss.
                    warn!("Dropping undecodable cache entry {}: {}", key, err);
                    self.cache.remove(key);
                }
            }
        }

        match fetch().await {
            Ok(value) => {
                match serde_json::to_value(&value) {
                    Ok(json) => self.cache.set(key, json),
                    Err(err) => warn!("Not caching {}: {}", key, err),
                }
                value
            }
            Err(err) => {
                warn!("Upstream failed for {}, serving fallback: {}", key, err);
                fallback()
            }
        }
    }

    pub async fn resolve_prices(&self) -> Vec<PriceQuote> {
        let ids = self.config.price_ids.clone();
        self.resolve_cached(
            KEY_PRICES,
            self.config.price_ttl,
            || async { self.market.fetch_markets(&ids).await },
            || self.fallback.prices.clone(),
        )
        .await
    }

    pub async fn resolve_global(&self) -> GlobalMarket {
        self.resolve_cached(
            KEY_GLOBAL,
            self.config.global_ttl,
            || async { self.market.fetch_global().await },
            || self.fallback.global.clone(),
        )
        .await
    }

    /// The fallback series carries only the curve shape; it is rescaled
    /// so its final point lands on the requested coin's fallback price,
    /// and served as-is for coins the catalog does not quote.
    pub async fn resolve_chart(&self, coin_id: &str) -> Vec<ChartPoint> {
        let key = format!("{}:{}", KEY_CHART, coin_id);
        let days = self.config.chart_days;
        self.resolve_cached(
            &key,
            self.config.chart_ttl,
            || async { self.market.fetch_market_chart(coin_id, days).await },
            || self.fallback_chart(coin_id),
        )
        .await
    }

    fn fallback_chart(&self, coin_id: &str) -> Vec<ChartPoint> {
        let chart = self.fallback.chart.clone();
        let anchor = self.fallback.prices.iter().find(|p| p.id == coin_id);
        let last = chart.last().map(|p| p.price).filter(|p| *p > 0.0);
        match (anchor, last) {
            (Some(quote), Some(last)) => {
                let scale = quote.current_price / last;
                chart
                    .into_iter()
                    .map(|point| ChartPoint {
                        timestamp: point.timestamp,
                        price: point.price * scale,
                    })
                    .collect()
            }
            _ => chart,
        }
    }

    /// Static top gainers/losers leaderboard; no live source feeds it.
    pub fn resolve_gainers_losers(&self) -> GainersLosers {
        self.fallback.gainers_losers.clone()
    }

    pub async fn resolve_fear_greed(&self) -> FearGreedIndex {
        self.resolve_cached(
            KEY_FEAR_GREED,
            self.config.fear_greed_ttl,
            || async { self.sentiment.fetch_fear_greed().await },
            || self.fallback.fear_greed.clone(),
        )
        .await
    }

    pub async fn resolve_stablecoins(&self) -> StablecoinOverview {
        self.resolve_cached(
            KEY_STABLECOINS,
            self.config.stablecoin_ttl,
            || async { self.defi.fetch_stablecoins().await },
            || self.fallback.stablecoins.clone(),
        )
        .await
    }

    pub async fn resolve_defi_tvl(&self) -> DefiTvl {
        self.resolve_cached(
            KEY_TVL,
            self.config.tvl_ttl,
            || async { self.defi.fetch_tvl().await },
            || self.fallback.defi_tvl.clone(),
        )
        .await
    }

    /// Dashboard composite over the individual index sources. The rainbow
    /// band and altseason reading have no live source and always come from
    /// the catalog; dominance is derived from the resolved aggregates.
    pub async fn resolve_market_indices(&self) -> MarketIndices {
        let defi_tvl = self.resolve_defi_tvl().await;
        let stablecoins = self.resolve_stablecoins().await;
        let global = self.resolve_global().await;

        let percentage = if global.total_market_cap_usd > 0.0 {
            round2(stablecoins.total_market_cap / global.total_market_cap_usd * 100.0)
        } else {
            self.fallback.stablecoin_dominance.percentage
        };

        MarketIndices {
            bitcoin_rainbow: self.fallback.bitcoin_rainbow.clone(),
            altcoin_season_index: self.fallback.altcoin_season.clone(),
            defi_tvl,
            stablecoin_dominance: StablecoinDominance {
                percentage,
                total_supply: stablecoins.total_market_cap,
            },
        }
    }

    /// Aggregates over the currently resolved price set.
    pub async fn market_stats(&self) -> MarketStats {
        let prices = self.resolve_prices().await;
        let total_market_cap: f64 = prices.iter().map(|p| p.market_cap).sum();
        let btc_dominance = prices
            .iter()
            .find(|p| p.id == "bitcoin")
            .filter(|_| total_market_cap > 0.0)
            .map(|btc| round2(btc.market_cap / total_market_cap * 100.0))
            .unwrap_or(0.0);

        MarketStats {
            total_market_cap,
            btc_dominance,
            total_volume_24h: prices.iter().map(|p| p.volume_24h).sum(),
            active_cryptos: prices.len(),
        }
    }

    pub async fn resolve_articles(&self, filter: &ContentFilter) -> Vec<Article> {
        match self.store.articles(filter).await {
            Ok(articles) if articles.len() >= self.config.min_articles => {
                info!("Serving {} articles from the content store", articles.len());
                articles
            }
            Ok(articles) => {
                info!(
                    "Store has only {} articles, serving fallback content",
                    articles.len()
                );
                self.fallback_articles(filter)
            }
            Err(err) => {
                warn!("Content store unavailable for articles: {}", err);
                self.fallback_articles(filter)
            }
        }
    }

    pub async fn resolve_airdrops(&self, filter: &ContentFilter) -> Vec<Airdrop> {
        match self.store.airdrops(filter).await {
            Ok(airdrops) if airdrops.len() >= self.config.min_airdrops => {
                info!("Serving {} airdrops from the content store", airdrops.len());
                airdrops
            }
            Ok(airdrops) => {
                info!(
                    "Store has only {} airdrops, serving fallback content",
                    airdrops.len()
                );
                self.fallback_airdrops(filter)
            }
            Err(err) => {
                warn!("Content store unavailable for airdrops: {}", err);
                self.fallback_airdrops(filter)
            }
        }
    }

    pub async fn resolve_signals(&self, filter: &ContentFilter) -> Vec<Signal> {
        match self.store.signals(filter).await {
            Ok(signals) if signals.len() >= self.config.min_signals => {
                info!("Serving {} signals from the content store", signals.len());
                signals
            }
            Ok(signals) => {
                info!(
                    "Store has only {} signals, serving fallback content",
                    signals.len()
                );
                self.fallback_signals(filter)
            }
            Err(err) => {
                warn!("Content store unavailable for signals: {}", err);
                self.fallback_signals(filter)
            }
        }
    }

    pub async fn resolve_article(&self, id: &str) -> Result<Article, NotFound> {
        match self.store.article_by_id(id).await {
            Ok(Some(article)) => return Ok(article),
            Ok(None) => {}
            Err(err) => warn!("Content store unavailable for article {}: {}", id, err),
        }
        self.fallback
            .articles
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| NotFound::new("article", id))
    }

    pub async fn resolve_airdrop(&self, id: &str) -> Result<Airdrop, NotFound> {
        match self.store.airdrop_by_id(id).await {
            Ok(Some(airdrop)) => return Ok(airdrop),
            Ok(None) => {}
            Err(err) => warn!("Content store unavailable for airdrop {}: {}", id, err),
        }
        self.fallback
            .airdrops
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| NotFound::new("airdrop", id))
    }

    fn fallback_articles(&self, filter: &ContentFilter) -> Vec<Article> {
        let mut articles: Vec<Article> = self
            .fallback
            .articles
            .iter()
            .filter(|a| filter.matches_article(a))
            .cloned()
            .collect();
        articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        articles
    }

    fn fallback_airdrops(&self, filter: &ContentFilter) -> Vec<Airdrop> {
        let mut airdrops: Vec<Airdrop> = self
            .fallback
            .airdrops
            .iter()
            .filter(|a| filter.matches_airdrop(a))
            .cloned()
            .collect();
        airdrops.sort_by(|a, b| b.deadline.cmp(&a.deadline));
        airdrops
    }

    fn fallback_signals(&self, filter: &ContentFilter) -> Vec<Signal> {
        self.fallback
            .signals
            .iter()
            .filter(|s| filter.matches_signal(s))
            .cloned()
            .collect()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct MockMarket {
        calls: AtomicUsize,
        down: AtomicBool,
    }

    impl MockMarket {
        fn quotes() -> Vec<PriceQuote> {
            vec![
                PriceQuote {
                    id: "bitcoin".to_string(),
                    symbol: "BTC".to_string(),
                    name: "Bitcoin".to_string(),
                    current_price: 100_000.0,
                    price_change_24h: 1.0,
                    market_cap: 600.0,
                    volume_24h: 40.0,
                },
                PriceQuote {
                    id: "ethereum".to_string(),
                    symbol: "ETH".to_string(),
                    name: "Ethereum".to_string(),
                    current_price: 4_000.0,
                    price_change_24h: 2.0,
                    market_cap: 400.0,
                    volume_24h: 20.0,
                },
            ]
        }
    }

    #[async_trait]
    impl MarketFeed for MockMarket {
        async fn fetch_markets(&self, _ids: &[String]) -> Result<Vec<PriceQuote>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.down.load(Ordering::SeqCst) {
                return Err(SourceError::UpstreamUnavailable("mock outage".to_string()));
            }
            Ok(Self::quotes())
        }

        async fn fetch_global(&self) -> Result<GlobalMarket, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.down.load(Ordering::SeqCst) {
                return Err(SourceError::UpstreamUnavailable("mock outage".to_string()));
            }
            Ok(GlobalMarket {
                total_market_cap_usd: 2_000.0,
                total_volume_24h_usd: 100.0,
                btc_dominance: 50.0,
                eth_dominance: 18.0,
                active_cryptocurrencies: 2,
                market_cap_change_24h: 0.5,
            })
        }

        async fn fetch_market_chart(
            &self,
            coin_id: &str,
            _days: u32,
        ) -> Result<Vec<ChartPoint>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.down.load(Ordering::SeqCst) {
                return Err(SourceError::UpstreamUnavailable("mock outage".to_string()));
            }
            let base = if coin_id == "bitcoin" { 100_000.0 } else { 4_000.0 };
            Ok(vec![ChartPoint {
                timestamp: 1_700_000_000_000,
                price: base,
            }])
        }
    }

    #[derive(Default)]
    struct MockSentiment {
        calls: AtomicUsize,
        down: AtomicBool,
    }

    #[async_trait]
    impl SentimentFeed for MockSentiment {
        async fn fetch_fear_greed(&self) -> Result<FearGreedIndex, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.down.load(Ordering::SeqCst) {
                return Err(SourceError::UpstreamUnavailable("mock outage".to_string()));
            }
            Ok(FearGreedIndex {
                value: 71,
                classification: "Greed".to_string(),
                timestamp: "1700000000".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct MockDefi {
        down: AtomicBool,
    }

    #[async_trait]
    impl DefiFeed for MockDefi {
        async fn fetch_stablecoins(&self) -> Result<StablecoinOverview, SourceError> {
            if self.down.load(Ordering::SeqCst) {
                return Err(SourceError::UpstreamUnavailable("mock outage".to_string()));
            }
            Ok(StablecoinOverview {
                total_market_cap: 160.0,
                top_stablecoins: vec![],
                updated_at: "2024-02-01T00:00:00Z".to_string(),
                source: "mock".to_string(),
            })
        }

        async fn fetch_tvl(&self) -> Result<DefiTvl, SourceError> {
            if self.down.load(Ordering::SeqCst) {
                return Err(SourceError::UpstreamUnavailable("mock outage".to_string()));
            }
            Ok(DefiTvl {
                total_tvl: 50.0,
                change_24h: 1.0,
                top_protocols: vec![],
                updated_at: "2024-02-01T00:00:00Z".to_string(),
                source: "mock".to_string(),
            })
        }
    }

    /// Store whose every query fails, for degradation tests.
    struct BrokenStore;

    #[async_trait]
    impl ContentStore for BrokenStore {
        async fn articles(&self, _: &ContentFilter) -> Result<Vec<Article>, SourceError> {
            Err(SourceError::StoreUnavailable("connection refused".to_string()))
        }
        async fn article_by_id(&self, _: &str) -> Result<Option<Article>, SourceError> {
            Err(SourceError::StoreUnavailable("connection refused".to_string()))
        }
        async fn airdrops(&self, _: &ContentFilter) -> Result<Vec<Airdrop>, SourceError> {
            Err(SourceError::StoreUnavailable("connection refused".to_string()))
        }
        async fn airdrop_by_id(&self, _: &str) -> Result<Option<Airdrop>, SourceError> {
            Err(SourceError::StoreUnavailable("connection refused".to_string()))
        }
        async fn signals(&self, _: &ContentFilter) -> Result<Vec<Signal>, SourceError> {
            Err(SourceError::StoreUnavailable("connection refused".to_string()))
        }
    }

    struct Harness {
        market: Arc<MockMarket>,
        sentiment: Arc<MockSentiment>,
        defi: Arc<MockDefi>,
        store: Arc<MemoryStore>,
        resolver: Resolver,
    }

    fn harness() -> Harness {
        harness_with(ResolverConfig::default())
    }

    fn harness_with(config: ResolverConfig) -> Harness {
        let market = Arc::new(MockMarket::default());
        let sentiment = Arc::new(MockSentiment::default());
        let defi = Arc::new(MockDefi::default());
        let store = Arc::new(MemoryStore::new());
        let resolver = Resolver::new(
            Arc::new(TtlCache::new()),
            config,
            FallbackCatalog::default(),
            market.clone(),
            sentiment.clone(),
            defi.clone(),
            store.clone(),
        );
        Harness {
            market,
            sentiment,
            defi,
            store,
            resolver,
        }
    }

    fn sample_airdrop(id: &str, status: &str) -> Airdrop {
        Airdrop {
            id: id.to_string(),
            project_name: "Test Drop".to_string(),
            logo_url: String::new(),
            description: "test".to_string(),
            full_description: None,
            backing: None,
            chain: Some("Arbitrum".to_string()),
            timeline: None,
            reward_note: None,
            tasks: vec![],
            estimated_reward: "$100".to_string(),
            difficulty: "Easy".to_string(),
            deadline: "2025-01-01T00:00:00Z".to_string(),
            status: status.to_string(),
            link: String::new(),
            premium: false,
        }
    }

    #[tokio::test]
    async fn repeated_price_calls_within_ttl_hit_upstream_once() {
        let h = harness();
        let first = h.resolver.resolve_prices().await;
        let second = h.resolver.resolve_prices().await;

        assert_eq!(h.market.calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
        assert_eq!(first, MockMarket::quotes());
    }

    #[tokio::test]
    async fn expired_price_entry_triggers_a_refetch() {
        let h = harness();
        h.resolver.resolve_prices().await;
        h.resolver
            .cache()
            .backdate(KEY_PRICES, Duration::from_secs(61));
        h.resolver.resolve_prices().await;

        assert_eq!(h.market.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn upstream_outage_serves_fallback_and_leaves_cache_untouched() {
        let h = harness();
        h.market.down.store(true, Ordering::SeqCst);

        let prices = h.resolver.resolve_prices().await;
        assert_eq!(prices, FallbackCatalog::default().prices);
        assert!(h.resolver.cache().is_empty());

        // Next call retries the upstream immediately instead of serving a
        // frozen fallback for a TTL window.
        h.market.down.store(false, Ordering::SeqCst);
        let prices = h.resolver.resolve_prices().await;
        assert_eq!(prices, MockMarket::quotes());
        assert_eq!(h.market.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn fear_greed_outage_serves_fallback() {
        let h = harness();
        h.sentiment.down.store(true, Ordering::SeqCst);

        let index = h.resolver.resolve_fear_greed().await;
        assert_eq!(index.value, 62);
        assert_eq!(index.classification, "Greed");
        assert!(h.resolver.cache().is_empty());
    }

    #[tokio::test]
    async fn fear_greed_is_memoized() {
        let h = harness();
        let first = h.resolver.resolve_fear_greed().await;
        let second = h.resolver.resolve_fear_greed().await;
        assert_eq!(h.sentiment.calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
        assert_eq!(first.value, 71);
    }

    #[tokio::test]
    async fn chart_cache_keys_are_per_coin() {
        let h = harness();
        h.resolver.resolve_chart("bitcoin").await;
        h.resolver.resolve_chart("ethereum").await;
        h.resolver.resolve_chart("bitcoin").await;

        assert_eq!(h.market.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn empty_store_serves_fallback_filtered_by_same_predicate() {
        let h = harness();
        let filter = ContentFilter::default().with_category("DeFi");
        let articles = h.resolver.resolve_articles(&filter).await;

        assert!(!articles.is_empty());
        assert!(articles.iter().all(|a| a.category == "DeFi"));
    }

    #[tokio::test]
    async fn single_store_airdrop_meets_threshold_and_is_served_verbatim() {
        let h = harness();
        h.store.seed_airdrops(vec![sample_airdrop("a1", "active")]);

        let airdrops = h.resolver.resolve_airdrops(&ContentFilter::default()).await;
        assert_eq!(airdrops, vec![sample_airdrop("a1", "active")]);
    }

    #[tokio::test]
    async fn store_below_threshold_falls_back() {
        let mut config = ResolverConfig::default();
        config.min_airdrops = 5;
        let h = harness_with(config);
        h.store.seed_airdrops(vec![sample_airdrop("a1", "active")]);

        let airdrops = h.resolver.resolve_airdrops(&ContentFilter::default()).await;
        assert!(airdrops.iter().all(|a| a.id != "a1"));
        assert_eq!(airdrops.len(), FallbackCatalog::default().airdrops.len());
    }

    #[tokio::test]
    async fn airdrop_status_filter_applies_to_fallback() {
        let h = harness();
        let filter = ContentFilter::default().with_status("active");
        let airdrops = h.resolver.resolve_airdrops(&filter).await;

        assert!(!airdrops.is_empty());
        assert!(airdrops.iter().all(|a| a.status == "active"));
    }

    #[tokio::test]
    async fn broken_store_degrades_to_fallback() {
        let h = harness();
        let resolver = Resolver::new(
            Arc::new(TtlCache::new()),
            ResolverConfig::default(),
            FallbackCatalog::default(),
            h.market.clone(),
            h.sentiment.clone(),
            h.defi.clone(),
            Arc::new(BrokenStore),
        );

        let articles = resolver.resolve_articles(&ContentFilter::default()).await;
        assert_eq!(articles.len(), FallbackCatalog::default().articles.len());

        // By-id lookups degrade to the fallback set too.
        let article = resolver.resolve_article("1").await.unwrap();
        assert_eq!(article.id, "1");
    }

    #[tokio::test]
    async fn article_resolution_tries_store_then_fallback_then_not_found() {
        let h = harness();
        let mut seeded = FallbackCatalog::default().articles[0].clone();
        seeded.id = "store-1".to_string();
        seeded.title = "From the store".to_string();
        h.store.seed_articles(vec![seeded]);

        let from_store = h.resolver.resolve_article("store-1").await.unwrap();
        assert_eq!(from_store.title, "From the store");

        // Present only in the fallback set.
        let from_fallback = h.resolver.resolve_article("2").await.unwrap();
        assert_eq!(from_fallback.id, "2");

        let missing = h.resolver.resolve_article("does-not-exist").await;
        assert_eq!(missing, Err(NotFound::new("article", "does-not-exist")));
    }

    #[tokio::test]
    async fn airdrop_resolution_by_id() {
        let h = harness();
        h.store.seed_airdrops(vec![sample_airdrop("s1", "active")]);

        assert_eq!(h.resolver.resolve_airdrop("s1").await.unwrap().id, "s1");
        assert_eq!(h.resolver.resolve_airdrop("3").await.unwrap().id, "3");
        assert!(h.resolver.resolve_airdrop("zzz").await.is_err());
    }

    #[tokio::test]
    async fn signals_fall_back_when_store_is_sparse() {
        let h = harness();
        let signals = h.resolver.resolve_signals(&ContentFilter::default()).await;
        assert_eq!(signals.len(), FallbackCatalog::default().signals.len());
    }

    #[tokio::test]
    async fn market_stats_dominance_math() {
        let h = harness();
        let stats = h.resolver.market_stats().await;

        assert_eq!(stats.total_market_cap, 1_000.0);
        assert_eq!(stats.btc_dominance, 60.0);
        assert_eq!(stats.total_volume_24h, 60.0);
        assert_eq!(stats.active_cryptos, 2);
    }

    #[tokio::test]
    async fn market_indices_compose_resolved_aggregates() {
        let h = harness();
        let indices = h.resolver.resolve_market_indices().await;

        assert_eq!(indices.defi_tvl.total_tvl, 50.0);
        // 160 stable supply over a 2000 global cap.
        assert_eq!(indices.stablecoin_dominance.percentage, 8.0);
        assert_eq!(indices.stablecoin_dominance.total_supply, 160.0);
        assert_eq!(indices.bitcoin_rainbow.current_position, "Accumulate");
        assert_eq!(indices.altcoin_season_index.value, 58);
        assert_eq!(indices.altcoin_season_index.status, "Bitcoin Season");
    }

    #[tokio::test]
    async fn gainers_losers_serve_the_static_leaderboard() {
        let h = harness();
        let movers = h.resolver.resolve_gainers_losers();

        assert_eq!(movers.gainers.len(), 3);
        assert_eq!(movers.gainers[0].symbol, "ONDO");
        assert!(movers.gainers.iter().all(|m| m.change_24h > 0.0));
        assert_eq!(movers.losers.len(), 3);
        assert!(movers.losers.iter().all(|m| m.change_24h < 0.0));
    }

    #[tokio::test]
    async fn chart_fallback_is_rescaled_to_the_requested_coin() {
        let h = harness();
        h.market.down.store(true, Ordering::SeqCst);
        let catalog = FallbackCatalog::default();

        let eth = h.resolver.resolve_chart("ethereum").await;
        let eth_quote = catalog
            .prices
            .iter()
            .find(|p| p.id == "ethereum")
            .unwrap();
        assert_eq!(eth.len(), catalog.chart.len());
        assert!((eth.last().unwrap().price - eth_quote.current_price).abs() < 1e-6);

        // Unquoted coins get the base series unchanged.
        let unknown = h.resolver.resolve_chart("dogecoin").await;
        assert_eq!(unknown, catalog.chart);
        assert!(h.resolver.cache().is_empty());
    }

    #[tokio::test]
    async fn market_indices_survive_a_full_outage() {
        let h = harness();
        h.market.down.store(true, Ordering::SeqCst);
        h.defi.down.store(true, Ordering::SeqCst);

        let indices = h.resolver.resolve_market_indices().await;
        let catalog = FallbackCatalog::default();
        assert_eq!(indices.defi_tvl.total_tvl, catalog.defi_tvl.total_tvl);
        assert!(indices.stablecoin_dominance.percentage > 0.0);
        assert!(h.resolver.cache().is_empty());
    }
}
