use std::time::Duration;

/// All policy knobs of the resolution layer. Every value here is a product
/// or rate-limit decision, kept out of the resolver so tests and deployments
/// can swap them.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Coins requested from the spot-price feed.
    pub price_ids: Vec<String>,
    /// Days of history requested per chart.
    pub chart_days: u32,
    /// Per-request timeout enforced by every adapter.
    pub request_timeout: Duration,

    // Per-source freshness windows, sized to each provider's rate-limit
    // sensitivity: CoinGecko's free tier is strict, Alternative.me and
    // DefiLlama move slowly anyway.
    pub price_ttl: Duration,
    pub global_ttl: Duration,
    pub chart_ttl: Duration,
    pub fear_greed_ttl: Duration,
    pub stablecoin_ttl: Duration,
    pub tvl_ttl: Duration,

    // Minimum result counts below which a store response is treated as
    // "not yet populated" rather than legitimately empty. With a real
    // store in play one document suffices; the earlier CMS-vs-mock setup
    // required 3 articles, 5 airdrops and 3 signals.
    pub min_articles: usize,
    pub min_airdrops: usize,
    pub min_signals: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            price_ids: ["bitcoin", "ethereum", "solana", "usd-coin"]
                .iter()
                .map(|id| id.to_string())
                .collect(),
            chart_days: 7,
            request_timeout: Duration::from_secs(15),
            price_ttl: Duration::from_secs(60),
            global_ttl: Duration::from_secs(600),
            chart_ttl: Duration::from_secs(600),
            fear_greed_ttl: Duration::from_secs(300),
            stablecoin_ttl: Duration::from_secs(300),
            tvl_ttl: Duration::from_secs(300),
            min_articles: 1,
            min_airdrops: 1,
            min_signals: 1,
        }
    }
}
