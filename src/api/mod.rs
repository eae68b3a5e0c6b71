use crate::models::{
    ChartPoint, DefiTvl, FearGreedIndex, GlobalMarket, PriceQuote, SourceError,
    StablecoinOverview,
};
use async_trait::async_trait;
use std::time::Duration;

pub mod alternative_me;
pub mod coingecko;
pub mod defillama;

pub use alternative_me::AlternativeMeApi;
pub use coingecko::CoingeckoApi;
pub use defillama::DefiLlamaApi;

/// Header pair sent on every upstream request; some providers reject
/// requests without a browser-looking User-Agent.
pub(crate) const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
pub(crate) const ACCEPT_JSON: &str = "application/json";

/// Spot prices, global market data and price history (CoinGecko).
#[async_trait]
pub trait MarketFeed: Send + Sync {
    async fn fetch_markets(&self, ids: &[String]) -> Result<Vec<PriceQuote>, SourceError>;
    async fn fetch_global(&self) -> Result<GlobalMarket, SourceError>;
    async fn fetch_market_chart(
        &self,
        coin_id: &str,
        days: u32,
    ) -> Result<Vec<ChartPoint>, SourceError>;
}

/// Fear & greed sentiment index (Alternative.me).
#[async_trait]
pub trait SentimentFeed: Send + Sync {
    async fn fetch_fear_greed(&self) -> Result<FearGreedIndex, SourceError>;
}

/// Stablecoin supply and protocol TVL aggregates (DefiLlama).
#[async_trait]
pub trait DefiFeed: Send + Sync {
    async fn fetch_stablecoins(&self) -> Result<StablecoinOverview, SourceError>;
    async fn fetch_tvl(&self) -> Result<DefiTvl, SourceError>;
}

pub(crate) fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

pub(crate) fn unavailable(err: impl std::fmt::Display) -> SourceError {
    SourceError::UpstreamUnavailable(err.to_string())
}
