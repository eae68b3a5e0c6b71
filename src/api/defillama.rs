use crate::api::{build_client, unavailable, DefiFeed, ACCEPT_JSON, USER_AGENT};
use crate::models::{DefiTvl, SourceError, Stablecoin, StablecoinOverview, TvlProtocol};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const STABLECOINS_URL: &str = "https://stablecoins.llama.fi/stablecoins?includePrices=true";
const CHAIN_TVL_URL: &str = "https://api.llama.fi/v2/historicalChainTvl";
const PROTOCOLS_URL: &str = "https://api.llama.fi/protocols";

const TOP_STABLECOINS: usize = 10;
const TOP_PROTOCOLS: usize = 3;

/// DefiLlama adapter for stablecoin supply and protocol TVL aggregates.
pub struct DefiLlamaApi {
    client: Client,
}

#[derive(Deserialize)]
struct StablecoinEnvelope {
    #[serde(rename = "peggedAssets")]
    pegged_assets: Vec<PeggedAsset>,
}

#[derive(Deserialize)]
struct PeggedAsset {
    #[serde(default)]
    name: String,
    #[serde(default)]
    symbol: String,
    circulating: Option<Circulating>,
}

#[derive(Deserialize)]
struct Circulating {
    #[serde(rename = "peggedUSD")]
    pegged_usd: Option<f64>,
}

#[derive(Deserialize)]
struct TvlPoint {
    #[allow(dead_code)]
    date: u64,
    tvl: f64,
}

#[derive(Deserialize)]
struct ProtocolRow {
    #[serde(default)]
    name: String,
    tvl: Option<f64>,
}

impl DefiLlamaApi {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        debug!("Sending request to {}", url);
        let response = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", ACCEPT_JSON)
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UpstreamUnavailable(format!(
                "DefiLlama returned status {}",
                status
            )));
        }

        response.json::<T>().await.map_err(unavailable)
    }
}

#[async_trait]
impl DefiFeed for DefiLlamaApi {
    async fn fetch_stablecoins(&self) -> Result<StablecoinOverview, SourceError> {
        let envelope: StablecoinEnvelope = self.get_json(STABLECOINS_URL).await?;

        let mut coins: Vec<(String, String, f64)> = envelope
            .pegged_assets
            .into_iter()
            .filter_map(|asset| {
                let cap = asset.circulating.and_then(|c| c.pegged_usd)?;
                (cap > 0.0).then(|| (asset.name, asset.symbol, cap))
            })
            .collect();

        if coins.is_empty() {
            return Err(SourceError::UpstreamUnavailable(
                "DefiLlama returned no stablecoin data".to_string(),
            ));
        }

        coins.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));
        let total_market_cap: f64 = coins.iter().map(|c| c.2).sum();

        let top_stablecoins = coins
            .into_iter()
            .take(TOP_STABLECOINS)
            .map(|(name, symbol, market_cap)| Stablecoin {
                name,
                symbol,
                market_cap,
                percentage: market_cap / total_market_cap * 100.0,
            })
            .collect();

        Ok(StablecoinOverview {
            total_market_cap,
            top_stablecoins,
            updated_at: Utc::now().to_rfc3339(),
            source: "DefiLlama".to_string(),
        })
    }

    async fn fetch_tvl(&self) -> Result<DefiTvl, SourceError> {
        let series: Vec<TvlPoint> = self.get_json(CHAIN_TVL_URL).await?;

        let latest = series.last().ok_or_else(|| {
            SourceError::UpstreamUnavailable("DefiLlama returned an empty TVL series".to_string())
        })?;
        let change_24h = match series.len().checked_sub(2).map(|i| &series[i]) {
            Some(prev) if prev.tvl > 0.0 => (latest.tvl - prev.tvl) / prev.tvl * 100.0,
            _ => 0.0,
        };

        // The leaderboard is garnish on top of the aggregate; a failure
        // here must not take the whole index down.
        let top_protocols = match self.get_json::<Vec<ProtocolRow>>(PROTOCOLS_URL).await {
            Ok(mut rows) => {
                rows.sort_by(|a, b| {
                    b.tvl
                        .unwrap_or(0.0)
                        .partial_cmp(&a.tvl.unwrap_or(0.0))
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
                rows.into_iter()
                    .take(TOP_PROTOCOLS)
                    .map(|row| TvlProtocol {
                        name: row.name,
                        tvl: row.tvl.unwrap_or(0.0),
                    })
                    .collect()
            }
            Err(err) => {
                warn!("Failed to fetch protocol leaderboard: {}", err);
                Vec::new()
            }
        };

        Ok(DefiTvl {
            total_tvl: latest.tvl,
            change_24h,
            top_protocols,
            updated_at: Utc::now().to_rfc3339(),
            source: "DefiLlama".to_string(),
        })
    }
}
