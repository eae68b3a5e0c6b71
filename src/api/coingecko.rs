use crate::api::{build_client, unavailable, MarketFeed, ACCEPT_JSON, USER_AGENT};
use crate::models::{ChartPoint, GlobalMarket, PriceQuote, SourceError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko adapter. Stateless; caching is the resolver's job.
pub struct CoingeckoApi {
    client: Client,
}

#[derive(Deserialize)]
struct MarketRow {
    #[serde(default)]
    id: String,
    #[serde(default)]
    symbol: String,
    #[serde(default)]
    name: String,
    current_price: Option<f64>,
    price_change_percentage_24h: Option<f64>,
    market_cap: Option<f64>,
    total_volume: Option<f64>,
}

#[derive(Deserialize)]
struct GlobalEnvelope {
    data: GlobalData,
}

#[derive(Deserialize)]
struct GlobalData {
    total_market_cap: UsdField,
    total_volume: UsdField,
    market_cap_percentage: DominanceField,
    active_cryptocurrencies: u64,
    market_cap_change_percentage_24h_usd: Option<f64>,
}

#[derive(Deserialize)]
struct UsdField {
    usd: Option<f64>,
}

#[derive(Deserialize)]
struct DominanceField {
    btc: Option<f64>,
    eth: Option<f64>,
}

#[derive(Deserialize)]
struct ChartEnvelope {
    prices: Vec<(f64, f64)>,
}

impl CoingeckoApi {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, SourceError> {
        debug!("Sending request to {}", url);
        let response = self
            .client
            .get(url)
            .query(params)
            .header("User-Agent", USER_AGENT)
            .header("Accept", ACCEPT_JSON)
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UpstreamUnavailable(format!(
                "CoinGecko returned status {}",
                status
            )));
        }

        response.json::<T>().await.map_err(unavailable)
    }
}

#[async_trait]
impl MarketFeed for CoingeckoApi {
    async fn fetch_markets(&self, ids: &[String]) -> Result<Vec<PriceQuote>, SourceError> {
        let url = format!("{}/coins/markets", BASE_URL);
        let params = [
            ("vs_currency", "usd".to_string()),
            ("ids", ids.join(",")),
            ("order", "market_cap_desc".to_string()),
            ("per_page", "10".to_string()),
            ("page", "1".to_string()),
            ("sparkline", "false".to_string()),
            ("price_change_percentage", "24h".to_string()),
        ];
        let rows: Vec<MarketRow> = self.get_json(&url, &params).await?;
        debug!("Parsed {} market rows from CoinGecko", rows.len());

        if rows.is_empty() {
            return Err(SourceError::UpstreamUnavailable(
                "CoinGecko returned an empty market list".to_string(),
            ));
        }

        Ok(rows
            .into_iter()
            .map(|row| PriceQuote {
                id: row.id,
                symbol: row.symbol.to_uppercase(),
                name: row.name,
                current_price: row.current_price.unwrap_or(0.0),
                price_change_24h: row.price_change_percentage_24h.unwrap_or(0.0),
                market_cap: row.market_cap.unwrap_or(0.0),
                volume_24h: row.total_volume.unwrap_or(0.0),
            })
            .collect())
    }

    async fn fetch_global(&self) -> Result<GlobalMarket, SourceError> {
        let url = format!("{}/global", BASE_URL);
        let envelope: GlobalEnvelope = self.get_json(&url, &[]).await?;
        let data = envelope.data;

        Ok(GlobalMarket {
            total_market_cap_usd: data.total_market_cap.usd.unwrap_or(0.0),
            total_volume_24h_usd: data.total_volume.usd.unwrap_or(0.0),
            btc_dominance: data.market_cap_percentage.btc.unwrap_or(0.0),
            eth_dominance: data.market_cap_percentage.eth.unwrap_or(0.0),
            active_cryptocurrencies: data.active_cryptocurrencies,
            market_cap_change_24h: data.market_cap_change_percentage_24h_usd.unwrap_or(0.0),
        })
    }

    async fn fetch_market_chart(
        &self,
        coin_id: &str,
        days: u32,
    ) -> Result<Vec<ChartPoint>, SourceError> {
        let url = format!("{}/coins/{}/market_chart", BASE_URL, coin_id);
        let params = [
            ("vs_currency", "usd".to_string()),
            ("days", days.to_string()),
        ];
        let envelope: ChartEnvelope = self.get_json(&url, &params).await?;

        if envelope.prices.is_empty() {
            return Err(SourceError::UpstreamUnavailable(format!(
                "CoinGecko returned an empty chart for {}",
                coin_id
            )));
        }

        Ok(envelope
            .prices
            .into_iter()
            .map(|(timestamp, price)| ChartPoint {
                timestamp: timestamp as i64,
                price,
            })
            .collect())
    }
}
