use serde::{Deserialize, Serialize};

/// Live quote for one coin, recomputed on every successful upstream fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub price_change_24h: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FearGreedIndex {
    pub value: u32,
    pub classification: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stablecoin {
    pub name: String,
    pub symbol: String,
    pub market_cap: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StablecoinOverview {
    pub total_market_cap: f64,
    pub top_stablecoins: Vec<Stablecoin>,
    pub updated_at: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvlProtocol {
    pub name: String,
    pub tvl: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefiTvl {
    pub total_tvl: f64,
    pub change_24h: f64,
    pub top_protocols: Vec<TvlProtocol>,
    pub updated_at: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalMarket {
    pub total_market_cap_usd: f64,
    pub total_volume_24h_usd: f64,
    pub btc_dominance: f64,
    pub eth_dominance: f64,
    pub active_cryptocurrencies: u64,
    pub market_cap_change_24h: f64,
}

/// One sample of a price history series, timestamp in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub timestamp: i64,
    pub price: f64,
}

/// Composite dashboard block assembled from the individual index sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketIndices {
    pub bitcoin_rainbow: RainbowBand,
    pub altcoin_season_index: AltseasonIndex,
    pub defi_tvl: DefiTvl,
    pub stablecoin_dominance: StablecoinDominance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RainbowBand {
    pub current_position: String,
    pub price_band: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AltseasonIndex {
    pub value: u32,
    pub status: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StablecoinDominance {
    pub percentage: f64,
    pub total_supply: f64,
}

/// One entry of the top gainers/losers leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change_24h: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainersLosers {
    pub gainers: Vec<Mover>,
    pub losers: Vec<Mover>,
}

/// Aggregates computed over the currently resolved price set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketStats {
    pub total_market_cap: f64,
    pub btc_dominance: f64,
    pub total_volume_24h: f64,
    pub active_cryptos: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub premium: bool,
    pub published_at: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirdropTask {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airdrop {
    pub id: String,
    pub project_name: String,
    pub logo_url: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward_note: Option<String>,
    pub tasks: Vec<AirdropTask>,
    pub estimated_reward: String,
    pub difficulty: String,
    pub deadline: String,
    pub status: String,
    pub link: String,
    #[serde(default)]
    pub premium: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub id: String,
    pub kind: String,
    pub priority: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub timestamp: String,
    #[serde(default)]
    pub premium: bool,
}
