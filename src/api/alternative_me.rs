use crate::api::{build_client, unavailable, SentimentFeed, ACCEPT_JSON, USER_AGENT};
use crate::models::{FearGreedIndex, SourceError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const FNG_URL: &str = "https://api.alternative.me/fng/";

/// Alternative.me fear & greed index adapter.
pub struct AlternativeMeApi {
    client: Client,
}

#[derive(Deserialize)]
struct FngEnvelope {
    data: Vec<FngEntry>,
}

#[derive(Deserialize)]
struct FngEntry {
    // Alternative.me serializes numbers as strings.
    value: String,
    value_classification: String,
    timestamp: String,
}

impl AlternativeMeApi {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
        }
    }
}

#[async_trait]
impl SentimentFeed for AlternativeMeApi {
    async fn fetch_fear_greed(&self) -> Result<FearGreedIndex, SourceError> {
        debug!("Sending request to {}", FNG_URL);
        let response = self
            .client
            .get(FNG_URL)
            .header("User-Agent", USER_AGENT)
            .header("Accept", ACCEPT_JSON)
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UpstreamUnavailable(format!(
                "Alternative.me returned status {}",
                status
            )));
        }

        let envelope: FngEnvelope = response.json().await.map_err(unavailable)?;
        let entry = envelope.data.into_iter().next().ok_or_else(|| {
            SourceError::UpstreamUnavailable("Alternative.me returned no index data".to_string())
        })?;

        let value: u32 = entry.value.parse().map_err(unavailable)?;

        Ok(FearGreedIndex {
            value,
            classification: entry.value_classification,
            timestamp: entry.timestamp,
        })
    }
}
