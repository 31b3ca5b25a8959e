use async_trait::async_trait;
use reqwest::Client;

use super::records::{parse_food_records, FoodRecord, SearchEnvelope};
use crate::config::FoodLookupConfig;

/// Failures the food database client does not fold into an empty result.
#[derive(Debug, thiserror::Error)]
pub enum FoodLookupError {
    #[error("food database timed out: {0}")]
    Timeout(reqwest::Error),
    #[error("food database unreachable: {0}")]
    Network(reqwest::Error),
}

impl From<reqwest::Error> for FoodLookupError {
    /// The request URL carries the API key, so it is dropped from the error.
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_timeout() {
            FoodLookupError::Timeout(err)
        } else {
            FoodLookupError::Network(err)
        }
    }
}

#[async_trait]
pub trait FoodSearch: Send + Sync {
    /// Returns candidate records for `query`, possibly none.
    async fn search(&self, query: &str) -> Result<Vec<FoodRecord>, FoodLookupError>;
}

/// Client for the FoodData Central `/foods/search` endpoint.
#[derive(Debug, Clone)]
pub struct FoodLookupClient {
    config: FoodLookupConfig,
    client: Client,
}

impl FoodLookupClient {
    pub fn new(config: FoodLookupConfig) -> Result<Self, FoodLookupError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(FoodLookupError::from)?;
        Ok(Self { config, client })
    }

    fn search_url(&self) -> String {
        format!("{}/foods/search", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl FoodSearch for FoodLookupClient {
    async fn search(&self, query: &str) -> Result<Vec<FoodRecord>, FoodLookupError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let page_size = self.config.page_size.to_string();
        let response = self
            .client
            .get(self.search_url())
            .query(&[
                ("query", query),
                ("pageSize", page_size.as_str()),
                ("api_key", self.config.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, query, "food search returned non-success status");
            return Ok(Vec::new());
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read food search body");
                return Ok(Vec::new());
            }
        };

        let envelope: SearchEnvelope = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(error = %e, "food search body is not valid JSON");
                return Ok(Vec::new());
            }
        };

        let records = envelope.foods.map(parse_food_records).unwrap_or_default();
        tracing::debug!(query, results = records.len(), "food search finished");
        Ok(records)
    }
}
