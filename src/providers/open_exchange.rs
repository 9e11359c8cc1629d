use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use super::crypto::crypto_rates;
use crate::core::{CryptoRateTable, FiatRateTable, ProviderError, RatesProvider};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: FiatRateTable,
}

// Fiat rates from openexchangerates.org, always relative to USD
pub struct OpenExchangeRatesProvider {
    base_url: String,
    app_id: String,
    client: reqwest::Client,
}

impl OpenExchangeRatesProvider {
    pub fn new(base_url: &str, app_id: &str) -> Result<Self, ProviderError> {
        Self::with_timeout(base_url, app_id, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: &str,
        app_id: &str,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .user_agent("fxbridge/1.0")
            .timeout(timeout)
            .build()
            .map_err(ProviderError::Request)?;

        Ok(OpenExchangeRatesProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            app_id: app_id.to_string(),
            client,
        })
    }
}

#[async_trait]
impl RatesProvider for OpenExchangeRatesProvider {
    #[instrument(name = "OpenExchangeRatesFetch", skip(self))]
    async fn get_exchange_rates(&self) -> Result<FiatRateTable, ProviderError> {
        let url = format!("{}/api/latest.json?app_id={}", self.base_url, self.app_id);
        debug!("Requesting latest rates from {}/api/latest.json", self.base_url);

        let response = self.client.get(&url).header(ACCEPT, "application/json").send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let data: LatestRatesResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::Decode(e.to_string()))?;

        debug!(count = data.rates.len(), "Received latest rates");
        Ok(data.rates)
    }

    fn get_crypto_exchange_rates(&self) -> &CryptoRateTable {
        crypto_rates()
    }
}
