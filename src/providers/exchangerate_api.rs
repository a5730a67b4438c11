use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::config::ProviderConfig;
use crate::core::currency::CurrencyCode;
use crate::core::rates::{RateProvider, RateTable};

const USER_AGENT: &str = concat!("curconv/", env!("CARGO_PKG_VERSION"));

/// Rate lookups against exchangerate-api.com.
///
/// With an API key the keyed `{base_url}/{key}/latest/{base}` endpoint is
/// used, otherwise the open `{base_url}/latest/{base}` one.
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: Option<String>,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()).map(str::to_string),
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(config.base_url(), config.api_key())
    }

    fn latest_url(&self, base: &CurrencyCode) -> String {
        match &self.api_key {
            Some(key) => format!("{}/{}/latest/{}", self.base_url, key, base),
            None => format!("{}/latest/{}", self.base_url, base),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(rename = "error-type", default)]
    error_type: Option<String>,
    #[serde(alias = "rates", default)]
    conversion_rates: Option<HashMap<String, f64>>,
    #[serde(default)]
    time_last_update_unix: Option<i64>,
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    #[instrument(
        name = "ExchangeRateFetch",
        skip(self),
        fields(base = %base)
    )]
    async fn latest_rates(&self, base: &CurrencyCode) -> Result<RateTable> {
        let url = self.latest_url(base);
        debug!("Requesting exchange rates for {}", base);

        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to load exchange rates: {}", e.without_url()))?;

        debug!(status = %response.status(), "Received exchange rate response");

        if !response.status().is_success() {
            return Err(anyhow!(
                "Failed to load exchange rates: HTTP {}",
                response.status()
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| anyhow!("Failed to load exchange rates: {}", e.without_url()))?;
        let data: LatestRatesResponse = serde_json::from_str(&text).map_err(|e| {
            anyhow!(
                "Failed to parse exchange rate response for {}: {}",
                base,
                e
            )
        })?;

        if data.result.as_deref() == Some("error") {
            return Err(anyhow!(
                "Exchange rate provider error: {}",
                data.error_type.as_deref().unwrap_or("unknown")
            ));
        }

        let rates = data
            .conversion_rates
            .ok_or_else(|| anyhow!("No rate data found for base currency: {}", base))?;

        Ok(RateTable {
            base: *base,
            rates,
            updated_at: data
                .time_last_update_unix
                .and_then(|ts| Utc.timestamp_opt(ts, 0).single()),
        })
    }
}
