use crate::core::config::FixerProviderConfig;
use crate::core::{CurrencyCode, RateError, RateProvider, RateTable};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Rate tables from a fixer-style `latest` endpoint.
pub struct FixerProvider {
    latest_url: Url,
    client: reqwest::Client,
}

impl FixerProvider {
    pub fn new(base_url: &str, user_agent: &str, timeout: Option<Duration>) -> Result<Self> {
        let latest_url = Url::parse(&format!("{}/latest", base_url.trim_end_matches('/')))
            .with_context(|| format!("Invalid rates API base URL: {base_url}"))?;

        let mut builder = reqwest::Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(FixerProvider { latest_url, client })
    }

    pub fn from_config(config: &FixerProviderConfig, user_agent: &str) -> Result<Self> {
        Self::new(
            &config.base_url,
            user_agent,
            config.timeout_secs.map(Duration::from_secs),
        )
    }

    fn url_for(&self, base: Option<&CurrencyCode>) -> Url {
        let mut url = self.latest_url.clone();
        if let Some(base) = base {
            url.query_pairs_mut().append_pair("base", base.as_str());
        }
        url
    }
}

#[async_trait]
impl RateProvider for FixerProvider {
    #[instrument(name = "FixerRatesFetch", skip(self))]
    async fn fetch_rate_table(&self, base: Option<&CurrencyCode>) -> Result<RateTable, RateError> {
        let url = self.url_for(base);
        debug!("Requesting rate table from {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Rates API returned an error status");
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "Received rates response");

        RateTable::from_json(&body)
    }
}
