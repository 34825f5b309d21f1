use super::currency::{CurrencyCode, CurrencyList, RateQueryResult, SelectedPair};
use super::rate::{RateProvider, RateQuote};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Fetches rate tables and turns them into a currency list or a message.
///
/// Failures never escape this type; each one becomes the message text
/// returned to the caller. The service keeps the last fetched list and the
/// caller's last selection, neither of which affects how requests are made.
pub struct RateService {
    provider: Arc<dyn RateProvider>,
    currencies: RwLock<CurrencyList>,
    selected: RwLock<Option<SelectedPair>>,
}

impl RateService {
    pub fn new(provider: Arc<dyn RateProvider>) -> Self {
        Self {
            provider,
            currencies: RwLock::new(CurrencyList::default()),
            selected: RwLock::new(None),
        }
    }

    #[instrument(name = "FetchAllCurrencies", skip(self))]
    pub async fn fetch_all_currency_codes(&self) -> RateQueryResult {
        match self.provider.fetch_rate_table(None).await {
            Ok(table) => {
                let codes = table.currency_codes();
                info!(count = codes.len(), "Fetched currency list");
                *self.currencies.write().await = codes.clone();
                RateQueryResult::Currencies(codes)
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch currency list");
                RateQueryResult::Message(e.to_string())
            }
        }
    }

    pub async fn fetch_rate(&self, base: &CurrencyCode, target: &CurrencyCode) -> String {
        self.fetch_quote(base, target).await.message
    }

    /// Same lookup as [`fetch_rate`](Self::fetch_rate), keeping the table date.
    #[instrument(name = "FetchRate", skip(self), fields(base = %base, target = %target))]
    pub async fn fetch_quote(&self, base: &CurrencyCode, target: &CurrencyCode) -> RateQuote {
        let result = self
            .provider
            .fetch_rate_table(Some(base))
            .await
            .and_then(|table| table.quote(target));

        match result {
            Ok(quote) => {
                debug!(rate = %quote.message, date = ?quote.date, "Fetched rate");
                quote
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch rate");
                RateQuote {
                    message: e.to_string(),
                    date: None,
                }
            }
        }
    }

    /// Last successfully fetched list; empty until the first fetch succeeds.
    pub async fn currencies(&self) -> CurrencyList {
        self.currencies.read().await.clone()
    }

    pub async fn select(&self, pair: SelectedPair) {
        debug!(%pair, "Selection changed");
        *self.selected.write().await = Some(pair);
    }

    pub async fn selected(&self) -> Option<SelectedPair> {
        self.selected.read().await.clone()
    }
}
