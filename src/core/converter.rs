//! Request cycles and the updates they publish to a front-end.
//!
//! Every cycle opens with `Busy(true)` and a cleared label and closes with a
//! single terminal update followed by `Busy(false)`.

use super::currency::{CurrencyList, RateQueryResult, SelectedPair};
use super::service::RateService;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConverterMode {
    AllCurrencies,
    Exchange(SelectedPair),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// Busy indicator on or off.
    Busy(bool),
    /// A new currency list is ready for the pickers.
    Currencies(CurrencyList),
    /// Text for the result label.
    Label(String),
}

#[derive(Clone)]
pub struct Converter {
    service: Arc<RateService>,
}

impl Converter {
    pub fn new(service: Arc<RateService>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &Arc<RateService> {
        &self.service
    }

    /// Runs `request` on its own task. Requests are never cancelled or
    /// queued behind each other.
    pub fn spawn(&self, mode: ConverterMode, updates: UnboundedSender<Update>) -> JoinHandle<()> {
        let converter = self.clone();
        tokio::spawn(async move { converter.request(mode, &updates).await })
    }

    pub async fn request(&self, mode: ConverterMode, updates: &UnboundedSender<Update>) {
        match mode {
            ConverterMode::AllCurrencies => {
                if let Some(pair) = self.refresh(updates).await {
                    self.exchange(pair, updates).await;
                }
            }
            ConverterMode::Exchange(pair) => self.exchange(pair, updates).await,
        }
    }

    // Returns the default pair to quote when the list has at least two codes.
    async fn refresh(&self, updates: &UnboundedSender<Update>) -> Option<SelectedPair> {
        begin(updates);
        match self.service.fetch_all_currency_codes().await {
            RateQueryResult::Message(text) => {
                finish(updates, Update::Label(text));
                None
            }
            RateQueryResult::Currencies(list) => {
                let pair = list.first_pair();
                finish(updates, Update::Currencies(list));
                if pair.is_none() {
                    debug!("Not enough currencies to quote a default pair");
                }
                pair
            }
        }
    }

    async fn exchange(&self, pair: SelectedPair, updates: &UnboundedSender<Update>) {
        begin(updates);
        self.service.select(pair.clone()).await;
        let message = self.service.fetch_rate(&pair.base, &pair.target).await;
        finish(updates, Update::Label(message));
    }
}

fn begin(updates: &UnboundedSender<Update>) {
    notify(updates, Update::Busy(true));
    notify(updates, Update::Label(String::new()));
}

fn finish(updates: &UnboundedSender<Update>, terminal: Update) {
    notify(updates, terminal);
    notify(updates, Update::Busy(false));
}

fn notify(updates: &UnboundedSender<Update>, update: Update) {
    if updates.send(update).is_err() {
        trace!("Update receiver dropped");
    }
}
