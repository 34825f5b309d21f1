//! Failures while fetching or reading a rate table.
//!
//! None of these are fatal: the service turns each one into the text shown
//! to the user.

use super::currency::CurrencyCode;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RateError {
    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    MalformedResponse(String),

    #[error("No rates field found")]
    MissingRatesField,

    #[error("No rate for currency \"{0}\" found")]
    MissingRate(CurrencyCode),

    #[error("No currency retrieved!")]
    EmptyResponse,
}

impl RateError {
    /// Transport failure described by the whole source chain, so a timeout or
    /// a refused connection shows up in the text and not just the request URL.
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        RateError::Transport(format!("{:#}", anyhow::Error::new(err)))
    }
}

impl From<reqwest::Error> for RateError {
    fn from(err: reqwest::Error) -> Self {
        RateError::transport(err)
    }
}

impl From<serde_json::Error> for RateError {
    fn from(err: serde_json::Error) -> Self {
        RateError::MalformedResponse(err.to_string())
    }
}
