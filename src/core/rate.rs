//! Rate tables and the provider abstraction

use super::currency::{CurrencyCode, CurrencyList};
use super::error::RateError;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::fmt::Display;
use tracing::debug;

/// A single exchange rate, kept as the JSON number text it arrived as.
#[derive(Debug, Clone, PartialEq)]
pub struct Rate(Number);

impl Display for Rate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Number> for Rate {
    fn from(number: Number) -> Self {
        Rate(number)
    }
}

/// Display text for one rate lookup, with the publication date of the table
/// when the lookup succeeded and the API sent one.
#[derive(Debug, Clone, PartialEq)]
pub struct RateQuote {
    pub message: String,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    pub base: Option<CurrencyCode>,
    pub date: Option<NaiveDate>,
    pub rates: BTreeMap<CurrencyCode, Rate>,
}

impl RateTable {
    /// Parses a `latest` response body.
    pub fn from_json(body: &[u8]) -> Result<Self, RateError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(RateError::EmptyResponse);
        }

        let json: Value = serde_json::from_slice(body)?;
        let Value::Object(object) = json else {
            return Err(RateError::MalformedResponse(
                "No JSON value parsed".to_string(),
            ));
        };

        let rates = object
            .get("rates")
            .and_then(Value::as_object)
            .and_then(parse_rates)
            .ok_or(RateError::MissingRatesField)?;

        let base = object
            .get("base")
            .and_then(Value::as_str)
            .map(CurrencyCode::from);

        let date = object
            .get("date")
            .and_then(Value::as_str)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());

        Ok(RateTable { base, date, rates })
    }

    pub fn rate(&self, target: &CurrencyCode) -> Result<&Rate, RateError> {
        self.rates
            .get(target)
            .ok_or_else(|| RateError::MissingRate(target.clone()))
    }

    pub fn quote(&self, target: &CurrencyCode) -> Result<RateQuote, RateError> {
        let rate = self.rate(target)?;
        Ok(RateQuote {
            message: rate.to_string(),
            date: self.date,
        })
    }

    /// Every code in the table plus the declared base, which the API leaves
    /// out of its own table.
    pub fn currency_codes(&self) -> CurrencyList {
        if self.base.is_none() {
            debug!("Rate table declares no base currency");
        }
        CurrencyList::from_codes(self.rates.keys().cloned().chain(self.base.clone()))
    }
}

// Any non-numeric entry invalidates the whole mapping.
fn parse_rates(rates: &Map<String, Value>) -> Option<BTreeMap<CurrencyCode, Rate>> {
    rates
        .iter()
        .map(|(code, value)| match value {
            Value::Number(n) => Some((CurrencyCode::from(code.as_str()), Rate::from(n.clone()))),
            _ => None,
        })
        .collect()
}

/// Source of rate tables. `base` of `None` asks for the server's default table.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rate_table(&self, base: Option<&CurrencyCode>) -> Result<RateTable, RateError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_response() {
        let body = br#"{"base":"EUR","date":"2018-02-09","rates":{"USD":1.2273,"GBP":0.88}}"#;
        let table = RateTable::from_json(body).unwrap();

        assert_eq!(table.base, Some("EUR".into()));
        assert_eq!(table.date, NaiveDate::from_ymd_opt(2018, 2, 9));
        assert_eq!(table.rates.len(), 2);
        assert_eq!(table.rate(&"USD".into()).unwrap().to_string(), "1.2273");
        assert_eq!(table.rate(&"GBP".into()).unwrap().to_string(), "0.88");
    }

    #[test]
    fn test_currency_codes_include_base() {
        let body = br#"{"base":"EUR","rates":{"USD":1.23,"GBP":0.88}}"#;
        let codes = RateTable::from_json(body).unwrap().currency_codes();
        let as_str: Vec<&str> = codes.iter().map(|c| c.as_str()).collect();
        assert_eq!(as_str, vec!["EUR", "GBP", "USD"]);
    }

    #[test]
    fn test_base_already_in_rates_is_not_duplicated() {
        let body = br#"{"base":"EUR","rates":{"EUR":1.0,"USD":1.23}}"#;
        let codes = RateTable::from_json(body).unwrap().currency_codes();
        assert_eq!(codes.len(), 2);
    }

    #[test]
    fn test_rate_text_is_not_rounded() {
        let body =
            br#"{"base":"USD","rates":{"EUR":0.91,"JPY":108,"GBP":0.7312,"CHF":1.10}}"#;
        let table = RateTable::from_json(body).unwrap();
        assert_eq!(table.rate(&"EUR".into()).unwrap().to_string(), "0.91");
        assert_eq!(table.rate(&"JPY".into()).unwrap().to_string(), "108");
        assert_eq!(table.rate(&"GBP".into()).unwrap().to_string(), "0.7312");
        // Trailing zeros survive as sent
        assert_eq!(table.rate(&"CHF".into()).unwrap().to_string(), "1.10");
    }

    #[test]
    fn test_quote_carries_table_date() {
        let body = br#"{"base":"USD","date":"2018-02-09","rates":{"EUR":0.91}}"#;
        let table = RateTable::from_json(body).unwrap();

        let quote = table.quote(&"EUR".into()).unwrap();
        assert_eq!(quote.message, "0.91");
        assert_eq!(quote.date, NaiveDate::from_ymd_opt(2018, 2, 9));

        assert_eq!(
            table.quote(&"JPY".into()).unwrap_err(),
            RateError::MissingRate("JPY".into())
        );
    }

    #[test]
    fn test_missing_rate() {
        let body = br#"{"base":"USD","rates":{"EUR":0.91}}"#;
        let table = RateTable::from_json(body).unwrap();
        assert_eq!(
            table.rate(&"JPY".into()).unwrap_err(),
            RateError::MissingRate("JPY".into())
        );
    }

    #[test]
    fn test_missing_or_invalid_rates_field() {
        for body in [
            br#"{"base":"USD"}"#.as_slice(),
            br#"{"base":"USD","rates":[1, 2]}"#.as_slice(),
            br#"{"base":"USD","rates":{"EUR":"0.91"}}"#.as_slice(),
            br#"{"error":"Invalid base"}"#.as_slice(),
        ] {
            assert_eq!(
                RateTable::from_json(body).unwrap_err(),
                RateError::MissingRatesField
            );
        }
    }

    #[test]
    fn test_malformed_and_empty_bodies() {
        assert!(matches!(
            RateTable::from_json(b"{not json").unwrap_err(),
            RateError::MalformedResponse(_)
        ));
        assert_eq!(
            RateTable::from_json(b"[1, 2, 3]").unwrap_err(),
            RateError::MalformedResponse("No JSON value parsed".to_string())
        );
        assert_eq!(
            RateTable::from_json(b"").unwrap_err(),
            RateError::EmptyResponse
        );
        assert_eq!(
            RateTable::from_json(b"  \n").unwrap_err(),
            RateError::EmptyResponse
        );
    }

    #[test]
    fn test_bad_date_is_ignored() {
        let body = br#"{"base":"USD","date":"yesterday","rates":{"EUR":0.91}}"#;
        let table = RateTable::from_json(body).unwrap();
        assert!(table.date.is_none());
    }
}
