//! Live EUR/USD quotes from keyless public endpoints.

use log::debug;
use reqwest::blocking::Client;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Per-request timeout for every quote endpoint.
pub const QUOTE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{source_name}: response has no field '{path}'")]
    MissingField {
        source_name: String,
        path: &'static str,
    },
    #[error("{source_name}: quoted rate must be finite and positive, got {rate}")]
    InvalidRate { source_name: String, rate: f64 },
}

/// A provider of the current EUR/USD rate.
pub trait QuoteSource {
    /// Identifier used in logs and cache keys.
    fn name(&self) -> &str;

    /// The current rate in USD per EUR.
    fn current_rate(&self) -> Result<f64, QuoteError>;
}

/// The supported public endpoints, in fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteApi {
    ExchangeRateApi,
    CurrencyApi,
    FreeForexApi,
}

impl QuoteApi {
    pub const ALL: [QuoteApi; 3] = [
        QuoteApi::ExchangeRateApi,
        QuoteApi::CurrencyApi,
        QuoteApi::FreeForexApi,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            QuoteApi::ExchangeRateApi => "ExchangeRate-API",
            QuoteApi::CurrencyApi => "Currency API",
            QuoteApi::FreeForexApi => "FreeForexAPI",
        }
    }

    pub fn url(&self) -> &'static str {
        match self {
            QuoteApi::ExchangeRateApi => "https://api.exchangerate-api.com/v4/latest/EUR",
            QuoteApi::CurrencyApi => {
                "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest/v1/currencies/eur.json"
            }
            QuoteApi::FreeForexApi => "https://www.freeforexapi.com/api/live",
        }
    }

    pub fn query(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            QuoteApi::FreeForexApi => &[("pairs", "EURUSD")],
            _ => &[],
        }
    }

    /// JSON path of the EUR/USD rate in the response body.
    pub fn rate_path(&self) -> &'static str {
        match self {
            QuoteApi::ExchangeRateApi => "rates.USD",
            QuoteApi::CurrencyApi => "eur.usd",
            QuoteApi::FreeForexApi => "rates.EURUSD.rate",
        }
    }

    /// Pull the rate out of a decoded response body.
    pub fn extract_rate(&self, body: &Value) -> Result<f64, QuoteError> {
        let path = self.rate_path();
        let rate = path
            .split('.')
            .try_fold(body, |node, key| node.get(key))
            .and_then(Value::as_f64)
            .ok_or_else(|| QuoteError::MissingField {
                source_name: self.name().to_string(),
                path,
            })?;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(QuoteError::InvalidRate {
                source_name: self.name().to_string(),
                rate,
            });
        }
        Ok(rate)
    }
}

impl fmt::Display for QuoteApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Quote source backed by one of the public HTTP endpoints.
pub struct HttpQuoteSource {
    api: QuoteApi,
    client: Client,
}

impl HttpQuoteSource {
    pub fn new(api: QuoteApi) -> Result<Self, QuoteError> {
        let client = Client::builder().timeout(QUOTE_TIMEOUT).build()?;
        Ok(Self { api, client })
    }

    /// One source per supported endpoint, in fallback order.
    pub fn all() -> Result<Vec<Self>, QuoteError> {
        QuoteApi::ALL.iter().map(|api| Self::new(*api)).collect()
    }

    pub fn api(&self) -> QuoteApi {
        self.api
    }
}

impl QuoteSource for HttpQuoteSource {
    fn name(&self) -> &str {
        self.api.name()
    }

    fn current_rate(&self) -> Result<f64, QuoteError> {
        debug!("requesting {}", self.api.url());
        let body: Value = self
            .client
            .get(self.api.url())
            .query(self.api.query())
            .send()?
            .error_for_status()?
            .json()?;
        self.api.extract_rate(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_exchange_rate_api_body() {
        let body = json!({"base": "EUR", "rates": {"USD": 1.0852, "GBP": 0.86}});
        assert_eq!(QuoteApi::ExchangeRateApi.extract_rate(&body).unwrap(), 1.0852);
    }

    #[test]
    fn test_currency_api_body() {
        let body = json!({"date": "2024-05-01", "eur": {"usd": 1.0711}});
        assert_eq!(QuoteApi::CurrencyApi.extract_rate(&body).unwrap(), 1.0711);
    }

    #[test]
    fn test_free_forex_api_body() {
        let body = json!({"rates": {"EURUSD": {"rate": 1.0923, "timestamp": 1700000000}}, "code": 200});
        assert_eq!(QuoteApi::FreeForexApi.extract_rate(&body).unwrap(), 1.0923);
    }

    #[test]
    fn test_missing_field() {
        let body = json!({"rates": {"GBP": 0.86}});
        let err = QuoteApi::ExchangeRateApi.extract_rate(&body).unwrap_err();
        assert!(matches!(err, QuoteError::MissingField { path: "rates.USD", .. }));
    }

    #[test]
    fn test_non_numeric_field() {
        let body = json!({"eur": {"usd": "1.07"}});
        assert!(QuoteApi::CurrencyApi.extract_rate(&body).is_err());
    }

    #[test]
    fn test_non_positive_rate() {
        let body = json!({"eur": {"usd": 0.0}});
        assert!(matches!(
            QuoteApi::CurrencyApi.extract_rate(&body),
            Err(QuoteError::InvalidRate { .. })
        ));
    }

    #[test]
    fn test_fallback_order() {
        let names: Vec<&str> = QuoteApi::ALL.iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["ExchangeRate-API", "Currency API", "FreeForexAPI"]);
    }
}
