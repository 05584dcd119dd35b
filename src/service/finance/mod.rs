use std::time::Duration as StdDuration;

use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::models::{EarningsRecord, IncomeStatementRecord, MarketCap, Period};

pub mod earnings;
pub mod fundamentals;
pub mod market_cap;

const REQUEST_TIMEOUT: StdDuration = StdDuration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum FinanceServiceError {
    #[error("{endpoint} request failed")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} api status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },
    #[error("{endpoint} parse failed")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Thin client over the Financial Modeling Prep v3 REST API.
pub struct FinanceService {
    http: Client,
    base_url: String,
    api_key: String,
}

impl FinanceService {
    pub fn new(config: &AppConfig) -> Result<Self, FinanceServiceError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| FinanceServiceError::Request {
                endpoint: "client",
                source,
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Fetch every earnings-calendar entry announced between `from` and `to` (inclusive).
    pub async fn get_earnings_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<EarningsRecord>, FinanceServiceError> {
        earnings::fetch_earnings_range(self, from, to).await
    }

    /// Fetch the income-statement history for a symbol, most recent first.
    pub async fn get_income_statement(
        &self,
        symbol: &str,
        period: Period,
    ) -> Result<Vec<IncomeStatementRecord>, FinanceServiceError> {
        fundamentals::fetch_income_statement(self, symbol, period).await
    }

    /// Fetch the current market capitalization for a symbol.
    pub async fn get_market_cap(&self, symbol: &str) -> Result<MarketCap, FinanceServiceError> {
        market_cap::fetch_market_cap(self, symbol).await
    }

    /// GET `{base_url}/{path}` with the api key appended and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FinanceServiceError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        info!("GET {} {:?}", url, query);

        let resp = self
            .http
            .get(&url)
            .query(query)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                // the api key rides in the query string
                let source = e.without_url();
                warn!("{} request failed: {}", endpoint, source);
                FinanceServiceError::Request { endpoint, source }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "unable to read body".to_string());
            warn!("{} returned error status {}: {}", endpoint, status, body);
            return Err(FinanceServiceError::Status {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        let raw_bytes = resp
            .bytes()
            .await
            .map_err(|e| FinanceServiceError::Request {
                endpoint,
                source: e.without_url(),
            })?;

        serde_json::from_slice(&raw_bytes).map_err(|source| {
            let preview = String::from_utf8_lossy(&raw_bytes[..raw_bytes.len().min(500)]);
            warn!(
                "Failed to parse {} response: {}; body preview: {}",
                endpoint, source, preview
            );
            FinanceServiceError::Decode { endpoint, source }
        })
    }
}

pub use FinanceServiceError as Error;
