use std::fmt;

use serde::{Deserialize, Serialize};

/// Reporting period accepted by the income-statement endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    Annual,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Annual => "annual",
        }
    }
}

/// One fiscal year of `/income-statement/{symbol}`. The API lists these most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatementRecord {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub calendar_year: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub net_income: Option<f64>,
    #[serde(default)]
    pub eps: Option<f64>,
    #[serde(default, rename = "epsdiluted")]
    pub eps_diluted: Option<f64>,
}

/// Raw `/market-capitalization/{symbol}` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketCapRecord {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub market_cap: Option<f64>,
}

/// Market capitalization at fetch time, or "NA" when the API had nothing for the symbol.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MarketCap {
    Value(f64),
    #[default]
    NotAvailable,
}

impl MarketCap {
    pub fn value(&self) -> Option<f64> {
        match self {
            MarketCap::Value(v) => Some(*v),
            MarketCap::NotAvailable => None,
        }
    }
}

impl fmt::Display for MarketCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketCap::Value(v) => write!(f, "{v}"),
            MarketCap::NotAvailable => f.write_str("NA"),
        }
    }
}

impl From<Option<&MarketCapRecord>> for MarketCap {
    fn from(first: Option<&MarketCapRecord>) -> Self {
        first
            .and_then(|r| r.market_cap)
            .map(MarketCap::Value)
            .unwrap_or(MarketCap::NotAvailable)
    }
}
