use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One earnings-calendar entry as returned by `/earning_calendar`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsRecord {
    pub symbol: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eps_estimated: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_estimated: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>, // bmo / amc when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_date_ending: Option<NaiveDate>,
}

impl EarningsRecord {
    pub fn matches(&self, symbol: &str) -> bool {
        self.symbol == symbol
    }
}
