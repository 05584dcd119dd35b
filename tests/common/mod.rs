#![allow(dead_code)]

use chrono::NaiveDate;
use httpmock::{Method::GET, Mock, MockServer};

use earnings_report::service::finance::FinanceService;
use earnings_report::AppConfig;

pub const API_KEY: &str = "test-key";

/// Wednesday; its week runs 2026-10-19 ..= 2026-10-25.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 21).unwrap()
}

pub fn finance_for(server: &MockServer) -> FinanceService {
    let config = AppConfig::new(API_KEY)
        .unwrap()
        .with_base_url(server.base_url())
        .unwrap();
    FinanceService::new(&config).unwrap()
}

pub fn mock_calendar<'a>(server: &'a MockServer, status: u16, body: &str) -> Mock<'a> {
    let body = body.to_string();
    server.mock(|when, then| {
        when.method(GET)
            .path("/earning_calendar")
            .query_param("from", "2026-10-19")
            .query_param("to", "2026-10-25")
            .query_param("apikey", API_KEY);
        then.status(status)
            .header("content-type", "application/json")
            .body(body);
    })
}

pub fn mock_income_statement<'a>(
    server: &'a MockServer,
    symbol: &str,
    status: u16,
    body: &str,
) -> Mock<'a> {
    let path = format!("/income-statement/{symbol}");
    let body = body.to_string();
    server.mock(|when, then| {
        when.method(GET)
            .path(path)
            .query_param("period", "annual")
            .query_param("apikey", API_KEY);
        then.status(status)
            .header("content-type", "application/json")
            .body(body);
    })
}

pub fn mock_market_cap<'a>(server: &'a MockServer, symbol: &str, status: u16, body: &str) -> Mock<'a> {
    let path = format!("/market-capitalization/{symbol}");
    let body = body.to_string();
    server.mock(|when, then| {
        when.method(GET).path(path).query_param("apikey", API_KEY);
        then.status(status)
            .header("content-type", "application/json")
            .body(body);
    })
}

pub fn statements(pairs: &[(f64, f64)]) -> String {
    let rows: Vec<String> = pairs
        .iter()
        .enumerate()
        .map(|(i, (eps, revenue))| {
            format!(
                r#"{{"date":"{}-09-30","calendarYear":"{}","period":"FY","eps":{},"revenue":{}}}"#,
                2025 - i,
                2025 - i,
                eps,
                revenue
            )
        })
        .collect();
    format!("[{}]", rows.join(","))
}
