mod common;

use httpmock::MockServer;

use earnings_report::models::{MarketCap, Period};
use earnings_report::service::finance::FinanceServiceError;

use common::{finance_for, mock_income_statement, mock_market_cap, statements};

#[tokio::test]
async fn income_statement_requests_annual_period() {
    let server = MockServer::start();
    let mock = mock_income_statement(&server, "AAPL", 200, &statements(&[(6.16, 3.8e11), (6.15, 3.9e11)]));

    let finance = finance_for(&server);
    let history = finance.get_income_statement("AAPL", Period::Annual).await.unwrap();

    mock.assert();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].eps, Some(6.16));
    assert_eq!(history[0].calendar_year.as_deref(), Some("2025"));
    assert_eq!(history[1].calendar_year.as_deref(), Some("2024"));
}

#[tokio::test]
async fn income_statement_passes_short_history_through() {
    let server = MockServer::start();
    mock_income_statement(&server, "NEWCO", 200, "[]");

    let finance = finance_for(&server);
    let history = finance.get_income_statement("NEWCO", Period::Annual).await.unwrap();

    assert!(history.is_empty());
}

#[tokio::test]
async fn market_cap_uses_first_record() {
    let server = MockServer::start();
    let mock = mock_market_cap(
        &server,
        "NVDA",
        200,
        r#"[{"symbol":"NVDA","date":"2026-10-20","marketCap":4.2e12},{"symbol":"NVDA","date":"2026-10-17","marketCap":4.0e12}]"#,
    );

    let finance = finance_for(&server);
    let cap = finance.get_market_cap("NVDA").await.unwrap();

    mock.assert();
    assert_eq!(cap, MarketCap::Value(4.2e12));
}

#[tokio::test]
async fn market_cap_empty_response_is_na() {
    let server = MockServer::start();
    mock_market_cap(&server, "ZZZZ", 200, "[]");

    let finance = finance_for(&server);
    let cap = finance.get_market_cap("ZZZZ").await.unwrap();

    assert_eq!(cap, MarketCap::NotAvailable);
    assert_eq!(cap.to_string(), "NA");
}

#[tokio::test]
async fn market_cap_failure_is_an_error_not_na() {
    let server = MockServer::start();
    mock_market_cap(&server, "AAPL", 429, r#"{"message":"Limit Reach"}"#);

    let finance = finance_for(&server);
    let err = finance.get_market_cap("AAPL").await.unwrap_err();

    assert!(matches!(err, FinanceServiceError::Status { status: 429, .. }), "got {err:?}");
}
