use tracing::info;

use crate::models::{MarketCap, MarketCapRecord};
use crate::service::finance::{FinanceService, FinanceServiceError};

/// Fetch `/market-capitalization/{symbol}` and keep the first entry's `marketCap`.
///
/// An empty response is `MarketCap::NotAvailable`; an HTTP failure is an `Err` that the
/// caller downgrades itself.
pub async fn fetch_market_cap(
    finance: &FinanceService,
    symbol: &str,
) -> Result<MarketCap, FinanceServiceError> {
    let path = format!("market-capitalization/{symbol}");
    let records: Vec<MarketCapRecord> = finance
        .get_json("market-capitalization", &path, &[])
        .await?;

    let cap = MarketCap::from(records.first());
    info!("{} market cap: {}", symbol, cap);
    Ok(cap)
}
