use tracing::info;

use crate::models::{IncomeStatementRecord, Period};
use crate::service::finance::{FinanceService, FinanceServiceError};

/// Fetch `/income-statement/{symbol}` for the given period.
///
/// Records come back in API order (most recent fiscal year first). No minimum length is
/// enforced here; callers decide how much history they need.
pub async fn fetch_income_statement(
    finance: &FinanceService,
    symbol: &str,
    period: Period,
) -> Result<Vec<IncomeStatementRecord>, FinanceServiceError> {
    let path = format!("income-statement/{symbol}");
    let records: Vec<IncomeStatementRecord> = finance
        .get_json("income-statement", &path, &[("period", period.as_str())])
        .await?;

    info!("{} got statement ({} {} records)", symbol, records.len(), period.as_str());
    Ok(records)
}
