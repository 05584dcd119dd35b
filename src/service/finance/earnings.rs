use chrono::{Datelike, Duration, NaiveDate};
use tracing::info;

use crate::models::EarningsRecord;
use crate::service::finance::{FinanceService, FinanceServiceError};

/// Monday..Sunday of the week containing `today`. Sunday closes its own week.
pub fn week_range_mon_sun(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let days_from_mon = today.weekday().num_days_from_monday() as i64;
    let monday = today - Duration::days(days_from_mon);
    let sunday = monday + Duration::days(6);
    (monday, sunday)
}

/// Fetch the earnings calendar for a date range via `/earning_calendar`.
pub async fn fetch_earnings_range(
    finance: &FinanceService,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<EarningsRecord>, FinanceServiceError> {
    info!("Fetching earnings from {} to {}", from, to);

    let from_str = from.format("%Y-%m-%d").to_string();
    let to_str = to.format("%Y-%m-%d").to_string();

    let mut events: Vec<EarningsRecord> = finance
        .get_json(
            "earning_calendar",
            "earning_calendar",
            &[("from", from_str.as_str()), ("to", to_str.as_str())],
        )
        .await?;

    events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.symbol.cmp(&b.symbol)));

    info!("Received {} earnings calendar entries", events.len());
    Ok(events)
}
