use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::models::{EarningsRecord, IncomeStatementRecord, MarketCap, Period};
use crate::service::finance::earnings::week_range_mon_sun;
use crate::service::finance::{FinanceService, FinanceServiceError};

pub mod workbook;

pub use workbook::{report_file_name, write_workbook};

/// Minimum income-statement history needed for a YoY comparison.
pub const MIN_STATEMENT_RECORDS: usize = 2;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("earnings calendar unavailable")]
    EarningsUnavailable(#[source] FinanceServiceError),
    #[error("earnings calendar for {from} to {to} is empty")]
    EmptyCalendar { from: NaiveDate, to: NaiveDate },
    #[error("no stock symbols entered")]
    NoSymbols,
    #[error("failed to write workbook")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
    #[error("failed to prepare report directory")]
    Io(#[from] std::io::Error),
}

/// One output line of the spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub symbol: String,
    pub date: NaiveDate,
    pub eps: Option<f64>,
    pub revenue: Option<f64>,
    pub eps_growth: Option<f64>,
    pub revenue_growth: Option<f64>,
    pub market_cap: MarketCap,
}

#[derive(Debug)]
pub enum SkipReason {
    NotInCalendar,
    InsufficientHistory { records: usize },
    IncomeStatementUnavailable(FinanceServiceError),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotInCalendar => f.write_str("no earnings data this week"),
            SkipReason::InsufficientHistory { records } => write!(
                f,
                "insufficient income statement data for YoY calculations ({records} record(s))"
            ),
            SkipReason::IncomeStatementUnavailable(err) => {
                write!(f, "income statement unavailable: {}", error_chain(err))
            }
        }
    }
}

#[derive(Debug)]
pub struct SkippedSymbol {
    pub symbol: String,
    pub reason: SkipReason,
}

#[derive(Debug, Default)]
pub struct EarningsReport {
    pub rows: Vec<ReportRow>,
    pub skipped: Vec<SkippedSymbol>,
}

impl EarningsReport {
    pub fn rows_for<'a>(&'a self, symbol: &'a str) -> impl Iterator<Item = &'a ReportRow> + 'a {
        self.rows.iter().filter(move |r| r.symbol == symbol)
    }

    fn skip(&mut self, symbol: &str, reason: SkipReason) {
        warn!("Skipping {}: {}", symbol, reason);
        self.skipped.push(SkippedSymbol {
            symbol: symbol.to_string(),
            reason,
        });
    }
}

/// `err` followed by each of its sources, joined with ": ".
pub fn error_chain(err: &dyn StdError) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

/// Percentage change from `previous` to `current`.
///
/// `None` when either side is missing, `previous` is zero, or the result is not finite.
pub fn yoy_growth(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    let (current, previous) = (current?, previous?);
    if previous == 0.0 {
        return None;
    }
    let growth = (current - previous) / previous * 100.0;
    growth.is_finite().then_some(growth)
}

/// EPS and revenue growth between the two most recent statements.
pub fn statement_growth(history: &[IncomeStatementRecord]) -> (Option<f64>, Option<f64>) {
    match history {
        [current, previous, ..] => (
            yoy_growth(current.eps, previous.eps),
            yoy_growth(current.revenue, previous.revenue),
        ),
        _ => (None, None),
    }
}

pub fn format_growth(growth: Option<f64>) -> String {
    match growth {
        Some(g) => format!("{g:.2}%"),
        None => "N/A".to_string(),
    }
}

/// Join the calendar with per-symbol fundamentals. Symbols are handled one at a time in input
/// order; a symbol missing from the calendar or lacking two years of history is skipped.
pub async fn build_report(
    finance: &FinanceService,
    calendar: &[EarningsRecord],
    symbols: &[String],
) -> EarningsReport {
    let mut report = EarningsReport::default();

    for symbol in symbols {
        let entries: Vec<&EarningsRecord> =
            calendar.iter().filter(|e| e.matches(symbol)).collect();
        if entries.is_empty() {
            report.skip(symbol, SkipReason::NotInCalendar);
            continue;
        }

        let history = match finance.get_income_statement(symbol, Period::Annual).await {
            Ok(history) => history,
            Err(err) => {
                report.skip(symbol, SkipReason::IncomeStatementUnavailable(err));
                continue;
            }
        };
        if history.len() < MIN_STATEMENT_RECORDS {
            report.skip(
                symbol,
                SkipReason::InsufficientHistory {
                    records: history.len(),
                },
            );
            continue;
        }

        let market_cap = match finance.get_market_cap(symbol).await {
            Ok(cap) => cap,
            Err(err) => {
                warn!(
                    "Failed to fetch market capitalization for {}: {}",
                    symbol,
                    error_chain(&err)
                );
                MarketCap::NotAvailable
            }
        };

        let (eps_growth, revenue_growth) = statement_growth(&history);
        if eps_growth.is_none() || revenue_growth.is_none() {
            warn!(
                "{}: YoY growth not computable (eps {:?} -> {:?}, revenue {:?} -> {:?})",
                symbol, history[1].eps, history[0].eps, history[1].revenue, history[0].revenue
            );
        }

        for entry in entries {
            report.rows.push(ReportRow {
                symbol: symbol.clone(),
                date: entry.date,
                eps: entry.eps,
                revenue: entry.revenue,
                eps_growth,
                revenue_growth,
                market_cap,
            });
        }
    }

    info!(
        "Report assembled: {} rows, {} symbols skipped",
        report.rows.len(),
        report.skipped.len()
    );
    report
}

/// Fetch this week's calendar, build the report for `symbols` and save it under `output_dir`.
///
/// Nothing is written when the calendar can't be fetched, is empty, or no symbols were given.
pub async fn generate_report(
    finance: &FinanceService,
    symbols: &[String],
    today: NaiveDate,
    output_dir: &Path,
) -> Result<PathBuf, ReportError> {
    let calendar = fetch_week_calendar(finance, today).await?;
    generate_report_from_calendar(finance, &calendar, symbols, today, output_dir).await
}

/// Fetch the Monday..Sunday calendar containing `today`; an empty week is an error.
pub async fn fetch_week_calendar(
    finance: &FinanceService,
    today: NaiveDate,
) -> Result<Vec<EarningsRecord>, ReportError> {
    let (from, to) = week_range_mon_sun(today);
    let calendar = finance.get_earnings_range(from, to).await.map_err(|e| {
        error!("Failed to fetch earnings data: {}", error_chain(&e));
        ReportError::EarningsUnavailable(e)
    })?;

    if calendar.is_empty() {
        error!("No earnings data between {} and {}", from, to);
        return Err(ReportError::EmptyCalendar { from, to });
    }
    Ok(calendar)
}

/// Build and save the report against an already fetched calendar.
pub async fn generate_report_from_calendar(
    finance: &FinanceService,
    calendar: &[EarningsRecord],
    symbols: &[String],
    today: NaiveDate,
    output_dir: &Path,
) -> Result<PathBuf, ReportError> {
    if symbols.is_empty() {
        return Err(ReportError::NoSymbols);
    }

    let report = build_report(finance, calendar, symbols).await;

    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(report_file_name(today));
    write_workbook(&report, &path)?;

    info!("Earnings report saved as {}", path.display());
    Ok(path)
}
