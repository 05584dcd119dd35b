use std::io;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use earnings_report::service::command::collect_symbols;
use earnings_report::service::finance::FinanceService;
use earnings_report::service::report::{self, ReportError};
use earnings_report::AppConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = AppConfig::from_env().context("loading configuration")?;
    info!("Initializing FinanceService against {}...", config.base_url);
    let finance = FinanceService::new(&config)?;

    let today = Local::now().date_naive();

    let calendar = match report::fetch_week_calendar(&finance, today).await {
        Ok(calendar) => calendar,
        Err(err) => return abort(err),
    };

    let symbols = collect_symbols(io::stdin().lock(), io::stdout())?;

    match report::generate_report_from_calendar(
        &finance,
        &calendar,
        &symbols,
        today,
        &config.output_dir,
    )
    .await
    {
        Ok(path) => {
            println!("Earnings report saved as {}.", path.display());
            println!("Earnings report generation complete.");
            Ok(())
        }
        Err(err) => abort(err),
    }
}

fn abort(err: ReportError) -> Result<()> {
    let err = anyhow::Error::from(err);
    error!("{err:#}");
    println!("Exiting program.");
    Err(err)
}
