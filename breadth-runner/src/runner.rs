//! End-to-end monitor run: reference list, day range, pipeline, CSV.

use anyhow::{Context, Result};

use breadth_core::data::{calendar, BarProvider, FetchProgress, ReferenceProvider};
use breadth_core::pipeline::{self, PipelineOptions};
use breadth_core::ratios::BreadthRecord;

use crate::config::MonitorConfig;
use crate::export::write_csv;
use crate::fetch::fetch_days;

/// Summary of a completed monitor run.
#[derive(Debug)]
pub struct MonitorResult {
    /// The final breadth table, descending by date.
    pub records: Vec<BreadthRecord>,
    /// Reference tickers fetched (all asset types).
    pub tickers_total: usize,
    /// Reference tickers that are common stock.
    pub common_stocks: usize,
    pub days_requested: usize,
    pub days_with_data: usize,
    pub days_failed: usize,
}

/// Run the whole monitor: fetch the reference list and every trading day
/// in the configured range, run the pipeline, and write the CSV sink.
pub fn run_monitor(
    config: &MonitorConfig,
    bars: &dyn BarProvider,
    reference: &dyn ReferenceProvider,
    progress: &dyn FetchProgress,
) -> Result<MonitorResult> {
    config.validate()?;

    let tickers = reference
        .tickers()
        .context("failed to load reference ticker list")?;
    let tickers_total = tickers.len();
    let common_stocks = tickers.iter().filter(|t| t.is_common_stock()).count();

    let days = calendar::weekdays(config.start_date, config.end_date);
    let summary = fetch_days(bars, &days, config.cpu_fraction, progress)?;

    let options = PipelineOptions {
        exchange: config.exchange.clone(),
    };
    let records = pipeline::run(summary.bars, &tickers, &options)?;

    if records.is_empty() {
        // Not an error: the warm-up trim legitimately empties short runs.
        eprintln!(
            "warning: no rows after warm-up trim — the range {} to {} must cover \
             more than 65 trading days with data",
            config.start_date, config.end_date
        );
    }

    write_csv(&records, &config.output)?;

    Ok(MonitorResult {
        records,
        tickers_total,
        common_stocks,
        days_requested: summary.days_requested,
        days_with_data: summary.days_with_data,
        days_failed: summary.days_failed,
    })
}
