//! Data provider traits and structured error types.
//!
//! The traits abstract over the market-data source (Polygon in
//! production) so the runner and tests can mock both the grouped-daily
//! feed and the reference ticker list.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{Bar, TickerRef};

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("data error: {0}")]
    Other(String),
}

/// Supplies all symbols' daily bars for one trading day.
///
/// A day the market was closed (or the provider has nothing for) returns
/// an empty vec, not an error — absence of a day is normal.
pub trait BarProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch every symbol's bar for one trading day.
    fn grouped_daily(&self, day: NaiveDate) -> Result<Vec<Bar>, DataError>;
}

/// Supplies the reference list of tradable symbols.
pub trait ReferenceProvider: Send + Sync {
    /// Fetch the full active-ticker reference list (all pages).
    fn tickers(&self) -> Result<Vec<TickerRef>, DataError>;
}

/// Progress callback for multi-day fetches.
pub trait FetchProgress: Send + Sync {
    /// Called when starting to fetch a day.
    fn on_start(&self, day: NaiveDate, index: usize, total: usize);

    /// Called when a day's fetch completes with the number of bars
    /// returned (zero for closed days).
    fn on_complete(&self, day: NaiveDate, bar_count: usize);

    /// Called when the entire batch is done.
    fn on_batch_complete(&self, succeeded: usize, failed: usize, total: usize);
}

/// Simple progress reporter that prints to stdout.
pub struct StdoutProgress;

impl FetchProgress for StdoutProgress {
    fn on_start(&self, day: NaiveDate, index: usize, total: usize) {
        println!("[{}/{}] Processing {day}...", index + 1, total);
    }

    fn on_complete(&self, day: NaiveDate, bar_count: usize) {
        if bar_count == 0 {
            println!("  {day}: no results");
        }
    }

    fn on_batch_complete(&self, succeeded: usize, failed: usize, total: usize) {
        println!("\nFetch complete: {succeeded}/{total} days, {failed} failed");
    }
}

/// No-op progress reporter for tests and library callers.
pub struct SilentProgress;

impl FetchProgress for SilentProgress {
    fn on_start(&self, _day: NaiveDate, _index: usize, _total: usize) {}
    fn on_complete(&self, _day: NaiveDate, _bar_count: usize) {}
    fn on_batch_complete(&self, _succeeded: usize, _failed: usize, _total: usize) {}
}
