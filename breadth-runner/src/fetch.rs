//! Parallel acquisition of the trading-day range.
//!
//! One grouped-daily request per weekday, fanned out on a dedicated rayon
//! pool sized to a fraction of the available CPUs. Days that fail or come
//! back empty are skipped, not fatal — the pipeline treats an absent day
//! as absence, and the summary reports the counts.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rayon::prelude::*;

use breadth_core::data::{BarProvider, FetchProgress};
use breadth_core::domain::Bar;

/// Outcome of a multi-day fetch.
#[derive(Debug)]
pub struct FetchSummary {
    /// All bars across all successfully fetched days.
    pub bars: Vec<Bar>,
    pub days_requested: usize,
    pub days_with_data: usize,
    pub days_empty: usize,
    pub days_failed: usize,
}

fn worker_count(cpu_fraction: f64) -> usize {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    ((cpus as f64 * cpu_fraction) as usize).max(1)
}

/// Fetch every day in `days` from the provider, in parallel.
pub fn fetch_days(
    provider: &dyn BarProvider,
    days: &[NaiveDate],
    cpu_fraction: f64,
    progress: &dyn FetchProgress,
) -> Result<FetchSummary> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(worker_count(cpu_fraction))
        .build()
        .context("failed to build fetch thread pool")?;

    let total = days.len();
    let per_day: Vec<Option<Vec<Bar>>> = pool.install(|| {
        days.par_iter()
            .enumerate()
            .map(|(index, &day)| {
                progress.on_start(day, index, total);
                match provider.grouped_daily(day) {
                    Ok(bars) => {
                        progress.on_complete(day, bars.len());
                        Some(bars)
                    }
                    Err(e) => {
                        eprintln!("  {day}: fetch failed: {e}");
                        None
                    }
                }
            })
            .collect()
    });

    let days_failed = per_day.iter().filter(|d| d.is_none()).count();
    let days_empty = per_day
        .iter()
        .filter(|d| matches!(d, Some(bars) if bars.is_empty()))
        .count();
    let days_with_data = total - days_failed - days_empty;

    let bars: Vec<Bar> = per_day.into_iter().flatten().flatten().collect();
    progress.on_batch_complete(total - days_failed, days_failed, total);

    Ok(FetchSummary {
        bars,
        days_requested: total,
        days_with_data,
        days_empty,
        days_failed,
    })
}
