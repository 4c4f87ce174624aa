//! The breadth pipeline: raw bar panel in, final breadth table out.
//!
//! Stages, in order:
//! 1. Inner join against the reference list, keeping common stock only
//!    (optionally restricted to one primary exchange).
//! 2. Group bars by symbol, sort each series ascending by date, reject
//!    duplicate (symbol, date) pairs.
//! 3. Per-symbol indicators + flags, in parallel across symbols (rayon).
//!    Symbols share no state; the join point is the collect.
//! 4. Cross-sectional aggregation per date (ascending).
//! 5. Ratio calculation, then descending reorder.
//! 6. Warm-up trim.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;
use thiserror::Error;

use crate::aggregate::aggregate_by_date;
use crate::domain::{Bar, TickerRef};
use crate::flags::{self, FlagRecord};
use crate::indicators::{compute_indicators, SeriesError, SymbolSeries};
use crate::ratios::{compute_ratios, BreadthRecord};
use crate::warmup::trim_warmup;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Series(#[from] SeriesError),
}

/// Options for the pipeline entry point.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Restrict the universe to one primary exchange MIC (e.g. "XNYS").
    /// None means all exchanges.
    pub exchange: Option<String>,
}

/// Run the full pipeline over a raw bar panel and a reference ticker list.
///
/// Symbols with bars but no matching common-stock reference entry are
/// silently excluded. The result is descending by date with the warm-up
/// rows removed; fewer than 66 trading days of input yields an empty
/// result.
pub fn run(
    bars: Vec<Bar>,
    tickers: &[TickerRef],
    options: &PipelineOptions,
) -> Result<Vec<BreadthRecord>, PipelineError> {
    let universe: HashSet<&str> = tickers
        .iter()
        .filter(|t| t.is_common_stock())
        .filter(|t| match &options.exchange {
            Some(mic) => t.on_exchange(mic),
            None => true,
        })
        .map(|t| t.symbol.as_str())
        .collect();

    let mut by_symbol: HashMap<String, Vec<Bar>> = HashMap::new();
    for bar in bars {
        if universe.contains(bar.symbol.as_str()) {
            by_symbol.entry(bar.symbol.clone()).or_default().push(bar);
        }
    }

    let series: Vec<SymbolSeries> = by_symbol
        .into_iter()
        .map(|(symbol, bars)| SymbolSeries::from_unsorted(symbol, bars))
        .collect::<Result<_, _>>()?;

    // Per-symbol computation is embarrassingly parallel; within one series
    // each index depends on earlier indices, so the series itself is
    // processed sequentially.
    let flags: Vec<FlagRecord> = series
        .par_iter()
        .flat_map_iter(|s| {
            let indicators = compute_indicators(s);
            s.bars()
                .iter()
                .zip(indicators)
                .map(|(bar, ind)| flags::evaluate(bar, &ind))
                .collect::<Vec<_>>()
        })
        .collect();

    let aggregates = aggregate_by_date(&flags);
    let records = compute_ratios(aggregates);
    Ok(trim_warmup(records))
}
