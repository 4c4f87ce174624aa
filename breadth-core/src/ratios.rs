//! Breadth ratios over the daily aggregate series.
//!
//! The trailing-window ratios are computed over aggregate rows, not
//! calendar days — gaps between trading days are not filled. Division by
//! zero is defined behavior: positive infinity when the numerator is
//! positive, NaN when both sides are zero. The ratios are surfaced as-is.

use serde::{Deserialize, Serialize};

use crate::aggregate::DailyAggregate;
use crate::rolling::rolling_sum;

/// Trailing windows for the up4/dn4 ratios.
pub const RATIO_SHORT: usize = 5;
pub const RATIO_LONG: usize = 10;

/// A daily aggregate together with its derived ratios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreadthRecord {
    #[serde(flatten)]
    pub aggregate: DailyAggregate,
    /// Share of symbols above their 40-day moving average.
    pub t2108_ratio: f64,
    /// rollingSum(up4, 5) / rollingSum(dn4, 5).
    pub ratio_5d: f64,
    /// rollingSum(up4, 10) / rollingSum(dn4, 10).
    pub ratio_10d: f64,
}

/// Compute the three ratios over an ascending-by-date aggregate sequence,
/// then reorder descending by date for presentation.
pub fn compute_ratios(aggregates: Vec<DailyAggregate>) -> Vec<BreadthRecord> {
    let up4: Vec<f64> = aggregates.iter().map(|a| a.up_4pct as f64).collect();
    let dn4: Vec<f64> = aggregates.iter().map(|a| a.dn_4pct as f64).collect();

    let up4_5d = rolling_sum(&up4, RATIO_SHORT);
    let dn4_5d = rolling_sum(&dn4, RATIO_SHORT);
    let up4_10d = rolling_sum(&up4, RATIO_LONG);
    let dn4_10d = rolling_sum(&dn4, RATIO_LONG);

    let mut records: Vec<BreadthRecord> = aggregates
        .into_iter()
        .enumerate()
        .map(|(i, aggregate)| {
            let t2108_ratio = aggregate.above_ma40 as f64 / aggregate.symbol_count as f64;
            BreadthRecord {
                aggregate,
                t2108_ratio,
                ratio_5d: up4_5d[i] / dn4_5d[i],
                ratio_10d: up4_10d[i] / dn4_10d[i],
            }
        })
        .collect();

    records.reverse();
    records
}
