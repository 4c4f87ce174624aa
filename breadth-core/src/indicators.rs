//! Per-symbol indicator computation.
//!
//! A `SymbolSeries` holds one symbol's bars in strictly ascending date
//! order; the constructor enforces the ordering because every rolling and
//! lag field silently corrupts if it is violated. `compute_indicators`
//! produces one `IndicatorRecord` per bar, aligned by index.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::Bar;
use crate::rolling::{lag, pct_change, rolling_max, rolling_mean, rolling_min};

/// Rolling windows used by the indicator set.
pub const MA_SHORT: usize = 20;
pub const MA_LONG: usize = 40;
pub const RANGE_MONTH: usize = 34;
pub const RANGE_QUARTER: usize = 65;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("bars for {symbol} are not in ascending date order at {date}")]
    OutOfOrder { symbol: String, date: NaiveDate },

    #[error("duplicate bar for {symbol} on {date}")]
    DuplicateDate { symbol: String, date: NaiveDate },
}

/// One symbol's bars, strictly increasing by date.
#[derive(Debug, Clone)]
pub struct SymbolSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl SymbolSeries {
    /// Build a series from bars that are already sorted ascending by date.
    /// Rejects out-of-order or duplicate dates.
    pub fn new(symbol: String, bars: Vec<Bar>) -> Result<Self, SeriesError> {
        for pair in bars.windows(2) {
            match pair[0].date.cmp(&pair[1].date) {
                std::cmp::Ordering::Less => {}
                std::cmp::Ordering::Equal => {
                    return Err(SeriesError::DuplicateDate {
                        symbol: symbol.clone(),
                        date: pair[1].date,
                    })
                }
                std::cmp::Ordering::Greater => {
                    return Err(SeriesError::OutOfOrder {
                        symbol: symbol.clone(),
                        date: pair[1].date,
                    })
                }
            }
        }
        Ok(Self { symbol, bars })
    }

    /// Sort unordered bars by date, then build the series. Duplicates are
    /// still rejected.
    pub fn from_unsorted(symbol: String, mut bars: Vec<Bar>) -> Result<Self, SeriesError> {
        bars.sort_by_key(|b| b.date);
        Self::new(symbol, bars)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Derived rolling/lag fields for one (symbol, date). NaN means the field
/// has no value yet (lags and pct change); the windowed aggregates use a
/// minimum period of one and are always defined.
#[derive(Debug, Clone)]
pub struct IndicatorRecord {
    pub pct_change: f64,
    pub ma20: f64,
    pub dollar_vol_ma20: f64,
    pub prior_volume: f64,
    pub close_lag20: f64,
    pub low_min34: f64,
    pub high_max34: f64,
    pub low_min65: f64,
    pub high_max65: f64,
    pub ma40: f64,
}

/// Compute the full indicator set for one symbol's series.
///
/// Independent across symbols, strictly sequential within a series: each
/// index depends only on earlier indices of the same symbol.
pub fn compute_indicators(series: &SymbolSeries) -> Vec<IndicatorRecord> {
    let closes: Vec<f64> = series.bars().iter().map(|b| b.close).collect();
    let highs: Vec<f64> = series.bars().iter().map(|b| b.high).collect();
    let lows: Vec<f64> = series.bars().iter().map(|b| b.low).collect();
    let volumes: Vec<f64> = series.bars().iter().map(|b| b.volume).collect();
    let dollar_vols: Vec<f64> = series.bars().iter().map(|b| b.dollar_volume()).collect();

    let pct = pct_change(&closes);
    let ma20 = rolling_mean(&closes, MA_SHORT);
    let dollar_vol_ma20 = rolling_mean(&dollar_vols, MA_SHORT);
    let prior_volume = lag(&volumes, 1);
    let close_lag20 = lag(&closes, MA_SHORT);
    let low_min34 = rolling_min(&lows, RANGE_MONTH);
    let high_max34 = rolling_max(&highs, RANGE_MONTH);
    let low_min65 = rolling_min(&lows, RANGE_QUARTER);
    let high_max65 = rolling_max(&highs, RANGE_QUARTER);
    let ma40 = rolling_mean(&closes, MA_LONG);

    (0..series.len())
        .map(|i| IndicatorRecord {
            pct_change: pct[i],
            ma20: ma20[i],
            dollar_vol_ma20: dollar_vol_ma20[i],
            prior_volume: prior_volume[i],
            close_lag20: close_lag20[i],
            low_min34: low_min34[i],
            high_max34: high_max34[i],
            low_min65: low_min65[i],
            high_max65: high_max65[i],
            ma40: ma40[i],
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn make_bars(symbol: &str, closes: &[f64]) -> Vec<Bar> {
    let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                symbol: symbol.to_string(),
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}
