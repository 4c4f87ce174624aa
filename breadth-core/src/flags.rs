//! Condition-flag evaluation.
//!
//! Pure per-(symbol, date) mapping from a bar and its indicator record to
//! the eleven 0/1 breadth flags. All comparisons against NaN operands are
//! false, so a symbol without enough history never raises a flag.
//!
//! The gating is deliberately asymmetric: the 4% single-day moves are
//! gated on volume conditions, while the larger multi-day moves are gated
//! on liquidity and a minimum prior price instead. This matches the
//! upstream breadth definition and must not be unified.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Bar;
use crate::indicators::IndicatorRecord;

/// Minimum share volume for the 4% move flags.
pub const MIN_VOLUME: f64 = 100_000.0;
/// Minimum 20-day average dollar volume for the liquidity gate.
pub const MIN_DOLLAR_VOL_MA20: f64 = 250_000.0;
/// Minimum close 20 days ago for the minimum-price gate.
pub const MIN_PRIOR_PRICE: f64 = 5.0;

/// The eleven 0/1 breadth flags for one (symbol, date).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagRecord {
    pub symbol: String,
    pub date: NaiveDate,
    pub above_ma40: u32,
    pub up_4pct: u32,
    pub dn_4pct: u32,
    pub up_25pct_qtr: u32,
    pub dn_25pct_qtr: u32,
    pub up_25pct_mnt: u32,
    pub dn_25pct_mnt: u32,
    pub up_50pct_mnt: u32,
    pub dn_50pct_mnt: u32,
    pub up_13pct_34d: u32,
    pub dn_13pct_34d: u32,
}

fn as_flag(cond: bool) -> u32 {
    cond as u32
}

/// Evaluate the flag set for one symbol-day.
pub fn evaluate(bar: &Bar, ind: &IndicatorRecord) -> FlagRecord {
    let cond_min_vol = bar.volume > MIN_VOLUME;
    let cond_vol = bar.volume > ind.prior_volume;
    let cond_liquid = ind.dollar_vol_ma20 >= MIN_DOLLAR_VOL_MA20;
    let cond_min_price = ind.close_lag20 >= MIN_PRIOR_PRICE;

    FlagRecord {
        symbol: bar.symbol.clone(),
        date: bar.date,
        above_ma40: as_flag(bar.close > ind.ma40),
        up_4pct: as_flag(ind.pct_change >= 0.04 && cond_min_vol && cond_vol),
        dn_4pct: as_flag(ind.pct_change <= -0.04 && cond_min_vol && cond_vol),
        up_25pct_qtr: as_flag(bar.close >= 1.25 * ind.low_min65 && cond_liquid),
        dn_25pct_qtr: as_flag(bar.close <= 0.75 * ind.high_max65 && cond_liquid),
        up_25pct_mnt: as_flag(bar.close >= 1.25 * ind.close_lag20 && cond_liquid && cond_min_price),
        dn_25pct_mnt: as_flag(bar.close <= 0.75 * ind.close_lag20 && cond_liquid && cond_min_price),
        up_50pct_mnt: as_flag(bar.close >= 1.5 * ind.close_lag20 && cond_liquid && cond_min_price),
        dn_50pct_mnt: as_flag(bar.close <= 0.5 * ind.close_lag20 && cond_liquid && cond_min_price),
        up_13pct_34d: as_flag(bar.close >= 1.13 * ind.low_min34 && cond_liquid),
        dn_13pct_34d: as_flag(bar.close <= 0.87 * ind.high_max34 && cond_liquid),
    }
}
