//! Breadth Core — market-breadth indicator engine.
//!
//! This crate contains the whole computation path from a raw per-symbol,
//! per-day bar panel to the final breadth table:
//! - Domain types (bars, reference tickers)
//! - Windowed-aggregate primitives (rolling mean/min/max/sum, lag, pct change)
//! - Per-symbol indicator computation
//! - Condition-flag evaluation
//! - Cross-sectional aggregation, ratio calculation, warm-up trimming
//! - Data-provider traits and the Polygon implementation
//!
//! Missing values are `f64::NAN` throughout. Boolean conditions over NaN
//! operands are false by IEEE comparison semantics, which is exactly the
//! behavior the flag evaluator needs — a symbol without enough history
//! simply never sets a flag.

pub mod aggregate;
pub mod data;
pub mod domain;
pub mod flags;
pub mod indicators;
pub mod pipeline;
pub mod ratios;
pub mod rolling;
pub mod warmup;
