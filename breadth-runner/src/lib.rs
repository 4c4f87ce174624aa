//! Breadth Runner — orchestration around the core pipeline.
//!
//! Owns everything the core deliberately does not: run configuration,
//! parallel acquisition of the trading-day range, and persistence of the
//! final table to CSV.

pub mod config;
pub mod export;
pub mod fetch;
pub mod runner;

pub use config::MonitorConfig;
pub use export::{export_csv, write_csv};
pub use fetch::{fetch_days, FetchSummary};
pub use runner::{run_monitor, MonitorResult};
