//! Breadth CLI — run the market-breadth monitor.
//!
//! Commands:
//! - `run` — fetch the reference list and day range from Polygon, compute
//!   the breadth table, and write the CSV
//! - `calendar` — count the trading weekdays in a range (useful for
//!   checking the 65-day warm-up requirement before spending API calls)

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use breadth_core::data::{calendar, PolygonProvider, StdoutProgress};
use breadth_runner::{run_monitor, MonitorConfig, MonitorResult};

#[derive(Parser, Debug)]
#[command(
    name = "breadth",
    about = "Market-breadth monitor — daily advance/decline and breakout counts"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the monitor over a date range and write the breadth CSV.
    Run {
        /// Path to a TOML config file. Mutually exclusive with the
        /// inline flags below.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Polygon API key (required without --config).
        #[arg(long, conflicts_with = "config")]
        api_key: Option<String>,

        /// Start date (YYYY-MM-DD). The range must cover at least 65
        /// trading days before the first date of interest.
        #[arg(long, conflicts_with = "config")]
        start: Option<String>,

        /// End date (YYYY-MM-DD).
        #[arg(long, conflicts_with = "config")]
        end: Option<String>,

        /// Restrict to one primary exchange MIC (e.g. XNYS, XNAS).
        #[arg(long, conflicts_with = "config")]
        exchange: Option<String>,

        /// Output CSV path.
        #[arg(long, default_value = "MarketMonitor.csv", conflicts_with = "config")]
        output: PathBuf,
    },
    /// Count the trading weekdays in a date range.
    Calendar {
        /// Start date (YYYY-MM-DD).
        start: String,

        /// End date (YYYY-MM-DD).
        end: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            api_key,
            start,
            end,
            exchange,
            output,
        } => run_cmd(config, api_key, start, end, exchange, output),
        Commands::Calendar { start, end } => calendar_cmd(&start, &end),
    }
}

fn run_cmd(
    config_path: Option<PathBuf>,
    api_key: Option<String>,
    start: Option<String>,
    end: Option<String>,
    exchange: Option<String>,
    output: PathBuf,
) -> Result<()> {
    let config = if let Some(path) = config_path {
        MonitorConfig::from_file(&path)?
    } else {
        let Some(api_key) = api_key else {
            bail!("--api-key is required without --config");
        };
        let (Some(start), Some(end)) = (start, end) else {
            bail!("--start and --end are required without --config");
        };
        let config = MonitorConfig {
            api_key,
            start_date: parse_date(&start)?,
            end_date: parse_date(&end)?,
            exchange,
            output,
            cpu_fraction: 0.75,
        };
        config.validate()?;
        config
    };

    let provider = PolygonProvider::new(config.api_key.clone());
    let result = run_monitor(&config, &provider, &provider, &StdoutProgress)?;

    print_summary(&config, &result);
    Ok(())
}

fn calendar_cmd(start: &str, end: &str) -> Result<()> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    let days = calendar::weekdays(start, end);
    println!("{} trading weekdays from {start} to {end}", days.len());
    if days.len() <= 65 {
        println!(
            "note: 65 warm-up days are trimmed — this range would produce {} output rows",
            days.len().saturating_sub(65)
        );
    }
    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
}


fn print_summary(config: &MonitorConfig, result: &MonitorResult) {
    println!();
    println!("=== Market Monitor ===");
    println!(
        "Period:         {} to {}",
        config.start_date, config.end_date
    );
    println!(
        "Tickers:        {} ({} common stock)",
        result.tickers_total, result.common_stocks
    );
    println!(
        "Days:           {} requested, {} with data, {} failed",
        result.days_requested, result.days_with_data, result.days_failed
    );
    println!("Rows:           {}", result.records.len());
    println!("Output:         {}", config.output.display());

    if let Some(latest) = result.records.first() {
        let a = &latest.aggregate;
        println!();
        println!("--- Latest ({}) ---", a.date);
        println!("Up 4% / Dn 4%:  {} / {}", a.up_4pct, a.dn_4pct);
        println!("T2108:          {:.1}%", latest.t2108_ratio * 100.0);
        println!("5-day ratio:    {:.2}", latest.ratio_5d);
        println!("10-day ratio:   {:.2}", latest.ratio_10d);
        println!("Symbols:        {}", a.symbol_count);
    }
    println!();
}
