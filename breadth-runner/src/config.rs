//! Serializable monitor run configuration.
//!
//! Replaces the module-level globals of ad-hoc scripts (API key, exchange,
//! date range) with an explicit object passed into the runner.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_output() -> PathBuf {
    PathBuf::from("MarketMonitor.csv")
}

fn default_cpu_fraction() -> f64 {
    0.75
}

/// Configuration for one monitor run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Polygon API key.
    pub api_key: String,

    /// First calendar date of the range (inclusive). The range must cover
    /// at least 65 trading days before the first date of interest, or the
    /// warm-up trim leaves nothing.
    pub start_date: NaiveDate,

    /// Last calendar date of the range (inclusive).
    pub end_date: NaiveDate,

    /// Optional primary-exchange MIC filter (e.g. "XNYS", "XNAS").
    /// Absent means all exchanges.
    #[serde(default)]
    pub exchange: Option<String>,

    /// Output CSV path.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Fraction of available CPUs to use for the day fetch, in (0, 1].
    #[serde(default = "default_cpu_fraction")]
    pub cpu_fraction: f64,
}

impl MonitorConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config file: {}", path.display()))?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string and validate it.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            bail!("api_key must not be empty");
        }
        if self.end_date < self.start_date {
            bail!(
                "end_date {} is before start_date {}",
                self.end_date,
                self.start_date
            );
        }
        if !(self.cpu_fraction > 0.0 && self.cpu_fraction <= 1.0) {
            bail!("cpu_fraction must be in (0, 1], got {}", self.cpu_fraction);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
api_key = "test-key"
start_date = "2023-01-01"
end_date = "2024-04-12"
"#;

    #[test]
    fn minimal_config_gets_defaults() {
        let config = MonitorConfig::from_toml(MINIMAL).unwrap();
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.exchange, None);
        assert_eq!(config.output, PathBuf::from("MarketMonitor.csv"));
        assert!((config.cpu_fraction - 0.75).abs() < 1e-12);
    }

    #[test]
    fn full_config_roundtrips() {
        let toml_str = r#"
api_key = "k"
start_date = "2024-01-01"
end_date = "2024-06-01"
exchange = "XNYS"
output = "out/monitor.csv"
cpu_fraction = 0.5
"#;
        let config = MonitorConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.exchange.as_deref(), Some("XNYS"));
        assert_eq!(config.output, PathBuf::from("out/monitor.csv"));

        let serialized = toml::to_string(&config).unwrap();
        let reparsed = MonitorConfig::from_toml(&serialized).unwrap();
        assert_eq!(reparsed.start_date, config.start_date);
        assert_eq!(reparsed.exchange, config.exchange);
    }

    #[test]
    fn rejects_empty_api_key() {
        let toml_str = r#"
api_key = "  "
start_date = "2024-01-01"
end_date = "2024-06-01"
"#;
        assert!(MonitorConfig::from_toml(toml_str).is_err());
    }

    #[test]
    fn rejects_reversed_date_range() {
        let toml_str = r#"
api_key = "k"
start_date = "2024-06-01"
end_date = "2024-01-01"
"#;
        assert!(MonitorConfig::from_toml(toml_str).is_err());
    }

    #[test]
    fn rejects_bad_cpu_fraction() {
        let toml_str = r#"
api_key = "k"
start_date = "2024-01-01"
end_date = "2024-06-01"
cpu_fraction = 1.5
"#;
        assert!(MonitorConfig::from_toml(toml_str).is_err());
    }
}
