//! CSV export of the final breadth table.
//!
//! One row per date, descending (the order the pipeline hands over).
//! Non-finite ratios serialize as `inf` / `NaN` text — defined values,
//! never an error.

use std::path::Path;

use anyhow::{Context, Result};
use breadth_core::ratios::BreadthRecord;

/// Serialize breadth records to CSV text.
pub fn export_csv(records: &[BreadthRecord]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "date",
        "up_4pct",
        "dn_4pct",
        "up_25pct_qtr",
        "dn_25pct_qtr",
        "up_25pct_mnt",
        "dn_25pct_mnt",
        "up_50pct_mnt",
        "dn_50pct_mnt",
        "up_13pct_34d",
        "dn_13pct_34d",
        "above_ma40",
        "symbol_count",
        "t2108_ratio",
        "ratio_5d",
        "ratio_10d",
    ])?;

    for r in records {
        let a = &r.aggregate;
        wtr.write_record([
            &a.date.to_string(),
            &a.up_4pct.to_string(),
            &a.dn_4pct.to_string(),
            &a.up_25pct_qtr.to_string(),
            &a.dn_25pct_qtr.to_string(),
            &a.up_25pct_mnt.to_string(),
            &a.dn_25pct_mnt.to_string(),
            &a.up_50pct_mnt.to_string(),
            &a.dn_50pct_mnt.to_string(),
            &a.up_13pct_34d.to_string(),
            &a.dn_13pct_34d.to_string(),
            &a.above_ma40.to_string(),
            &a.symbol_count.to_string(),
            &format!("{:.6}", r.t2108_ratio),
            &format!("{:.6}", r.ratio_5d),
            &format!("{:.6}", r.ratio_10d),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Write breadth records to a CSV file, creating parent directories.
pub fn write_csv(records: &[BreadthRecord], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir: {}", parent.display()))?;
        }
    }
    let csv = export_csv(records)?;
    std::fs::write(path, csv).with_context(|| format!("write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use breadth_core::aggregate::DailyAggregate;
    use chrono::NaiveDate;

    fn record(day: u32, t2108: f64, ratio_5d: f64) -> BreadthRecord {
        BreadthRecord {
            aggregate: DailyAggregate {
                date: NaiveDate::from_ymd_opt(2024, 4, day).unwrap(),
                up_4pct: 120,
                dn_4pct: 40,
                above_ma40: 900,
                symbol_count: 3000,
                ..Default::default()
            },
            t2108_ratio: t2108,
            ratio_5d,
            ratio_10d: ratio_5d,
        }
    }

    #[test]
    fn header_has_all_columns() {
        let csv = export_csv(&[record(12, 0.3, 2.5)]).unwrap();
        let header = csv.lines().next().unwrap();
        let cols: Vec<&str> = header.split(',').collect();
        assert_eq!(cols.len(), 16);
        assert_eq!(cols[0], "date");
        assert!(cols.contains(&"t2108_ratio"));
        assert!(cols.contains(&"symbol_count"));
        assert!(cols.contains(&"ratio_10d"));
    }

    #[test]
    fn rows_preserve_input_order() {
        let csv = export_csv(&[record(12, 0.3, 2.5), record(11, 0.4, 1.0)]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("2024-04-12"));
        assert!(lines[2].starts_with("2024-04-11"));
    }

    #[test]
    fn nonfinite_ratios_serialize_without_panic() {
        let csv = export_csv(&[record(12, 0.3, f64::INFINITY)]).unwrap();
        assert!(csv.contains("inf"));
        let csv = export_csv(&[record(12, 0.3, f64::NAN)]).unwrap();
        assert!(csv.contains("NaN"));
    }

    #[test]
    fn empty_records_give_header_only() {
        let csv = export_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn write_csv_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.csv");
        write_csv(&[record(12, 0.3, 2.5)], &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("date,"));
    }
}
