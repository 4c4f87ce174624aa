//! Cross-sectional aggregation: flag sums per calendar date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::flags::FlagRecord;

/// Per-date sums of each flag across all symbols active that date, plus
/// the number of contributing symbols. Dates with no contributing symbols
/// produce no row at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
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
    pub above_ma40: u32,
    pub symbol_count: u32,
}

impl DailyAggregate {
    fn add(&mut self, flags: &FlagRecord) {
        self.up_4pct += flags.up_4pct;
        self.dn_4pct += flags.dn_4pct;
        self.up_25pct_qtr += flags.up_25pct_qtr;
        self.dn_25pct_qtr += flags.dn_25pct_qtr;
        self.up_25pct_mnt += flags.up_25pct_mnt;
        self.dn_25pct_mnt += flags.dn_25pct_mnt;
        self.up_50pct_mnt += flags.up_50pct_mnt;
        self.dn_50pct_mnt += flags.dn_50pct_mnt;
        self.up_13pct_34d += flags.up_13pct_34d;
        self.dn_13pct_34d += flags.dn_13pct_34d;
        self.above_ma40 += flags.above_ma40;
        self.symbol_count += 1;
    }
}

/// Group flag records by date and sum them. Output is ascending by date,
/// which the ratio calculator requires.
pub fn aggregate_by_date(flags: &[FlagRecord]) -> Vec<DailyAggregate> {
    let mut by_date: BTreeMap<NaiveDate, DailyAggregate> = BTreeMap::new();
    for rec in flags {
        let agg = by_date.entry(rec.date).or_insert_with(|| DailyAggregate {
            date: rec.date,
            ..Default::default()
        });
        agg.add(rec);
    }
    by_date.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag(symbol: &str, date: NaiveDate, up_4pct: u32, above_ma40: u32) -> FlagRecord {
        FlagRecord {
            symbol: symbol.into(),
            date,
            above_ma40,
            up_4pct,
            dn_4pct: 0,
            up_25pct_qtr: 0,
            dn_25pct_qtr: 0,
            up_25pct_mnt: 0,
            dn_25pct_mnt: 0,
            up_50pct_mnt: 0,
            dn_50pct_mnt: 0,
            up_13pct_34d: 0,
            dn_13pct_34d: 0,
        }
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn sums_flags_and_counts_symbols() {
        let flags = vec![
            flag("A", d(3), 1, 1),
            flag("B", d(3), 0, 1),
            flag("A", d(4), 1, 0),
        ];
        let aggs = aggregate_by_date(&flags);

        assert_eq!(aggs.len(), 2);
        assert_eq!(aggs[0].date, d(3));
        assert_eq!(aggs[0].up_4pct, 1);
        assert_eq!(aggs[0].above_ma40, 2);
        assert_eq!(aggs[0].symbol_count, 2);
        assert_eq!(aggs[1].date, d(4));
        assert_eq!(aggs[1].symbol_count, 1);
    }

    #[test]
    fn output_is_ascending_by_date() {
        let flags = vec![
            flag("A", d(10), 0, 0),
            flag("A", d(3), 0, 0),
            flag("A", d(7), 0, 0),
        ];
        let aggs = aggregate_by_date(&flags);
        let dates: Vec<_> = aggs.iter().map(|a| a.date).collect();
        assert_eq!(dates, vec![d(3), d(7), d(10)]);
    }

    #[test]
    fn absent_dates_produce_no_rows() {
        let flags = vec![flag("A", d(3), 0, 0), flag("A", d(5), 0, 0)];
        let aggs = aggregate_by_date(&flags);
        assert_eq!(aggs.len(), 2);
        assert!(aggs.iter().all(|a| a.date != d(4)));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(aggregate_by_date(&[]).is_empty());
    }
}
