//! Warm-up trimming.
//!
//! The 65-day rolling high/low indicators are not fully supported until 65
//! prior trading days exist, so the oldest 65 rows of the final table are
//! discarded. Callers must supply input covering at least 65 trading days
//! before the first date of interest; if they don't, the result is empty
//! rather than an error (matching the upstream behavior).

use crate::indicators::RANGE_QUARTER;
use crate::ratios::BreadthRecord;

/// Drop the trailing `RANGE_QUARTER` records of a descending-by-date
/// sequence (the oldest dates). A sequence of 65 or fewer records becomes
/// empty.
pub fn trim_warmup(mut records: Vec<BreadthRecord>) -> Vec<BreadthRecord> {
    let keep = records.len().saturating_sub(RANGE_QUARTER);
    records.truncate(keep);
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::DailyAggregate;
    use chrono::NaiveDate;

    fn records(n: usize) -> Vec<BreadthRecord> {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        // descending by date, newest first
        (0..n)
            .map(|i| BreadthRecord {
                aggregate: DailyAggregate {
                    date: base + chrono::Duration::days((n - 1 - i) as i64),
                    symbol_count: 1,
                    ..Default::default()
                },
                t2108_ratio: 0.0,
                ratio_5d: 0.0,
                ratio_10d: 0.0,
            })
            .collect()
    }

    #[test]
    fn exactly_65_rows_become_empty() {
        assert!(trim_warmup(records(65)).is_empty());
    }

    #[test]
    fn sixty_six_rows_keep_exactly_one() {
        let trimmed = trim_warmup(records(66));
        assert_eq!(trimmed.len(), 1);
        // the survivor is the newest date
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(
            trimmed[0].aggregate.date,
            base + chrono::Duration::days(65)
        );
    }

    #[test]
    fn fewer_rows_than_warmup_become_empty() {
        assert!(trim_warmup(records(10)).is_empty());
        assert!(trim_warmup(records(0)).is_empty());
    }

    #[test]
    fn drops_only_the_oldest() {
        let trimmed = trim_warmup(records(70));
        assert_eq!(trimmed.len(), 5);
        assert!(trimmed
            .windows(2)
            .all(|p| p[0].aggregate.date > p[1].aggregate.date));
    }
}
