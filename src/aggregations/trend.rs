use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::aggregations::types::DailyTotal;
use crate::records::RentalRecord;

/// Rentals per calendar day in chronological order; repeated dates are summed.
pub fn daily_trend<R: RentalRecord>(records: &[R]) -> Vec<DailyTotal> {
    let mut totals: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in records {
        *totals.entry(record.date()).or_default() += record.total_count();
    }

    totals
        .into_iter()
        .map(|(date, total_count)| DailyTotal { date, total_count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{DailyRecord, Season};

    fn day(d: u32, total: u64) -> DailyRecord {
        DailyRecord {
            date: NaiveDate::from_ymd_opt(2012, 4, d).unwrap(),
            season: Season::Spring,
            weather_situation: "Clear".into(),
            total_count: total,
        }
    }

    #[test]
    fn test_daily_trend_one_entry_per_date() {
        let records = vec![day(1, 100), day(2, 200), day(3, 150)];
        let trend = daily_trend(&records);

        let totals: Vec<_> = trend.iter().map(|t| t.total_count).collect();
        assert_eq!(totals, vec![100, 200, 150]);
        assert_eq!(trend[0].date, NaiveDate::from_ymd_opt(2012, 4, 1).unwrap());
    }

    #[test]
    fn test_daily_trend_sums_duplicate_dates_and_sorts() {
        let records = vec![day(5, 1), day(2, 10), day(5, 2)];
        let trend = daily_trend(&records);

        assert_eq!(
            trend,
            vec![
                DailyTotal {
                    date: NaiveDate::from_ymd_opt(2012, 4, 2).unwrap(),
                    total_count: 10
                },
                DailyTotal {
                    date: NaiveDate::from_ymd_opt(2012, 4, 5).unwrap(),
                    total_count: 3
                },
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let records: Vec<DailyRecord> = vec![];
        assert!(daily_trend(&records).is_empty());
    }
}
