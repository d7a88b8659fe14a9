use std::collections::BTreeMap;

use crate::aggregations::types::{MonthlyMax, YearMonth};
use crate::records::RentalRecord;

/// Highest `total_count` per calendar month, in chronological order.
///
/// Months without records produce no entry.
pub fn monthly_maxima<R: RentalRecord>(records: &[R]) -> Vec<MonthlyMax> {
    let mut maxima: BTreeMap<YearMonth, u64> = BTreeMap::new();
    for record in records {
        let max = maxima.entry(YearMonth::of(record.date())).or_default();
        *max = (*max).max(record.total_count());
    }

    maxima
        .into_iter()
        .map(|(month, max_count)| MonthlyMax { month, max_count })
        .collect()
}
