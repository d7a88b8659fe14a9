use crate::aggregations::types::{SeasonShare, SeasonalTotals};
use crate::aggregations::utility::pct;
use crate::records::RentalRecord;

/// Sums `total_count` per season over either record shape.
pub fn seasonal_totals<R: RentalRecord>(records: &[R]) -> SeasonalTotals {
    let mut totals = SeasonalTotals::new();
    for record in records {
        *totals.entry(record.season()).or_default() += record.total_count();
    }
    totals
}

/// Each season's share of the combined total, in percent, for pie labels.
pub fn season_shares(totals: &SeasonalTotals) -> Vec<SeasonShare> {
    let sum: u64 = totals.values().sum();
    totals
        .iter()
        .map(|(&season, &total_count)| SeasonShare {
            season,
            total_count,
            pct: pct(total_count, sum),
        })
        .collect()
}
