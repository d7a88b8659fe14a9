use std::borrow::Borrow;

use crate::aggregations::types::{HourTotal, HourlyTotals, RankedHours};
use crate::records::HourlyRecord;

/// How many bars the busiest/quietest hour charts show by default.
pub const DEFAULT_TOP_N: usize = 5;

/// Sums `total_count` per hour of day. Hours with no records are absent.
pub fn hourly_totals<R: Borrow<HourlyRecord>>(records: &[R]) -> HourlyTotals {
    let mut totals = HourlyTotals::new();
    for record in records {
        let record = record.borrow();
        *totals.entry(record.hour).or_default() += record.total_count;
    }
    totals
}

/// Groups like [`hourly_totals`] and returns the totals both by rank and by hour.
pub fn ranked_hours<R: Borrow<HourlyRecord>>(records: &[R]) -> RankedHours {
    let chronological: Vec<HourTotal> = hourly_totals(records)
        .into_iter()
        .map(|(hour, total_count)| HourTotal { hour, total_count })
        .collect();

    let mut busiest = chronological.clone();
    // sort_by is stable, so equal totals stay in hour order
    busiest.sort_by(|a, b| b.total_count.cmp(&a.total_count));

    RankedHours {
        busiest,
        chronological,
    }
}

impl RankedHours {
    /// The `n` hours with the most rentals.
    pub fn top_busiest(&self, n: usize) -> &[HourTotal] {
        &self.busiest[..n.min(self.busiest.len())]
    }

    /// The first `n` hours of the day that had any rentals.
    pub fn top_quietest(&self, n: usize) -> &[HourTotal] {
        &self.chronological[..n.min(self.chronological.len())]
    }

    /// Largest hourly total, shared as the axis limit of both hour charts.
    pub fn peak_total(&self) -> Option<u64> {
        self.busiest.first().map(|h| h.total_count)
    }

    pub fn is_empty(&self) -> bool {
        self.chronological.is_empty()
    }
}
