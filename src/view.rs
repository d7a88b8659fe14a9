//! One full filter cycle: filter both datasets, then build every chart table.

use serde::Serialize;
use tracing::info;

use crate::aggregations::types::{
    DailyTotal, HourTotal, HourlyTotals, MonthlyMax, SeasonShare, SeasonalTotals,
};
use crate::aggregations::{
    daily_trend, hourly_totals, monthly_maxima, ranked_hours, season_shares, seasonal_totals,
};
use crate::context::DatasetContext;
use crate::filter::FilterCriteria;

/// Snapshot of every table the dashboard draws for one set of criteria.
///
/// Hour and season tables come from the filtered hourly set; the monthly
/// maxima and daily trend come from the filtered daily set. The two sets are
/// independent measurements and are never reconciled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub criteria: FilterCriteria,
    pub daily_rows: usize,
    pub hourly_rows: usize,
    pub hourly_totals: HourlyTotals,
    pub busiest_hours: Vec<HourTotal>,
    pub quietest_hours: Vec<HourTotal>,
    /// Axis limit shared by both hour charts.
    pub peak_hour_total: Option<u64>,
    pub seasonal_totals: SeasonalTotals,
    pub season_shares: Vec<SeasonShare>,
    pub monthly_maxima: Vec<MonthlyMax>,
    pub daily_trend: Vec<DailyTotal>,
}

impl DashboardView {
    #[tracing::instrument(skip(ctx, criteria), fields(weather = %criteria.weather))]
    pub fn compute(ctx: &DatasetContext, criteria: &FilterCriteria, top_n: usize) -> Self {
        let filtered = ctx.filter(criteria);

        let ranked = ranked_hours(&filtered.hourly);
        let seasonal = seasonal_totals(&filtered.hourly);

        let view = DashboardView {
            criteria: criteria.clone(),
            daily_rows: filtered.daily.len(),
            hourly_rows: filtered.hourly.len(),
            hourly_totals: hourly_totals(&filtered.hourly),
            busiest_hours: ranked.top_busiest(top_n).to_vec(),
            quietest_hours: ranked.top_quietest(top_n).to_vec(),
            peak_hour_total: ranked.peak_total(),
            season_shares: season_shares(&seasonal),
            seasonal_totals: seasonal,
            monthly_maxima: monthly_maxima(&filtered.daily),
            daily_trend: daily_trend(&filtered.daily),
        };

        info!(
            daily_rows = view.daily_rows,
            hourly_rows = view.hourly_rows,
            hours = view.hourly_totals.len(),
            months = view.monthly_maxima.len(),
            "Dashboard view computed"
        );

        view
    }

    /// True when the criteria matched nothing in either dataset.
    pub fn is_empty(&self) -> bool {
        self.daily_rows == 0 && self.hourly_rows == 0
    }
}
