//! Immutable dataset context built once at startup.

use chrono::NaiveDate;
use tracing::info;

use crate::filter::{DateRange, FilterCriteria, FilteredRecords, apply_filter};
use crate::records::{DailyRecord, HourlyRecord, Season, WeatherSituation};

/// Owns both record sets plus the values the controls are bounded by.
///
/// Records must already be sorted by date; see [`crate::loader`].
#[derive(Debug, Clone)]
pub struct DatasetContext {
    daily: Vec<DailyRecord>,
    hourly: Vec<HourlyRecord>,
    date_bounds: Option<DateRange>,
    weather_options: Vec<WeatherSituation>,
}

impl DatasetContext {
    pub fn new(daily: Vec<DailyRecord>, hourly: Vec<HourlyRecord>) -> Self {
        let min = daily.iter().map(|r| r.date).min();
        let max = daily.iter().map(|r| r.date).max();
        let date_bounds = min.zip(max).map(|(start, end)| DateRange::new(start, end));

        let mut weather_options: Vec<WeatherSituation> = Vec::new();
        for record in &daily {
            if !weather_options.contains(&record.weather_situation) {
                weather_options.push(record.weather_situation.clone());
            }
        }

        info!(
            daily = daily.len(),
            hourly = hourly.len(),
            weather_options = weather_options.len(),
            "Dataset context ready"
        );

        Self {
            daily,
            hourly,
            date_bounds,
            weather_options,
        }
    }

    pub fn daily(&self) -> &[DailyRecord] {
        &self.daily
    }

    pub fn hourly(&self) -> &[HourlyRecord] {
        &self.hourly
    }

    /// Earliest and latest date of the daily set; `None` when it is empty.
    pub fn date_bounds(&self) -> Option<DateRange> {
        self.date_bounds
    }

    /// Distinct weather codes of the daily set, in first-seen order.
    pub fn weather_options(&self) -> &[WeatherSituation] {
        &self.weather_options
    }

    pub fn season_options(&self) -> &'static [Season] {
        &Season::ALL
    }

    /// Clamps `range` into the daily date bounds, swapping reversed ends.
    ///
    /// With no bounds (empty daily set) the range is returned as given.
    pub fn clamp(&self, range: DateRange) -> DateRange {
        let (start, end) = if range.start <= range.end {
            (range.start, range.end)
        } else {
            (range.end, range.start)
        };

        match self.date_bounds {
            Some(bounds) => DateRange::new(
                clamp_date(start, bounds),
                clamp_date(end, bounds),
            ),
            None => DateRange::new(start, end),
        }
    }

    /// Builds a range from optional ends, defaulting each to the bounds.
    pub fn range_or_bounds(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<DateRange> {
        let bounds = self.date_bounds;
        let start = start.or(bounds.map(|b| b.start))?;
        let end = end.or(bounds.map(|b| b.end))?;
        Some(self.clamp(DateRange::new(start, end)))
    }

    pub fn filter(&self, criteria: &FilterCriteria) -> FilteredRecords<'_> {
        apply_filter(&self.daily, &self.hourly, criteria)
    }
}

fn clamp_date(date: NaiveDate, bounds: DateRange) -> NaiveDate {
    date.clamp(bounds.start, bounds.end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn day(date: NaiveDate, weather: &str) -> DailyRecord {
        DailyRecord {
            date,
            season: Season::Spring,
            weather_situation: weather.into(),
            total_count: 1,
        }
    }

    fn sample_context() -> DatasetContext {
        DatasetContext::new(
            vec![
                day(date(2011, 1, 1), "Misty"),
                day(date(2011, 1, 2), "Clear"),
                day(date(2011, 1, 3), "Misty"),
                day(date(2011, 1, 10), "Light_RainSnow"),
            ],
            vec![],
        )
    }

    #[test]
    fn test_date_bounds() {
        let ctx = sample_context();
        assert_eq!(
            ctx.date_bounds(),
            Some(DateRange::new(date(2011, 1, 1), date(2011, 1, 10)))
        );
    }

    #[test]
    fn test_date_bounds_empty() {
        let ctx = DatasetContext::new(vec![], vec![]);
        assert_eq!(ctx.date_bounds(), None);
        assert!(ctx.weather_options().is_empty());
    }

    #[test]
    fn test_weather_options_in_first_seen_order() {
        let ctx = sample_context();
        let options: Vec<_> = ctx.weather_options().iter().map(|w| w.as_str()).collect();
        assert_eq!(options, vec!["Misty", "Clear", "Light_RainSnow"]);
    }

    #[test]
    fn test_clamp_to_bounds() {
        let ctx = sample_context();
        let clamped = ctx.clamp(DateRange::new(date(2010, 6, 1), date(2012, 1, 1)));
        assert_eq!(clamped, DateRange::new(date(2011, 1, 1), date(2011, 1, 10)));
    }

    #[test]
    fn test_clamp_swaps_reversed_range() {
        let ctx = sample_context();
        let clamped = ctx.clamp(DateRange::new(date(2011, 1, 5), date(2011, 1, 2)));
        assert_eq!(clamped, DateRange::new(date(2011, 1, 2), date(2011, 1, 5)));
    }

    #[test]
    fn test_range_or_bounds_defaults() {
        let ctx = sample_context();
        assert_eq!(
            ctx.range_or_bounds(Some(date(2011, 1, 3)), None),
            Some(DateRange::new(date(2011, 1, 3), date(2011, 1, 10)))
        );
        assert_eq!(DatasetContext::new(vec![], vec![]).range_or_bounds(None, None), None);
    }
}
