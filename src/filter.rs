//! Filter stage: narrows both datasets by date range, season and weather.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::records::{DailyRecord, HourlyRecord, RentalRecord, Season, WeatherSituation};

/// Inclusive calendar-day interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Whether the season control picks one value or a set of values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SeasonMode {
    Single,
    #[default]
    Multi,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonSelection {
    Single(Season),
    /// An empty set places no constraint on season.
    Multi(Vec<Season>),
}

impl SeasonSelection {
    /// Builds the selection a season control in `mode` would produce.
    ///
    /// # Errors
    ///
    /// Single mode requires exactly one season.
    pub fn for_mode(mode: SeasonMode, mut seasons: Vec<Season>) -> Result<Self> {
        match mode {
            SeasonMode::Single => match seasons.as_slice() {
                [season] => Ok(SeasonSelection::Single(*season)),
                _ => bail!(
                    "single season mode expects exactly one season, got {}",
                    seasons.len()
                ),
            },
            SeasonMode::Multi => {
                seasons.sort();
                seasons.dedup();
                Ok(SeasonSelection::Multi(seasons))
            }
        }
    }

    pub fn matches(&self, season: Season) -> bool {
        match self {
            SeasonSelection::Single(selected) => *selected == season,
            SeasonSelection::Multi(selected) => selected.is_empty() || selected.contains(&season),
        }
    }
}

/// The date range, season selection and weather code of one interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub date_range: DateRange,
    pub seasons: SeasonSelection,
    pub weather: WeatherSituation,
}

impl FilterCriteria {
    pub fn new(date_range: DateRange, seasons: SeasonSelection, weather: WeatherSituation) -> Self {
        Self {
            date_range,
            seasons,
            weather,
        }
    }

    pub fn matches<R: RentalRecord>(&self, record: &R) -> bool {
        self.date_range.contains(record.date())
            && self.seasons.matches(record.season())
            && record.weather_situation() == &self.weather
    }
}

/// Borrowed, order-preserving subsequences of the two datasets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredRecords<'a> {
    pub daily: Vec<&'a DailyRecord>,
    pub hourly: Vec<&'a HourlyRecord>,
}

impl FilteredRecords<'_> {
    pub fn is_empty(&self) -> bool {
        self.daily.is_empty() && self.hourly.is_empty()
    }
}

/// Applies `criteria` to both datasets independently.
///
/// Input order is kept; records are expected to arrive sorted by date. An
/// empty result is a valid outcome, not an error.
pub fn apply_filter<'a>(
    daily: &'a [DailyRecord],
    hourly: &'a [HourlyRecord],
    criteria: &FilterCriteria,
) -> FilteredRecords<'a> {
    let filtered = FilteredRecords {
        daily: retain(daily, criteria),
        hourly: retain(hourly, criteria),
    };

    debug!(
        daily_in = daily.len(),
        daily_out = filtered.daily.len(),
        hourly_in = hourly.len(),
        hourly_out = filtered.hourly.len(),
        "Filter applied"
    );

    filtered
}

fn retain<'a, R: RentalRecord>(records: &'a [R], criteria: &FilterCriteria) -> Vec<&'a R> {
    records.iter().filter(|r| criteria.matches(*r)).collect()
}
