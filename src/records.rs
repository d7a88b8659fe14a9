//! Record shapes for the daily and hourly bike-rental datasets.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar season attached to every record.
///
/// Variants are declared in calendar order so that ordered maps keyed by
/// season iterate Spring → Winter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a season name or code is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSeasonError(pub String);

impl fmt::Display for ParseSeasonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown season '{}' (expected Spring, Summer, Fall, Winter or 1-4)",
            self.0
        )
    }
}

impl std::error::Error for ParseSeasonError {}

impl FromStr for Season {
    type Err = ParseSeasonError;

    /// Accepts season names in any case, `autumn`, and the numeric codes
    /// 1–4 used by the raw UCI bike-sharing files.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spring" | "1" => Ok(Season::Spring),
            "summer" | "2" => Ok(Season::Summer),
            "fall" | "autumn" | "3" => Ok(Season::Fall),
            "winter" | "4" => Ok(Season::Winter),
            _ => Err(ParseSeasonError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Season {
    type Error = ParseSeasonError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Categorical weather code, compared by exact value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherSituation(pub String);

impl WeatherSituation {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WeatherSituation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WeatherSituation {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// One row of the daily dataset. Unique by `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    #[serde(rename = "dteday")]
    pub date: NaiveDate,
    pub season: Season,
    #[serde(rename = "weathersit")]
    pub weather_situation: WeatherSituation,
    #[serde(alias = "cnt")]
    pub total_count: u64,
}

/// One row of the hourly dataset. Unique by `(date, hour)`.
///
/// Hourly counts are measured independently of the daily set; the sum over a
/// day is not expected to match the corresponding [`DailyRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyRecord {
    #[serde(rename = "dteday")]
    pub date: NaiveDate,
    #[serde(alias = "hr")]
    pub hour: u8,
    pub season: Season,
    #[serde(rename = "weathersit")]
    pub weather_situation: WeatherSituation,
    #[serde(alias = "cnt")]
    pub total_count: u64,
}

/// Fields shared by both record shapes.
pub trait RentalRecord {
    fn date(&self) -> NaiveDate;
    fn season(&self) -> Season;
    fn weather_situation(&self) -> &WeatherSituation;
    fn total_count(&self) -> u64;
}

impl RentalRecord for DailyRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn season(&self) -> Season {
        self.season
    }

    fn weather_situation(&self) -> &WeatherSituation {
        &self.weather_situation
    }

    fn total_count(&self) -> u64 {
        self.total_count
    }
}

impl RentalRecord for HourlyRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn season(&self) -> Season {
        self.season
    }

    fn weather_situation(&self) -> &WeatherSituation {
        &self.weather_situation
    }

    fn total_count(&self) -> u64 {
        self.total_count
    }
}

impl<R: RentalRecord + ?Sized> RentalRecord for &R {
    fn date(&self) -> NaiveDate {
        (**self).date()
    }

    fn season(&self) -> Season {
        (**self).season()
    }

    fn weather_situation(&self) -> &WeatherSituation {
        (**self).weather_situation()
    }

    fn total_count(&self) -> u64 {
        (**self).total_count()
    }
}
