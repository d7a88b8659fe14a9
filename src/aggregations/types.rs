//! Table shapes produced by the aggregation stage.

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::records::Season;

/// Rentals summed per hour of day, ordered by hour.
pub type HourlyTotals = BTreeMap<u8, u64>;

/// Rentals summed per season, ordered Spring → Winter.
pub type SeasonalTotals = BTreeMap<Season, u64>;

/// Summed rentals for one hour of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourTotal {
    pub hour: u8,
    pub total_count: u64,
}

/// The grouped hourly totals in the two orders the charts use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RankedHours {
    /// Descending by total; ties keep ascending-hour order.
    pub busiest: Vec<HourTotal>,
    /// Ascending by hour.
    pub chronological: Vec<HourTotal>,
}

/// One pie slice: a season's total and its share of all seasons, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeasonShare {
    pub season: Season,
    pub total_count: u64,
    pub pct: f64,
}

/// Calendar month key. Displays and serialises as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Highest single-day rental count within a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyMax {
    pub month: YearMonth,
    pub max_count: u64,
}

/// Rentals summed for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_month_display() {
        assert_eq!(YearMonth::new(2011, 1).to_string(), "2011-01");
        assert_eq!(
            YearMonth::of(NaiveDate::from_ymd_opt(2012, 12, 31).unwrap()).to_string(),
            "2012-12"
        );
    }

    #[test]
    fn test_year_month_orders_chronologically() {
        assert!(YearMonth::new(2011, 12) < YearMonth::new(2012, 1));
        assert!(YearMonth::new(2012, 2) < YearMonth::new(2012, 10));
    }

    #[test]
    fn test_year_month_serializes_as_string() {
        let row = MonthlyMax {
            month: YearMonth::new(2012, 3),
            max_count: 7,
        };
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"{"month":"2012-03","max_count":7}"#
        );
    }
}
