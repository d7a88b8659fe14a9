//! CSV ingestion for the daily and hourly datasets.
//!
//! Both loaders return records sorted by date (hourly: by date, then hour).
//! The filter stage preserves input order and never re-sorts, so this is the
//! only place the ordering is established.

use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::records::{DailyRecord, HourlyRecord};

/// Loads the daily dataset from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or any row fails to parse.
#[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_daily(path: impl AsRef<Path>) -> Result<Vec<DailyRecord>> {
    let path = path.as_ref();
    let mut rows: Vec<DailyRecord> = read_rows(path)?;
    rows.sort_by_key(|r| r.date);

    let mut seen = HashSet::new();
    let duplicates = rows.iter().filter(|r| !seen.insert(r.date)).count();
    if duplicates > 0 {
        warn!(duplicates, "Daily dataset has repeated dates");
    }

    info!(rows = rows.len(), "Daily dataset loaded");
    Ok(rows)
}

/// Loads the hourly dataset from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, any row fails to parse, or
/// a row carries an hour outside 0–23.
#[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_hourly(path: impl AsRef<Path>) -> Result<Vec<HourlyRecord>> {
    let path = path.as_ref();
    let mut rows: Vec<HourlyRecord> = read_rows(path)?;

    if let Some((line, bad)) = rows.iter().enumerate().find(|(_, r)| r.hour > 23) {
        bail!(
            "{}: row {} has hour {} outside 0-23",
            path.display(),
            line + 1,
            bad.hour
        );
    }

    rows.sort_by_key(|r| (r.date, r.hour));

    let mut seen = HashSet::new();
    let duplicates = rows
        .iter()
        .filter(|r| !seen.insert((r.date, r.hour)))
        .count();
    if duplicates > 0 {
        warn!(duplicates, "Hourly dataset has repeated (date, hour) pairs");
    }

    info!(rows = rows.len(), "Hourly dataset loaded");
    Ok(rows)
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);
    let mut rows = Vec::new();

    for (i, result) in rdr.deserialize().enumerate() {
        let record: T =
            result.with_context(|| format!("{}: malformed row {}", path.display(), i + 1))?;
        rows.push(record);
    }

    debug!(rows = rows.len(), "CSV rows parsed");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Season;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_daily_sorts_by_date() {
        let file = write_csv(
            "dteday,season,weathersit,total_count\n\
             2011-01-03,Spring,Clear,300\n\
             2011-01-01,Spring,Misty,100\n\
             2011-01-02,Spring,Clear,200\n",
        );

        let rows = load_daily(file.path()).unwrap();

        let dates: Vec<_> = rows.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date(2011, 1, 1), date(2011, 1, 2), date(2011, 1, 3)]);
        assert_eq!(rows[0].total_count, 100);
    }

    #[test]
    fn test_load_hourly_sorts_by_date_then_hour() {
        let file = write_csv(
            "dteday,hour,season,weathersit,total_count\n\
             2011-01-02,1,Spring,Clear,7\n\
             2011-01-01,5,Spring,Clear,3\n\
             2011-01-01,2,Winter,Clear,9\n",
        );

        let rows = load_hourly(file.path()).unwrap();

        let keys: Vec<_> = rows.iter().map(|r| (r.date, r.hour)).collect();
        assert_eq!(
            keys,
            vec![(date(2011, 1, 1), 2), (date(2011, 1, 1), 5), (date(2011, 1, 2), 1)]
        );
        assert_eq!(rows[0].season, Season::Winter);
    }

    #[test]
    fn test_load_hourly_rejects_out_of_range_hour() {
        let file = write_csv(
            "dteday,hour,season,weathersit,total_count\n\
             2011-01-01,24,Spring,Clear,3\n",
        );

        let err = load_hourly(file.path()).unwrap_err();
        assert!(err.to_string().contains("outside 0-23"));
    }

    #[test]
    fn test_load_daily_malformed_date_is_fatal() {
        let file = write_csv(
            "dteday,season,weathersit,total_count\n\
             not-a-date,Spring,Clear,1\n",
        );

        let err = load_daily(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("malformed row 1"));
    }

    #[test]
    fn test_load_daily_negative_count_is_fatal() {
        let file = write_csv(
            "dteday,season,weathersit,total_count\n\
             2011-01-01,Spring,Clear,-5\n",
        );

        assert!(load_daily(file.path()).is_err());
    }

    #[test]
    fn test_load_daily_missing_file() {
        let err = load_daily("does/not/exist.csv").unwrap_err();
        assert!(err.to_string().contains("failed to open"));
    }

    #[test]
    fn test_load_daily_keeps_duplicate_dates() {
        let file = write_csv(
            "dteday,season,weathersit,total_count\n\
             2011-01-01,Spring,Clear,1\n\
             2011-01-01,Spring,Clear,2\n",
        );

        let rows = load_daily(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
    }
}
