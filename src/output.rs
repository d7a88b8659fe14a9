//! Output formatting and persistence for dashboard views.
//!
//! Supports pretty-printing, JSON serialization, and per-table CSV export.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::aggregations::types::HourTotal;
use crate::view::DashboardView;
use csv::WriterBuilder;
use std::fs;
use std::fs::File;
use std::path::Path;

/// Logs a view using Rust's debug pretty-print format.
pub fn print_pretty(view: &DashboardView) {
    info!("{:#?}", view);
}

/// Logs a view as pretty-printed JSON.
pub fn print_json(view: &DashboardView) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(view)?);
    Ok(())
}

#[derive(Serialize)]
struct HourRow {
    hour: u8,
    total_count: u64,
}

#[derive(Serialize)]
struct SeasonRow<'a> {
    season: &'a str,
    total_count: u64,
    pct: f64,
}

/// Writes `rows` to a CSV file at `path`, replacing any existing file.
///
/// `headers` is written first so that an empty table still yields a
/// header-only file.
pub fn write_table<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV table");

    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;

    let mut writer = WriterBuilder::new()
        .has_headers(false) // written explicitly so empty tables keep them
        .from_writer(file);

    writer.write_record(headers)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes every table of `view` into `dir`, one CSV per chart.
#[tracing::instrument(skip(view), fields(dir = %dir.display()))]
pub fn export_view(dir: &Path, view: &DashboardView) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let hour_headers = ["hour", "total_count"];
    let hourly: Vec<HourRow> = view
        .hourly_totals
        .iter()
        .map(|(&hour, &total_count)| HourRow { hour, total_count })
        .collect();
    write_table(&dir.join("hourly_totals.csv"), &hour_headers, &hourly)?;
    write_table::<HourTotal>(&dir.join("busiest_hours.csv"), &hour_headers, &view.busiest_hours)?;
    write_table::<HourTotal>(&dir.join("quietest_hours.csv"), &hour_headers, &view.quietest_hours)?;

    let seasons: Vec<SeasonRow> = view
        .season_shares
        .iter()
        .map(|s| SeasonRow {
            season: s.season.as_str(),
            total_count: s.total_count,
            pct: s.pct,
        })
        .collect();
    write_table(
        &dir.join("seasonal_totals.csv"),
        &["season", "total_count", "pct"],
        &seasons,
    )?;

    write_table(
        &dir.join("monthly_maxima.csv"),
        &["month", "max_count"],
        &view.monthly_maxima,
    )?;
    write_table(
        &dir.join("daily_trend.csv"),
        &["date", "total_count"],
        &view.daily_trend,
    )?;

    info!(tables = 6, "Dashboard tables exported");
    Ok(())
}
