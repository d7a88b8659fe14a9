//! CLI entry point for the bike-sharing dashboard.
//!
//! Loads the daily and hourly datasets once, then runs a filter cycle and
//! either logs the resulting chart tables or exports them as CSV.

use anyhow::{Context, Result};
use bikeshare_dashboard::config::DashboardConfig;
use bikeshare_dashboard::context::DatasetContext;
use bikeshare_dashboard::filter::{FilterCriteria, SeasonMode, SeasonSelection};
use bikeshare_dashboard::loader::{load_daily, load_hourly};
use bikeshare_dashboard::output::{export_view, print_json, print_pretty};
use bikeshare_dashboard::records::{Season, WeatherSituation};
use bikeshare_dashboard::view::DashboardView;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_dashboard")]
#[command(about = "Filter and aggregate bike-sharing rental data", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Daily dataset CSV
    #[arg(long, global = true)]
    day_csv: Option<PathBuf>,

    /// Hourly dataset CSV
    #[arg(long, global = true)]
    hour_csv: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the date bounds, seasons and weather codes the filters accept
    Options,
    /// Apply filters and log every chart table
    View {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },
    /// Apply filters and write every chart table to CSV
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// Directory to write the CSV tables into
        #[arg(short, long, default_value = "out")]
        out_dir: PathBuf,
    },
}

#[derive(Args)]
struct FilterArgs {
    /// First day of the range (YYYY-MM-DD), defaults to the earliest date
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last day of the range (YYYY-MM-DD), defaults to the latest date
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Season to keep; repeat for several in multi mode
    #[arg(short, long = "season")]
    seasons: Vec<Season>,

    /// Weather code to keep, defaults to the first code in the daily set
    #[arg(short, long)]
    weather: Option<String>,

    /// Single- or multi-value season selection
    #[arg(long, value_enum)]
    season_mode: Option<SeasonMode>,

    /// Number of busiest and quietest hours to show
    #[arg(short = 'n', long)]
    top_n: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Pretty,
    Json,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_dashboard.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_dashboard.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let mut config = DashboardConfig::from_env();
    if let Some(path) = &cli.config {
        config = config.load(path)?;
    }
    if let Some(day_csv) = cli.day_csv {
        config.day_csv = day_csv;
    }
    if let Some(hour_csv) = cli.hour_csv {
        config.hour_csv = hour_csv;
    }

    let ctx = load_context(&config)?;

    match cli.command {
        Commands::Options => {
            match ctx.date_bounds() {
                Some(bounds) => info!(start = %bounds.start, end = %bounds.end, "Date range"),
                None => warn!("Daily dataset is empty, no date range available"),
            }

            let seasons: Vec<&str> = ctx.season_options().iter().map(Season::as_str).collect();
            info!(seasons = ?seasons, mode = ?config.season_mode, "Season options");

            let weather: Vec<&str> = ctx
                .weather_options()
                .iter()
                .map(WeatherSituation::as_str)
                .collect();
            info!(weather = ?weather, "Weather options");
        }
        Commands::View { filter, format } => {
            let view = run_cycle(&ctx, &config, &filter)?;
            match format {
                Format::Pretty => print_pretty(&view),
                Format::Json => print_json(&view)?,
            }
        }
        Commands::Export { filter, out_dir } => {
            let view = run_cycle(&ctx, &config, &filter)?;
            export_view(&out_dir, &view)?;
            info!(out_dir = %out_dir.display(), "Export finished");
        }
    }

    Ok(())
}

/// Loads both datasets and freezes them into the shared context.
#[tracing::instrument(skip(config), fields(day_csv = %config.day_csv.display(), hour_csv = %config.hour_csv.display()))]
fn load_context(config: &DashboardConfig) -> Result<DatasetContext> {
    let daily = load_daily(&config.day_csv)?;
    let hourly = load_hourly(&config.hour_csv)?;
    Ok(DatasetContext::new(daily, hourly))
}

/// Turns the filter flags into criteria and computes one view.
fn run_cycle(ctx: &DatasetContext, config: &DashboardConfig, args: &FilterArgs) -> Result<DashboardView> {
    let criteria = build_criteria(ctx, config, args)?;
    let top_n = args.top_n.unwrap_or(config.top_n);

    let view = DashboardView::compute(ctx, &criteria, top_n);
    if view.is_empty() {
        warn!("No records match the selected filters");
    }
    Ok(view)
}

fn build_criteria(
    ctx: &DatasetContext,
    config: &DashboardConfig,
    args: &FilterArgs,
) -> Result<FilterCriteria> {
    let mode = args.season_mode.unwrap_or(config.season_mode);
    let seasons = SeasonSelection::for_mode(mode, args.seasons.clone())?;

    let date_range = ctx
        .range_or_bounds(args.start, args.end)
        .context("daily dataset is empty; pass --start and --end explicitly")?;

    let weather = match &args.weather {
        Some(code) => WeatherSituation::new(code.as_str()),
        None => ctx
            .weather_options()
            .first()
            .cloned()
            .context("daily dataset has no weather codes; pass --weather explicitly")?,
    };

    Ok(FilterCriteria::new(date_range, seasons, weather))
}
