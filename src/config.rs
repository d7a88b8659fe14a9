use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::aggregations::DEFAULT_TOP_N;
use crate::filter::SeasonMode;

pub const DEFAULT_DAY_CSV: &str = "dashboard/day_cleaned.csv";
pub const DEFAULT_HOUR_CSV: &str = "dashboard/hour_cleaned.csv";

/// Deployment settings for the dashboard.
///
/// Resolved from defaults, then the environment, then an optional JSON file
/// where every key is optional:
/// ```json
/// {
///   "day_csv": "data/day.csv",
///   "hour_csv": "data/hour.csv",
///   "season_mode": "single",
///   "top_n": 3
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub day_csv: PathBuf,
    pub hour_csv: PathBuf,
    pub season_mode: SeasonMode,
    pub top_n: usize,
}

/// On-disk shape; absent keys leave the base config untouched.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    day_csv: Option<PathBuf>,
    hour_csv: Option<PathBuf>,
    season_mode: Option<SeasonMode>,
    top_n: Option<usize>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            day_csv: PathBuf::from(DEFAULT_DAY_CSV),
            hour_csv: PathBuf::from(DEFAULT_HOUR_CSV),
            season_mode: SeasonMode::default(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl DashboardConfig {
    /// Defaults with dataset paths taken from `BIKESHARE_DAY_CSV` and
    /// `BIKESHARE_HOUR_CSV` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(path) = std::env::var("BIKESHARE_DAY_CSV") {
            config.day_csv = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("BIKESHARE_HOUR_CSV") {
            config.hour_csv = PathBuf::from(path);
        }
        config
    }

    /// Overlays the JSON file at `path` on top of `self`.
    pub fn load(self, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        self.merge_json(&content)
            .with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn merge_json(mut self, content: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(content)?;
        if let Some(day_csv) = file.day_csv {
            self.day_csv = day_csv;
        }
        if let Some(hour_csv) = file.hour_csv {
            self.hour_csv = hour_csv;
        }
        if let Some(season_mode) = file.season_mode {
            self.season_mode = season_mode;
        }
        if let Some(top_n) = file.top_n {
            self.top_n = top_n;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.day_csv, PathBuf::from(DEFAULT_DAY_CSV));
        assert_eq!(config.season_mode, SeasonMode::Multi);
        assert_eq!(config.top_n, 5);
    }

    #[test]
    fn test_merge_json_partial() {
        let base = DashboardConfig {
            hour_csv: PathBuf::from("env/hour.csv"),
            ..Default::default()
        };
        let config = base
            .merge_json(r#"{"season_mode": "single", "top_n": 3}"#)
            .unwrap();

        assert_eq!(config.season_mode, SeasonMode::Single);
        assert_eq!(config.top_n, 3);
        assert_eq!(config.hour_csv, PathBuf::from("env/hour.csv"));
        assert_eq!(config.day_csv, PathBuf::from(DEFAULT_DAY_CSV));
    }

    #[test]
    fn test_merge_json_rejects_unknown_mode() {
        let result = DashboardConfig::default().merge_json(r#"{"season_mode": "some"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_json_rejects_unknown_key() {
        let result = DashboardConfig::default().merge_json(r#"{"top": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"day_csv": "data/day.csv"}"#).unwrap();

        let config = DashboardConfig::default().load(file.path()).unwrap();
        assert_eq!(config.day_csv, PathBuf::from("data/day.csv"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = DashboardConfig::default().load(Path::new("no/such/config.json"));
        assert!(result.is_err());
    }
}
