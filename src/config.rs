//! Configuration file loading and merging with command-line flags.
//!
//! Precedence is flags, then the config file, then built-in defaults.

use crate::cli::CommonArgs;
use crate::error::{Result, SheetError};
use crate::model::{DateRange, EstimateOptions, DEFAULT_MAX_TIMEOUT, DEFAULT_MIN_UNIT_WORKED};
use crate::util::{parse_date_bound, parse_minutes};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Looked up in the repository root, in this order.
const CONFIG_FILES: &[&str] = &[".gitsheet.toml", "gitsheet.toml"];

pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Values a config file may provide. Everything is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub filter: Option<String>,
    pub max_timeout: Option<DurationSetting>,
    pub min_unit_worked: Option<DurationSetting>,
    pub output_dir: Option<PathBuf>,
    pub utc: Option<bool>,
    pub exclude_merges: Option<bool>,
}

/// Either plain minutes (`90`) or a humantime string (`"1h 30m"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DurationSetting {
    Minutes(u32),
    Text(String),
}

impl DurationSetting {
    fn minutes(&self) -> Result<u32> {
        match self {
            DurationSetting::Minutes(n) => parse_minutes(&n.to_string()),
            DurationSetting::Text(s) => parse_minutes(s),
        }
    }
}

/// Find a config file in the repository root, then in the user config dir.
pub fn find_config_file(repo_root: &Path) -> Option<PathBuf> {
    for name in CONFIG_FILES {
        let candidate = repo_root.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    let user = dirs::config_dir()?.join("gitsheet").join("config.toml");
    user.is_file().then_some(user)
}

/// Load the explicit config file if given, otherwise whatever is discovered.
pub fn load_config(explicit: Option<&Path>, repo_root: &Path) -> Result<FileConfig> {
    match explicit {
        Some(path) => load_config_from(path),
        None => match find_config_file(repo_root) {
            Some(path) => load_config_from(&path),
            None => {
                debug!("No configuration file found, using defaults");
                Ok(FileConfig::default())
            }
        },
    }
}

pub fn load_config_from(path: &Path) -> Result<FileConfig> {
    debug!(path = %path.display(), "loading configuration");

    let content = std::fs::read_to_string(path).map_err(|e| {
        SheetError::Config(format!("Failed to read config file {}: {e}", path.display()))
    })?;

    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<FileConfig> {
    Ok(toml::from_str(content)?)
}

/// Fully resolved parameters for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub options: EstimateOptions,
    pub output_dir: PathBuf,
    pub utc: bool,
    pub exclude_merges: bool,
}

impl Settings {
    /// Whether dates are taken in UTC, from either the flag or the file.
    pub fn wants_utc(common: &CommonArgs, file: &FileConfig) -> bool {
        common.utc || file.utc.unwrap_or(false)
    }

    /// Merge flags over the file config and validate the result.
    /// Relative date bounds resolve against `today`.
    pub fn resolve(
        common: &CommonArgs,
        file: FileConfig,
        output_dir: Option<PathBuf>,
        today: NaiveDate,
    ) -> Result<Self> {
        let utc = Self::wants_utc(common, &file);
        let max_timeout = match (&common.max_timeout, &file.max_timeout) {
            (Some(flag), _) => parse_minutes(flag)?,
            (None, Some(setting)) => setting.minutes()?,
            (None, None) => DEFAULT_MAX_TIMEOUT,
        };
        let min_unit_worked = match (&common.min_unit_worked, &file.min_unit_worked) {
            (Some(flag), _) => parse_minutes(flag)?,
            (None, Some(setting)) => setting.minutes()?,
            (None, None) => DEFAULT_MIN_UNIT_WORKED,
        };

        let mut range = DateRange::new();
        if let Some(start) = &common.start {
            range = range.with_since(parse_date_bound(start, today)?);
        }
        if let Some(end) = &common.end {
            range = range.with_until(parse_date_bound(end, today)?);
        }

        let options = EstimateOptions {
            filter: common.filter.clone().or(file.filter).unwrap_or_default(),
            range,
            max_timeout,
            min_unit_worked,
        };
        options.validate()?;

        Ok(Self {
            options,
            output_dir: output_dir
                .or(file.output_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            utc,
            exclude_merges: common.exclude_merges || file.exclude_merges.unwrap_or(false),
        })
    }
}
