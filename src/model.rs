use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, SheetError};

pub const SCHEMA_VERSION: u32 = 1;

pub const DEFAULT_MAX_TIMEOUT: u32 = 60;
pub const DEFAULT_MIN_UNIT_WORKED: u32 = 60;

const SHORT_ID_LEN: usize = 7;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitInfo {
    pub id: String,
    pub author_name: String,
    pub author_email: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl CommitInfo {
    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }
}

fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

/// Minutes credited to one commit, measured from its predecessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEstimate {
    pub commit_id: String,
    pub message: String,
    pub minutes: u32,
}

impl TimeEstimate {
    pub fn short_id(&self) -> &str {
        short_id(&self.commit_id)
    }
}

/// Estimates keyed by calendar date. Within a date, entries keep the order
/// in which commits were fed to the estimator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DateBucket {
    days: BTreeMap<NaiveDate, Vec<TimeEstimate>>,
}

impl DateBucket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, date: NaiveDate, estimate: TimeEstimate) {
        self.days.entry(date).or_default().push(estimate);
    }

    pub fn get(&self, date: &NaiveDate) -> Option<&[TimeEstimate]> {
        self.days.get(date).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &[TimeEstimate])> {
        self.days.iter().map(|(date, entries)| (date, entries.as_slice()))
    }

    /// Number of distinct dates holding at least one estimate.
    pub fn date_count(&self) -> usize {
        self.days.len()
    }

    pub fn estimate_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn commit_counts(&self) -> impl Iterator<Item = (&NaiveDate, usize)> {
        self.days.iter().map(|(date, entries)| (date, entries.len()))
    }
}

/// ISO 8601 week qualified by its ISO week-numbering year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekKey {
    pub year: i32,
    pub week: u32,
}

impl WeekKey {
    pub fn from_date(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

// JSON object keys must be strings
impl Serialize for WeekKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub daily: BTreeMap<NaiveDate, u64>,
    pub weekly: BTreeMap<WeekKey, u64>,
    /// Same content as `daily`; rendered as its own report.
    pub total: BTreeMap<NaiveDate, u64>,
    pub grand_total: u64,
}

impl Summary {
    /// Grand total split into whole hours and leftover minutes.
    pub fn hours_and_minutes(&self) -> (u64, u64) {
        (self.grand_total / 60, self.grand_total % 60)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

impl DateRange {
    pub fn new() -> Self {
        Self { since: None, until: None }
    }

    pub fn with_since(mut self, since: NaiveDate) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_until(mut self, until: NaiveDate) -> Self {
        self.until = Some(until);
        self
    }

    /// Inclusive on both ends.
    pub fn contains(&self, date: &NaiveDate) -> bool {
        if let Some(since) = self.since {
            if date < &since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if date > &until {
                return false;
            }
        }
        true
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateOptions {
    pub filter: String,
    pub range: DateRange,
    pub max_timeout: u32,
    pub min_unit_worked: u32,
}

impl EstimateOptions {
    pub fn validate(&self) -> Result<()> {
        if self.max_timeout == 0 {
            return Err(SheetError::Config("max timeout must be a positive number of minutes".into()));
        }
        if self.min_unit_worked == 0 {
            return Err(SheetError::Config(
                "minimum unit worked must be a positive number of minutes".into(),
            ));
        }
        if let (Some(since), Some(until)) = (self.range.since, self.range.until) {
            if since > until {
                return Err(SheetError::InvalidDate(format!(
                    "Invalid range: start ({since}) is after end ({until})"
                )));
            }
        }
        Ok(())
    }
}

impl Default for EstimateOptions {
    fn default() -> Self {
        Self {
            filter: String::new(),
            range: DateRange::new(),
            max_timeout: DEFAULT_MAX_TIMEOUT,
            min_unit_worked: DEFAULT_MIN_UNIT_WORKED,
        }
    }
}

/// One row of the detailed report, also the NDJSON export record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailEntry {
    pub date: NaiveDate,
    pub commit_id: String,
    pub message: String,
    pub minutes: u32,
    pub hours: f64,
}

/// Result of one estimation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Timesheet {
    pub commits_checked: usize,
    pub dates: DateBucket,
    pub summary: Summary,
}

impl Timesheet {
    pub fn detail_entries(&self) -> impl Iterator<Item = DetailEntry> + '_ {
        self.dates.iter().flat_map(|(date, entries)| {
            entries.iter().map(move |e| DetailEntry {
                date: *date,
                commit_id: e.short_id().to_string(),
                message: e.message.clone(),
                minutes: e.minutes,
                hours: f64::from(e.minutes) / 60.0,
            })
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimesheetOutput<'a> {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub filter: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub max_timeout: u32,
    pub min_unit_worked: u32,
    #[serde(flatten)]
    pub timesheet: &'a Timesheet,
}
