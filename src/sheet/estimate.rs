use crate::model::{CommitInfo, DateBucket, EstimateOptions, TimeEstimate};
use crate::util::matches_filter;
use chrono::{Local, TimeZone};
use tracing::{debug, warn};

/// Estimate time worked per commit, bucketed by local calendar date.
///
/// `commits` must be oldest first. Every commit, kept or not, becomes the
/// baseline for the next one, so elapsed time is never lost across
/// commits hidden by the filter or the date range.
pub fn estimate<'a, I>(commits: I, options: &EstimateOptions) -> DateBucket
where
    I: IntoIterator<Item = &'a CommitInfo>,
{
    estimate_in(commits, options, &Local)
}

/// Same as [`estimate`], with calendar dates taken in `tz`.
pub fn estimate_in<'a, I, Tz>(commits: I, options: &EstimateOptions, tz: &Tz) -> DateBucket
where
    I: IntoIterator<Item = &'a CommitInfo>,
    Tz: TimeZone,
{
    debug!(
        filter = %options.filter,
        since = ?options.range.since,
        until = ?options.range.until,
        max_timeout = options.max_timeout,
        min_unit_worked = options.min_unit_worked,
        "estimating time worked"
    );

    let needle = options.filter.to_lowercase();
    let mut bucket = DateBucket::new();
    let mut previous: Option<&CommitInfo> = None;

    for commit in commits {
        let date = commit.timestamp.with_timezone(tz).date_naive();

        if matches_filter(commit, &needle) && options.range.contains(&date) {
            if let Some(prev) = previous {
                let elapsed = (commit.timestamp - prev.timestamp).num_seconds();
                if elapsed < 0 {
                    warn!(
                        commit = commit.short_id(),
                        previous = prev.short_id(),
                        seconds = elapsed,
                        "commit is older than its predecessor, crediting zero minutes"
                    );
                }
                bucket.push(
                    date,
                    TimeEstimate {
                        commit_id: commit.id.clone(),
                        message: commit.message.clone(),
                        minutes: round_to_unit(elapsed, options.max_timeout, options.min_unit_worked),
                    },
                );
            }
        }

        previous = Some(commit);
    }

    debug!(
        dates = bucket.date_count(),
        estimates = bucket.estimate_count(),
        "estimation finished"
    );
    bucket
}

/// Clamp `elapsed_secs` to `[0, max_timeout]` minutes, then round half up to
/// the nearest multiple of `min_unit_worked` minutes.
///
/// Works on whole seconds so that half-unit ties are exact.
pub fn round_to_unit(elapsed_secs: i64, max_timeout: u32, min_unit_worked: u32) -> u32 {
    if min_unit_worked == 0 {
        return 0;
    }
    let cap = u64::from(max_timeout) * 60;
    let clamped = u64::try_from(elapsed_secs).unwrap_or(0).min(cap);
    let unit = u64::from(min_unit_worked) * 60;
    let units = (2 * clamped + unit) / (2 * unit);
    u32::try_from(units * u64::from(min_unit_worked)).unwrap_or(u32::MAX)
}
