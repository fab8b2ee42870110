pub mod aggregate;
pub mod estimate;
pub mod exec;
pub mod fetch;
pub mod output;

pub use aggregate::aggregate;
pub use estimate::{estimate, estimate_in, round_to_unit};
pub use exec::{exec, prepare, Prepared};
pub use fetch::fetch_commits;
pub use output::{output_json, output_ndjson, print_summary, write_reports, ReportPaths};

use crate::model::{CommitInfo, EstimateOptions, Timesheet};
use chrono::Utc;

/// Estimate and aggregate `commits` (oldest first) in one pass.
pub fn build_timesheet(commits: &[CommitInfo], options: &EstimateOptions, utc: bool) -> Timesheet {
    let dates = if utc {
        estimate_in(commits, options, &Utc)
    } else {
        estimate(commits, options)
    };
    let summary = aggregate(&dates);

    Timesheet {
        commits_checked: commits.len(),
        dates,
        summary,
    }
}
