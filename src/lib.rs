//! Estimate hours worked from git commit history.
//!
//! Commits are walked oldest first; the gap to the previous commit, capped
//! and rounded, is credited to each commit that passes the filter. Estimates
//! are then rolled up per day, per ISO week and in total.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod git;
pub mod logging;
pub mod model;
pub mod sheet;
pub mod util;

pub use error::{Result, SheetError};
pub use model::{CommitInfo, DateBucket, EstimateOptions, Summary, TimeEstimate, Timesheet, WeekKey};
pub use sheet::{aggregate, build_timesheet, estimate, estimate_in};
