use crate::config::Settings;
use crate::error::Result;
use crate::model::{Timesheet, TimesheetOutput, SCHEMA_VERSION};
use crate::util::hours_cell;
use chrono::Utc;
use console::style;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub const DETAILED_FILE: &str = "output_detailed.csv";
pub const WEEKLY_FILE: &str = "output_weekly_summary.csv";
pub const DAILY_FILE: &str = "output_daily_summary.csv";
pub const TOTAL_FILE: &str = "output_total_summary.csv";

#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub detailed: PathBuf,
    pub weekly: PathBuf,
    pub daily: PathBuf,
    pub total: PathBuf,
}

/// Write the four CSV reports into `dir`, creating it if needed.
pub fn write_reports(dir: &Path, timesheet: &Timesheet) -> Result<ReportPaths> {
    fs::create_dir_all(dir)?;

    let paths = ReportPaths {
        detailed: dir.join(DETAILED_FILE),
        weekly: dir.join(WEEKLY_FILE),
        daily: dir.join(DAILY_FILE),
        total: dir.join(TOTAL_FILE),
    };

    write_detailed(File::create(&paths.detailed)?, timesheet)?;
    write_weekly(File::create(&paths.weekly)?, timesheet)?;
    write_daily(File::create(&paths.daily)?, timesheet)?;
    write_total(File::create(&paths.total)?, timesheet)?;

    info!(dir = %dir.display(), "wrote CSV reports");
    Ok(paths)
}

pub fn write_detailed<W: Write>(out: W, timesheet: &Timesheet) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["Date", "Commit Hash", "Commit Message", "Time Worked (in hours)"])?;

    for (date, entries) in timesheet.dates.iter() {
        for entry in entries {
            wtr.write_record([
                date.to_string(),
                entry.short_id().to_string(),
                entry.message.clone(),
                hours_cell(u64::from(entry.minutes)),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// The week number column stays bare; the ISO year is appended so that
/// weeks from different years can be told apart.
pub fn write_weekly<W: Write>(out: W, timesheet: &Timesheet) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["Week Number", "Time Worked (in hours)", "ISO Year"])?;

    for (week, minutes) in &timesheet.summary.weekly {
        wtr.write_record([
            week.week.to_string(),
            hours_cell(*minutes),
            week.year.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_daily<W: Write>(out: W, timesheet: &Timesheet) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["Date", "Time Worked (in hours)"])?;

    for (date, minutes) in &timesheet.summary.daily {
        wtr.write_record([date.to_string(), hours_cell(*minutes)])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_total<W: Write>(out: W, timesheet: &Timesheet) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["Date", "Total Time Worked (in hours)"])?;

    for (date, minutes) in &timesheet.summary.total {
        wtr.write_record([date.to_string(), hours_cell(*minutes)])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn output_json(timesheet: &Timesheet, repo_path: &Path, settings: &Settings) -> Result<()> {
    let output = TimesheetOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path: repo_path.to_string_lossy().to_string(),
        filter: settings.options.filter.clone(),
        start: settings.options.range.since,
        end: settings.options.range.until,
        max_timeout: settings.options.max_timeout,
        min_unit_worked: settings.options.min_unit_worked,
        timesheet,
    };

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &output)?;
    writeln!(stdout)?;
    Ok(())
}

pub fn output_ndjson(timesheet: &Timesheet) -> Result<()> {
    write_ndjson(io::stdout().lock(), timesheet)
}

pub fn write_ndjson<W: Write>(mut out: W, timesheet: &Timesheet) -> Result<()> {
    for entry in timesheet.detail_entries() {
        serde_json::to_writer(&mut out, &entry)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

pub fn print_summary(timesheet: &Timesheet) {
    println!(
        "Number of commits checked: {}",
        style(timesheet.commits_checked).cyan()
    );
    println!(
        "Number of dates with estimates: {}",
        style(timesheet.dates.date_count()).cyan()
    );

    if !timesheet.dates.is_empty() {
        println!("{}", style("Commits per day").bold());
        println!("{}", "─".repeat(30));
        for (date, count) in timesheet.dates.commit_counts() {
            println!("{date}: {count} commits");
        }
    }

    let (hours, minutes) = timesheet.summary.hours_and_minutes();
    println!(
        "\nTotal time worked: {} hours and {} minutes",
        style(hours).green().bold(),
        style(minutes).green().bold()
    );
}
