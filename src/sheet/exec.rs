use crate::cli::CommonArgs;
use crate::config::{load_config, Settings};
use crate::git::GitRepo;
use crate::model::CommitInfo;
use anyhow::Context;
use chrono::{Local, Utc};
use console::{style, Term};
use std::path::PathBuf;
use super::{build_timesheet, fetch_commits, print_summary, write_reports};

/// Repository, settings and commit history shared by every subcommand.
pub struct Prepared {
    pub repo: GitRepo,
    pub settings: Settings,
    pub commits: Vec<CommitInfo>,
}

pub fn prepare(common: &CommonArgs, output_dir: Option<PathBuf>) -> anyhow::Result<Prepared> {
    let repo = GitRepo::open(common.repo.as_ref()).context("Failed to open git repository")?;

    let file = load_config(common.config.as_deref(), repo.path())
        .context("Failed to load configuration")?;
    let today = if Settings::wants_utc(common, &file) {
        Utc::now().date_naive()
    } else {
        Local::now().date_naive()
    };
    let settings = Settings::resolve(common, file, output_dir, today)
        .context("Invalid configuration")?;

    let show_progress = !common.quiet && Term::stderr().is_term();
    let commits = fetch_commits(&repo, !settings.exclude_merges, show_progress)?;

    Ok(Prepared {
        repo,
        settings,
        commits,
    })
}

pub fn exec(common: CommonArgs, output_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let Prepared { settings, commits, .. } = prepare(&common, output_dir)?;

    let timesheet = build_timesheet(&commits, &settings.options, settings.utc);

    write_reports(&settings.output_dir, &timesheet)
        .with_context(|| format!("Failed to write reports to {}", settings.output_dir.display()))?;

    if !common.quiet {
        print_summary(&timesheet);
        println!(
            "\nReports written to {}",
            style(settings.output_dir.display()).dim()
        );
    }

    Ok(())
}
