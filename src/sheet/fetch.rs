use crate::git::GitRepo;
use crate::model::CommitInfo;
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};

pub fn fetch_commits(
    repo: &GitRepo,
    include_merges: bool,
    show_progress: bool,
) -> anyhow::Result<Vec<CommitInfo>> {
    let pb = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} {pos}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Collecting commits...");
        pb
    } else {
        ProgressBar::hidden()
    };

    let commits = repo
        .collect_commits(include_merges, &pb)
        .context("Failed to collect commits from repository")?;

    pb.finish_and_clear();
    Ok(commits)
}
