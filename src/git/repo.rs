use crate::error::{SheetError, Result};
use crate::model::CommitInfo;
use chrono::DateTime;
use gix::{discover, ObjectId, Repository};
use indicatif::ProgressBar;
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at `path`, or current dir if `None`
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let repo_path = match path {
            Some(p) => p.as_ref().to_path_buf(),
            None => std::env::current_dir()?,
        };

        let repo = discover(&repo_path)?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        debug!(path = %path.display(), "opened repository");

        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every commit reachable from HEAD, oldest first by committer time.
    ///
    /// An unborn HEAD yields an empty list.
    pub fn collect_commits(&self, include_merges: bool, progress: &ProgressBar) -> Result<Vec<CommitInfo>> {
        let mut head = self.repo.head()?;
        if head.is_unborn() {
            debug!("HEAD is unborn, no commits to read");
            return Ok(Vec::new());
        }
        let head_commit = head.peel_to_commit_in_place()?;

        let mut commits = Vec::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: VecDeque<ObjectId> = VecDeque::from([head_commit.id]);

        while let Some(commit_id) = stack.pop_back() {
            if !seen.insert(commit_id) {
                continue;
            }

            let commit = self.repo.find_commit(commit_id)?;
            let secs = commit.time()?.seconds;
            let timestamp = DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| SheetError::InvalidDate(format!("Invalid timestamp: {secs}")))?;

            let parents: Vec<ObjectId> = commit.parent_ids().map(|id| id.into()).collect();
            stack.extend(parents.iter().copied());

            if !include_merges && parents.len() > 1 {
                progress.inc(1);
                continue;
            }

            let author = commit.author()?;
            let message = commit.message()?;
            let text = match message.body {
                Some(body) => format!("{}\n\n{}", message.title, body),
                None => message.title.to_string(),
            };

            commits.push(CommitInfo {
                id: commit_id.to_string(),
                author_name: author.name.to_string(),
                author_email: author.email.to_string(),
                message: text.trim().to_string(),
                timestamp,
            });

            progress.inc(1);
        }

        // traversal walks child before parent; reversed, a stable sort keeps
        // parents ahead of children that share the same second
        commits.reverse();
        commits.sort_by_key(|c| c.timestamp);
        debug!(count = commits.len(), "collected commits");
        Ok(commits)
    }
}
