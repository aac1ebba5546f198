//! Git repository operations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::{TimeZone, Utc};
use git2::Repository;

use crate::changelog::Commit;
use crate::log_debug;

/// Handle on the repository the changelog is generated from.
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Opens the repository containing `path`.
    pub fn new(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)
            .with_context(|| format!("Failed to open repository at {}", path.display()))?;
        Ok(Self { repo })
    }

    /// Opens the repository containing the current directory.
    pub fn open() -> Result<Self> {
        let current_dir = std::env::current_dir()?;
        Self::new(&current_dir)
    }

    /// Checks whether the current directory is inside a Git work tree.
    pub fn is_inside_work_tree() -> Result<bool> {
        match Repository::discover(".") {
            Ok(repo) => Ok(!repo.is_bare()),
            Err(_) => Ok(false),
        }
    }

    /// Root of the repository work tree containing the current directory.
    pub fn get_repo_root() -> Result<PathBuf> {
        let repo = Repository::discover(".").context("Not in a Git repository")?;
        repo.workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| anyhow!("Repository has no working directory"))
    }

    /// Retrieves the commits reachable from `to` but not from `from`,
    /// newest first, with the message split into subject and body.
    pub fn commits_between(&self, from: &str, to: &str) -> Result<Vec<Commit>> {
        let from_commit = self
            .repo
            .revparse_single(from)
            .with_context(|| format!("Unknown starting reference '{from}'"))?
            .peel_to_commit()?;
        let to_commit = self
            .repo
            .revparse_single(to)
            .with_context(|| format!("Unknown ending reference '{to}'"))?
            .peel_to_commit()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(to_commit.id())?;
        revwalk.hide(from_commit.id())?;

        let mut commits = Vec::new();
        for id in revwalk.filter_map(std::result::Result::ok) {
            let commit = self.repo.find_commit(id)?;
            let message = commit.message().unwrap_or_default();
            let (subject, body) = split_message(message);
            let author = commit.author();

            commits.push(Commit {
                hash: commit.id().to_string(),
                author: author.name().unwrap_or_default().to_string(),
                email: author.email().unwrap_or_default().to_string(),
                date: format_commit_date(commit.time().seconds()),
                subject,
                body,
            });
        }

        log_debug!("Collected {} commit(s) in {}..{}", commits.len(), from, to);
        Ok(commits)
    }
}

/// Splits a raw commit message into its subject line and remaining body.
/// A message without a body yields an empty body string.
fn split_message(message: &str) -> (String, String) {
    match message.split_once('\n') {
        Some((subject, body)) => (subject.trim_end().to_string(), body.trim().to_string()),
        None => (message.trim_end().to_string(), String::new()),
    }
}

/// Formats a commit timestamp for display in prompts and logs.
fn format_commit_date(seconds: i64) -> String {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .map(|time| time.format("%Y-%m-%d %H:%M:%S %z").to_string())
        .unwrap_or_default()
}
