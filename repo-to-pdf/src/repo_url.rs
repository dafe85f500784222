//! Repository identifiers accepted on the command line.

use anyhow::{anyhow, Context, Result};
use regex::Regex;

const REPO_PATTERN: &str =
    r"^(?:https?://(?:www\.)?github\.com/)?([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+?)(?:\.git)?/?$";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

/// Accepts `https://github.com/<owner>/<repo>` (optionally with `.git` or a
/// trailing slash) or a bare `<owner>/<repo>`.
pub fn parse_repo(input: &str) -> Result<RepoId> {
    let pattern = Regex::new(REPO_PATTERN).context("Failed to compile repository pattern")?;
    let captures = pattern
        .captures(input.trim())
        .ok_or_else(|| anyhow!("Invalid GitHub repository URL: {input}"))?;
    Ok(RepoId {
        owner: captures[1].to_string(),
        repo: captures[2].to_string(),
    })
}
