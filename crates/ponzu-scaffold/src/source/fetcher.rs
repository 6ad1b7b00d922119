//! Framework source fetching via `git clone`
//!
//! Attempts in a [`FetchPlan`] run strictly in order. The first successful clone wins; if every
//! attempt fails the caller gets one error naming all of them.

use super::location::{CloneAttempt, FetchPlan, SourceLocation};
use crate::error::{Error, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command as TokioCommand;

/// A single clone attempt that did not produce a checkout
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct CloneFailure(pub String);

/// Runs one clone attempt
#[allow(async_fn_in_trait)]
pub trait Cloner {
    async fn clone_repo(
        &self,
        attempt: &CloneAttempt,
        destination: &Path,
    ) -> std::result::Result<(), CloneFailure>;
}

/// Clones with the `git` client, passing its output straight through
#[derive(Debug, Clone)]
pub struct GitCloner {
    program: String,
}

impl GitCloner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GitCloner {
    fn default() -> Self {
        Self::new("git")
    }
}

impl Cloner for GitCloner {
    async fn clone_repo(
        &self,
        attempt: &CloneAttempt,
        destination: &Path,
    ) -> std::result::Result<(), CloneFailure> {
        let args = attempt.git_args(destination);
        tracing::debug!(program = %self.program, ?args, "running clone");

        let status = TokioCommand::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| CloneFailure(format!("failed to start {}: {}", self.program, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(CloneFailure(format!("{} clone {}", self.program, status)))
        }
    }
}

/// Result of a successful fetch
#[derive(Debug, Clone)]
pub struct Fetched {
    /// Location the checkout came from
    pub location: SourceLocation,
    /// Non-fatal problems encountered after the clone
    pub warnings: Vec<String>,
}

/// Clone framework source into `destination` following `plan`
pub async fn fetch<C: Cloner>(cloner: &C, plan: &FetchPlan, destination: &Path) -> Result<Fetched> {
    let mut last_failure = None;

    for (i, attempt) in plan.attempts.iter().enumerate() {
        match cloner.clone_repo(attempt, destination).await {
            Ok(()) => {
                tracing::info!(source = %attempt.location, "clone succeeded");
                let mut warnings = Vec::new();
                if plan.strip_git_metadata {
                    if let Err(warning) = remove_git_metadata(destination).await {
                        eprintln!("{} {}", "Warning:".yellow(), warning);
                        warnings.push(warning);
                    }
                }
                return Ok(Fetched {
                    location: attempt.location.clone(),
                    warnings,
                });
            }
            Err(failure) => {
                tracing::warn!(source = %attempt.location, %failure, "clone failed");
                if let Some(next) = plan.attempts.get(i + 1) {
                    let target = match next.location {
                        SourceLocation::Remote(_) => "network".to_string(),
                        SourceLocation::Local(_) => next.location.to_string(),
                    };
                    println!(
                        "Couldn't clone from {}. Trying {}...",
                        attempt.location,
                        target
                    );
                }
                last_failure = Some(failure);
            }
        }
    }

    Err(Error::Fetch {
        attempted: plan.attempts.iter().map(|a| a.location.describe()).collect(),
        reason: last_failure
            .map(|f| f.0)
            .unwrap_or_else(|| "no clone attempts configured".to_string()),
    })
}

/// Remove `<destination>/.git`. A missing directory is not a failure.
async fn remove_git_metadata(destination: &Path) -> std::result::Result<(), String> {
    let git_dir: PathBuf = destination.join(".git");
    match tokio::fs::remove_dir_all(&git_dir).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => {
            tracing::warn!(path = %git_dir.display(), error = %e, "could not remove git metadata");
            Err(format!(
                "Failed to remove .git directory from your project path ({}). Consider removing it manually.",
                e
            ))
        }
    }
}
