//! Git command runner for yaml-changeset.
//!
//! Provides a safe wrapper around git commands with captured stdout/stderr
//! and structured error handling, plus the narrow porcelain this crate needs:
//! reference resolution, first-parent lookup, merge-base computation, and
//! blob reads at a revision.
//!
//! Every operation spawns an independent `git` process, so there is no
//! long-lived repository handle to synchronize between callers.

use crate::error::{ChangesetError, Result};
use std::path::Path;
use std::process::{Command, Output};

/// Result of a git command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Raw standard output. Not trimmed: blob contents must round-trip
    /// byte-for-byte so line numbers stay accurate.
    pub stdout: String,
    /// Standard error (trimmed).
    pub stderr: String,
}

impl GitOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    /// Stdout with surrounding whitespace removed, for single-value output
    /// like `rev-parse`.
    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.trim()
    }
}

/// Run a git command with the specified working directory.
///
/// # Arguments
///
/// * `cwd` - The directory to run the command in (repository root or below)
/// * `args` - The git command arguments (without the "git" prefix)
///
/// # Returns
///
/// * `Ok(GitOutput)` - On successful execution (exit code 0)
/// * `Err(ChangesetError::Git)` - On spawn failure or non-zero exit code
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let (status, output) = run_git_unchecked(cwd, args)?;

    if status {
        Ok(output)
    } else {
        let detail = if output.stderr.is_empty() {
            output.stdout_trimmed().to_string()
        } else {
            output.stderr.clone()
        };
        Err(ChangesetError::Git(format!(
            "git {} failed: {}",
            args.first().unwrap_or(&""),
            detail
        )))
    }
}

/// Run a git command and report success alongside the captured output.
///
/// Only a spawn failure is an error here; callers that distinguish expected
/// non-zero exits (missing refs, absent merge bases) inspect the flag and
/// stderr themselves.
pub fn run_git_unchecked<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<(bool, GitOutput)> {
    let output = Command::new("git")
        .current_dir(cwd.as_ref())
        .args(args)
        .output()
        .map_err(|e| {
            ChangesetError::Git(format!(
                "failed to execute git {}: {}",
                args.first().unwrap_or(&""),
                e
            ))
        })?;

    Ok((output.status.success(), GitOutput::from_output(&output)))
}

/// Resolve a reference to a full commit id.
///
/// # Returns
///
/// * `Ok(Some(sha))` - The reference names (or peels to) a commit
/// * `Ok(None)` - The reference does not exist
/// * `Err(ChangesetError::Git)` - git could not be executed
pub fn resolve_commit<P: AsRef<Path>>(repo: P, reference: &str) -> Result<Option<String>> {
    let spec = format!("{reference}^{{commit}}");
    let (ok, output) = run_git_unchecked(repo, &["rev-parse", "--verify", "--quiet", &spec])?;

    if ok {
        Ok(Some(output.stdout_trimmed().to_string()))
    } else {
        tracing::debug!(reference, "reference did not resolve to a commit");
        Ok(None)
    }
}

/// Resolve the first parent of a commit, or `None` for a root commit.
pub fn first_parent<P: AsRef<Path>>(repo: P, commit: &str) -> Result<Option<String>> {
    let spec = format!("{commit}^1");
    resolve_commit(repo, &spec)
}

/// Compute the first merge base of two commits.
///
/// # Returns
///
/// * `Ok(Some(sha))` - The best common ancestor
/// * `Ok(None)` - The commits share no history at all
/// * `Err(ChangesetError::Git)` - Invalid commits or execution failure
pub fn merge_base<P: AsRef<Path>>(repo: P, target: &str, head: &str) -> Result<Option<String>> {
    let (ok, output) = run_git_unchecked(repo, &["merge-base", target, head])?;

    if ok {
        Ok(Some(output.stdout_trimmed().to_string()))
    } else if output.stderr.is_empty() {
        // merge-base exits 1 with no diagnostics when the histories are
        // unrelated; anything on stderr is a real failure.
        Ok(None)
    } else {
        Err(ChangesetError::Git(format!(
            "git merge-base failed: {}",
            output.stderr
        )))
    }
}

/// Read a file's full contents at a given revision.
///
/// # Arguments
///
/// * `repo` - The repository root
/// * `revision` - A commit id or reference
/// * `path` - Repository-relative path (forward slashes)
///
/// # Returns
///
/// * `Ok(Some(text))` - The blob contents at that revision
/// * `Ok(None)` - The file does not exist at that revision
/// * `Err(ChangesetError::Git)` - Any other failure
pub fn read_blob<P: AsRef<Path>>(repo: P, revision: &str, path: &str) -> Result<Option<String>> {
    let spec = format!("{revision}:{path}");
    let (ok, output) = run_git_unchecked(repo, &["show", &spec])?;

    if ok {
        return Ok(Some(output.stdout));
    }

    let stderr = output.stderr.as_str();
    if stderr.contains("does not exist")
        || stderr.contains("invalid object name")
        || stderr.contains("exists on disk, but not in")
    {
        Ok(None)
    } else {
        Err(ChangesetError::Git(format!("git show failed: {stderr}")))
    }
}
