//! Public API for added-line tracking.

use crate::error::{ChangesetError, Result};
use crate::git;
use std::path::Path;

use super::parser::{added_lines_by_file, normalize_path};
use super::ranges::{ChangeSet, coalesce_lines};

/// The hash of git's well-known empty tree, used as the diff base when a
/// parentless commit is the head side.
const EMPTY_TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

/// What to diff.
///
/// With everything unset, the working tree is compared against the current
/// `HEAD` commit.
#[derive(Debug, Clone, Default)]
pub struct DiffRequest {
    /// The ref to base the diff from. Defaults to the head side's first
    /// parent when a head ref is given, otherwise to `HEAD`.
    pub target_ref: Option<String>,
    /// The ref where the changes were made. Defaults to the working tree.
    pub head_ref: Option<String>,
    /// Repository-relative paths to restrict the diff to.
    pub paths: Option<Vec<String>>,
}

/// Determine which line numbers were added between two repository states.
///
/// When both a target and a head ref are given, the effective diff base is
/// their first merge base, so a change is evaluated against the branch point
/// even after the target branch has moved on. Renames are followed; deleted
/// files contribute nothing.
///
/// # Arguments
///
/// * `repo` - Path to the repository root
/// * `request` - Refs and optional path filter, see [`DiffRequest`]
///
/// # Returns
///
/// * `Ok(Some(changes))` - Coalesced added-line ranges per file
/// * `Ok(None)` - No lines were added, or a requested ref does not exist
/// * `Err(ChangesetError::MergeBaseNotFound)` - The refs share no history
/// * `Err(ChangesetError::Git)` - Any other git failure, unmasked
pub fn added_line_ranges(repo: &Path, request: &DiffRequest) -> Result<Option<ChangeSet>> {
    let head = match &request.head_ref {
        Some(reference) => match git::resolve_commit(repo, reference)? {
            Some(sha) => Some(sha),
            None => return Ok(None),
        },
        None => None,
    };

    let target = match &request.target_ref {
        Some(reference) => match git::resolve_commit(repo, reference)? {
            Some(sha) => Some(sha),
            None => return Ok(None),
        },
        None => match &head {
            // A root commit has no first parent; diff it against the empty
            // tree so a brand-new history reads as all-added.
            Some(sha) => git::first_parent(repo, sha)?,
            None => match git::resolve_commit(repo, "HEAD")? {
                Some(sha) => Some(sha),
                None => return Ok(None),
            },
        },
    };

    let base = match (&target, &head) {
        (Some(target), Some(head)) => {
            git::merge_base(repo, target, head)?.ok_or_else(|| {
                ChangesetError::MergeBaseNotFound {
                    target: request.target_ref.clone().unwrap_or_else(|| target.clone()),
                    head: request.head_ref.clone().unwrap_or_else(|| head.clone()),
                }
            })?
        }
        (Some(target), None) => target.clone(),
        (None, _) => EMPTY_TREE.to_string(),
    };

    // Requested paths are normalized up front so the pathspec handed to git
    // and the change-set keys agree across platforms.
    let paths: Option<Vec<String>> = request
        .paths
        .as_ref()
        .map(|paths| paths.iter().map(|p| normalize_path(p)).collect());

    let mut args = vec!["diff", "--no-color", "-U0", "--find-renames", base.as_str()];
    if let Some(head) = &head {
        args.push(head.as_str());
    }
    args.push("--");
    if let Some(paths) = &paths {
        args.extend(paths.iter().map(String::as_str));
    }

    let output = git::run_git(repo, &args)?;
    let added = added_lines_by_file(&output.stdout);

    let total: usize = added.values().map(Vec::len).sum();
    if total == 0 {
        tracing::debug!(base = %base, "no added lines detected");
        return Ok(None);
    }

    let mut changes = ChangeSet::new();
    match &paths {
        // With an explicit filter, every requested path gets an entry, even
        // an empty one, so per-file lookups downstream never miss.
        Some(paths) => {
            for path in paths {
                let lines = added.get(path).cloned().unwrap_or_default();
                changes.insert(path.clone(), coalesce_lines(lines));
            }
        }
        None => {
            for (path, lines) in added {
                changes.insert(path, coalesce_lines(lines));
            }
        }
    }

    Ok(Some(changes))
}
