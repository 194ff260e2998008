//! Per-file orchestration: compute the change set once, then parse and
//! isolate each requested file.

use crate::diff::{DiffRequest, added_line_ranges};
use crate::error::{ChangesetError, Result};
use crate::git;
use crate::yaml::{AnnotatedNode, parse_annotated};
use std::collections::BTreeMap;
use std::path::Path;

use super::isolate::isolate;

/// Load YAML files with line annotations only on their changed substructure.
///
/// Computes the added-line change set for `files` between `target_ref` and
/// `head_ref` (both defaulting as in [`added_line_ranges`]), then parses each
/// file's full text at the head revision (working tree content when no head
/// ref is given) and isolates it against that file's ranges. A file absent
/// from the change set is isolated against an empty range list, clearing all
/// of its annotations while other files may still have matches.
///
/// Pruning is deliberately not applied: some rule checks inspect the
/// fully-shaped, isolated tree (for instance to count key occurrences across
/// the whole document) before calling [`super::prune`] themselves.
///
/// Per-file failure policy:
/// - A file missing at the head revision is skipped; it trivially has
///   nothing to diff.
/// - A file that fails to parse is skipped with a warning and treated as
///   unchanged, so one malformed file cannot abort a whole review run.
/// - Every other error propagates unmodified.
///
/// # Arguments
///
/// * `repo` - Path to the repository root
/// * `files` - Repository-relative paths (forward slashes) to inspect
/// * `target_ref` - The ref to base the diff from
/// * `head_ref` - The ref where the changes were made
///
/// # Returns
///
/// * `Ok(Some(map))` - Isolated annotated tree per loaded file
/// * `Ok(None)` - No changes were detected at all
pub fn load_changed_yaml(
    repo: &Path,
    files: &[String],
    target_ref: Option<&str>,
    head_ref: Option<&str>,
) -> Result<Option<BTreeMap<String, AnnotatedNode>>> {
    let request = DiffRequest {
        target_ref: target_ref.map(String::from),
        head_ref: head_ref.map(String::from),
        paths: Some(files.to_vec()),
    };

    let Some(changes) = added_line_ranges(repo, &request)? else {
        return Ok(None);
    };

    let mut documents = BTreeMap::new();
    for file in files {
        // Change-set keys use forward slashes; look files up the same way.
        let file = crate::diff::normalize_path(file);
        let text = match head_ref {
            Some(revision) => git::read_blob(repo, revision, &file)?,
            None => read_worktree_file(repo, &file)?,
        };
        let Some(text) = text else {
            tracing::debug!(file = %file, "not present at head revision, skipping");
            continue;
        };

        let mut root = match parse_annotated(&text) {
            Ok(root) => root,
            Err(ChangesetError::Parse(message)) => {
                tracing::warn!(file = %file, error = %message, "skipping malformed YAML file");
                continue;
            }
            Err(other) => return Err(other),
        };

        let ranges = changes.get(&file).map(Vec::as_slice).unwrap_or(&[]);
        isolate(&mut root, ranges);
        documents.insert(file, root);
    }

    Ok(Some(documents))
}

fn read_worktree_file(repo: &Path, file: &str) -> Result<Option<String>> {
    match std::fs::read_to_string(repo.join(file)) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
