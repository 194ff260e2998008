//! Unified diff parsing.
//!
//! Extracts the new-side line numbers of added lines from `git diff -U0`
//! output. Only genuinely new lines count: git's diff algorithm has already
//! matched unchanged lines across the two sides, so a line that merely moved
//! is never misreported the way a naive positional compare would.

use std::collections::BTreeMap;

/// Parse raw unified diff output into per-file added line numbers.
///
/// Handles new files (`--- /dev/null`), deleted files (`+++ /dev/null`,
/// contributing nothing), and renames (lines are attributed to the new path).
/// Input is expected to come from `-U0` diffs but stray context lines are
/// tracked correctly anyway.
pub(super) fn added_lines_by_file(diff_output: &str) -> BTreeMap<String, Vec<usize>> {
    let mut added: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    let mut current_file: Option<String> = None;
    let mut new_line: usize = 0;

    for line in diff_output.lines() {
        if let Some(rest) = line.strip_prefix("diff --git ") {
            current_file = new_side_path(rest);
            new_line = 0;
            continue;
        }

        // The "+++" header is authoritative for the new path; it overrides
        // what "diff --git" suggested when the file was renamed.
        if let Some(rest) = line.strip_prefix("+++ ") {
            current_file = match rest.strip_prefix("b/") {
                Some(path) => Some(normalize_path(path)),
                None => None, // "+++ /dev/null": deletion, no new side
            };
            continue;
        }

        if line.starts_with("--- ") {
            continue;
        }

        if line.starts_with("@@ ") {
            if let Some(start) = hunk_new_start(line) {
                new_line = start;
            }
            continue;
        }

        let Some(file) = &current_file else { continue };

        if line.starts_with('+') {
            added.entry(file.clone()).or_default().push(new_line);
            new_line += 1;
        } else if line.starts_with(' ') {
            new_line += 1;
        }
        // '-' lines advance only the old side; "\ No newline at end of file"
        // and inter-hunk noise advance neither.
    }

    added
}

/// Extract the new-side path from the remainder of a "diff --git" line.
///
/// The format is `a/<old> b/<new>`; paths may contain spaces, so the last
/// occurrence of " b/" is taken as the separator.
fn new_side_path(rest: &str) -> Option<String> {
    let pos = rest.rfind(" b/")?;
    Some(normalize_path(&rest[pos + 3..]))
}

/// Extract the new-side start line from a hunk header.
///
/// Formats: `@@ -old[,len] +new[,len] @@[ context]`.
fn hunk_new_start(line: &str) -> Option<usize> {
    let body = line.strip_prefix("@@ ")?;
    let (spans, _context) = body.split_once(" @@")?;
    let (_old, new) = spans.split_once(' ')?;
    let new = new.strip_prefix('+')?;
    let start = match new.split_once(',') {
        Some((start, _len)) => start,
        None => new,
    };
    start.parse().ok()
}

/// Normalize a path to forward slashes so change-set keys are stable across
/// platforms.
pub(crate) fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}
