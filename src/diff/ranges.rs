//! Line range primitives shared by the diff tracker and the tree passes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A contiguous run of source lines as a half-open interval `[start, stop)`.
///
/// Line numbers are 1-based and `start < stop` always holds, so every range
/// covers at least one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineRange {
    /// First line covered (1-based, inclusive).
    pub start: usize,
    /// First line past the covered run (exclusive).
    pub stop: usize,
}

impl LineRange {
    /// Create a range covering `[start, stop)`.
    pub fn new(start: usize, stop: usize) -> Self {
        debug_assert!(start < stop, "line range must cover at least one line");
        Self { start, stop }
    }

    /// Create a range covering a single line.
    pub fn single(line: usize) -> Self {
        Self::new(line, line + 1)
    }

    /// Number of lines covered.
    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    /// True if the range covers no lines. Cannot happen for ranges built
    /// through [`LineRange::new`]; present for completeness.
    pub fn is_empty(&self) -> bool {
        self.stop <= self.start
    }

    /// True if this range shares at least one line with `other`.
    pub fn intersects(&self, other: &LineRange) -> bool {
        self.start < other.stop && self.stop > other.start
    }

    /// True if this range shares at least one line with any range in `ranges`.
    pub fn intersects_any(&self, ranges: &[LineRange]) -> bool {
        ranges.iter().any(|r| self.intersects(r))
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len() == 1 {
            write!(f, "line {}", self.start)
        } else {
            write!(f, "lines {}-{}", self.start, self.stop - 1)
        }
    }
}

/// Added lines per repository-relative file path.
///
/// Each entry holds sorted, disjoint, non-adjacent ranges. Absence of a file
/// (or an empty map) means no changes were detected for it; the public APIs
/// wrap the whole map in `Option` and use `None` for "nothing changed at all".
pub type ChangeSet = BTreeMap<String, Vec<LineRange>>;

/// Fold a set of line numbers into a minimal list of disjoint ranges.
///
/// Consecutive runs (`n, n+1, n+2, ...`) collapse into a single range.
/// Duplicates are ignored. The result is sorted and no two output ranges
/// touch or overlap, which makes the operation idempotent over its own
/// output's covered lines.
pub fn coalesce_lines(mut lines: Vec<usize>) -> Vec<LineRange> {
    lines.sort_unstable();
    lines.dedup();

    let mut ranges = Vec::new();
    let mut run: Option<LineRange> = None;

    for line in lines {
        match run {
            Some(ref mut range) if range.stop == line => range.stop = line + 1,
            Some(range) => {
                ranges.push(range);
                run = Some(LineRange::single(line));
            }
            None => run = Some(LineRange::single(line)),
        }
    }

    if let Some(range) = run {
        ranges.push(range);
    }
    ranges
}
