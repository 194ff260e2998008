//! Change isolation over annotated trees.

use crate::diff::LineRange;
use crate::yaml::AnnotatedNode;

/// Clear the line range on every node the change set did not touch.
///
/// Mutates the tree in place. Mapping keys are tested independently of their
/// values: a key overlapping the ranges means the entire value subtree is
/// treated as touched and left alone, because a new or renamed key makes
/// everything nested beneath it logically new content. A key that does not
/// overlap is cleared and its value recursed into. Sequence items carry no
/// such propagation; each is tested and recursed independently.
pub fn isolate(node: &mut AnnotatedNode, ranges: &[LineRange]) {
    if !overlaps(node.lines(), ranges) {
        node.clear_lines();
    }

    match node {
        AnnotatedNode::Sequence { items, .. } => {
            for item in items {
                isolate(item, ranges);
            }
        }
        AnnotatedNode::Mapping { entries, .. } => {
            for (key, value) in entries {
                if overlaps(key.lines, ranges) {
                    // Key changed: the whole value subtree stays marked.
                    continue;
                }
                key.lines = None;
                isolate(value, ranges);
            }
        }
        AnnotatedNode::Scalar { .. } => {}
    }
}

fn overlaps(lines: Option<LineRange>, ranges: &[LineRange]) -> bool {
    lines.is_some_and(|range| range.intersects_any(ranges))
}
