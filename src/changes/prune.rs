//! Pruning isolated trees down to touched content.

use crate::yaml::AnnotatedNode;

/// Delete every subtree left without a line range after isolation.
///
/// Mutates the tree in place and is idempotent. A sequence item survives iff
/// it still has a range (and is then pruned recursively). A mapping entry
/// survives iff its key has a range, in which case the value is kept whole,
/// or its value still has a range after recursive pruning.
///
/// A container that survives but loses all of its children is kept as an
/// empty container; callers decide what an empty mapping or sequence means.
pub fn prune(node: &mut AnnotatedNode) {
    match node {
        AnnotatedNode::Sequence { items, .. } => {
            items.retain_mut(|item| {
                if item.lines().is_some() {
                    prune(item);
                    true
                } else {
                    false
                }
            });
        }
        AnnotatedNode::Mapping { entries, .. } => {
            entries.retain_mut(|(key, value)| {
                if key.lines.is_some() {
                    return true;
                }
                if value.lines().is_some() {
                    prune(value);
                    return true;
                }
                false
            });
        }
        AnnotatedNode::Scalar { .. } => {}
    }
}
