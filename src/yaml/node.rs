//! The annotated YAML tree.
//!
//! An explicit tagged union replaces the usual "deserialize into plain
//! values" approach: every mapping, sequence, and string scalar carries the
//! source line range it was parsed from, and mapping keys are annotated
//! independently of their values so key-level change propagation is possible.

use crate::diff::LineRange;

/// A scalar value from a YAML document.
///
/// Only string scalars are line-annotated (see [`AnnotatedNode`]); the other
/// kinds exist so consumers still see real types instead of strings.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// A mapping key with its own source line range, independent of the value's.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedKey {
    /// The key text as written. Non-string scalar keys keep their textual
    /// form but carry no range.
    pub text: String,
    /// Source lines of the key itself, or `None` once isolation cleared it.
    pub lines: Option<LineRange>,
}

impl AnnotatedKey {
    pub fn new(text: impl Into<String>, lines: Option<LineRange>) -> Self {
        Self {
            text: text.into(),
            lines,
        }
    }
}

/// A parsed YAML node annotated with the source lines it came from.
///
/// `lines` is `Some` right after parsing (for mappings, sequences, and
/// string scalars) and is cleared by isolation on every node the change set
/// did not touch. A container's range always encloses the ranges of
/// everything still reachable under it.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotatedNode {
    /// Ordered key/value pairs. Entry order matches the document.
    Mapping {
        entries: Vec<(AnnotatedKey, AnnotatedNode)>,
        lines: Option<LineRange>,
    },
    /// Ordered items.
    Sequence {
        items: Vec<AnnotatedNode>,
        lines: Option<LineRange>,
    },
    /// A leaf value. `lines` is always `None` for non-string scalars.
    Scalar {
        value: Scalar,
        lines: Option<LineRange>,
    },
}

impl AnnotatedNode {
    /// The node's source line range, if still present.
    pub fn lines(&self) -> Option<LineRange> {
        match self {
            AnnotatedNode::Mapping { lines, .. }
            | AnnotatedNode::Sequence { lines, .. }
            | AnnotatedNode::Scalar { lines, .. } => *lines,
        }
    }

    /// Clear the node's source line range.
    pub fn clear_lines(&mut self) {
        match self {
            AnnotatedNode::Mapping { lines, .. }
            | AnnotatedNode::Sequence { lines, .. }
            | AnnotatedNode::Scalar { lines, .. } => *lines = None,
        }
    }

    /// Mapping entries, if this node is a mapping.
    pub fn as_mapping(&self) -> Option<&[(AnnotatedKey, AnnotatedNode)]> {
        match self {
            AnnotatedNode::Mapping { entries, .. } => Some(entries),
            _ => None,
        }
    }

    /// Sequence items, if this node is a sequence.
    pub fn as_sequence(&self) -> Option<&[AnnotatedNode]> {
        match self {
            AnnotatedNode::Sequence { items, .. } => Some(items),
            _ => None,
        }
    }

    /// The string value, if this node is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnnotatedNode::Scalar {
                value: Scalar::Str(s),
                ..
            } => Some(s),
            _ => None,
        }
    }

    /// Look up a mapping value by key text.
    pub fn get(&self, key: &str) -> Option<&AnnotatedNode> {
        self.entry(key).map(|(_, value)| value)
    }

    /// Look up a mapping entry (key and value) by key text.
    pub fn entry(&self, key: &str) -> Option<(&AnnotatedKey, &AnnotatedNode)> {
        self.as_mapping()?
            .iter()
            .find(|(k, _)| k.text == key)
            .map(|(k, v)| (k, v))
    }

    /// Number of direct children (entries or items); 0 for scalars.
    pub fn child_count(&self) -> usize {
        match self {
            AnnotatedNode::Mapping { entries, .. } => entries.len(),
            AnnotatedNode::Sequence { items, .. } => items.len(),
            AnnotatedNode::Scalar { .. } => 0,
        }
    }

    /// An unannotated null scalar, the parse result of an empty document.
    pub fn null() -> Self {
        AnnotatedNode::Scalar {
            value: Scalar::Null,
            lines: None,
        }
    }
}
