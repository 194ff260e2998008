//! Line-annotated YAML parsing.
//!
//! Builds an [`AnnotatedNode`] tree from the parser's event stream rather
//! than deserializing into plain values, because each event carries the
//! source span the node came from. Ranges are 1-based and end-exclusive; a
//! span whose raw end line is not strictly past its start line is normalized
//! to cover exactly one line, so every range is non-empty.
//!
//! After a mapping or sequence closes, its range's stop is widened to the
//! maximum stop among its keys and children ("bubbling"): block scalars and
//! nested structures can extend past where the container's own closing
//! position was recorded, and consumers need an enclosing bound.

use crate::diff::LineRange;
use crate::error::{ChangesetError, Result};
use saphyr_parser::{Event, Parser, Span, SpannedEventReceiver, TScalarStyle};
use std::collections::HashMap;

use super::node::{AnnotatedKey, AnnotatedNode, Scalar};

/// Parse a YAML document into a line-annotated tree.
///
/// Pure and deterministic. Safe-subset loading: tags are never executed, and
/// an alias clones the anchored node, annotations included. Only the first
/// document of a multi-document stream is read. Empty input parses to an
/// unannotated null scalar.
///
/// # Returns
///
/// * `Ok(AnnotatedNode)` - The document root
/// * `Err(ChangesetError::Parse)` - Malformed input; no partial tree is
///   ever returned
pub fn parse_annotated(text: &str) -> Result<AnnotatedNode> {
    let mut parser = Parser::new_from_str(text);
    let mut builder = TreeBuilder::default();

    parser
        .load(&mut builder, false)
        .map_err(|e| ChangesetError::Parse(e.to_string()))?;

    if let Some(message) = builder.error {
        return Err(ChangesetError::Parse(message));
    }

    Ok(builder.root.unwrap_or_else(AnnotatedNode::null))
}

/// An in-progress container on the builder stack.
enum Frame {
    Mapping {
        entries: Vec<(AnnotatedKey, AnnotatedNode)>,
        pending_key: Option<AnnotatedKey>,
        start_line: usize,
        anchor: usize,
    },
    Sequence {
        items: Vec<AnnotatedNode>,
        start_line: usize,
        anchor: usize,
    },
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Frame>,
    root: Option<AnnotatedNode>,
    anchors: HashMap<usize, AnnotatedNode>,
    error: Option<String>,
}

impl TreeBuilder {
    /// True if the next node would land in key position of a mapping.
    fn expects_key(&self) -> bool {
        matches!(
            self.stack.last(),
            Some(Frame::Mapping {
                pending_key: None,
                ..
            })
        )
    }

    fn push_node(&mut self, node: AnnotatedNode) {
        if self.error.is_some() {
            return;
        }

        match self.stack.last_mut() {
            Some(Frame::Sequence { items, .. }) => items.push(node),
            Some(Frame::Mapping {
                entries,
                pending_key,
                ..
            }) => {
                if let Some(key) = pending_key.take() {
                    entries.push((key, node));
                } else {
                    match key_from_node(node) {
                        Ok(key) => *pending_key = Some(key),
                        Err(message) => self.error = Some(message),
                    }
                }
            }
            None => {
                // Only the first document becomes the root.
                if self.root.is_none() {
                    self.root = Some(node);
                }
            }
        }
    }

    fn finish_container(&mut self, node: AnnotatedNode, anchor: usize) {
        if anchor != 0 {
            self.anchors.insert(anchor, node.clone());
        }
        self.push_node(node);
    }
}

impl SpannedEventReceiver for TreeBuilder {
    fn on_event(&mut self, ev: Event, span: Span) {
        match ev {
            Event::Scalar(value, style, anchor, _tag) => {
                let value = resolve_scalar(value, style);
                let lines = match value {
                    Scalar::Str(_) => Some(scalar_range(&span, style)),
                    _ => None,
                };
                let node = AnnotatedNode::Scalar { value, lines };
                if anchor != 0 {
                    self.anchors.insert(anchor, node.clone());
                }
                self.push_node(node);
            }

            Event::MappingStart(anchor, _tag) => {
                if self.expects_key() && self.error.is_none() {
                    self.error = Some("complex mapping keys are not supported".to_string());
                }
                self.stack.push(Frame::Mapping {
                    entries: Vec::new(),
                    pending_key: None,
                    start_line: span.start.line(),
                    anchor,
                });
            }

            Event::MappingEnd => {
                let Some(Frame::Mapping {
                    entries,
                    start_line,
                    anchor,
                    ..
                }) = self.stack.pop()
                else {
                    self.error
                        .get_or_insert_with(|| "unbalanced mapping end".to_string());
                    return;
                };

                let mut stop = span.end.line().max(start_line + 1);
                for (key, value) in &entries {
                    if let Some(range) = key.lines {
                        stop = stop.max(range.stop);
                    }
                    if let Some(range) = value.lines() {
                        stop = stop.max(range.stop);
                    }
                }

                let node = AnnotatedNode::Mapping {
                    entries,
                    lines: Some(LineRange::new(start_line, stop)),
                };
                self.finish_container(node, anchor);
            }

            Event::SequenceStart(anchor, _tag) => {
                if self.expects_key() && self.error.is_none() {
                    self.error = Some("complex mapping keys are not supported".to_string());
                }
                self.stack.push(Frame::Sequence {
                    items: Vec::new(),
                    start_line: span.start.line(),
                    anchor,
                });
            }

            Event::SequenceEnd => {
                let Some(Frame::Sequence {
                    items,
                    start_line,
                    anchor,
                }) = self.stack.pop()
                else {
                    self.error
                        .get_or_insert_with(|| "unbalanced sequence end".to_string());
                    return;
                };

                let mut stop = span.end.line().max(start_line + 1);
                for item in &items {
                    if let Some(range) = item.lines() {
                        stop = stop.max(range.stop);
                    }
                }

                let node = AnnotatedNode::Sequence {
                    items,
                    lines: Some(LineRange::new(start_line, stop)),
                };
                self.finish_container(node, anchor);
            }

            Event::Alias(anchor) => {
                let node = self
                    .anchors
                    .get(&anchor)
                    .cloned()
                    .unwrap_or_else(AnnotatedNode::null);
                self.push_node(node);
            }

            Event::Nothing
            | Event::StreamStart
            | Event::StreamEnd
            | Event::DocumentStart(_)
            | Event::DocumentEnd => {}
        }
    }
}

/// Convert a scalar event span to a non-empty, end-exclusive line range.
///
/// The parser reports a block scalar's span from its first content line, but
/// the `|`/`>` indicator line belongs to the scalar: a change touching only
/// that line still touches the scalar, so the range is widened to cover it.
fn scalar_range(span: &Span, style: TScalarStyle) -> LineRange {
    let mut start = span.start.line();
    if matches!(style, TScalarStyle::Literal | TScalarStyle::Folded) {
        start = start.saturating_sub(1).max(1);
    }
    let stop = span.end.line().max(start + 1);
    LineRange::new(start, stop)
}

/// Resolve a scalar to its value kind.
///
/// Quoted and block scalars are always strings; plain scalars follow the
/// usual resolution for null, booleans, integers, and floats. Tags are not
/// consulted (safe-subset loading).
fn resolve_scalar(value: String, style: TScalarStyle) -> Scalar {
    if style != TScalarStyle::Plain {
        return Scalar::Str(value);
    }

    match value.as_str() {
        "" | "~" | "null" | "Null" | "NULL" => return Scalar::Null,
        "true" | "True" | "TRUE" => return Scalar::Bool(true),
        "false" | "False" | "FALSE" => return Scalar::Bool(false),
        ".inf" | "+.inf" | ".Inf" | "+.Inf" => return Scalar::Float(f64::INFINITY),
        "-.inf" | "-.Inf" => return Scalar::Float(f64::NEG_INFINITY),
        ".nan" | ".NaN" => return Scalar::Float(f64::NAN),
        _ => {}
    }

    if let Ok(int) = value.parse::<i64>() {
        return Scalar::Int(int);
    }

    // Restrict float parsing to numeric-looking text so words like "nan"
    // stay strings.
    if value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        && let Ok(float) = value.parse::<f64>()
    {
        return Scalar::Float(float);
    }

    Scalar::Str(value)
}

/// Turn a completed node into a mapping key.
///
/// Only scalar keys are supported; the key keeps its textual form, and only
/// string keys carry a range (matching the string-only annotation rule).
fn key_from_node(node: AnnotatedNode) -> std::result::Result<AnnotatedKey, String> {
    match node {
        AnnotatedNode::Scalar { value, lines } => {
            let text = match value {
                Scalar::Str(s) => s,
                Scalar::Null => "null".to_string(),
                Scalar::Bool(b) => b.to_string(),
                Scalar::Int(i) => i.to_string(),
                Scalar::Float(f) => f.to_string(),
            };
            Ok(AnnotatedKey::new(text, lines))
        }
        _ => Err("complex mapping keys are not supported".to_string()),
    }
}
