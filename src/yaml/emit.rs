//! Rendering annotated trees back to plain YAML.
//!
//! Rule checks use this to render suggested replacements from pruned trees.
//! The conversion is a locally invoked function with no process-wide
//! serializer registry; annotations are simply dropped.

use crate::error::Result;
use serde_yaml::{Mapping, Number, Value};

use super::node::{AnnotatedNode, Scalar};

/// Convert an annotated tree to a plain `serde_yaml::Value`.
pub fn to_value(node: &AnnotatedNode) -> Value {
    match node {
        AnnotatedNode::Mapping { entries, .. } => {
            let mut mapping = Mapping::with_capacity(entries.len());
            for (key, value) in entries {
                mapping.insert(Value::String(key.text.clone()), to_value(value));
            }
            Value::Mapping(mapping)
        }
        AnnotatedNode::Sequence { items, .. } => {
            Value::Sequence(items.iter().map(to_value).collect())
        }
        AnnotatedNode::Scalar { value, .. } => match value {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Int(i) => Value::Number(Number::from(*i)),
            Scalar::Float(f) => Value::Number(Number::from(*f)),
            Scalar::Str(s) => Value::String(s.clone()),
        },
    }
}

/// Render an annotated tree as a plain YAML document string.
pub fn to_yaml_string(node: &AnnotatedNode) -> Result<String> {
    Ok(serde_yaml::to_string(&to_value(node))?)
}
