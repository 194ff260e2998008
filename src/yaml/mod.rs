//! Line-annotated YAML trees.
//!
//! - The [`AnnotatedNode`] tagged union (`node`)
//! - Event-driven parsing with source spans (`parser`)
//! - Rendering back to plain YAML (`emit`)

mod emit;
mod node;
mod parser;


pub use emit::{to_value, to_yaml_string};
pub use node::{AnnotatedKey, AnnotatedNode, Scalar};
pub use parser::parse_annotated;
