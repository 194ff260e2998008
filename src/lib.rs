//! yaml-changeset: a change-aware structured diff engine for YAML files in
//! git repositories.
//!
//! The crate answers one question with correct structural semantics: which
//! exact fragments of a parsed, nested YAML document were actually touched by
//! a set of repository changes? It does so in four passes:
//!
//! 1. [`diff::added_line_ranges`] computes the set of line numbers added
//!    between two revisions (or a revision and the working tree).
//! 2. [`yaml::parse_annotated`] parses YAML text into a tree where every
//!    mapping, sequence, and string scalar remembers its source line range.
//! 3. [`changes::isolate`] clears the range marker on every node the change
//!    set did not touch, propagating key changes onto whole value subtrees.
//! 4. [`changes::prune`] deletes every subtree left without a marker,
//!    collapsing the tree to only the touched substructure.
//!
//! [`changes::load_changed_yaml`] orchestrates passes 1-3 for a set of files;
//! pruning is deliberately left to callers so they can inspect the isolated
//! but still fully-shaped tree first.
//!
//! Rule checks, review aggregation, and code-host posting are external
//! consumers of these trees and live outside this crate.

pub mod changes;
pub mod diff;
pub mod error;
pub mod git;
pub mod yaml;

#[cfg(test)]
pub(crate) mod test_support;

pub use changes::{isolate, load_changed_yaml, prune};
pub use diff::{ChangeSet, DiffRequest, LineRange, added_line_ranges};
pub use error::{ChangesetError, Result};
pub use yaml::{AnnotatedKey, AnnotatedNode, Scalar, parse_annotated};
