//! Added-line tracking between git repository states.
//!
//! This module answers "which line numbers did this change add, per file":
//! - Ref defaulting and merge-base selection (`api`)
//! - Unified diff parsing into new-side line numbers (`parser`)
//! - Coalescing line numbers into disjoint ranges (`ranges`)
//!
//! The output [`ChangeSet`] feeds the tree passes in [`crate::changes`].

mod api;
mod parser;
mod ranges;


pub use api::{DiffRequest, added_line_ranges};
pub use ranges::{ChangeSet, LineRange, coalesce_lines};

pub(crate) use parser::normalize_path;
