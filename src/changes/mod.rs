//! Change propagation over annotated YAML trees.
//!
//! Three passes consume [`crate::diff`]'s change set and [`crate::yaml`]'s
//! annotated trees:
//! - `isolate` clears annotations on untouched nodes (`isolate`)
//! - `prune` deletes subtrees with no annotations left (`prune`)
//! - `load_changed_yaml` orchestrates diff + parse + isolate per file,
//!   leaving pruning to callers (`loader`)

mod isolate;
mod loader;
mod prune;


pub use isolate::isolate;
pub use loader::load_changed_yaml;
pub use prune::prune;
