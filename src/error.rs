//! Error types for the yaml-changeset library.
//!
//! Uses thiserror for derive macros. Errors that callers are expected to
//! match on (merge-base failures, per-file parse failures) get dedicated
//! variants; everything else is propagated with enough context to act on.

use thiserror::Error;

/// Main error type for yaml-changeset operations.
#[derive(Error, Debug)]
pub enum ChangesetError {
    /// The target and head commits share no common ancestor.
    ///
    /// This is fatal and never retried; diffing two unrelated histories has
    /// no meaningful base.
    #[error("no merge base found between '{target}' and '{head}'")]
    MergeBaseNotFound {
        /// The requested target (base) reference.
        target: String,
        /// The requested head reference.
        head: String,
    },

    /// A YAML document could not be parsed.
    ///
    /// Scoped to a single file; the change-set loader skips the offending
    /// file with a warning rather than aborting the whole run.
    #[error("YAML parse error: {0}")]
    Parse(String),

    /// A git command failed or could not be spawned.
    #[error("git operation failed: {0}")]
    Git(String),

    /// Reading a file from the working tree failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendering an annotated tree back to plain YAML failed.
    #[error("YAML render failed: {0}")]
    Render(#[from] serde_yaml::Error),
}

/// Result type alias for yaml-changeset operations.
pub type Result<T> = std::result::Result<T, ChangesetError>;
