//! Changelog generation core
//!
//! The deterministic pipeline around the generation call: commit
//! importance scoring, classification of generated text back into the
//! category taxonomy, changelog document merging, and per-change
//! fragment persistence.

mod classifier;
mod deprecations;
mod document;
mod error;
mod fragment;
mod generator;
mod prompt;
mod scorer;
mod types;

pub mod cli;

pub use classifier::CategoryClassifier;
pub use deprecations::load_deprecations;
pub use document::ChangelogDocument;
pub use error::{ChangelogError, Result};
pub use fragment::{FragmentWriter, read_fragment};
pub use generator::{ChangelogGenerator, append_pr_references, fallback_changelog};
pub use prompt::{create_system_prompt, create_user_prompt};
pub use scorer::{CommitScorer, SKIP_MARKER};
pub use types::{CategorizedEntries, Commit, Deprecation};
