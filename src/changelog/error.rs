//! Error taxonomy for the changelog pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the changelog subsystems.
///
/// Each public operation reports failures locally; there is no
/// cross-component propagation beyond the operation that caused them.
/// "Nothing to do" outcomes are not errors and are reported as
/// `Ok(false)` by the operations that can produce them.
#[derive(Error, Debug)]
pub enum ChangelogError {
    /// Read/write failure on the changelog document or fragment store.
    /// The previous on-disk content is left untouched.
    #[error("failed to access '{path}': {source}")]
    DocumentIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external text generation call failed or was unavailable.
    #[error("changelog generation failed: {0}")]
    Generation(String),

    /// Malformed or unreadable configuration input.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Git operation failure while extracting commits.
    #[error("git operation failed: {0}")]
    Git(String),

    /// Structured input (deprecations report, section pattern) could not
    /// be parsed.
    #[error("failed to parse {0}")]
    Parse(String),
}

/// Type alias for Result with `ChangelogError`
pub type Result<T> = std::result::Result<T, ChangelogError>;
