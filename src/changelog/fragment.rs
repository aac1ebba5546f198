//! Standalone changelog fragments
//!
//! A fragment is the categorized entry set for one change unit (typically
//! a pull request), persisted on its own so release tooling can pick it
//! up independently of CHANGELOG.md. Unlike the document merge, each
//! category block ends with a blank line.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::{ChangelogError, Result};
use super::types::CategorizedEntries;
use crate::log_debug;

/// Writes per-change fragment artifacts into a collection directory.
pub struct FragmentWriter {
    dir: PathBuf,
}

impl FragmentWriter {
    /// Creates a writer rooted at `dir`. The directory itself is only
    /// created once something is actually written.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path the fragment for `key` would be written to.
    pub fn fragment_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.md"))
    }

    /// Persists `entries` as the fragment for `key`, fully replacing any
    /// previous fragment under the same key. Returns `Ok(false)` without
    /// writing anything when no category has entries.
    pub fn write(&self, entries: &CategorizedEntries, key: &str) -> Result<bool> {
        let block = render_fragment(entries);
        if block.trim().is_empty() {
            log_debug!("No changelog entries to write for fragment '{}'", key);
            return Ok(false);
        }

        fs::create_dir_all(&self.dir).map_err(|source| ChangelogError::DocumentIo {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.fragment_path(key);
        fs::write(&path, block).map_err(|source| ChangelogError::DocumentIo {
            path: path.clone(),
            source,
        })?;

        log_debug!("Wrote fragment {}", path.display());
        Ok(true)
    }
}

/// Renders the fragment body: populated categories in configured order,
/// each `### <CATEGORY>` block followed by its entries and a trailing
/// blank line.
fn render_fragment(entries: &CategorizedEntries) -> String {
    let mut block = String::new();
    for (category, items) in entries.iter() {
        if items.is_empty() {
            continue;
        }
        block.push_str("### ");
        block.push_str(category);
        block.push_str("\n\n");
        for item in items {
            block.push_str(item);
            block.push('\n');
        }
        block.push('\n');
    }
    block
}

/// Reads back the fragment for `key`, mainly for tooling and tests.
pub fn read_fragment(dir: &Path, key: &str) -> Result<String> {
    let path = dir.join(format!("{key}.md"));
    fs::read_to_string(&path).map_err(|source| ChangelogError::DocumentIo { path, source })
}
