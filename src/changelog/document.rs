//! Changelog document management
//!
//! Models CHANGELOG.md as ordered `## <section>` blocks, each holding
//! `### <CATEGORY>` subsections. Mutation is full-text read/patch/rewrite:
//! the updated content is buffered completely before a single write, so a
//! failed operation never leaves a partially written file. Untouched
//! sections round-trip byte for byte.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use super::error::{ChangelogError, Result};
use super::types::CategorizedEntries;
use crate::log_debug;

const DOCUMENT_HEADER: &str = "# Changelog\n\n\
All notable changes to this project will be documented in this file.\n\n\
The format is based on [Keep a Changelog](https://keepachangelog.com/en/1.0.0/),\n\
and this project adheres to [Semantic Versioning](https://semver.org/spec/v2.0.0.html).\n";

const DOCUMENT_FOOTER: &str = "\n---\n\
*Note: Changelog entries are generated automatically from commit history.*\n";

/// The persistent changelog document.
pub struct ChangelogDocument {
    path: PathBuf,
    categories: Vec<String>,
}

impl ChangelogDocument {
    /// Creates a handle for the document at `path` with the configured,
    /// ordered category set.
    pub fn new(path: impl Into<PathBuf>, categories: &[String]) -> Self {
        Self {
            path: path.into(),
            categories: categories.to_vec(),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the canonical skeleton if no document exists yet: title,
    /// attribution boilerplate, and an "Unreleased" section with every
    /// configured category pre-declared empty. Idempotent; an existing
    /// document is never overwritten.
    pub fn ensure_initialized(&self) -> Result<bool> {
        if self.path.exists() {
            log_debug!("Changelog already present at {}", self.path.display());
            return Ok(false);
        }
        self.write_content(&self.initial_content())?;
        Ok(true)
    }

    /// Merges `entries` into `target_section`, creating the section (or
    /// the whole document) when missing. Returns `Ok(false)` without
    /// touching the file when no category has entries.
    ///
    /// New content is inserted directly after the section header, before
    /// any existing section content: repeated merges stack, newest first,
    /// and earlier blocks are preserved byte for byte.
    pub fn merge(&self, entries: &CategorizedEntries, target_section: &str) -> Result<bool> {
        let block = render_section_block(entries);
        if block.trim().is_empty() {
            log_debug!("No changelog entries to merge");
            return Ok(false);
        }

        let content = if self.path.exists() {
            self.read_content()?
        } else {
            self.initial_content()
        };

        // Trailing whitespace after the header (including blank lines) is
        // skipped so the block lands ahead of the section's first real
        // content line.
        let section_pattern =
            Regex::new(&format!(r"(?m)^## {}\s*\n", regex::escape(target_section)))
                .map_err(|e| ChangelogError::Parse(format!("section pattern: {e}")))?;

        let updated = if let Some(header) = section_pattern.find(&content) {
            let insert_at = header.end();
            format!("{}{}{}", &content[..insert_at], block, &content[insert_at..])
        } else if let Some(first_section) = content.find("\n## ") {
            // Unknown section: open a new one ahead of the existing ones.
            format!(
                "{}\n\n## {}\n{}{}",
                &content[..first_section],
                target_section,
                block,
                &content[first_section..]
            )
        } else {
            format!("{content}\n## {target_section}\n{block}")
        };

        self.write_content(&updated)?;
        log_debug!(
            "Merged {} entr(ies) into section '{}' of {}",
            entries.total_entries(),
            target_section,
            self.path.display()
        );
        Ok(true)
    }

    fn initial_content(&self) -> String {
        let mut content = String::from(DOCUMENT_HEADER);
        content.push_str("\n## Unreleased\n");
        for category in &self.categories {
            content.push_str("\n### ");
            content.push_str(category);
            content.push('\n');
        }
        content.push_str(DOCUMENT_FOOTER);
        content
    }

    fn read_content(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|source| ChangelogError::DocumentIo {
            path: self.path.clone(),
            source,
        })
    }

    fn write_content(&self, content: &str) -> Result<()> {
        fs::write(&self.path, content).map_err(|source| ChangelogError::DocumentIo {
            path: self.path.clone(),
            source,
        })
    }
}

/// Renders the in-document block for a merge: each populated category as
/// a `### <CATEGORY>` subheading followed by its entries in stored order.
/// Empty categories are omitted; an all-empty set renders to nothing.
pub(crate) fn render_section_block(entries: &CategorizedEntries) -> String {
    let mut block = String::new();
    for (category, items) in entries.iter() {
        if items.is_empty() {
            continue;
        }
        block.push_str("\n### ");
        block.push_str(category);
        block.push_str("\n\n");
        for item in items {
            block.push_str(item);
            block.push('\n');
        }
    }
    block
}
