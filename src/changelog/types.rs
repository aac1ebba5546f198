//! Data model shared across the changelog pipeline

use serde::{Deserialize, Serialize};

/// A single commit as read from the repository log.
///
/// Produced by the git layer (or a test fixture) and treated as read-only
/// from there on. `body` is the remainder of the message after the subject
/// line and is empty, never absent, when the message has no body.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Commit {
    /// Full commit hash
    pub hash: String,
    /// Author name
    pub author: String,
    /// Author email
    pub email: String,
    /// Commit date as an opaque, pre-formatted string
    pub date: String,
    /// First line of the commit message
    pub subject: String,
    /// Remaining lines of the commit message
    #[serde(default)]
    pub body: String,
}

/// A deprecation detected in the codebase by the external scanner.
///
/// Read from the scanner's JSON report and used only to enrich the
/// generation prompt; deprecations are never scored or classified.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Deprecation {
    /// Resource the deprecation applies to
    pub resource: String,
    /// Field within the resource, when the deprecation is field-scoped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Deprecation message, ideally including a migration path
    pub message: String,
    /// Source file the deprecation was found in
    pub file: String,
}

/// Ordered mapping from category name to its entry lines.
///
/// Every configured category is always present, possibly with an empty
/// entry list; iteration yields categories in their configured order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategorizedEntries {
    sections: Vec<(String, Vec<String>)>,
}

impl CategorizedEntries {
    /// Creates an empty set covering every category in `categories`.
    pub fn new(categories: &[String]) -> Self {
        Self {
            sections: categories
                .iter()
                .map(|name| (name.clone(), Vec::new()))
                .collect(),
        }
    }

    /// Appends an entry line to `category`. Returns false when the
    /// category is not part of the configured set, in which case the
    /// entry is not stored.
    pub fn push(&mut self, category: &str, entry: impl Into<String>) -> bool {
        match self.sections.iter_mut().find(|(name, _)| name == category) {
            Some((_, entries)) => {
                entries.push(entry.into());
                true
            }
            None => false,
        }
    }

    /// Entry lines stored for `category`, if it is configured.
    pub fn entries(&self, category: &str) -> Option<&[String]> {
        self.sections
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, entries)| entries.as_slice())
    }

    /// Iterates over `(category, entries)` pairs in configured order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.sections
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    /// The configured category names, in order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(name, _)| name.as_str())
    }

    /// True when no category holds any entry.
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|(_, entries)| entries.is_empty())
    }

    /// Total number of entry lines across all categories.
    pub fn total_entries(&self) -> usize {
        self.sections.iter().map(|(_, entries)| entries.len()).sum()
    }
}
