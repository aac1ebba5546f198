//! Commit importance scoring and ordering
//!
//! Ranks raw commits before they are handed to the text generator so the
//! prompt leads with the changes most likely to matter to users. Scoring
//! is intentionally cheap and keyword-driven; it does not try to
//! understand the commit, only to rank it.

use std::sync::LazyLock;

use regex::Regex;

use super::types::Commit;
use crate::log_debug;

/// In-message token that excludes a commit from changelog consideration
/// entirely. Matched case-insensitively against subject and body.
pub const SKIP_MARKER: &str = "[skip changelog]";

/// Score added when the subject references a resource identifier.
const RESOURCE_BOOST: u32 = 2;
/// Score added when the subject references a data source.
const DATA_SOURCE_BOOST: u32 = 2;

/// Typed subject prefixes and their score bands. Evaluated top to bottom;
/// only the first recognized prefix counts.
const PREFIX_BANDS: &[(&[&str], u32)] = &[
    (&["breaking:"], 10),
    (&["deprecate:"], 9),
    (&["feat:"], 8),
    (&["add:"], 7),
    (&["fix:", "patch:"], 6),
    (&["enhance:", "improve:", "update:"], 5),
    (&["docs:", "example:"], 3),
    (&["refactor:", "test:", "chore:", "ci:"], 2),
];

/// Topic keyword groups consulted only when no prefix matched. Groups are
/// ordered; the first group with a hit decides the band.
const KEYWORD_BANDS: &[(&[&str], u32)] = &[
    (&["breaking", "major", "removed"], 10),
    (&["deprecat"], 9),
    (&["feat", "feature", "new"], 8),
    (&["add"], 7),
    (&["fix", "bug", "patch"], 6),
    (&["enhance", "improve", "update"], 5),
    (&["doc", "readme", "example"], 3),
    (&["refactor", "cleanup", "style", "test", "chore"], 2),
];

static RESOURCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"resource[/_]").expect("Failed to compile resource pattern")
});

static DATA_SOURCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"data[_\s]source").expect("Failed to compile data source pattern")
});

/// Assigns importance scores to commits and orders them for generation.
pub struct CommitScorer {
    /// Provider-specific identifier pattern (e.g. `rafay_\w+`), built
    /// from the configured resource prefix when one is set.
    provider_pattern: Option<Regex>,
}

impl CommitScorer {
    /// Creates a scorer, optionally boosting subjects that mention
    /// identifiers starting with `resource_prefix`.
    pub fn new(resource_prefix: Option<&str>) -> Self {
        let provider_pattern = resource_prefix
            .filter(|prefix| !prefix.is_empty())
            .map(|prefix| {
                Regex::new(&format!(r"\b{}_\w+", regex::escape(prefix)))
                    .expect("Failed to compile provider identifier pattern")
            });
        Self { provider_pattern }
    }

    /// Scores `commits`, drops the ones carrying the skip marker, and
    /// returns the survivors ordered by descending importance, truncated
    /// to `max_count`.
    ///
    /// The sort is stable: commits with equal scores keep their original
    /// relative order.
    pub fn score_and_order(&self, commits: Vec<Commit>, max_count: usize) -> Vec<Commit> {
        let mut scored: Vec<(u32, Commit)> = commits
            .into_iter()
            .filter_map(|commit| match self.score(&commit) {
                Some(importance) => Some((importance, commit)),
                None => {
                    log_debug!("Excluding commit {} (skip marker present)", commit.hash);
                    None
                }
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.truncate(max_count);
        scored.into_iter().map(|(_, commit)| commit).collect()
    }

    /// Computes the importance score for a single commit, or `None` when
    /// the commit opts out via the skip marker.
    pub fn score(&self, commit: &Commit) -> Option<u32> {
        let subject = commit.subject.to_lowercase();
        let body = commit.body.to_lowercase();

        if subject.contains(SKIP_MARKER) || body.contains(SKIP_MARKER) {
            return None;
        }

        let mut score = prefix_score(&subject)
            .or_else(|| keyword_score(&subject))
            .unwrap_or(0);

        if RESOURCE_PATTERN.is_match(&subject)
            || self
                .provider_pattern
                .as_ref()
                .is_some_and(|pattern| pattern.is_match(&subject))
        {
            score += RESOURCE_BOOST;
        }
        if DATA_SOURCE_PATTERN.is_match(&subject) {
            score += DATA_SOURCE_BOOST;
        }

        Some(score)
    }
}

impl Default for CommitScorer {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Band for a subject starting with a typed prefix, if any.
fn prefix_score(subject: &str) -> Option<u32> {
    for (prefixes, band) in PREFIX_BANDS {
        if prefixes.iter().any(|prefix| subject.starts_with(prefix)) {
            return Some(*band);
        }
    }
    None
}

/// Band for the first keyword group with a hit in the subject, if any.
fn keyword_score(subject: &str) -> Option<u32> {
    for (keywords, band) in KEYWORD_BANDS {
        if keywords.iter().any(|keyword| subject.contains(keyword)) {
            return Some(*band);
        }
    }
    None
}
