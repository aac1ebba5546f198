//! Classification of generated text back into the category taxonomy
//!
//! The generator returns free-form text: a mix of category headers,
//! bullet entries, and continuation lines. This module folds those lines
//! back into the configured category set. Classification is pattern
//! driven and allowed to be imprecise; when nothing matches, an entry
//! lands in ENHANCEMENTS.

use super::types::CategorizedEntries;
use crate::log_debug;

/// Canonical category names targeted by the inference rules. The
/// configured set normally matches these; when it does not, a rule whose
/// category is absent simply never fires.
mod canon {
    pub const BREAKING_CHANGES: &str = "BREAKING CHANGES";
    pub const FEATURES: &str = "FEATURES";
    pub const ENHANCEMENTS: &str = "ENHANCEMENTS";
    pub const BUG_FIXES: &str = "BUG FIXES";
    pub const DEPRECATIONS: &str = "DEPRECATIONS";
    pub const DOCUMENTATION: &str = "DOCUMENTATION";
}

/// One step of the category inference cascade.
struct InferenceRule {
    category: &'static str,
    matches: fn(&str) -> bool,
}

/// Ordered inference cascade for bullets that appear before any category
/// header. Evaluated top to bottom against the lowercased line; the first
/// match wins. Typed prefix fragments outrank the generic keyword tests
/// below them.
///
/// The deprecation keyword rule deliberately requires an explicit
/// deprecation-action phrase rather than the bare substring "deprecat":
/// a fix that merely mentions a deprecated field must stay a bug fix.
const INFERENCE_RULES: &[InferenceRule] = &[
    InferenceRule {
        category: canon::BUG_FIXES,
        matches: |line| line.contains("fix:") || line.contains("patch:"),
    },
    InferenceRule {
        category: canon::BREAKING_CHANGES,
        matches: |line| line.contains("breaking:"),
    },
    InferenceRule {
        category: canon::FEATURES,
        matches: |line| {
            line.contains("feat:")
                && (line.contains("new resource") || line.contains("new data source"))
        },
    },
    InferenceRule {
        category: canon::DEPRECATIONS,
        matches: |line| line.contains("deprecate:"),
    },
    InferenceRule {
        category: canon::DOCUMENTATION,
        matches: |line| line.contains("docs:") || line.contains("example:"),
    },
    InferenceRule {
        category: canon::FEATURES,
        matches: |line| line.contains("feat:") || line.contains("add:"),
    },
    InferenceRule {
        category: canon::ENHANCEMENTS,
        matches: |line| {
            line.contains("enhance:") || line.contains("improve:") || line.contains("update:")
        },
    },
    InferenceRule {
        category: canon::BREAKING_CHANGES,
        matches: |line| {
            line.contains("breaking") || line.contains("removed") || line.contains("renamed")
        },
    },
    InferenceRule {
        category: canon::FEATURES,
        matches: |line| line.contains("new resource") || line.contains("new data source"),
    },
    InferenceRule {
        category: canon::DEPRECATIONS,
        matches: |line| {
            line.contains("deprecate ")
                || line.contains("is deprecated")
                || line.contains("as deprecated")
        },
    },
    InferenceRule {
        category: canon::BUG_FIXES,
        matches: |line| {
            line.contains("fix") || line.contains("correct") || line.contains("resolve")
        },
    },
    InferenceRule {
        category: canon::ENHANCEMENTS,
        matches: |line| {
            line.contains("add")
                || line.contains("improve")
                || line.contains("enhance")
                || line.contains("update")
        },
    },
    InferenceRule {
        category: canon::DOCUMENTATION,
        matches: |line| line.contains("doc"),
    },
];

/// Reconstructs categorized entries from generated free-form text.
pub struct CategoryClassifier {
    categories: Vec<String>,
}

impl CategoryClassifier {
    /// Creates a classifier over the configured, ordered category set.
    pub fn new(categories: &[String]) -> Self {
        Self {
            categories: categories.to_vec(),
        }
    }

    /// Folds the lines of `text` into per-category entry lists.
    ///
    /// A single cursor tracks the category currently being filled: headers
    /// move it, bullets append to it (inferring and setting it when no
    /// header was seen yet), and any other non-blank line continues the
    /// current category's last entry block. The result always contains
    /// every configured category, empty or not.
    pub fn classify(&self, text: &str) -> CategorizedEntries {
        let mut entries = CategorizedEntries::new(&self.categories);
        let mut current_category: Option<String> = None;

        for raw_line in text.lines() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(header) = self.match_header(line) {
                current_category = Some(header);
                continue;
            }

            if line.starts_with('*') || line.starts_with('-') {
                let category = match current_category.clone() {
                    Some(category) => category,
                    None => {
                        let inferred = self.infer_category(&line.to_lowercase());
                        log_debug!("Inferred category '{}' for: {}", inferred, line);
                        current_category = Some(inferred.clone());
                        inferred
                    }
                };
                entries.push(&category, line);
            } else if let Some(category) = &current_category {
                // Continuation of a multi-line entry.
                entries.push(category, line);
            } else {
                log_debug!("Dropping uncategorizable line: {}", line);
            }
        }

        entries
    }

    /// Returns the configured category a header line names, if any. The
    /// line is uppercased and stripped of trailing colons before the
    /// exact comparison; the header itself is never stored as an entry.
    fn match_header(&self, line: &str) -> Option<String> {
        let upper = line.to_uppercase();
        let name = upper.trim_end_matches(':');
        self.categories
            .iter()
            .find(|category| category.to_uppercase() == name)
            .cloned()
    }

    /// Runs the inference cascade over a lowercased bullet line. Rules
    /// naming a category missing from the configured set are skipped; the
    /// fallback is ENHANCEMENTS when configured, else the first category.
    fn infer_category(&self, line: &str) -> String {
        for rule in INFERENCE_RULES {
            if (rule.matches)(line)
                && let Some(configured) = self.find_configured(rule.category)
            {
                return configured;
            }
        }

        self.find_configured(canon::ENHANCEMENTS)
            .or_else(|| self.categories.first().cloned())
            .unwrap_or_else(|| canon::ENHANCEMENTS.to_string())
    }

    /// Looks up the configured spelling of a canonical category name.
    fn find_configured(&self, canonical: &str) -> Option<String> {
        self.categories
            .iter()
            .find(|category| category.eq_ignore_ascii_case(canonical))
            .cloned()
    }
}
