//! Prompt assembly for the generation call
//!
//! The prompt content is a fixed template; only the commit list, the
//! deprecation report, and the configured category names vary per run.

use std::fmt::Write;

use super::types::{Commit, Deprecation};
use crate::config::Config;

/// Longest body excerpt included per commit.
const BODY_EXCERPT_LEN: usize = 200;

/// System prompt: the writer persona plus the categorization rules.
pub fn create_system_prompt(config: &Config) -> String {
    let mut prompt = String::from(
        "You are a technical writer maintaining the changelog of an infrastructure-as-code provider. \
        Generate changelog entries in the style of the HashiCorp AWS Terraform provider.\n\n\
        REQUIREMENTS:\n\
        1. Categorize changes into these sections: ",
    );
    prompt.push_str(&config.categories.join(", "));
    prompt.push_str(
        "\n\
        2. Write clear, user-focused descriptions, not just commit messages\n\
        3. Follow this format for each entry: \"* resource/<resource_name>: Description of change\"\n\
        4. For new resources or data sources, use: \"* **New Resource:** `<resource_name>`\"\n\
        5. Group related changes together intelligently\n\
        6. Prioritize significant changes and skip trivial ones (typos, minor refactoring, code comments)\n\
        7. Use present tense (\"Add\" not \"Added\", \"Fix\" not \"Fixed\")\n\
        8. If a change is not significant, skip it entirely\n\
        9. Do not include emojis in the changelog entries\n\n\
        CATEGORIZATION RULES:\n\n\
        **BREAKING CHANGES** - Only for changes that break existing user configurations: \
        removing or renaming resources, removing or renaming arguments or attributes, \
        changing required vs optional status of fields, changing defaults that affect \
        existing deployments. NOT for internal refactoring or comment changes.\n\n\
        **FEATURES** - New functionality users can adopt: new resources, new data sources, \
        new optional arguments that add capabilities.\n\n\
        **ENHANCEMENTS** - Improvements to existing functionality: performance, better \
        error messages, additional validation, support for new provider features.\n\n\
        **BUG FIXES** - Corrections to incorrect behavior: crashes, errors, incorrect \
        results, state management issues, import/export problems.\n\n\
        **DEPRECATIONS** - Advance notice of future breaking changes: deprecated \
        resources, arguments, or values. Include the migration path in the description.\n\n\
        **DOCUMENTATION** - Documentation-only changes; only include significant ones \
        (new guides, major rewrites).\n\n\
        Generate ONLY the changelog entries (bullet points), grouped by category with the \
        category name on its own line before its entries.",
    );
    prompt
}

/// User prompt: the scored commits and any detected deprecations.
pub fn create_user_prompt(
    commits: &[Commit],
    deprecations: &[Deprecation],
    pr_number: Option<u64>,
    pr_url: Option<&str>,
) -> String {
    let mut prompt = String::from("COMMITS TO ANALYZE:\n");

    for commit in commits {
        let _ = writeln!(prompt, "\u{2022} {}", commit.subject);
        let body = commit.body.trim();
        if !body.is_empty() {
            let excerpt: String = body.chars().take(BODY_EXCERPT_LEN).collect();
            let _ = writeln!(prompt, "  {excerpt}");
        }
        let _ = writeln!(prompt, "  (by {})", commit.author);
    }

    if !deprecations.is_empty() {
        prompt.push_str("\nDEPRECATIONS DETECTED IN CODE:\n");
        for deprecation in deprecations {
            prompt.push_str("\u{2022} ");
            prompt.push_str(&deprecation.resource);
            if let Some(field) = &deprecation.field {
                let _ = write!(prompt, ".{field}");
            }
            let _ = writeln!(prompt, ": {}", deprecation.message);
            let _ = writeln!(prompt, "  (in {})", deprecation.file);
        }
    }

    if let (Some(number), Some(url)) = (pr_number, pr_url) {
        let _ = write!(
            prompt,
            "\nEnd each entry with the pull request reference ([#{number}]({url}))."
        );
    }

    prompt
}
