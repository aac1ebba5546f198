//! Changelog content generation
//!
//! Orchestrates the generation call and its failure path. The provider
//! call is the only operation here that can fail transiently; when it
//! does, we degrade to a mechanical rendering of the commit subjects so a
//! run never silently produces nothing.

use std::fmt::Write;

use super::prompt;
use super::types::{Commit, Deprecation};
use crate::config::Config;
use crate::llm;
use crate::{log_debug, log_warn};

/// Produces the raw changelog text for a set of scored commits.
pub struct ChangelogGenerator;

impl ChangelogGenerator {
    /// Generates changelog text via the configured provider, falling back
    /// to [`fallback_changelog`] when the call fails or no provider is
    /// available.
    pub async fn generate(
        config: &Config,
        commits: &[Commit],
        deprecations: &[Deprecation],
        pr_number: Option<u64>,
        pr_url: Option<&str>,
    ) -> String {
        let system_prompt = prompt::create_system_prompt(config);
        let user_prompt = prompt::create_user_prompt(commits, deprecations, pr_number, pr_url);

        match llm::generate_text(config, &system_prompt, &user_prompt).await {
            Ok(content) => {
                log_debug!("Generated {} characters of changelog text", content.len());
                append_pr_references(&content, pr_number, pr_url)
            }
            Err(e) => {
                log_warn!("Generation failed, using commit subjects instead: {e}");
                fallback_changelog(commits, pr_number, pr_url)
            }
        }
    }
}

/// Mechanical rendering used when generation is unavailable: one bullet
/// per commit subject, suffixed with the PR reference when known.
pub fn fallback_changelog(
    commits: &[Commit],
    pr_number: Option<u64>,
    pr_url: Option<&str>,
) -> String {
    let reference = reference_tag(pr_number, pr_url);
    let mut content = String::new();
    for commit in commits {
        let _ = writeln!(content, "* {}{reference}", commit.subject);
    }
    content.truncate(content.trim_end().len());
    content
}

/// Appends the PR reference to every bullet line that does not already
/// mention `#<number>`. Lines other than bullets pass through untouched.
pub fn append_pr_references(content: &str, pr_number: Option<u64>, pr_url: Option<&str>) -> String {
    let (Some(number), Some(url)) = (pr_number, pr_url) else {
        return content.to_string();
    };
    let marker = format!("#{number}");

    content
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            if (trimmed.starts_with('*') || trimmed.starts_with('-')) && !line.contains(&marker) {
                format!("{} ([#{number}]({url}))", line.trim_end())
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn reference_tag(pr_number: Option<u64>, pr_url: Option<&str>) -> String {
    match (pr_number, pr_url) {
        (Some(number), Some(url)) => format!(" ([#{number}]({url}))"),
        _ => String::new(),
    }
}
