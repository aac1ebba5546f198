//! Handler for the `generate` command

use std::path::Path;

use anyhow::{Result, anyhow};

use super::classifier::CategoryClassifier;
use super::deprecations::load_deprecations;
use super::document::ChangelogDocument;
use super::fragment::FragmentWriter;
use super::generator::ChangelogGenerator;
use super::scorer::CommitScorer;
use super::types::CategorizedEntries;
use crate::common::CommonParams;
use crate::config::Config;
use crate::git::GitRepo;
use crate::ui;

/// Everything the `generate` command needs, gathered from the CLI.
pub struct GenerateRequest {
    pub common: CommonParams,
    pub from: String,
    pub to: Option<String>,
    pub pr_number: Option<u64>,
    pub pr_url: Option<String>,
    pub target_section: String,
    pub deprecations_file: Option<String>,
    pub changelog_path: String,
    pub write_fragment: bool,
    pub dry_run: bool,
}

/// Handles the changelog generation command.
///
/// Scores and ranks the commit range, generates categorized entries for
/// the survivors, and merges them into the changelog document (plus a
/// per-change fragment when requested). Runs with no eligible commits or
/// no surviving entries finish successfully with a notice: nothing to do
/// is not a failure.
pub async fn handle_generate_command(request: GenerateRequest) -> Result<()> {
    let mut config = Config::load()?;
    request.common.apply_to_config(&mut config)?;

    if request.write_fragment && request.pr_number.is_none() {
        return Err(anyhow!("--fragment requires --pr-number"));
    }

    if let Err(e) = config.check_environment() {
        ui::print_error(&format!("Error: {e}"));
        ui::print_info("\nPlease ensure the following:");
        ui::print_info("1. Git is installed and accessible from the command line.");
        ui::print_info("2. You are running this command from within a Git repository.");
        return Err(e);
    }

    let spinner = ui::create_spinner("Collecting commits...");

    let git_repo = GitRepo::open()?;
    let to = request.to.clone().unwrap_or_else(|| "HEAD".to_string());
    let commits = git_repo.commits_between(&request.from, &to)?;

    if commits.is_empty() {
        spinner.finish_and_clear();
        ui::print_info("No commits found; nothing to do.");
        return Ok(());
    }

    let scorer = CommitScorer::new(config.resource_prefix.as_deref());
    let selected = scorer.score_and_order(commits, config.max_commits_per_pr);

    if selected.is_empty() {
        spinner.finish_and_clear();
        ui::print_info("All commits opted out of the changelog; nothing to do.");
        return Ok(());
    }

    let deprecations = match &request.deprecations_file {
        Some(path) => load_deprecations(Path::new(path))?,
        None => Vec::new(),
    };

    spinner.set_message("Generating changelog entries...");

    let content = ChangelogGenerator::generate(
        &config,
        &selected,
        &deprecations,
        request.pr_number,
        request.pr_url.as_deref(),
    )
    .await;

    let classifier = CategoryClassifier::new(&config.categories);
    let entries = classifier.classify(&content);

    spinner.finish_and_clear();

    if request.dry_run {
        print_entries(&entries);
        return Ok(());
    }

    if entries.is_empty() {
        ui::print_info("No changelog entries survived classification; nothing to do.");
        return Ok(());
    }

    // Document and fragment writes are independent: each reports its own
    // outcome and one failing does not roll back the other.
    let mut failures = 0u32;

    let document = ChangelogDocument::new(&request.changelog_path, &config.categories);
    match document.merge(&entries, &request.target_section) {
        Ok(true) => ui::print_success(&format!(
            "Updated {} ({} entries)",
            request.changelog_path,
            entries.total_entries()
        )),
        Ok(false) => ui::print_info("No changelog entries to add."),
        Err(e) => {
            ui::print_error(&format!("Failed to update {}: {e}", request.changelog_path));
            failures += 1;
        }
    }

    if request.write_fragment
        && let Some(number) = request.pr_number
    {
        let writer = FragmentWriter::new(&config.fragment_dir);
        let key = number.to_string();
        match writer.write(&entries, &key) {
            Ok(true) => ui::print_success(&format!(
                "Wrote fragment {}",
                writer.fragment_path(&key).display()
            )),
            Ok(false) => ui::print_info("No changelog entries for a fragment."),
            Err(e) => {
                ui::print_error(&format!("Failed to write fragment {key}: {e}"));
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(anyhow!("{failures} changelog artifact(s) could not be written"));
    }
    Ok(())
}

/// Prints the categorized entries the way they would be rendered, without
/// touching any file.
fn print_entries(entries: &CategorizedEntries) {
    println!("\n=== Generated Changelog Entries ===\n");
    for (category, items) in entries.iter() {
        if items.is_empty() {
            continue;
        }
        println!("### {category}\n");
        for item in items {
            println!("{item}");
        }
        println!();
    }
}
