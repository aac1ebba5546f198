#![allow(clippy::unwrap_used)]

use std::fs;

use git_chronicle::{CategorizedEntries, ChangelogDocument, Config};
use tempfile::TempDir;

fn categories() -> Vec<String> {
    Config::default().categories
}

fn entries_with(category: &str, lines: &[&str]) -> CategorizedEntries {
    let mut entries = CategorizedEntries::new(&categories());
    for line in lines {
        assert!(entries.push(category, *line), "category must be configured");
    }
    entries
}

#[test]
fn test_ensure_initialized_creates_skeleton() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("CHANGELOG.md");
    let document = ChangelogDocument::new(&path, &categories());

    assert!(document.ensure_initialized().unwrap());

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("# Changelog"));
    assert!(content.contains("Keep a Changelog"));
    assert!(content.contains("## Unreleased"));
    for category in categories() {
        assert!(
            content.contains(&format!("### {category}")),
            "Skeleton must pre-declare category {category}"
        );
    }
}

#[test]
fn test_ensure_initialized_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("CHANGELOG.md");
    let document = ChangelogDocument::new(&path, &categories());

    document.ensure_initialized().unwrap();
    fs::write(&path, "# My changelog\n\n## 1.0.0\n\n* hand-written entry\n").unwrap();

    assert!(
        !document.ensure_initialized().unwrap(),
        "Second initialization must report nothing was created"
    );
    let content = fs::read_to_string(&path).unwrap();
    assert!(
        content.contains("hand-written entry"),
        "An existing document is never overwritten"
    );
}

#[test]
fn test_merge_into_unreleased_section() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("CHANGELOG.md");
    let document = ChangelogDocument::new(&path, &categories());
    document.ensure_initialized().unwrap();

    let entries = entries_with("FEATURES", &["* **New Resource:** `widget_pool`"]);
    assert!(document.merge(&entries, "Unreleased").unwrap());

    let content = fs::read_to_string(&path).unwrap();
    let unreleased = content.find("## Unreleased").unwrap();
    let features = content.find("### FEATURES").unwrap();
    let entry = content.find("* **New Resource:** `widget_pool`").unwrap();
    assert!(
        unreleased < features && features < entry,
        "The merged block must sit inside the Unreleased section"
    );
}

#[test]
fn test_repeated_merges_stack_newest_first() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("CHANGELOG.md");
    let document = ChangelogDocument::new(&path, &categories());
    document.ensure_initialized().unwrap();

    let first = entries_with("FEATURES", &["* **New Resource:** `widget_pool`"]);
    document.merge(&first, "Unreleased").unwrap();
    let features_block = "### FEATURES\n\n* **New Resource:** `widget_pool`\n";
    assert!(fs::read_to_string(&path).unwrap().contains(features_block));

    let second = entries_with("BUG FIXES", &["* Fix state drift on import"]);
    document.merge(&second, "Unreleased").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(
        content.contains(features_block),
        "The earlier block must remain byte-identical"
    );
    let bug_fixes = content.find("### BUG FIXES\n\n* Fix state drift").unwrap();
    let features = content.find(features_block).unwrap();
    assert!(
        bug_fixes < features,
        "The newest merge must appear first within the section"
    );
}

#[test]
fn test_merge_with_no_entries_is_a_no_op() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("CHANGELOG.md");
    let document = ChangelogDocument::new(&path, &categories());
    document.ensure_initialized().unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let empty = CategorizedEntries::new(&categories());
    assert!(
        !document.merge(&empty, "Unreleased").unwrap(),
        "Merging an all-empty entry set must report nothing to merge"
    );
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        before,
        "A no-op merge must not mutate the document"
    );
}

#[test]
fn test_merge_creates_document_when_missing() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("CHANGELOG.md");
    let document = ChangelogDocument::new(&path, &categories());

    let entries = entries_with("ENHANCEMENTS", &["* Speed up plan diffing"]);
    assert!(document.merge(&entries, "Unreleased").unwrap());

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("# Changelog"));
    assert!(content.contains("* Speed up plan diffing"));
}

#[test]
fn test_missing_section_is_created_before_existing_ones() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("CHANGELOG.md");
    let released = "# Changelog\n\n## 1.2.0\n\n### BUG FIXES\n\n* Old fix\n";
    fs::write(&path, released).unwrap();

    let document = ChangelogDocument::new(&path, &categories());
    let entries = entries_with("FEATURES", &["* Add widget quotas"]);
    document.merge(&entries, "Unreleased").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let unreleased = content.find("## Unreleased").unwrap();
    let released_section = content.find("## 1.2.0").unwrap();
    assert!(
        unreleased < released_section,
        "The new section must open ahead of existing sections"
    );
    assert!(
        content.contains("### BUG FIXES\n\n* Old fix\n"),
        "Sections that were not touched must be preserved byte for byte"
    );
}

#[test]
fn test_document_without_sections_gets_section_appended() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("CHANGELOG.md");
    fs::write(&path, "# Changelog\n\nSome prose header only.\n").unwrap();

    let document = ChangelogDocument::new(&path, &categories());
    let entries = entries_with("FEATURES", &["* Add widget quotas"]);
    document.merge(&entries, "0.9.0").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("# Changelog\n\nSome prose header only.\n"));
    assert!(content.contains("## 0.9.0"));
    assert!(content.contains("* Add widget quotas"));
}

#[test]
fn test_categories_render_in_configured_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("CHANGELOG.md");
    let document = ChangelogDocument::new(&path, &categories());
    document.ensure_initialized().unwrap();

    let mut entries = CategorizedEntries::new(&categories());
    entries.push("DOCUMENTATION", "* Document widget quotas");
    entries.push("BREAKING CHANGES", "* Remove the legacy endpoint");
    document.merge(&entries, "Unreleased").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let merged_breaking = content.find("* Remove the legacy endpoint").unwrap();
    let merged_docs = content.find("* Document widget quotas").unwrap();
    assert!(
        merged_breaking < merged_docs,
        "Rendered categories must follow the configured order, not insertion order"
    );
}
