#![allow(clippy::unwrap_used)]

use git_chronicle::Commit;
use git_chronicle::changelog::{append_pr_references, fallback_changelog};

fn commit(subject: &str) -> Commit {
    Commit {
        hash: "abc1234".to_string(),
        author: "Test User".to_string(),
        email: "test@example.com".to_string(),
        date: "2024-01-01 00:00:00 +0000".to_string(),
        subject: subject.to_string(),
        body: String::new(),
    }
}

#[test]
fn test_fallback_renders_each_subject_as_a_bullet() {
    dotenv::dotenv().ok();
    let commits = vec![commit("feat: add widget"), commit("fix: crash on startup")];

    let content = fallback_changelog(&commits, None, None);
    assert_eq!(content, "* feat: add widget\n* fix: crash on startup");
}

#[test]
fn test_fallback_appends_pr_reference_when_known() {
    let commits = vec![commit("fix: crash on startup")];

    let content = fallback_changelog(&commits, Some(42), Some("https://example.com/pr/42"));
    assert_eq!(
        content,
        "* fix: crash on startup ([#42](https://example.com/pr/42))"
    );
}

#[test]
fn test_pr_reference_added_to_bullets_only() {
    let text = "FEATURES\n* Add widget pools\nBUG FIXES\n* Fix state drift";
    let result = append_pr_references(text, Some(7), Some("https://example.com/pr/7"));

    assert_eq!(
        result,
        "FEATURES\n* Add widget pools ([#7](https://example.com/pr/7))\nBUG FIXES\n* Fix state drift ([#7](https://example.com/pr/7))",
        "Headers pass through untouched; every bullet gains the reference"
    );
}

#[test]
fn test_existing_pr_reference_is_not_duplicated() {
    let text = "* Fix state drift ([#7](https://example.com/pr/7))";
    let result = append_pr_references(text, Some(7), Some("https://example.com/pr/7"));
    assert_eq!(result, text, "A bullet already carrying #7 is left alone");
}

#[test]
fn test_no_reference_without_pr_details() {
    let text = "* Fix state drift";
    assert_eq!(append_pr_references(text, Some(7), None), text);
    assert_eq!(append_pr_references(text, None, None), text);
}
