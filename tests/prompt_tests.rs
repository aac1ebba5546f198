#![allow(clippy::unwrap_used)]

use git_chronicle::changelog::{create_system_prompt, create_user_prompt};
use git_chronicle::{Commit, Config, Deprecation};

fn commit(subject: &str, body: &str) -> Commit {
    Commit {
        hash: "abc1234".to_string(),
        author: "Test User".to_string(),
        email: "test@example.com".to_string(),
        date: "2024-01-01 00:00:00 +0000".to_string(),
        subject: subject.to_string(),
        body: body.to_string(),
    }
}

#[test]
fn test_system_prompt_names_every_configured_category() {
    let config = Config::default();
    let prompt = create_system_prompt(&config);

    for category in &config.categories {
        assert!(
            prompt.contains(category),
            "System prompt must name category {category}"
        );
    }
}

#[test]
fn test_user_prompt_lists_commits_with_author() {
    let commits = vec![commit("feat: add widget pools", "Supports warm standby.")];
    let prompt = create_user_prompt(&commits, &[], None, None);

    assert!(prompt.contains("feat: add widget pools"));
    assert!(prompt.contains("Supports warm standby."));
    assert!(prompt.contains("(by Test User)"));
}

#[test]
fn test_user_prompt_truncates_long_bodies() {
    let long_body = "x".repeat(500);
    let commits = vec![commit("feat: add widget pools", &long_body)];
    let prompt = create_user_prompt(&commits, &[], None, None);

    assert!(!prompt.contains(&long_body), "Bodies are excerpted, not embedded whole");
    assert!(prompt.contains(&"x".repeat(200)));
}

#[test]
fn test_user_prompt_includes_deprecations_block() {
    let deprecations = vec![Deprecation {
        resource: "widget_pool".to_string(),
        field: Some("legacy_mode".to_string()),
        message: "Use capacity_mode instead".to_string(),
        file: "internal/resource_widget_pool.go".to_string(),
    }];
    let prompt = create_user_prompt(&[], &deprecations, None, None);

    assert!(prompt.contains("DEPRECATIONS DETECTED IN CODE"));
    assert!(prompt.contains("widget_pool.legacy_mode: Use capacity_mode instead"));
    assert!(prompt.contains("(in internal/resource_widget_pool.go)"));
}

#[test]
fn test_user_prompt_omits_deprecations_block_when_empty() {
    let prompt = create_user_prompt(&[], &[], None, None);
    assert!(!prompt.contains("DEPRECATIONS DETECTED IN CODE"));
}

#[test]
fn test_user_prompt_requests_pr_reference_when_known() {
    let prompt = create_user_prompt(&[], &[], Some(42), Some("https://example.com/pr/42"));
    assert!(prompt.contains("([#42](https://example.com/pr/42))"));
}
