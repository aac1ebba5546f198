#![allow(clippy::unwrap_used)]

use std::fs;

use git_chronicle::changelog::read_fragment;
use git_chronicle::{CategorizedEntries, Config, FragmentWriter};
use tempfile::TempDir;

fn categories() -> Vec<String> {
    Config::default().categories
}

#[test]
fn test_fragment_is_written_with_trailing_blank_lines() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join(".changelog");
    let writer = FragmentWriter::new(&dir);

    let mut entries = CategorizedEntries::new(&categories());
    entries.push("FEATURES", "* **New Resource:** `widget_pool`");
    entries.push("BUG FIXES", "* Fix state drift on import");

    assert!(writer.write(&entries, "42").unwrap());

    let content = read_fragment(&dir, "42").unwrap();
    assert_eq!(
        content,
        "### FEATURES\n\n* **New Resource:** `widget_pool`\n\n### BUG FIXES\n\n* Fix state drift on import\n\n",
        "Each category block ends with a blank line and there is no section header"
    );
}

#[test]
fn test_fragment_directory_is_created_on_demand() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("nested").join(".changelog");
    let writer = FragmentWriter::new(&dir);

    let mut entries = CategorizedEntries::new(&categories());
    entries.push("ENHANCEMENTS", "* Speed up plan diffing");

    assert!(writer.write(&entries, "7").unwrap());
    assert!(writer.fragment_path("7").exists());
}

#[test]
fn test_rewriting_a_key_replaces_the_fragment() {
    let temp_dir = TempDir::new().unwrap();
    let writer = FragmentWriter::new(temp_dir.path());

    let mut first = CategorizedEntries::new(&categories());
    first.push("FEATURES", "* First attempt");
    writer.write(&first, "42").unwrap();

    let mut second = CategorizedEntries::new(&categories());
    second.push("BUG FIXES", "* Second attempt");
    writer.write(&second, "42").unwrap();

    let content = read_fragment(temp_dir.path(), "42").unwrap();
    assert!(
        !content.contains("First attempt"),
        "A reused key must fully replace the previous fragment"
    );
    assert!(content.contains("* Second attempt"));
}

#[test]
fn test_empty_entries_write_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join(".changelog");
    let writer = FragmentWriter::new(&dir);

    let empty = CategorizedEntries::new(&categories());
    assert!(
        !writer.write(&empty, "42").unwrap(),
        "An all-empty entry set must report nothing to write"
    );
    assert!(!dir.exists(), "Not even the directory is created for a no-op");
    assert!(fs::metadata(writer.fragment_path("42")).is_err());
}
