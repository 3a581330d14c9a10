mod common;

use std::fs;

use forge::error::Error;
use forge::vcs::{commit, init, stage_all};
use tempfile::TempDir;

use common::runner;

const MESSAGE: &str = "created by forge: initial commit";

fn project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("main.go"), "package main\n").unwrap();
    temp_dir
}

#[test_log::test]
fn test_init_add_commit_creates_one_commit() {
    let temp_dir = project();
    let root = temp_dir.path();
    let runner = runner();

    init(&runner, root, "main").unwrap();
    assert!(root.join(".git").is_dir());
    stage_all(&runner, root).unwrap();
    commit(&runner, root, MESSAGE).unwrap();

    let repo = git2::Repository::open(root).unwrap();
    let head = repo.head().unwrap();
    assert_eq!(head.shorthand(), Some("main"));
    let commit = head.peel_to_commit().unwrap();
    assert_eq!(commit.parent_count(), 0);
    assert_eq!(commit.message().map(str::trim_end), Some(MESSAGE));
    assert!(commit.tree().unwrap().get_name("main.go").is_some());
}

#[test]
fn test_stage_before_init_fails() {
    let temp_dir = project();
    let err = stage_all(&runner(), temp_dir.path()).unwrap_err();
    assert!(matches!(err, Error::Sequencing(_)), "{err}");
}

#[test]
fn test_commit_before_stage_fails() {
    let temp_dir = project();
    let runner = runner();
    init(&runner, temp_dir.path(), "main").unwrap();

    let err = commit(&runner, temp_dir.path(), MESSAGE).unwrap_err();

    assert!(matches!(err, Error::Sequencing(_)), "{err}");
    let repo = git2::Repository::open(temp_dir.path()).unwrap();
    assert!(repo.head().is_err());
}

#[test]
fn test_commit_before_init_fails() {
    let temp_dir = project();
    let err = commit(&runner(), temp_dir.path(), MESSAGE).unwrap_err();
    assert!(matches!(err, Error::Sequencing(_)), "{err}");
}

#[test]
fn test_init_in_missing_directory_fails() {
    let err = init(&runner(), "/some/invalid/path", "main").unwrap_err();
    assert!(matches!(err, Error::ToolInvocation { .. }));
}
