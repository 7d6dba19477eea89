use clap::Parser;
use filetime::{set_file_mtime, FileTime};
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use treedupe::actions::{delete_batch, DeleteConfig, DeleteProgressCallback, BatchDeleteResult};
use treedupe::cli::Cli;
use treedupe::duplicates::DuplicateFinder;
use treedupe::error::ExitCode;

struct NoCallback;
impl DeleteProgressCallback for NoCallback {
    fn on_before_delete(&self, _: &Path, _: usize, _: usize) {}
    fn on_delete_success(&self, _: &Path, _: u64) {}
    fn on_delete_failure(&self, _: &Path, _: &str) {}
    fn on_complete(&self, _: &BatchDeleteResult) {}
}

fn set_mtime(path: &Path, secs: i64) {
    set_file_mtime(path, FileTime::from_unix_time(secs, 0)).unwrap();
}

fn build_tree(root: &Path) {
    fs::write(root.join("Lecture 01.pdf"), b"pdf").unwrap();
    fs::write(root.join("Lecture-01 (1).pdf"), b"pdf").unwrap();
    set_mtime(&root.join("Lecture 01.pdf"), 1_000);
    set_mtime(&root.join("Lecture-01 (1).pdf"), 2_000);

    for course in ["courseA", "courseB"] {
        let dir = root.join(course);
        fs::create_dir_all(dir.join("week1")).unwrap();
        fs::write(dir.join("week1").join("video.mp4"), b"frames").unwrap();
    }
    set_mtime(&root.join("courseA"), 5_000);
    set_mtime(&root.join("courseB"), 4_000);
}

#[test]
fn test_remove_report_leaves_one_copy() {
    let dir = tempdir().unwrap();
    build_tree(dir.path());

    let report = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();
    assert_eq!(report.len(), 2);

    let result = delete_batch::<NoCallback>(&report.duplicates, &DeleteConfig::permanent(), None);

    assert!(result.all_succeeded());
    assert_eq!(result.bytes_freed, 9);
    assert!(!dir.path().join("Lecture 01.pdf").exists());
    assert!(dir.path().join("Lecture-01 (1).pdf").exists());
    assert!(!dir.path().join("courseB").exists());
    assert!(dir.path().join("courseA").join("week1").join("video.mp4").exists());

    // A second scan finds nothing left
    let rescan = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();
    assert!(rescan.is_empty());
}

#[test]
fn test_run_app_without_remove_keeps_files() {
    let dir = tempdir().unwrap();
    build_tree(dir.path());

    let cli = Cli::try_parse_from([
        "treedupe",
        "-q",
        dir.path().to_str().unwrap(),
        "--output",
        "json",
    ])
    .unwrap();

    let code = treedupe::run_app(cli).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(dir.path().join("Lecture 01.pdf").exists());
    assert!(dir.path().join("courseB").exists());
}

#[test]
fn test_run_app_with_remove_deletes_duplicates() {
    let dir = tempdir().unwrap();
    build_tree(dir.path());

    let cli = Cli::try_parse_from(["treedupe", "-q", dir.path().to_str().unwrap(), "--remove"])
        .unwrap();

    let code = treedupe::run_app(cli).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(!dir.path().join("Lecture 01.pdf").exists());
    assert!(!dir.path().join("courseB").exists());
    assert!(dir.path().join("courseA").exists());
}

#[test]
fn test_run_app_missing_root_removes_nothing() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");

    let cli =
        Cli::try_parse_from(["treedupe", "-q", missing.to_str().unwrap(), "--remove"]).unwrap();

    let err = treedupe::run_app(cli).unwrap_err();

    assert!(err.to_string().contains("Path not found"));
    assert!(dir.path().exists());
}
