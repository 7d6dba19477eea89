use filetime::{set_file_mtime, FileTime};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;
use treedupe::duplicates::{DuplicateEvent, DuplicateFinder};

fn write_file(path: &Path, content: &[u8], mtime: i64) {
    File::create(path).unwrap().write_all(content).unwrap();
    set_file_mtime(path, FileTime::from_unix_time(mtime, 0)).unwrap();
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let finder = DuplicateFinder::with_defaults();

    let report = finder.find_duplicates(dir.path()).unwrap();

    assert!(report.is_empty());
    assert_eq!(report.summary.files_scanned, 0);
    assert_eq!(report.summary.suspect_groups, 0);
}

#[test]
fn test_scan_unique_files() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("a.txt"), b"content a", 100);
    write_file(&dir.path().join("b.txt"), b"content b", 100);
    write_file(&dir.path().join("c.txt"), b"content c", 100);

    let report = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert!(report.is_empty());
    assert_eq!(report.summary.files_scanned, 3);
    assert_eq!(report.summary.suspect_groups, 0);
}

#[test]
fn test_scan_renamed_copy_keeps_newest() {
    let dir = tempdir().unwrap();
    let older = dir.path().join("Lecture 01.pdf");
    let newer = dir.path().join("Lecture-01 (1).pdf");
    write_file(&older, b"%PDF-1.4 lecture", 1_000);
    write_file(&newer, b"%PDF-1.4 lecture", 2_000);

    let report = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(report.duplicates, vec![older.clone()]);
    match &report.events[0] {
        DuplicateEvent::File {
            path,
            name,
            champion,
            directory,
            size,
        } => {
            assert_eq!(path, &older);
            assert_eq!(name, "Lecture 01.pdf");
            assert_eq!(champion, "Lecture-01 (1).pdf");
            assert_eq!(directory, dir.path());
            assert_eq!(*size, 16);
        }
        other => panic!("Expected file event, got {:?}", other),
    }
    assert_eq!(
        report.events[0].to_string(),
        format!(
            "\"Lecture 01.pdf\" is a duplicate of \"Lecture-01 (1).pdf\" in \"{}\"",
            dir.path().display()
        )
    );
}

#[test]
fn test_scan_champion_independent_of_name_order() {
    let dir = tempdir().unwrap();
    // The name sorting first is the newer file here
    let newer = dir.path().join("notes (2).txt");
    let older = dir.path().join("notes.txt");
    write_file(&newer, b"same notes", 5_000);
    write_file(&older, b"same notes", 1_000);

    let report = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(report.duplicates, vec![older]);
}

#[test]
fn test_scan_same_key_different_content() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("slides 1.pdf"), b"version A", 100);
    write_file(&dir.path().join("slides 2.pdf"), b"version B", 200);

    let report = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert!(report.is_empty());
    assert_eq!(report.summary.suspect_groups, 1);
}

#[test]
fn test_scan_different_extension_case_not_grouped() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("video.MP4"), b"frames", 100);
    write_file(&dir.path().join("video (1).mp4"), b"frames", 200);

    let report = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert!(report.is_empty());
    assert_eq!(report.summary.suspect_groups, 0);
}

#[test]
fn test_scan_same_content_different_names_not_grouped() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("intro.txt"), b"hello", 100);
    write_file(&dir.path().join("outro.txt"), b"hello", 200);

    let report = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert!(report.is_empty());
}

#[test]
fn test_scan_multiple_copies() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("quiz.html"), b"<html/>", 300);
    write_file(&dir.path().join("quiz (1).html"), b"<html/>", 200);
    write_file(&dir.path().join("quiz (2).html"), b"<html/>", 100);

    let report = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(report.summary.duplicate_files, 2);
    assert!(!report.duplicates.contains(&dir.path().join("quiz.html")));
    assert_eq!(report.summary.reclaimable_space, 14);
}

#[test]
fn test_scan_only_compares_within_one_directory() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("week1")).unwrap();
    fs::create_dir(dir.path().join("week2")).unwrap();
    fs::create_dir(dir.path().join("week2").join("extra")).unwrap();
    write_file(&dir.path().join("week1").join("a 1.txt"), b"x", 100);
    write_file(&dir.path().join("week2").join("a 2.txt"), b"x", 200);

    let report = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert!(report.is_empty());
}

#[test]
fn test_scan_is_idempotent() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("a.txt"), b"abc", 100);
    write_file(&dir.path().join("a (1).txt"), b"abc", 200);
    fs::create_dir(dir.path().join("x")).unwrap();
    write_file(&dir.path().join("x").join("b-1.txt"), b"zz", 100);
    write_file(&dir.path().join("x").join("b-2.txt"), b"zz", 300);

    let finder = DuplicateFinder::with_defaults();
    let first = finder.find_duplicates(dir.path()).unwrap();
    let second = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(first.duplicates, second.duplicates);
    assert_eq!(first.events, second.events);
    assert_eq!(first.duplicates.len(), 2);
}

#[test]
fn test_scan_summary_counts() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    write_file(&dir.path().join("a.txt"), b"1234", 100);
    write_file(&dir.path().join("sub").join("b.txt"), b"123456", 100);

    let report = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(report.summary.directories_scanned, 2);
    assert_eq!(report.summary.files_scanned, 2);
    assert_eq!(report.summary.total_size, 10);
    assert_eq!(report.root, dir.path());
}
