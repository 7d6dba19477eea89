use filetime::{set_file_mtime, FileTime};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};
use treedupe::duplicates::{DuplicateEvent, DuplicateFinder};

fn set_mtime(path: &Path, secs: i64) {
    set_file_mtime(path, FileTime::from_unix_time(secs, 0)).unwrap();
}

/// Build a small course tree under `root/name`.
fn create_course(root: &Path, name: &str) -> PathBuf {
    let course = root.join(name);
    fs::create_dir_all(course.join("week1").join("videos")).unwrap();
    fs::create_dir_all(course.join("week2")).unwrap();
    fs::write(course.join("syllabus.pdf"), b"syllabus").unwrap();
    fs::write(course.join("week1").join("intro 01.mp4"), b"intro").unwrap();
    fs::write(course.join("week1").join("videos").join("talk.mp4"), b"talk").unwrap();
    fs::write(course.join("week2").join("quiz.html"), b"quiz").unwrap();
    course
}

fn scan(dir: &TempDir) -> treedupe::duplicates::ScanReport {
    DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap()
}

#[test]
fn test_identical_sibling_trees_newer_is_master() {
    let dir = tempdir().unwrap();
    let a = create_course(dir.path(), "courseA");
    let b = create_course(dir.path(), "courseB");
    set_mtime(&a, 20_000);
    set_mtime(&b, 10_000);

    let report = scan(&dir);

    assert_eq!(report.duplicates, vec![b.clone()]);
    assert_eq!(report.summary.duplicate_directories, 1);
    assert_eq!(report.summary.reclaimable_space, 21);
    assert_eq!(
        report.events[0],
        DuplicateEvent::Directory {
            path: b,
            name: "courseB".to_string(),
            master: "courseA".to_string(),
            parent: dir.path().to_path_buf(),
        }
    );
}

#[test]
fn test_older_first_sibling_is_duplicate() {
    let dir = tempdir().unwrap();
    let a = create_course(dir.path(), "courseA");
    let b = create_course(dir.path(), "courseB");
    set_mtime(&a, 10_000);
    set_mtime(&b, 20_000);

    let report = scan(&dir);

    assert_eq!(report.duplicates, vec![a]);
}

#[test]
fn test_equal_mtime_later_name_is_duplicate() {
    let dir = tempdir().unwrap();
    let a = create_course(dir.path(), "courseA");
    let b = create_course(dir.path(), "courseB");
    set_mtime(&a, 15_000);
    set_mtime(&b, 15_000);

    let report = scan(&dir);

    assert_eq!(report.duplicates, vec![b]);
}

#[test]
fn test_renamed_files_make_equivalent_trees() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a");
    let b = dir.path().join("b");
    fs::create_dir(&a).unwrap();
    fs::create_dir(&b).unwrap();
    fs::write(a.join("Lecture 01.pdf"), b"pdf").unwrap();
    fs::write(b.join("lecture_02.pdf"), b"pdf").unwrap();
    set_mtime(&a, 2_000);
    set_mtime(&b, 1_000);

    let report = scan(&dir);

    assert_eq!(report.duplicates, vec![b]);
}

#[test]
fn test_nested_difference_breaks_equivalence() {
    let dir = tempdir().unwrap();
    let a = create_course(dir.path(), "courseA");
    let b = create_course(dir.path(), "courseB");
    fs::write(b.join("week1").join("videos").join("bonus.mp4"), b"bonus").unwrap();

    let report = scan(&dir);

    assert!(report.duplicate_directories().next().is_none());
    assert!(!report.duplicates.contains(&a));
    assert!(!report.duplicates.contains(&b));
}

#[test]
fn test_extra_empty_subdirectory_breaks_equivalence() {
    let dir = tempdir().unwrap();
    create_course(dir.path(), "courseA");
    let b = create_course(dir.path(), "courseB");
    fs::create_dir(b.join("week3")).unwrap();

    let report = scan(&dir);

    assert!(report.is_empty());
}

#[test]
fn test_contents_of_duplicate_directory_not_listed() {
    let dir = tempdir().unwrap();
    let a = create_course(dir.path(), "courseA");
    let b = create_course(dir.path(), "courseB");
    // A renamed copy inside each tree; only the one in the kept tree is listed
    for course in [&a, &b] {
        fs::write(course.join("week2").join("quiz (1).html"), b"quiz").unwrap();
        set_mtime(&course.join("week2").join("quiz.html"), 9_000);
        set_mtime(&course.join("week2").join("quiz (1).html"), 8_000);
    }
    set_mtime(&a, 20_000);
    set_mtime(&b, 10_000);

    let report = scan(&dir);

    assert_eq!(
        report.duplicates,
        vec![a.join("week2").join("quiz (1).html"), b.clone()]
    );
    assert!(report
        .events()
        .all(|e| !e.path().starts_with(&b) || e.path() == b));
}

#[test]
fn test_duplicate_subdirectories_inside_duplicate_tree_are_pruned() {
    let dir = tempdir().unwrap();
    for course in ["courseA", "courseB"] {
        let path = dir.path().join(course);
        for part in ["part1", "part2"] {
            fs::create_dir_all(path.join(part)).unwrap();
            fs::write(path.join(part).join("notes.txt"), b"same").unwrap();
        }
        set_mtime(&path.join("part1"), 2_000);
        set_mtime(&path.join("part2"), 1_000);
    }
    set_mtime(&dir.path().join("courseA"), 5_000);
    set_mtime(&dir.path().join("courseB"), 4_000);

    let report = scan(&dir);

    // Parents are visited before their children
    assert_eq!(
        report.duplicates,
        vec![
            dir.path().join("courseB"),
            dir.path().join("courseA").join("part2"),
        ]
    );
    assert_eq!(report.events.len(), 2);
}

#[test]
fn test_three_identical_siblings_each_reported_once() {
    let dir = tempdir().unwrap();
    let a = create_course(dir.path(), "a");
    let b = create_course(dir.path(), "b");
    let c = create_course(dir.path(), "c");
    set_mtime(&a, 3_000);
    set_mtime(&b, 2_000);
    set_mtime(&c, 1_000);

    let report = scan(&dir);

    assert_eq!(report.duplicates, vec![b, c]);
    assert_eq!(report.events.len(), 2);
}

#[test]
fn test_empty_sibling_directories_are_duplicates() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("empty1");
    let second = dir.path().join("empty2");
    fs::create_dir(&first).unwrap();
    fs::create_dir(&second).unwrap();
    set_mtime(&first, 2_000);
    set_mtime(&second, 1_000);

    let report = scan(&dir);

    assert_eq!(report.duplicates, vec![second]);
}

#[test]
fn test_report_order_follows_parent_paths_and_is_stable() {
    let dir = tempdir().unwrap();
    for (parent, children) in [("A", ["a1", "a2"]), ("Z", ["z1", "z2"])] {
        for (i, child) in children.iter().enumerate() {
            let path = dir.path().join(parent).join(child);
            fs::create_dir_all(&path).unwrap();
            fs::write(path.join("notes.txt"), b"notes").unwrap();
            set_mtime(&path, 2_000 - i as i64);
        }
    }
    for (i, name) in ["m1", "m2"].iter().enumerate() {
        let path = dir.path().join(name);
        fs::create_dir(&path).unwrap();
        set_mtime(&path, 2_000 - i as i64);
    }

    let first = scan(&dir);
    let second = scan(&dir);

    assert_eq!(
        first.duplicates,
        vec![
            dir.path().join("m2"),
            dir.path().join("A").join("a2"),
            dir.path().join("Z").join("z2"),
        ]
    );
    assert_eq!(first.duplicates, second.duplicates);
    assert_eq!(first.events, second.events);
}
