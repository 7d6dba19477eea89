//! Per-directory grouping of files by normalized key.
//!
//! # Overview
//!
//! Grouping is the cheap first filter of duplicate detection. Within one
//! directory, files are bucketed by a [`NormalizedKey`]: the noise-stripped
//! file name (see [`crate::scanner::normalize`]) plus the exact byte size.
//! Only buckets holding two or more files ("suspect groups") are passed on
//! to content comparison.
//!
//! # Example
//!
//! ```
//! use treedupe::duplicates::{group_entries, suspect_groups, NormalizedKey};
//! use treedupe::scanner::FileEntry;
//! use std::path::{Path, PathBuf};
//! use std::time::SystemTime;
//!
//! let files = vec![
//!     FileEntry::new(PathBuf::from("/c/Lecture 01.pdf"), 100, SystemTime::now()),
//!     FileEntry::new(PathBuf::from("/c/lecture-02.pdf"), 100, SystemTime::now()),
//!     FileEntry::new(PathBuf::from("/c/notes.txt"), 100, SystemTime::now()),
//! ];
//!
//! let groups = group_entries(files);
//! assert_eq!(groups.len(), 2);
//! assert_eq!(groups[&NormalizedKey::new("lecture.pdf", 100)].len(), 2);
//!
//! let suspects = suspect_groups(Path::new("/c"), &groups);
//! assert_eq!(suspects.len(), 1);
//! ```

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;

use crate::scanner::{normalize_name, FileEntry, ScanError};

/// Grouping key for candidate duplicates: normalized name plus size.
///
/// Equality and hashing are structural, so two keys built from different
/// file names compare equal whenever the normalized names and sizes agree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NormalizedKey {
    /// Normalized file name, extension included
    pub name: String,
    /// File size in bytes
    pub size: u64,
}

impl NormalizedKey {
    /// Create a key from an already-normalized name.
    #[must_use]
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Build the key for a file from its raw base name and size.
    ///
    /// Names that are not valid UTF-8 are normalized lossily.
    #[must_use]
    pub fn for_file(file_name: &OsStr, size: u64) -> Self {
        Self::new(normalize_name(&file_name.to_string_lossy()), size)
    }
}

/// One file inside a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMember {
    /// Base name of the file
    pub name: OsString,
    /// Last modification time
    pub modified: SystemTime,
}

impl GroupMember {
    /// Create a new group member.
    #[must_use]
    pub fn new(name: impl Into<OsString>, modified: SystemTime) -> Self {
        Self {
            name: name.into(),
            modified,
        }
    }
}

/// Files of one directory bucketed by normalized key.
///
/// Members keep the order in which the files were supplied.
pub type FileGroups = HashMap<NormalizedKey, Vec<GroupMember>>;

/// A bucket of two or more same-key files awaiting content comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuspectGroup {
    /// Directory every member lives in
    pub directory: PathBuf,
    /// Key shared by every member
    pub key: NormalizedKey,
    /// The files themselves
    pub members: Vec<GroupMember>,
}

impl SuspectGroup {
    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Full path of one member.
    #[must_use]
    pub fn member_path(&self, member: &GroupMember) -> PathBuf {
        self.directory.join(&member.name)
    }
}

/// Group already-inspected files by normalized key.
///
/// No file I/O is performed; the entries carry their own size and
/// modification time. Callers are responsible for passing files from a
/// single directory.
#[must_use]
pub fn group_entries(entries: impl IntoIterator<Item = FileEntry>) -> FileGroups {
    let mut groups = FileGroups::new();

    for entry in entries {
        let key = NormalizedKey::for_file(&entry.name, entry.size);
        groups
            .entry(key)
            .or_default()
            .push(GroupMember::new(entry.name, entry.modified));
    }

    groups
}

/// Stat every file of a directory and group the results by normalized key.
///
/// # Arguments
///
/// * `dir` - Directory containing the files
/// * `file_names` - Base names of the directory's immediate files
///
/// # Errors
///
/// Returns `ScanError::Io` naming the file if a stat fails, for instance
/// because the file vanished mid-scan. The failure is not skipped: partial
/// groups would yield wrong duplicate decisions.
pub fn group_files(dir: &Path, file_names: &[OsString]) -> Result<FileGroups, ScanError> {
    let mut entries = Vec::with_capacity(file_names.len());

    for name in file_names {
        let path = dir.join(name);
        let metadata = fs::metadata(&path).map_err(|source| ScanError::Io {
            path: path.clone(),
            operation: "stat",
            source,
        })?;
        let modified = metadata.modified().map_err(|source| ScanError::Io {
            path: path.clone(),
            operation: "read modification time of",
            source,
        })?;
        entries.push(FileEntry::new(path, metadata.len(), modified));
    }

    let groups = group_entries(entries);
    log::trace!(
        "Grouped {} files of {} into {} keys",
        file_names.len(),
        dir.display(),
        groups.len()
    );
    Ok(groups)
}

/// Collect the buckets holding two or more files.
///
/// The result is sorted by key so repeated scans list groups in the same
/// order regardless of hash map iteration order.
#[must_use]
pub fn suspect_groups(dir: &Path, groups: &FileGroups) -> Vec<SuspectGroup> {
    let mut suspects: Vec<SuspectGroup> = groups
        .iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(key, members)| SuspectGroup {
            directory: dir.to_path_buf(),
            key: key.clone(),
            members: members.clone(),
        })
        .collect();

    suspects.sort_by(|a, b| a.key.cmp(&b.key));

    for suspect in &suspects {
        log::debug!(
            "Suspect group in {}: {} files share key {:?} ({} bytes)",
            dir.display(),
            suspect.len(),
            suspect.key.name,
            suspect.key.size
        );
    }

    suspects
}
