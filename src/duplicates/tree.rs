//! Directory snapshots and recursive subtree equivalence.
//!
//! # Overview
//!
//! During the walk every directory is reduced to a [`DirSnapshot`]: the set
//! of its immediate subdirectory names and the set of its files'
//! [`NormalizedKey`]s. Snapshots are stored in a [`SnapshotIndex`] keyed by
//! path. Once the walk is complete the index answers equivalence queries
//! purely by lookup, without touching the filesystem again.
//!
//! Two directories are equivalent when their snapshots match and every
//! shared subdirectory pair is itself equivalent. File contents are not
//! re-read here: matching keys are taken as matching files.
//!
//! # Example
//!
//! ```
//! use treedupe::duplicates::{DirSnapshot, NormalizedKey, SnapshotIndex};
//! use std::path::Path;
//! use std::time::SystemTime;
//!
//! let leaf = || DirSnapshot::new(
//!     Vec::<String>::new(),
//!     vec![NormalizedKey::new("notes.txt", 12)],
//!     SystemTime::UNIX_EPOCH,
//!     12,
//! );
//!
//! let mut index = SnapshotIndex::new();
//! index.insert("/r/a", leaf());
//! index.insert("/r/b", leaf());
//!
//! assert!(index.are_equivalent(Path::new("/r/a"), Path::new("/r/b")));
//! ```

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;

use super::groups::NormalizedKey;

/// Signature of one directory used for equivalence testing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirSnapshot {
    /// Names of immediate subdirectories
    pub subdirs: BTreeSet<OsString>,
    /// Keys of immediate files
    pub keys: BTreeSet<NormalizedKey>,
    /// Modification time of the directory itself
    pub modified: SystemTime,
    /// Total size of the directory's immediate files
    pub file_bytes: u64,
}

impl DirSnapshot {
    /// Create a snapshot.
    ///
    /// # Arguments
    ///
    /// * `subdirs` - Immediate subdirectory names
    /// * `keys` - Normalized keys of the immediate files
    /// * `modified` - Directory modification time
    /// * `file_bytes` - Total size of the immediate files
    #[must_use]
    pub fn new<S, K>(subdirs: S, keys: K, modified: SystemTime, file_bytes: u64) -> Self
    where
        S: IntoIterator,
        S::Item: Into<OsString>,
        K: IntoIterator<Item = NormalizedKey>,
    {
        Self {
            subdirs: subdirs.into_iter().map(Into::into).collect(),
            keys: keys.into_iter().collect(),
            modified,
            file_bytes,
        }
    }

    /// Check whether two snapshots have the same subdirectories and keys.
    ///
    /// Modification time and size are not part of the comparison.
    #[must_use]
    pub fn same_contents(&self, other: &Self) -> bool {
        self.subdirs == other.subdirs && self.keys == other.keys
    }
}

/// A directory found equivalent to a newer sibling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateDirectory {
    /// Full path of the redundant directory
    pub path: PathBuf,
    /// Base name of the redundant directory
    pub name: String,
    /// Base name of the retained sibling
    pub master: String,
    /// Directory holding both siblings
    pub parent: PathBuf,
}

/// Snapshots of every directory of one tree, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct SnapshotIndex {
    snapshots: BTreeMap<PathBuf, DirSnapshot>,
}

impl SnapshotIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the snapshot of one directory.
    pub fn insert(&mut self, path: impl Into<PathBuf>, snapshot: DirSnapshot) {
        self.snapshots.insert(path.into(), snapshot);
    }

    /// Look up the snapshot of a directory.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&DirSnapshot> {
        self.snapshots.get(path)
    }

    /// Number of indexed directories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Iterate over all snapshots in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &DirSnapshot)> {
        self.snapshots.iter()
    }

    /// Check whether two directories are recursively equivalent.
    ///
    /// A directory is always equivalent to itself. Otherwise both must be
    /// indexed, have the same subdirectory names and file keys, and every
    /// pair of same-named subdirectories must be equivalent in turn.
    #[must_use]
    pub fn are_equivalent(&self, first: &Path, second: &Path) -> bool {
        if first == second {
            return true;
        }

        let (Some(a), Some(b)) = (self.get(first), self.get(second)) else {
            return false;
        };

        if !a.same_contents(b) {
            return false;
        }

        a.subdirs
            .iter()
            .all(|sub| self.are_equivalent(&first.join(sub), &second.join(sub)))
    }

    /// Total size of the files beneath a directory, as recorded in the index.
    #[must_use]
    pub fn subtree_size(&self, path: &Path) -> u64 {
        self.get(path).map_or(0, |snapshot| {
            snapshot.file_bytes
                + snapshot
                    .subdirs
                    .iter()
                    .map(|sub| self.subtree_size(&path.join(sub)))
                    .sum::<u64>()
        })
    }

    /// Find every directory that duplicates one of its siblings.
    ///
    /// Each unordered pair of sibling subdirectories is tested in name order.
    /// For an equivalent pair the directory modified later is kept as master;
    /// on equal times the name that sorts later is the duplicate. A directory
    /// is reported once, against the first master that claimed it.
    #[must_use]
    pub fn duplicate_directories(&self) -> Vec<DuplicateDirectory> {
        self.duplicate_directories_with(|_, _| {})
    }

    /// Same as [`duplicate_directories`](Self::duplicate_directories), calling
    /// `on_parent` with a 1-based counter before each parent is examined.
    pub fn duplicate_directories_with<F>(&self, mut on_parent: F) -> Vec<DuplicateDirectory>
    where
        F: FnMut(usize, &Path),
    {
        let mut found = Vec::new();
        let mut seen: HashSet<PathBuf> = HashSet::new();

        for (i, (parent, snapshot)) in self.snapshots.iter().enumerate() {
            on_parent(i + 1, parent);
            let subdirs: Vec<&OsString> = snapshot.subdirs.iter().collect();

            for (i, first) in subdirs.iter().enumerate() {
                for second in &subdirs[i + 1..] {
                    let first_path = parent.join(first);
                    let second_path = parent.join(second);

                    if !self.are_equivalent(&first_path, &second_path) {
                        continue;
                    }

                    let (master, duplicate, duplicate_path) =
                        match self.compare_modified(&first_path, &second_path) {
                            Ordering::Greater | Ordering::Equal => (first, second, second_path),
                            Ordering::Less => (second, first, first_path),
                        };

                    if !seen.insert(duplicate_path.clone()) {
                        continue;
                    }

                    log::debug!(
                        "Directory {} is a duplicate of {}",
                        duplicate_path.display(),
                        parent.join(master).display()
                    );

                    found.push(DuplicateDirectory {
                        path: duplicate_path,
                        name: duplicate.to_string_lossy().into_owned(),
                        master: master.to_string_lossy().into_owned(),
                        parent: parent.clone(),
                    });
                }
            }
        }

        found
    }

    fn compare_modified(&self, first: &Path, second: &Path) -> Ordering {
        match (self.get(first), self.get(second)) {
            (Some(a), Some(b)) => a.modified.cmp(&b.modified),
            _ => Ordering::Equal,
        }
    }
}
