//! Scan results: the duplicate list, decision events and summary.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bytesize::ByteSize;
use serde::Serialize;

use super::resolver::ResolvedDuplicate;
use super::tree::DuplicateDirectory;

/// One duplicate decision, suitable for display or serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DuplicateEvent {
    /// A file is a byte-identical copy of a newer file in the same directory.
    File {
        /// Full path of the redundant copy
        path: PathBuf,
        /// Base name of the redundant copy
        name: String,
        /// Base name of the retained copy
        champion: String,
        /// Directory holding both files
        directory: PathBuf,
        /// File size in bytes
        size: u64,
    },
    /// A directory is equivalent to a newer sibling directory.
    Directory {
        /// Full path of the redundant directory
        path: PathBuf,
        /// Base name of the redundant directory
        name: String,
        /// Base name of the retained sibling
        master: String,
        /// Directory holding both siblings
        parent: PathBuf,
    },
}

impl DuplicateEvent {
    /// Path slated for removal by this decision.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::File { path, .. } | Self::Directory { path, .. } => path,
        }
    }

    /// Check if this decision concerns a directory.
    #[must_use]
    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory { .. })
    }
}

impl From<ResolvedDuplicate> for DuplicateEvent {
    fn from(dup: ResolvedDuplicate) -> Self {
        Self::File {
            path: dup.path,
            name: dup.name,
            champion: dup.champion,
            directory: dup.directory,
            size: dup.size,
        }
    }
}

impl From<DuplicateDirectory> for DuplicateEvent {
    fn from(dup: DuplicateDirectory) -> Self {
        Self::Directory {
            path: dup.path,
            name: dup.name,
            master: dup.master,
            parent: dup.parent,
        }
    }
}

impl fmt::Display for DuplicateEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File {
                name,
                champion,
                directory,
                ..
            } => write!(
                f,
                "\"{}\" is a duplicate of \"{}\" in \"{}\"",
                name,
                champion,
                directory.display()
            ),
            Self::Directory {
                name,
                master,
                parent,
                ..
            } => write!(
                f,
                "Directory \"{}\" is a duplicate of \"{}\" in \"{}\"",
                name,
                master,
                parent.display()
            ),
        }
    }
}

/// Summary statistics from a duplicate scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Number of directories walked, root included
    pub directories_scanned: usize,
    /// Number of regular files seen
    pub files_scanned: usize,
    /// Total size of all files seen in bytes
    pub total_size: u64,
    /// Number of same-key groups that needed content comparison
    pub suspect_groups: usize,
    /// Number of files listed for removal
    pub duplicate_files: usize,
    /// Number of directories listed for removal
    pub duplicate_directories: usize,
    /// Bytes freed by removing everything listed
    pub reclaimable_space: u64,
    /// Wall-clock duration of the scan
    pub scan_duration: Duration,
}

impl ScanSummary {
    /// Number of entries listed for removal.
    #[must_use]
    pub fn total_duplicates(&self) -> usize {
        self.duplicate_files + self.duplicate_directories
    }

    /// Reclaimable space as a human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        ByteSize::b(self.reclaimable_space).to_string()
    }

    /// Total scanned size as a human-readable string.
    #[must_use]
    pub fn total_size_display(&self) -> String {
        ByteSize::b(self.total_size).to_string()
    }
}

/// Complete result of one scan.
///
/// `duplicates` holds files first (in walk order) then directories. No path
/// appears twice and no path lies inside a listed directory.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Absolute path of the scanned directory
    pub root: PathBuf,
    /// Paths slated for removal
    pub duplicates: Vec<PathBuf>,
    /// One decision record per listed path, same order as `duplicates`
    pub events: Vec<DuplicateEvent>,
    /// Scan statistics
    pub summary: ScanSummary,
}

impl ScanReport {
    /// Decision records, consumed lazily by a reporter.
    pub fn events(&self) -> impl Iterator<Item = &DuplicateEvent> {
        self.events.iter()
    }

    /// Check if the scan found nothing to remove.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.duplicates.is_empty()
    }

    /// Number of paths slated for removal.
    #[must_use]
    pub fn len(&self) -> usize {
        self.duplicates.len()
    }

    /// Listed duplicate directories.
    pub fn duplicate_directories(&self) -> impl Iterator<Item = &Path> {
        self.events
            .iter()
            .filter(|e| e.is_directory())
            .map(DuplicateEvent::path)
    }

    /// Listed duplicate files.
    pub fn duplicate_files(&self) -> impl Iterator<Item = &Path> {
        self.events
            .iter()
            .filter(|e| !e.is_directory())
            .map(DuplicateEvent::path)
    }
}
