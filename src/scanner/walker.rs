//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct, which traverses a directory
//! tree once and yields one [`DirListing`] per directory: its own
//! modification time plus the names of its immediate subdirectories and
//! regular files.
//!
//! # Features
//!
//! - Single-threaded traversal with entries sorted by file name, so two walks
//!   of an unchanged tree produce identical listings
//! - Symbolic links are never followed; links and special files are skipped
//! - Any listing or stat failure is surfaced as a [`ScanError`]
//!
//! # Example
//!
//! ```no_run
//! use treedupe::scanner::Walker;
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Courses"));
//! for listing in walker.walk() {
//!     let listing = listing.expect("walk failed");
//!     println!("{}: {:?}", listing.path.display(), listing.subdirs);
//! }
//! ```

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::{DirEntry, WalkDir};

use super::{DirListing, ScanError};

/// Children collected for a directory whose own entry has not been seen yet.
#[derive(Debug, Default)]
struct PendingDir {
    subdirs: Vec<OsString>,
    files: Vec<OsString>,
}

/// Directory walker producing per-directory listings.
#[derive(Debug, Clone)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - Root directory to scan
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            root: path.to_path_buf(),
        }
    }

    /// Walk the directory tree and yield one listing per directory.
    ///
    /// Listings are produced children-first: a directory is yielded only
    /// after every entry beneath it has been seen, which is what lets the
    /// listing carry its complete set of children.
    ///
    /// # Returns
    ///
    /// An iterator of `Result<DirListing, ScanError>`. Callers are expected
    /// to stop at the first error.
    pub fn walk(&self) -> impl Iterator<Item = Result<DirListing, ScanError>> + '_ {
        let mut pending: HashMap<PathBuf, PendingDir> = HashMap::new();

        WalkDir::new(&self.root)
            .follow_links(false)
            .contents_first(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |result| match result {
                Ok(entry) => self.process_entry(entry, &mut pending),
                Err(error) => Some(Err(Self::handle_walk_error(&self.root, error))),
            })
    }

    /// Record one walked entry, returning a listing once a directory completes.
    fn process_entry(
        &self,
        entry: DirEntry,
        pending: &mut HashMap<PathBuf, PendingDir>,
    ) -> Option<Result<DirListing, ScanError>> {
        let file_type = entry.file_type();
        // A symlinked root is still walked as the directory it points to
        let linked_root = entry.depth() == 0 && entry.path_is_symlink();

        if file_type.is_dir() || linked_root {
            let modified = match Self::modified(&entry) {
                Ok(modified) => modified,
                Err(e) => return Some(Err(e)),
            };
            let children = pending.remove(entry.path()).unwrap_or_default();

            if entry.depth() > 0 {
                self.record_child(&entry, pending, true);
            }

            log::trace!(
                "Listed {}: {} subdirectories, {} files",
                entry.path().display(),
                children.subdirs.len(),
                children.files.len()
            );

            return Some(Ok(DirListing {
                path: entry.into_path(),
                modified,
                subdirs: children.subdirs,
                files: children.files,
            }));
        }

        if file_type.is_file() {
            if entry.depth() > 0 {
                self.record_child(&entry, pending, false);
            }
        } else if file_type.is_symlink() {
            log::debug!("Skipping symbolic link: {}", entry.path().display());
        } else {
            log::debug!("Skipping special file: {}", entry.path().display());
        }

        None
    }

    /// Add an entry's name to its parent's pending children.
    fn record_child(
        &self,
        entry: &DirEntry,
        pending: &mut HashMap<PathBuf, PendingDir>,
        is_dir: bool,
    ) {
        let Some(parent) = entry.path().parent() else {
            return;
        };
        let slot = pending.entry(parent.to_path_buf()).or_default();
        let name = entry.file_name().to_os_string();
        if is_dir {
            slot.subdirs.push(name);
        } else {
            slot.files.push(name);
        }
    }

    /// Read a directory's modification time from its walk entry.
    fn modified(entry: &DirEntry) -> Result<SystemTime, ScanError> {
        let metadata = if entry.path_is_symlink() {
            fs::metadata(entry.path()).map_err(|source| ScanError::Io {
                path: entry.path().to_path_buf(),
                operation: "stat",
                source,
            })?
        } else {
            entry
                .metadata()
                .map_err(|e| Self::handle_walk_error(entry.path(), e))?
        };

        metadata
            .modified()
            .map_err(|source| ScanError::Io {
                path: entry.path().to_path_buf(),
                operation: "read modification time of",
                source,
            })
    }

    /// Convert a walkdir error into a [`ScanError`].
    fn handle_walk_error(fallback: &Path, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| fallback.to_path_buf(), Path::to_path_buf);
        log::warn!("Walker error for {}: {}", path.display(), error);
        ScanError::Walk {
            path,
            source: error,
        }
    }
}
