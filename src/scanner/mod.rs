//! Scanner module for directory traversal and file inspection.
//!
//! This module provides functionality for:
//! - Deterministic directory walking using walkdir
//! - File name normalization into grouping keys
//! - Byte-for-byte content comparison
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal, one [`DirListing`] per directory
//! - [`normalize`]: File name fingerprinting
//! - [`compare`]: Streaming content comparison
//!
//! # Example
//!
//! ```no_run
//! use treedupe::scanner::Walker;
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."));
//! for listing in walker.walk() {
//!     match listing {
//!         Ok(dir) => println!("{}: {} files", dir.path.display(), dir.files.len()),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```

pub mod compare;
pub mod normalize;
pub mod walker;

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::SystemTime;

// Re-export main types
pub use compare::{files_equal, CompareError};
pub use normalize::{normalize_name, normalize_stem, split_extension};
pub use walker::Walker;

/// Metadata for a discovered file.
///
/// Contains everything the grouper and resolver need: where the file
/// lives, how big it is and when it was last modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute path to the file
    pub path: PathBuf,
    /// Base name of the file
    pub name: OsString,
    /// File size in bytes
    pub size: u64,
    /// Last modification time
    pub modified: SystemTime,
}

impl FileEntry {
    /// Create a new FileEntry.
    ///
    /// The base name is taken from the last component of `path`.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the file
    /// * `size` - File size in bytes
    /// * `modified` - Last modification time
    #[must_use]
    pub fn new(path: PathBuf, size: u64, modified: SystemTime) -> Self {
        let name = path.file_name().map(OsString::from).unwrap_or_default();
        Self {
            path,
            name,
            size,
            modified,
        }
    }
}

/// The immediate contents of one directory, as seen by a single walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirListing {
    /// Absolute path to the directory
    pub path: PathBuf,
    /// Last modification time of the directory itself
    pub modified: SystemTime,
    /// Names of immediate subdirectories, sorted
    pub subdirs: Vec<OsString>,
    /// Names of immediate regular files, sorted
    pub files: Vec<OsString>,
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A filesystem operation on a single path failed.
    #[error("Failed to {operation} {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// What was being attempted (e.g. "stat", "read")
        operation: &'static str,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The directory traversal itself failed.
    #[error("Failed to walk {path}: {source}")]
    Walk {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying walkdir error
        #[source]
        source: walkdir::Error,
    },
}

impl ScanError {
    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound(p) | Self::NotADirectory(p) => p,
            Self::Io { path, .. } | Self::Walk { path, .. } => path,
        }
    }
}
