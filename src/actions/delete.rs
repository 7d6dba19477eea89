//! Removal of detected duplicates.
//!
//! # Overview
//!
//! This module removes the paths listed in a [`crate::duplicates::ScanReport`]:
//! - Directories are removed recursively, files individually
//! - Permanent deletion by default, system trash on request
//! - Batch operations with progress reporting
//!
//! # Safety
//!
//! The finder never lists a path inside another listed directory and always
//! keeps the newest copy, so removing the whole list leaves one copy of
//! everything. Removal is only ever run after a scan completed without error.
//!
//! # Example
//!
//! ```no_run
//! use treedupe::actions::delete::{remove_path, DeleteConfig};
//! use std::path::PathBuf;
//!
//! let path = PathBuf::from("/path/to/duplicate.txt");
//! match remove_path(&path, &DeleteConfig::trash()) {
//!     Ok(result) => println!("Removed: {}", result.path.display()),
//!     Err(e) => eprintln!("Failed: {}", e),
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bytesize::ByteSize;
use thiserror::Error;
use walkdir::WalkDir;

/// Error type for removal operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// Path was not found (may have been removed or moved).
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to remove.
    #[error("permission denied: {0} - try running with elevated privileges")]
    PermissionDenied(PathBuf),

    /// Trash operation failed.
    #[error("trash operation failed for {path}: {message}")]
    TrashFailed { path: PathBuf, message: String },

    /// Permanent removal failed.
    #[error("remove failed for {path}: {source}")]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p)
            | Self::PermissionDenied(p)
            | Self::TrashFailed { path: p, .. }
            | Self::RemoveFailed { path: p, .. }
            | Self::Io { path: p, .. } => p,
        }
    }

    fn from_metadata(path: &Path, e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: e,
            },
        }
    }
}

/// Result of a successful removal.
#[derive(Debug, Clone)]
pub struct DeleteResult {
    /// Path that was removed.
    pub path: PathBuf,
    /// Bytes freed (for a directory, the size of every file beneath it).
    pub size: u64,
    /// Whether the path was a directory.
    pub is_dir: bool,
    /// Whether removal was permanent (true) or to trash (false).
    pub permanent: bool,
}

impl DeleteResult {
    /// Create a new delete result.
    #[must_use]
    pub fn new(path: PathBuf, size: u64, is_dir: bool, permanent: bool) -> Self {
        Self {
            path,
            size,
            is_dir,
            permanent,
        }
    }
}

/// Results of a batch removal.
#[derive(Debug, Clone, Default)]
pub struct BatchDeleteResult {
    /// Successfully removed paths.
    pub successes: Vec<DeleteResult>,
    /// Failed removals with their errors.
    pub failures: Vec<(PathBuf, String)>,
    /// Total bytes freed.
    pub bytes_freed: u64,
}

impl BatchDeleteResult {
    /// Number of successful removals.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    /// Number of failed removals.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Total number of attempted removals.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    /// Check if all removals succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary of the operation.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.all_succeeded() {
            format!(
                "Removed {} item(s), freed {}",
                self.success_count(),
                ByteSize::b(self.bytes_freed)
            )
        } else {
            format!(
                "Removed {} item(s), {} failed, freed {}",
                self.success_count(),
                self.failure_count(),
                ByteSize::b(self.bytes_freed)
            )
        }
    }
}

/// Configuration for removal operations.
#[derive(Debug, Clone)]
pub struct DeleteConfig {
    /// Move to the system trash instead of deleting permanently.
    pub use_trash: bool,
    /// Continue on error (process remaining paths even if some fail).
    pub continue_on_error: bool,
}

impl Default for DeleteConfig {
    fn default() -> Self {
        Self {
            use_trash: false,
            continue_on_error: true,
        }
    }
}

impl DeleteConfig {
    /// Create config for permanent removal.
    #[must_use]
    pub fn permanent() -> Self {
        Self::default()
    }

    /// Create config for trash removal.
    #[must_use]
    pub fn trash() -> Self {
        Self {
            use_trash: true,
            ..Self::default()
        }
    }

    /// Enable/disable continue on error.
    #[must_use]
    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }
}

/// Callback trait for removal progress reporting.
pub trait DeleteProgressCallback: Send + Sync {
    /// Called before each removal.
    fn on_before_delete(&self, path: &Path, index: usize, total: usize);

    /// Called after successful removal.
    fn on_delete_success(&self, path: &Path, size: u64);

    /// Called after failed removal.
    fn on_delete_failure(&self, path: &Path, error: &str);

    /// Called when batch operation completes.
    fn on_complete(&self, result: &BatchDeleteResult);
}

/// Total size of the regular files beneath a directory.
///
/// Entries that cannot be read are skipped; the value is informational only.
fn directory_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}

/// Remove one file or directory.
///
/// Directories are removed together with everything beneath them.
///
/// # Errors
///
/// - `NotFound` if the path doesn't exist
/// - `PermissionDenied` if the path can't be inspected
/// - `TrashFailed` if the trash operation fails
/// - `RemoveFailed` if permanent removal fails
pub fn remove_path(path: &Path, config: &DeleteConfig) -> Result<DeleteResult, DeleteError> {
    let metadata =
        fs::symlink_metadata(path).map_err(|e| DeleteError::from_metadata(path, e))?;

    let is_dir = metadata.is_dir();
    let size = if is_dir {
        directory_size(path)
    } else {
        metadata.len()
    };

    if config.use_trash {
        trash::delete(path).map_err(|e| {
            log::error!("Trash operation failed for {}: {}", path.display(), e);
            DeleteError::TrashFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;
        log::info!("Moved to trash: {} ({} bytes)", path.display(), size);
    } else {
        let removed = if is_dir {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };
        removed.map_err(|source| {
            log::error!("Remove failed for {}: {}", path.display(), source);
            DeleteError::RemoveFailed {
                path: path.to_path_buf(),
                source,
            }
        })?;
        log::info!("Removed: {} ({} bytes)", path.display(), size);
    }

    Ok(DeleteResult::new(
        path.to_path_buf(),
        size,
        is_dir,
        !config.use_trash,
    ))
}

/// Remove multiple paths in order.
///
/// Processes every path, continuing on error if configured to do so.
///
/// # Arguments
///
/// * `paths` - Paths to remove, usually `ScanReport::duplicates`
/// * `config` - Removal configuration
/// * `callback` - Optional progress callback
///
/// # Example
///
/// ```no_run
/// use treedupe::actions::delete::{delete_batch, DeleteConfig, DeleteProgressCallback, BatchDeleteResult};
/// use std::path::{Path, PathBuf};
///
/// struct NoCallback;
/// impl DeleteProgressCallback for NoCallback {
///     fn on_before_delete(&self, _: &Path, _: usize, _: usize) {}
///     fn on_delete_success(&self, _: &Path, _: u64) {}
///     fn on_delete_failure(&self, _: &Path, _: &str) {}
///     fn on_complete(&self, _: &BatchDeleteResult) {}
/// }
///
/// let paths = vec![PathBuf::from("/dup1.txt"), PathBuf::from("/old-copy")];
///
/// let result = delete_batch::<NoCallback>(&paths, &DeleteConfig::default(), None);
/// println!("{}", result.summary());
/// ```
pub fn delete_batch<C: DeleteProgressCallback>(
    paths: &[PathBuf],
    config: &DeleteConfig,
    callback: Option<&C>,
) -> BatchDeleteResult {
    let mut result = BatchDeleteResult::default();
    let total = paths.len();

    for (index, path) in paths.iter().enumerate() {
        if let Some(cb) = callback {
            cb.on_before_delete(path, index, total);
        }

        match remove_path(path, config) {
            Ok(del) => {
                result.bytes_freed += del.size;
                if let Some(cb) = callback {
                    cb.on_delete_success(path, del.size);
                }
                result.successes.push(del);
            }
            Err(e) => {
                let error_msg = e.to_string();
                log::warn!("Failed to remove {}: {}", path.display(), error_msg);

                if let Some(cb) = callback {
                    cb.on_delete_failure(path, &error_msg);
                }

                result.failures.push((path.clone(), error_msg));

                if !config.continue_on_error {
                    log::info!("Stopping batch removal due to error (continue_on_error=false)");
                    break;
                }
            }
        }
    }

    if let Some(cb) = callback {
        cb.on_complete(&result);
    }

    log::info!("{}", result.summary());

    result
}
