//! Duplicate finder implementation with a two-phase pipeline.
//!
//! # Overview
//!
//! This module orchestrates duplicate detection over one directory tree:
//!
//! 1. **Phase 1 - Index**: walk the tree once. For every directory, group its
//!    files by normalized key (see [`crate::duplicates::groups`]), keep the
//!    multi-member buckets as suspect groups, and record a
//!    [`DirSnapshot`] in the [`SnapshotIndex`].
//! 2. **Phase 2a - Files**: byte-compare each suspect group
//!    (see [`crate::duplicates::resolver`]).
//! 3. **Phase 2b - Directories**: test every pair of sibling directories for
//!    recursive equivalence against the finished index
//!    (see [`crate::duplicates::tree`]).
//!
//! Phase 2 never starts before the index is complete, because a parent's
//! equivalence depends on the snapshots of all of its descendants.
//!
//! # Example
//!
//! ```no_run
//! use treedupe::duplicates::DuplicateFinder;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let report = finder.find_duplicates(Path::new("/home/user/Courses")).unwrap();
//!
//! for event in report.events() {
//!     println!("{}", event);
//! }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use super::groups::{group_files, suspect_groups, SuspectGroup};
use super::report::{DuplicateEvent, ScanReport, ScanSummary};
use super::resolver::{resolve_group, ResolvedDuplicate};
use super::tree::{DirSnapshot, DuplicateDirectory, SnapshotIndex};
use crate::progress::{ProgressCallback, PHASE_COMPARING, PHASE_DIRECTORIES, PHASE_WALKING};
use crate::scanner::{files_equal, CompareError, ScanError, Walker};

/// Configuration for the duplicate finder.
#[derive(Clone, Default)]
pub struct FinderConfig {
    /// Optional progress callback for UI updates.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("progress_callback", &self.progress_callback.is_some())
            .finish()
    }
}

impl FinderConfig {
    /// Set progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Errors that can occur during duplicate finding.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The provided path does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Walking the tree or inspecting a file failed.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Byte comparison of two candidate files could not complete.
    #[error("Failed to compare {champion} with {suspect}: {source}")]
    Comparison {
        /// The retained candidate
        champion: PathBuf,
        /// The candidate being checked against it
        suspect: PathBuf,
        /// The underlying comparison error
        #[source]
        source: CompareError,
    },
}

/// Duplicate finder that orchestrates the detection pipeline.
#[derive(Debug)]
pub struct DuplicateFinder {
    config: FinderConfig,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self { config }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Find duplicate files and directories beneath `path`.
    ///
    /// The scan is read-only. Nothing is deleted; the returned report lists
    /// what could be removed along with one decision record per entry.
    ///
    /// # Errors
    ///
    /// Returns `FinderError` if:
    /// - The path does not exist or is not a directory
    /// - Any directory listing or file stat fails
    /// - Any content comparison fails
    ///
    /// No partial report is returned on failure.
    pub fn find_duplicates(&self, path: &Path) -> Result<ScanReport, FinderError> {
        let start_time = Instant::now();

        if !path.exists() {
            return Err(FinderError::PathNotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(FinderError::NotADirectory(path.to_path_buf()));
        }

        let root = std::path::absolute(path).map_err(|source| ScanError::Io {
            path: path.to_path_buf(),
            operation: "resolve",
            source,
        })?;

        log::info!("Starting duplicate scan of {}", root.display());

        let mut summary = ScanSummary::default();

        // Phase 1: single walk building suspect groups and the snapshot index
        let (index, suspects) = self.index_tree(&root, &mut summary)?;
        log::info!(
            "Indexed {} directories, {} files, {} suspect groups",
            summary.directories_scanned,
            summary.files_scanned,
            suspects.len()
        );

        // Phase 2a: confirm file duplicates by content
        let files = self.resolve_suspects(&suspects)?;

        // Phase 2b: sibling directory equivalence
        self.phase_start(PHASE_DIRECTORIES, index.len());
        let directories = index.duplicate_directories_with(|current, parent| {
            if let Some(ref callback) = self.config.progress_callback {
                callback.on_progress(current, &parent.to_string_lossy());
            }
        });
        self.phase_end(PHASE_DIRECTORIES);

        let mut report = assemble_report(root, files, directories, &index, summary);
        report.summary.scan_duration = start_time.elapsed();

        log::info!(
            "Scan complete: {} duplicate files, {} duplicate directories, {} reclaimable",
            report.summary.duplicate_files,
            report.summary.duplicate_directories,
            report.summary.reclaimable_display()
        );

        Ok(report)
    }

    /// Walk the tree once, grouping each directory's files.
    fn index_tree(
        &self,
        root: &Path,
        summary: &mut ScanSummary,
    ) -> Result<(SnapshotIndex, Vec<SuspectGroup>), FinderError> {
        self.phase_start(PHASE_WALKING, 0);

        let mut index = SnapshotIndex::new();
        let mut suspects = Vec::new();

        for listing in Walker::new(root).walk() {
            let listing = listing?;
            let groups = group_files(&listing.path, &listing.files)?;

            let file_bytes: u64 = groups
                .iter()
                .map(|(key, members)| key.size * members.len() as u64)
                .sum();

            summary.directories_scanned += 1;
            summary.files_scanned += listing.files.len();
            summary.total_size += file_bytes;

            suspects.extend(suspect_groups(&listing.path, &groups));

            if let Some(ref callback) = self.config.progress_callback {
                callback.on_progress(
                    summary.directories_scanned,
                    &listing.path.to_string_lossy(),
                );
            }

            let snapshot = DirSnapshot::new(
                listing.subdirs,
                groups.into_keys(),
                listing.modified,
                file_bytes,
            );
            index.insert(listing.path, snapshot);
        }

        // Listings arrive children-first; report parents first instead
        suspects.sort_by(|a, b| {
            a.directory
                .cmp(&b.directory)
                .then_with(|| a.key.cmp(&b.key))
        });
        summary.suspect_groups = suspects.len();

        self.phase_end(PHASE_WALKING);
        Ok((index, suspects))
    }

    /// Byte-compare every suspect group.
    fn resolve_suspects(
        &self,
        suspects: &[SuspectGroup],
    ) -> Result<Vec<ResolvedDuplicate>, FinderError> {
        self.phase_start(PHASE_COMPARING, suspects.len());

        let mut resolved = Vec::new();
        for (i, group) in suspects.iter().enumerate() {
            if let Some(ref callback) = self.config.progress_callback {
                callback.on_progress(i + 1, &group.directory.to_string_lossy());
            }
            resolved.extend(resolve_group(group, files_equal)?);
        }

        self.phase_end(PHASE_COMPARING);
        Ok(resolved)
    }

    fn phase_start(&self, phase: &str, total: usize) {
        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start(phase, total);
        }
    }

    fn phase_end(&self, phase: &str) {
        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end(phase);
        }
    }
}

/// Combine both passes into one report, dropping covered paths.
///
/// A path is covered when one of its ancestors is itself a listed duplicate
/// directory; removing that directory removes the path too.
fn assemble_report(
    root: PathBuf,
    files: Vec<ResolvedDuplicate>,
    directories: Vec<DuplicateDirectory>,
    index: &SnapshotIndex,
    mut summary: ScanSummary,
) -> ScanReport {
    let listed_dirs: HashSet<PathBuf> = directories.iter().map(|d| d.path.clone()).collect();
    let is_covered = |path: &Path| path.ancestors().skip(1).any(|a| listed_dirs.contains(a));

    let mut duplicates = Vec::new();
    let mut events = Vec::new();

    for file in files {
        if is_covered(&file.path) {
            log::debug!("{} is inside a duplicate directory", file.path.display());
            continue;
        }
        summary.duplicate_files += 1;
        summary.reclaimable_space += file.size;
        duplicates.push(file.path.clone());
        events.push(DuplicateEvent::from(file));
    }

    for dir in directories {
        if is_covered(&dir.path) {
            log::debug!("{} is inside a duplicate directory", dir.path.display());
            continue;
        }
        summary.duplicate_directories += 1;
        summary.reclaimable_space += index.subtree_size(&dir.path);
        duplicates.push(dir.path.clone());
        events.push(DuplicateEvent::from(dir));
    }

    ScanReport {
        root,
        duplicates,
        events,
        summary,
    }
}
