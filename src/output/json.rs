//! JSON output formatter for duplicate scan results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "root": "/home/user/Courses",
//!   "duplicates": ["/home/user/Courses/Lecture 01.pdf", "/home/user/Courses/courseB"],
//!   "events": [
//!     {
//!       "kind": "file",
//!       "path": "/home/user/Courses/Lecture 01.pdf",
//!       "name": "Lecture 01.pdf",
//!       "champion": "Lecture-01 (1).pdf",
//!       "directory": "/home/user/Courses",
//!       "size": 1024
//!     },
//!     {
//!       "kind": "directory",
//!       "path": "/home/user/Courses/courseB",
//!       "name": "courseB",
//!       "master": "courseA",
//!       "parent": "/home/user/Courses"
//!     }
//!   ],
//!   "summary": {
//!     "directories_scanned": 12,
//!     "files_scanned": 100,
//!     "total_size": 1048576,
//!     "suspect_groups": 3,
//!     "duplicate_files": 1,
//!     "duplicate_directories": 1,
//!     "reclaimable_space": 51200,
//!     "scan_duration_ms": 34,
//!     "exit_code": 0,
//!     "exit_code_name": "TD000"
//!   },
//!   "removal": null
//! }
//! ```
//!
//! # Example
//!
//! ```no_run
//! use treedupe::duplicates::DuplicateFinder;
//! use treedupe::output::json::JsonOutput;
//! use treedupe::error::ExitCode;
//! use std::path::Path;
//!
//! let report = DuplicateFinder::with_defaults().find_duplicates(Path::new(".")).unwrap();
//!
//! let output = JsonOutput::new(&report, None, ExitCode::Success);
//! println!("{}", output.to_json_pretty().unwrap());
//! ```

use std::io::Write;

use serde::Serialize;

use crate::actions::BatchDeleteResult;
use crate::duplicates::{DuplicateEvent, ScanReport, ScanSummary};
use crate::error::ExitCode;

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Number of directories walked
    pub directories_scanned: usize,
    /// Total number of files scanned
    pub files_scanned: usize,
    /// Total size of all scanned files in bytes
    pub total_size: u64,
    /// Number of same-name, same-size groups compared by content
    pub suspect_groups: usize,
    /// Number of duplicate files listed
    pub duplicate_files: usize,
    /// Number of duplicate directories listed
    pub duplicate_directories: usize,
    /// Total space that can be reclaimed by removing duplicates (bytes)
    pub reclaimable_space: u64,
    /// Duration of the scan in milliseconds
    pub scan_duration_ms: u64,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "TD000")
    pub exit_code_name: String,
}

impl JsonSummary {
    /// Create a JSON summary from a ScanSummary and an exit code.
    #[must_use]
    pub fn from_scan_summary(summary: &ScanSummary, exit_code: ExitCode) -> Self {
        Self {
            directories_scanned: summary.directories_scanned,
            files_scanned: summary.files_scanned,
            total_size: summary.total_size,
            suspect_groups: summary.suspect_groups,
            duplicate_files: summary.duplicate_files,
            duplicate_directories: summary.duplicate_directories,
            reclaimable_space: summary.reclaimable_space,
            scan_duration_ms: summary.scan_duration.as_millis() as u64,
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
        }
    }
}

/// A path that could not be removed.
#[derive(Debug, Clone, Serialize)]
pub struct JsonFailure {
    /// Path that was not removed
    pub path: String,
    /// Why removal failed
    pub error: String,
}

/// Outcome of `--remove` in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRemoval {
    /// Paths removed
    pub removed: Vec<String>,
    /// Paths that could not be removed
    pub failed: Vec<JsonFailure>,
    /// Bytes freed
    pub bytes_freed: u64,
    /// Whether paths were moved to the trash
    pub trashed: bool,
}

impl JsonRemoval {
    /// Create a removal record from a batch result.
    #[must_use]
    pub fn from_batch(result: &BatchDeleteResult) -> Self {
        Self {
            removed: result
                .successes
                .iter()
                .map(|s| s.path.to_string_lossy().into_owned())
                .collect(),
            failed: result
                .failures
                .iter()
                .map(|(path, error)| JsonFailure {
                    path: path.to_string_lossy().into_owned(),
                    error: error.clone(),
                })
                .collect(),
            bytes_freed: result.bytes_freed,
            trashed: result.successes.iter().any(|s| !s.permanent),
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Scanned directory
    pub root: String,
    /// Paths listed for removal, files first
    pub duplicates: Vec<String>,
    /// One decision record per listed path
    pub events: Vec<DuplicateEvent>,
    /// Scan summary statistics
    pub summary: JsonSummary,
    /// Removal outcome, present only when removal ran
    pub removal: Option<JsonRemoval>,
}

impl JsonOutput {
    /// Create a new JSON output from a scan report.
    ///
    /// # Arguments
    ///
    /// * `report` - The finished scan
    /// * `removal` - Outcome of removal, if it ran
    /// * `exit_code` - The exit code for this run
    ///
    /// # Example
    ///
    /// ```
    /// use treedupe::duplicates::ScanReport;
    /// use treedupe::output::json::JsonOutput;
    /// use treedupe::error::ExitCode;
    ///
    /// let output = JsonOutput::new(&ScanReport::default(), None, ExitCode::NoDuplicates);
    /// assert!(output.duplicates.is_empty());
    /// assert_eq!(output.summary.exit_code, 2);
    /// ```
    #[must_use]
    pub fn new(
        report: &ScanReport,
        removal: Option<&BatchDeleteResult>,
        exit_code: ExitCode,
    ) -> Self {
        Self {
            root: report.root.to_string_lossy().into_owned(),
            duplicates: report
                .duplicates
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
            events: report.events.clone(),
            summary: JsonSummary::from_scan_summary(&report.summary, exit_code),
            removal: removal.map(JsonRemoval::from_batch),
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
