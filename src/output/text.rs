//! Plain text output formatter.
//!
//! Produces the human-readable report:
//!
//! ```text
//! ---- Processing "/home/user/Courses"
//! "Lecture 01.pdf" is a duplicate of "Lecture-01 (1).pdf" in "/home/user/Courses"
//! Directory "courseB" is a duplicate of "courseA" in "/home/user/Courses"
//!
//! Scanned 12 directories and 100 files (1.0 MiB) in 0.03s
//! Found 1 duplicate file(s) and 1 duplicate directory(ies), 50.0 KiB reclaimable
//! Not deleting detected duplicates. Use --remove flag to enable auto delete.
//! ```
//!
//! When removal runs, [`TextDeleteReporter`] prints one `Deleting "<path>"`
//! line per path instead of the hint.

use std::io::{self, Write};
use std::path::Path;

use bytesize::ByteSize;

use crate::actions::{BatchDeleteResult, DeleteProgressCallback};
use crate::duplicates::ScanReport;

/// Hint printed when duplicates were found but `--remove` was not given.
pub const REMOVE_HINT: &str =
    "Not deleting detected duplicates. Use --remove flag to enable auto delete.";

/// Text report for one scan.
#[derive(Debug)]
pub struct TextOutput<'a> {
    report: &'a ScanReport,
}

impl<'a> TextOutput<'a> {
    /// Create a text formatter over a finished scan.
    #[must_use]
    pub fn new(report: &'a ScanReport) -> Self {
        Self { report }
    }

    /// Write the header, one line per decision, and the summary.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_report<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(
            writer,
            "---- Processing \"{}\"",
            self.report.root.display()
        )?;

        for event in self.report.events() {
            writeln!(writer, "{}", event)?;
        }

        let summary = &self.report.summary;
        writeln!(writer)?;
        writeln!(
            writer,
            "Scanned {} directories and {} files ({}) in {:.2}s",
            summary.directories_scanned,
            summary.files_scanned,
            summary.total_size_display(),
            summary.scan_duration.as_secs_f64()
        )?;

        if self.report.is_empty() {
            writeln!(writer, "No duplicates found.")?;
        } else {
            writeln!(
                writer,
                "Found {} duplicate file(s) and {} duplicate directory(ies), {} reclaimable",
                summary.duplicate_files,
                summary.duplicate_directories,
                summary.reclaimable_display()
            )?;
        }

        Ok(())
    }

    /// Write the closing line: the removal outcome or the `--remove` hint.
    ///
    /// Nothing is written when the scan found nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_removal<W: Write>(
        &self,
        writer: &mut W,
        removal: Option<&BatchDeleteResult>,
    ) -> io::Result<()> {
        if self.report.is_empty() {
            return Ok(());
        }

        match removal {
            Some(result) => writeln!(writer, "{}", result.summary()),
            None => writeln!(writer, "{}", REMOVE_HINT),
        }
    }
}

/// Prints removal progress as plain text lines.
///
/// `Deleting` lines go to stdout next to the report; failures go to stderr.
#[derive(Debug, Default)]
pub struct TextDeleteReporter;

impl DeleteProgressCallback for TextDeleteReporter {
    fn on_before_delete(&self, path: &Path, _index: usize, _total: usize) {
        println!("Deleting \"{}\"", path.display());
    }

    fn on_delete_success(&self, path: &Path, size: u64) {
        log::debug!("Freed {} from {}", ByteSize::b(size), path.display());
    }

    fn on_delete_failure(&self, path: &Path, error: &str) {
        eprintln!("Failed to delete \"{}\": {}", path.display(), error);
    }

    fn on_complete(&self, _result: &BatchDeleteResult) {}
}
