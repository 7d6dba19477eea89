//! treedupe - duplicate file and directory tree finder
//!
//! Finds files that are byte-identical copies of a similarly named sibling
//! file, and sibling directories with the same structure, keeping the most
//! recently modified copy of each. Aimed at re-downloaded course material
//! where copies carry names like `Lecture-01 (1).pdf`.

pub mod actions;
pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;

use std::io;
use std::sync::Arc;

use anyhow::Context;

use crate::actions::{delete_batch, BatchDeleteResult, DeleteConfig};
use crate::cli::{Cli, OutputFormat};
use crate::duplicates::{DuplicateFinder, FinderConfig, ScanReport};
use crate::error::ExitCode;
use crate::output::{JsonOutput, TextDeleteReporter, TextOutput};
use crate::progress::Progress;

/// Run the application for parsed CLI arguments.
///
/// Scans the requested directory, prints the report and removes the
/// duplicates when `--remove` was given. Removal only happens after the scan
/// completed without error.
///
/// # Errors
///
/// Returns an error if the scan fails or the report cannot be written.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet, cli.no_color);
    log::debug!("Arguments: {:?}", cli);

    let progress = Arc::new(Progress::new(cli.quiet));
    let finder = DuplicateFinder::new(FinderConfig::default().with_progress_callback(progress));
    let report = finder.find_duplicates(&cli.path)?;

    let delete_config = if cli.trash {
        DeleteConfig::trash()
    } else {
        DeleteConfig::permanent()
    };
    let should_remove = cli.remove && !report.is_empty();

    let mut stdout = io::stdout();
    let exit_code = match cli.output {
        OutputFormat::Text => {
            let output = TextOutput::new(&report);
            output
                .write_report(&mut stdout)
                .context("Failed to write report")?;

            let removal = should_remove.then(|| {
                delete_batch(
                    &report.duplicates,
                    &delete_config,
                    Some(&TextDeleteReporter),
                )
            });

            output
                .write_removal(&mut stdout, removal.as_ref())
                .context("Failed to write report")?;
            exit_code_for(&report, removal.as_ref())
        }
        OutputFormat::Json => {
            let removal = should_remove.then(|| {
                delete_batch::<TextDeleteReporter>(&report.duplicates, &delete_config, None)
            });

            let exit_code = exit_code_for(&report, removal.as_ref());
            JsonOutput::new(&report, removal.as_ref(), exit_code)
                .write_to(&mut stdout, true)
                .context("Failed to write JSON report")?;
            exit_code
        }
    };

    log::debug!("Exiting with {:?}", exit_code);
    Ok(exit_code)
}

/// Pick the exit code for a completed scan.
#[must_use]
pub fn exit_code_for(report: &ScanReport, removal: Option<&BatchDeleteResult>) -> ExitCode {
    if report.is_empty() {
        ExitCode::NoDuplicates
    } else if removal.is_some_and(|r| !r.all_succeeded()) {
        ExitCode::PartialSuccess
    } else {
        ExitCode::Success
    }
}
