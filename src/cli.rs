//! Command-line interface definitions for treedupe.
//!
//! This module defines all CLI arguments and options using the clap derive API.
//!
//! # Example
//!
//! ```bash
//! # Report duplicates without touching anything
//! treedupe ~/Courses
//!
//! # Remove them, keeping the newest copy of each
//! treedupe ~/Courses --remove
//!
//! # Move them to the system trash instead
//! treedupe ~/Courses --remove --trash
//!
//! # JSON report for scripting
//! treedupe ~/Courses --output json
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Find and remove duplicate files and directory trees.
///
/// Files are duplicates when their names match after stripping digits,
/// spaces and punctuation, their sizes match, and their bytes match. Sibling
/// directories with the same structure are duplicates too. The most recently
/// modified copy is always kept.
#[derive(Debug, Parser)]
#[command(name = "treedupe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Report errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,

    /// Directory to scan for duplicates
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Remove detected duplicates, keeping only the latest version
    ///
    /// Use at your own risk: without --trash, removal is permanent.
    #[arg(long)]
    pub remove: bool,

    /// Move removed duplicates to the system trash instead of deleting them
    #[arg(long, requires = "remove")]
    pub trash: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per duplicate decision plus a summary
    Text,
    /// JSON output for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
