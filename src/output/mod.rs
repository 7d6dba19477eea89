//! Output formatters for duplicate scan results.
//!
//! This module provides different output formats for scan results:
//! - Plain text decision lines for people
//! - JSON for automation and scripting
//!
//! # Example
//!
//! ```no_run
//! use treedupe::duplicates::DuplicateFinder;
//! use treedupe::output::TextOutput;
//! use std::path::Path;
//!
//! let report = DuplicateFinder::with_defaults().find_duplicates(Path::new(".")).unwrap();
//!
//! TextOutput::new(&report).write_report(&mut std::io::stdout()).unwrap();
//! ```

pub mod json;
pub mod text;

// Re-export main types
pub use json::{JsonOutput, JsonOutputError};
pub use text::{TextDeleteReporter, TextOutput};
