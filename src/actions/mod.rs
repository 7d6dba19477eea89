//! File actions module.
//!
//! This module removes the duplicates a scan reported:
//! - Recursive removal of duplicate directories
//! - Removal of duplicate files
//! - Optional move to the system trash via the trash crate
//! - Batch operations with progress reporting
//!
//! ```no_run
//! use treedupe::actions::{delete_batch, DeleteConfig, DeleteProgressCallback, BatchDeleteResult};
//! use treedupe::duplicates::DuplicateFinder;
//! use std::path::Path;
//!
//! struct Quiet;
//! impl DeleteProgressCallback for Quiet {
//!     fn on_before_delete(&self, _: &Path, _: usize, _: usize) {}
//!     fn on_delete_success(&self, _: &Path, _: u64) {}
//!     fn on_delete_failure(&self, _: &Path, _: &str) {}
//!     fn on_complete(&self, _: &BatchDeleteResult) {}
//! }
//!
//! let report = DuplicateFinder::with_defaults().find_duplicates(Path::new(".")).unwrap();
//! let result = delete_batch::<Quiet>(&report.duplicates, &DeleteConfig::trash(), None);
//! println!("{}", result.summary());
//! ```

pub mod delete;

// Re-export commonly used types
pub use delete::{
    delete_batch, remove_path, BatchDeleteResult, DeleteConfig, DeleteError,
    DeleteProgressCallback, DeleteResult,
};
