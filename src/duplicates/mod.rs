//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Name-and-size file grouping (Phase 1)
//! - Byte comparison of suspect groups (Phase 2a)
//! - Recursive sibling directory equivalence (Phase 2b)
//! - Report assembly with covered-path pruning

pub mod finder;
pub mod groups;
pub mod report;
pub mod resolver;
pub mod tree;

pub use finder::{DuplicateFinder, FinderConfig, FinderError};
pub use groups::{
    group_entries, group_files, suspect_groups, FileGroups, GroupMember, NormalizedKey,
    SuspectGroup,
};
pub use report::{DuplicateEvent, ScanReport, ScanSummary};
pub use resolver::{resolve_group, ResolvedDuplicate};
pub use tree::{DirSnapshot, DuplicateDirectory, SnapshotIndex};
