//! Content confirmation of suspect groups.
//!
//! # Overview
//!
//! A suspect group only shares a normalized name and a size; it may still
//! hold several unrelated files. [`resolve_group`] splits it into clusters of
//! byte-identical files, keeping the most recently modified file of each
//! cluster as its champion:
//!
//! 1. Sort members newest first.
//! 2. Compare the front member (the champion) with every other member.
//!    Matches are duplicates of the champion; the rest carry over.
//! 3. Repeat on the carried-over members until fewer than two remain.
//!
//! # Example
//!
//! ```
//! use treedupe::duplicates::{resolve_group, GroupMember, NormalizedKey, SuspectGroup};
//! use std::path::PathBuf;
//! use std::time::{Duration, SystemTime};
//!
//! let old = SystemTime::UNIX_EPOCH;
//! let new = old + Duration::from_secs(60);
//! let group = SuspectGroup {
//!     directory: PathBuf::from("/course"),
//!     key: NormalizedKey::new("lecture.pdf", 100),
//!     members: vec![
//!         GroupMember::new("Lecture 01.pdf", old),
//!         GroupMember::new("Lecture-01 (1).pdf", new),
//!     ],
//! };
//!
//! // Pretend every pair is identical
//! let resolved = resolve_group(&group, |_, _| Ok(true)).unwrap();
//!
//! assert_eq!(resolved.len(), 1);
//! assert_eq!(resolved[0].path, PathBuf::from("/course/Lecture 01.pdf"));
//! assert_eq!(resolved[0].champion, "Lecture-01 (1).pdf");
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::finder::FinderError;
use super::groups::{GroupMember, SuspectGroup};
use crate::scanner::CompareError;

/// A file confirmed to be a byte-identical copy of a newer file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDuplicate {
    /// Full path of the redundant copy
    pub path: PathBuf,
    /// Base name of the redundant copy
    pub name: String,
    /// Base name of the retained copy
    pub champion: String,
    /// Directory holding both files
    pub directory: PathBuf,
    /// File size in bytes
    pub size: u64,
}

/// Confirm which members of a suspect group are true duplicates.
///
/// Members are ordered newest first with a stable sort, so of two files with
/// the same modification time the one listed first becomes champion.
///
/// # Arguments
///
/// * `group` - The suspect group to resolve
/// * `same_content` - Content comparator, usually [`crate::scanner::files_equal`]
///
/// # Errors
///
/// Returns `FinderError::Comparison` as soon as any comparison fails. A
/// failed comparison is never treated as "not a duplicate".
pub fn resolve_group<F>(
    group: &SuspectGroup,
    mut same_content: F,
) -> Result<Vec<ResolvedDuplicate>, FinderError>
where
    F: FnMut(&Path, &Path) -> Result<bool, CompareError>,
{
    let mut remaining: Vec<&GroupMember> = group.members.iter().collect();
    remaining.sort_by(|a, b| b.modified.cmp(&a.modified));

    let mut resolved = Vec::new();

    while remaining.len() > 1 {
        let champion = remaining[0];
        let champion_path = group.member_path(champion);
        let mut unconfirmed = Vec::with_capacity(remaining.len() - 1);

        for suspect in &remaining[1..] {
            let suspect_path = group.member_path(suspect);
            let identical = same_content(&champion_path, &suspect_path).map_err(|source| {
                log::error!(
                    "Comparison failed: {} vs {}: {}",
                    champion_path.display(),
                    suspect_path.display(),
                    source
                );
                FinderError::Comparison {
                    champion: champion_path.clone(),
                    suspect: suspect_path.clone(),
                    source,
                }
            })?;

            if identical {
                log::debug!(
                    "{} is a duplicate of {}",
                    suspect_path.display(),
                    champion_path.display()
                );
                resolved.push(ResolvedDuplicate {
                    path: suspect_path,
                    name: suspect.name.to_string_lossy().into_owned(),
                    champion: champion.name.to_string_lossy().into_owned(),
                    directory: group.directory.clone(),
                    size: group.key.size,
                });
            } else {
                unconfirmed.push(*suspect);
            }
        }

        remaining = unconfirmed;
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duplicates::NormalizedKey;
    use std::collections::HashMap;
    use std::io;
    use std::time::{Duration, SystemTime};

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn group(members: Vec<GroupMember>) -> SuspectGroup {
        SuspectGroup {
            directory: PathBuf::from("/d"),
            key: NormalizedKey::new("file.bin", 4),
            members,
        }
    }

    /// Comparator backed by an in-memory name → content table.
    fn contents(table: &[(&str, &str)]) -> impl FnMut(&Path, &Path) -> Result<bool, CompareError> {
        let map: HashMap<PathBuf, String> = table
            .iter()
            .map(|(name, content)| (PathBuf::from("/d").join(name), content.to_string()))
            .collect();
        move |a, b| Ok(map[a] == map[b])
    }

    #[test]
    fn test_newest_is_champion() {
        let g = group(vec![
            GroupMember::new("a.bin", at(10)),
            GroupMember::new("b.bin", at(20)),
        ]);

        let resolved = resolve_group(&g, contents(&[("a.bin", "x"), ("b.bin", "x")])).unwrap();

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, "a.bin");
        assert_eq!(resolved[0].champion, "b.bin");
        assert_eq!(resolved[0].path, PathBuf::from("/d/a.bin"));
        assert_eq!(resolved[0].size, 4);
    }

    #[test]
    fn test_champion_independent_of_input_order() {
        let forward = group(vec![
            GroupMember::new("old.bin", at(1)),
            GroupMember::new("new.bin", at(2)),
        ]);
        let backward = group(vec![
            GroupMember::new("new.bin", at(2)),
            GroupMember::new("old.bin", at(1)),
        ]);
        let table = [("old.bin", "same"), ("new.bin", "same")];

        let a = resolve_group(&forward, contents(&table)).unwrap();
        let b = resolve_group(&backward, contents(&table)).unwrap();

        assert_eq!(a, b);
        assert_eq!(a[0].champion, "new.bin");
    }

    #[test]
    fn test_different_content_not_duplicates() {
        let g = group(vec![
            GroupMember::new("a.bin", at(1)),
            GroupMember::new("b.bin", at(2)),
        ]);

        let resolved = resolve_group(&g, contents(&[("a.bin", "x"), ("b.bin", "y")])).unwrap();

        assert!(resolved.is_empty());
    }

    #[test]
    fn test_multiple_clusters_in_one_group() {
        let g = group(vec![
            GroupMember::new("p1.bin", at(5)),
            GroupMember::new("q1.bin", at(4)),
            GroupMember::new("p2.bin", at(3)),
            GroupMember::new("q2.bin", at(2)),
            GroupMember::new("r.bin", at(1)),
        ]);
        let table = [
            ("p1.bin", "P"),
            ("p2.bin", "P"),
            ("q1.bin", "Q"),
            ("q2.bin", "Q"),
            ("r.bin", "R"),
        ];

        let resolved = resolve_group(&g, contents(&table)).unwrap();

        let pairs: Vec<(&str, &str)> = resolved
            .iter()
            .map(|r| (r.name.as_str(), r.champion.as_str()))
            .collect();
        assert_eq!(pairs, vec![("p2.bin", "p1.bin"), ("q2.bin", "q1.bin")]);
    }

    #[test]
    fn test_equal_times_keep_listing_order() {
        let g = group(vec![
            GroupMember::new("first.bin", at(7)),
            GroupMember::new("second.bin", at(7)),
        ]);

        let resolved =
            resolve_group(&g, contents(&[("first.bin", "z"), ("second.bin", "z")])).unwrap();

        assert_eq!(resolved[0].champion, "first.bin");
        assert_eq!(resolved[0].name, "second.bin");
    }

    #[test]
    fn test_comparison_failure_is_fatal() {
        let g = group(vec![
            GroupMember::new("a.bin", at(1)),
            GroupMember::new("b.bin", at(2)),
        ]);

        let result = resolve_group(&g, |_, b| {
            Err(CompareError::Io {
                path: b.to_path_buf(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            })
        });

        match result {
            Err(FinderError::Comparison {
                champion, suspect, ..
            }) => {
                assert_eq!(champion, PathBuf::from("/d/b.bin"));
                assert_eq!(suspect, PathBuf::from("/d/a.bin"));
            }
            other => panic!("Expected Comparison error, got {:?}", other),
        }
    }
}
