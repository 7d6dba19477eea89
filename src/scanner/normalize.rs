//! File name fingerprinting.
//!
//! Re-downloaded material tends to pick up numbering and punctuation noise
//! (`Lecture 01.pdf`, `lecture-01.pdf`, `Lecture(1).pdf`). Normalization
//! strips that noise from the stem so such files land in the same group,
//! while the extension is kept verbatim so `.pdf` and `.mp4` stay apart.
//!
//! # Example
//!
//! ```
//! use treedupe::scanner::normalize_name;
//!
//! assert_eq!(normalize_name("Lecture 01.pdf"), "lecture.pdf");
//! assert_eq!(normalize_name("lecture-01.pdf"), "lecture.pdf");
//! assert_eq!(normalize_name("Lecture(1).pdf"), "lecture.pdf");
//! ```

/// Characters removed from a file stem before comparison.
pub const STRIPPED_CHARS: &[char] = &[
    ' ', '\t', '-', '_', '(', ')', '"', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];

/// Split a file name into its stem and extension.
///
/// The extension starts at the last `.` and includes it. Leading dots never
/// start an extension, so `.bashrc` has none.
///
/// # Example
///
/// ```
/// use treedupe::scanner::split_extension;
///
/// assert_eq!(split_extension("notes.txt"), ("notes", ".txt"));
/// assert_eq!(split_extension("a.tar.gz"), ("a.tar", ".gz"));
/// assert_eq!(split_extension(".bashrc"), (".bashrc", ""));
/// assert_eq!(split_extension("README"), ("README", ""));
/// ```
#[must_use]
pub fn split_extension(file_name: &str) -> (&str, &str) {
    let leading_dots = file_name.len() - file_name.trim_start_matches('.').len();

    match file_name[leading_dots..].rfind('.') {
        Some(idx) => file_name.split_at(leading_dots + idx),
        None => (file_name, ""),
    }
}

/// Strip noise characters from a stem and lower-case the rest.
#[must_use]
pub fn normalize_stem(stem: &str) -> String {
    stem.chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .collect::<String>()
        .to_lowercase()
}

/// Compute the grouping name for a file.
///
/// The result may be empty when the name consists only of stripped
/// characters and has no extension.
#[must_use]
pub fn normalize_name(file_name: &str) -> String {
    let (stem, extension) = split_extension(file_name);
    let mut normalized = normalize_stem(stem);
    normalized.push_str(extension);
    normalized
}
