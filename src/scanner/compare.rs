//! Byte-for-byte file comparison.
//!
//! # Overview
//!
//! Candidate files already agree on normalized name and size, but equal
//! sizes say nothing about content. [`files_equal`] streams both files
//! through fixed-size buffers and stops at the first differing chunk, so
//! memory use stays flat regardless of file size.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Size of the read buffer used for each side of a comparison.
pub const COMPARE_BUFFER_SIZE: usize = 64 * 1024;

/// Errors that can occur while comparing file contents.
#[derive(thiserror::Error, Debug)]
pub enum CompareError {
    /// Opening, stat-ing or reading one side failed.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl CompareError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Check whether two files have exactly the same content.
///
/// Files of different length are never equal and are rejected without
/// reading any content.
///
/// # Errors
///
/// Returns `CompareError::Io` naming the failing file if either side cannot
/// be opened or read to the end.
///
/// # Example
///
/// ```no_run
/// use treedupe::scanner::files_equal;
/// use std::path::Path;
///
/// if files_equal(Path::new("a.pdf"), Path::new("b.pdf")).unwrap() {
///     println!("identical");
/// }
/// ```
pub fn files_equal(left: &Path, right: &Path) -> Result<bool, CompareError> {
    let left_file = File::open(left).map_err(|e| CompareError::io(left, e))?;
    let right_file = File::open(right).map_err(|e| CompareError::io(right, e))?;

    let left_len = left_file
        .metadata()
        .map_err(|e| CompareError::io(left, e))?
        .len();
    let right_len = right_file
        .metadata()
        .map_err(|e| CompareError::io(right, e))?
        .len();
    if left_len != right_len {
        log::trace!(
            "Size mismatch: {} ({}) vs {} ({})",
            left.display(),
            left_len,
            right.display(),
            right_len
        );
        return Ok(false);
    }

    let mut left_reader = BufReader::with_capacity(COMPARE_BUFFER_SIZE, left_file);
    let mut right_reader = BufReader::with_capacity(COMPARE_BUFFER_SIZE, right_file);
    let mut left_buf = vec![0u8; COMPARE_BUFFER_SIZE];
    let mut right_buf = vec![0u8; COMPARE_BUFFER_SIZE];

    loop {
        let left_read = read_chunk(&mut left_reader, &mut left_buf)
            .map_err(|e| CompareError::io(left, e))?;
        let right_read = read_chunk(&mut right_reader, &mut right_buf)
            .map_err(|e| CompareError::io(right, e))?;

        if left_read != right_read || left_buf[..left_read] != right_buf[..right_read] {
            return Ok(false);
        }
        if left_read == 0 {
            return Ok(true);
        }
    }
}

/// Fill `buf` as far as possible, returning the number of bytes read.
///
/// Unlike a single `read` call this only returns a short count at EOF, so
/// both sides of a comparison stay aligned chunk for chunk.
fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
