//! Read, restore and write a single document.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::table::default_table;
use crate::core::transform::restore_text_with;
use crate::error::RestoreError;
use crate::io::document::{read_document, write_document};

/// Line printed to stdout after a successful restore.
pub const CONFIRMATION: &str = "\u{2713} File restored successfully";

/// Summary of a completed restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub input_bytes: usize,
    pub output_bytes: usize,
    /// Matches replaced by each table entry, in table order.
    pub counts: Vec<usize>,
}

impl RestoreReport {
    pub fn total_replacements(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Restore `source` into `destination`.
///
/// The source is read before the destination is touched, so a missing source
/// leaves the destination as it was. The write itself is temp file + rename.
pub fn restore(source: &Path, destination: &Path) -> Result<RestoreReport, RestoreError> {
    let input = read_document(source)?;
    let table = default_table();
    let transformed = restore_text_with(table, &input);

    for (rule, count) in table.iter().zip(&transformed.counts) {
        if *count > 0 {
            debug!(rule = %rule.describe(), count, "applied substitution");
        }
    }

    write_document(destination, &transformed.text)?;

    let report = RestoreReport {
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        input_bytes: input.len(),
        output_bytes: transformed.text.len(),
        counts: transformed.counts,
    };
    info!(
        source = %report.source.display(),
        destination = %report.destination.display(),
        input_bytes = report.input_bytes,
        output_bytes = report.output_bytes,
        replacements = report.total_replacements(),
        "document restored"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    #[test]
    fn restore_writes_transformed_document() {
        let dir = TestDir::new().expect("tempdir");
        let source = dir.write("in.broken", "a\u{2713}\u{2713}\u{2713}b\r\n\u{274C}\r\n");
        let destination = dir.path().join("out.txt");

        let report = restore(&source, &destination).expect("restore");

        assert_eq!(dir.read("out.txt"), "a  b\nX\n");
        assert_eq!(report.input_bytes, "a\u{2713}\u{2713}\u{2713}b\r\n\u{274C}\r\n".len());
        assert_eq!(report.output_bytes, "a  b\nX\n".len());
        // 3 checkmarks, 1 cross, 2 CRLFs, 1 collapsed run.
        assert_eq!(report.total_replacements(), 7);
    }

    #[test]
    fn restore_overwrites_existing_destination() {
        let dir = TestDir::new().expect("tempdir");
        let source = dir.write("in.broken", "x\u{1F4CB}1");
        let destination = dir.write("out.txt", "stale content from a previous run");

        restore(&source, &destination).expect("restore");

        assert_eq!(dir.read("out.txt"), "x=1");
    }

    #[test]
    fn missing_source_leaves_destination_untouched() {
        let dir = TestDir::new().expect("tempdir");
        let source = dir.path().join("missing.broken");
        let destination = dir.path().join("out.txt");

        let err = restore(&source, &destination).expect_err("restore should fail");

        assert!(matches!(err, RestoreError::ResourceNotFound { .. }));
        assert!(!destination.exists());
    }

    #[test]
    fn missing_source_keeps_prior_destination_content() {
        let dir = TestDir::new().expect("tempdir");
        let source = dir.path().join("missing.broken");
        let destination = dir.write("out.txt", "keep me");

        restore(&source, &destination).expect_err("restore should fail");

        assert_eq!(dir.read("out.txt"), "keep me");
    }

    #[test]
    fn restore_in_place_replaces_source() {
        let dir = TestDir::new().expect("tempdir");
        let path = dir.write("doc.txt", "x\u{2713}\u{1F50D}\u{2713}y\r\n");

        restore(&path, &path).expect("restore");

        assert_eq!(dir.read("doc.txt"), "x < y\n");
    }

    #[test]
    fn unwritable_destination_is_write_error() {
        let dir = TestDir::new().expect("tempdir");
        let source = dir.write("in.broken", "ok");
        let destination = dir.path().join("missing-dir").join("out.txt");

        let err = restore(&source, &destination).expect_err("restore should fail");

        assert!(matches!(err, RestoreError::ResourceWrite { .. }));
        assert_eq!(err.path(), destination.as_path());
    }
}
